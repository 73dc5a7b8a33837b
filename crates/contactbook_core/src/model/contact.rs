//! Contact domain model.
//!
//! # Responsibility
//! - Define the persisted `Contact` record shape.
//! - Define typed create/update payloads produced by schema validation.
//!
//! # Invariants
//! - `id`, `created_at` and `updated_at` are assigned by the store only.
//! - `NewContact` and `ContactPatch` values are built by the validation
//!   layer; repositories trust their field constraints.

use serde::{Deserialize, Serialize};

/// Store-assigned primary key of a contact.
pub type ContactId = i64;

/// Canonical contact record as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Assigned once on insert, never reused.
    pub id: ContactId,
    /// Unique across all contacts (enforced by the store).
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Refreshed on every update.
    pub updated_at: i64,
}

/// Validated payload for creating one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub company: Option<String>,
}

/// Validated partial update payload.
///
/// `None` means "leave unchanged"; there is no way to clear an optional
/// column through a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

impl ContactPatch {
    /// Returns whether the patch touches no column at all.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.name.is_none()
            && self.phone.is_none()
            && self.company.is_none()
    }

    /// Applies present fields onto `contact`, leaving the rest unchanged.
    ///
    /// Store-owned fields (`id`, timestamps) are never touched.
    pub fn apply_to(&self, contact: &mut Contact) {
        if let Some(email) = &self.email {
            contact.email = email.clone();
        }
        if let Some(name) = &self.name {
            contact.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            contact.phone = Some(phone.clone());
        }
        if let Some(company) = &self.company {
            contact.company = Some(company.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactPatch};

    fn sample() -> Contact {
        Contact {
            id: 7,
            email: "ann@example.com".to_string(),
            name: "Ann".to_string(),
            phone: None,
            company: Some("Acme".to_string()),
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(ContactPatch::default().is_empty());
    }

    #[test]
    fn apply_to_only_touches_present_fields() {
        let mut contact = sample();
        let patch = ContactPatch {
            phone: Some("555-1000".to_string()),
            ..ContactPatch::default()
        };
        patch.apply_to(&mut contact);

        assert_eq!(contact.phone.as_deref(), Some("555-1000"));
        assert_eq!(contact.name, "Ann");
        assert_eq!(contact.company.as_deref(), Some("Acme"));
        assert_eq!(contact.id, 7);
    }
}
