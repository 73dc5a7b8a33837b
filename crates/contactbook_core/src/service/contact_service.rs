//! Contact use-case service.
//!
//! # Responsibility
//! - Provide create/find/update/delete/count entry points over one
//!   injected repository.
//! - Read mutated records back so callers always receive store-assigned
//!   fields.
//!
//! # Invariants
//! - Stateless between calls; the repository owns all persisted state.
//! - Every operation touches at most one record.
//! - `find_all` is ordered by `created_at DESC`.

use crate::model::contact::{Contact, ContactId, ContactPatch, NewContact};
use crate::repo::contact_repo::{ContactRepository, RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ContactServiceResult<T> = Result<T, ContactServiceError>;

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ContactServiceError {
    /// Target contact does not exist.
    NotFound(ContactId),
    /// Write rejected by a store uniqueness constraint.
    Conflict { field: &'static str },
    /// Any other store-level failure.
    Persistence(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::Conflict { field } => write!(f, "a contact with this {field} already exists"),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent contact state: {details}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ContactServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Conflict { field } => Self::Conflict { field },
            other => Self::Persistence(other),
        }
    }
}

/// Contact service facade over a repository implementation.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts one contact and returns the stored record.
    pub fn create(&self, payload: &NewContact) -> ContactServiceResult<Contact> {
        let id = self.repo.insert_contact(payload)?;
        self.repo
            .get_contact(id)?
            .ok_or(ContactServiceError::InconsistentState(
                "created contact not found in read-back",
            ))
    }

    /// Lists every contact, most recently created first.
    pub fn find_all(&self) -> RepoResult<Vec<Contact>> {
        self.repo.list_contacts()
    }

    /// Gets one contact by id. Absence is `Ok(None)`.
    pub fn find_by_id(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        self.repo.get_contact(id)
    }

    /// Applies the present fields of `payload` and returns the stored record.
    ///
    /// An empty payload is a successful no-op that still requires `id` to
    /// exist.
    pub fn update(&self, id: ContactId, payload: &ContactPatch) -> ContactServiceResult<Contact> {
        self.repo.update_contact(id, payload)?;
        self.repo
            .get_contact(id)?
            .ok_or(ContactServiceError::InconsistentState(
                "updated contact not found in read-back",
            ))
    }

    /// Permanently removes one contact.
    pub fn delete(&self, id: ContactId) -> ContactServiceResult<()> {
        self.repo.delete_contact(id)?;
        Ok(())
    }

    /// Total number of stored contacts.
    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count_contacts()
    }
}
