//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide single-record CRUD APIs over the `contacts` table.
//! - Translate SQLite failures into semantic repository errors.
//!
//! # Invariants
//! - Email uniqueness is enforced by the `UNIQUE` index, never by a
//!   pre-check query.
//! - Timestamps are assigned by SQL, never bound from caller input.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::ensure_migrated;
use crate::db::DbError;
use crate::model::contact::{Contact, ContactId, ContactPatch, NewContact};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    email,
    name,
    phone,
    company,
    created_at,
    updated_at
FROM contacts";

const NOW_MS_SQL: &str = "CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER)";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// No row with this id.
    NotFound(ContactId),
    /// A unique constraint rejected the write; carries the column name.
    Conflict { field: &'static str },
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::Conflict { field } => write!(f, "unique constraint violated on `{field}`"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::Conflict { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let Some(field) = unique_violation_field(&value) {
            return Self::Conflict { field };
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for contact CRUD operations.
pub trait ContactRepository {
    /// Inserts one contact and returns the store-assigned id.
    fn insert_contact(&self, contact: &NewContact) -> RepoResult<ContactId>;
    /// Lists all contacts, most recently created first.
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    /// Writes only the columns present in `patch` and refreshes `updated_at`.
    fn update_contact(&self, id: ContactId, patch: &ContactPatch) -> RepoResult<()>;
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
    fn count_contacts(&self) -> RepoResult<u64>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `RepoError::Db` when the connection schema is not at the latest
    ///   migration version.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_migrated(conn)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn insert_contact(&self, contact: &NewContact) -> RepoResult<ContactId> {
        self.conn.execute(
            "INSERT INTO contacts (
                email,
                name,
                phone,
                company
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                contact.email.as_str(),
                contact.name.as_str(),
                contact.phone.as_deref(),
                contact.company.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL} ORDER BY created_at DESC, id DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn update_contact(&self, id: ContactId, patch: &ContactPatch) -> RepoResult<()> {
        if patch.is_empty() {
            let exists = self
                .conn
                .query_row("SELECT 1 FROM contacts WHERE id = ?1;", [id], |_| Ok(()))
                .optional()?;
            return exists.ok_or(RepoError::NotFound(id));
        }

        let mut assignments = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();
        let columns = [
            ("email", patch.email.as_ref()),
            ("name", patch.name.as_ref()),
            ("phone", patch.phone.as_ref()),
            ("company", patch.company.as_ref()),
        ];
        for (column, value) in columns {
            if let Some(value) = value {
                assignments.push(format!("{column} = ?"));
                bind_values.push(Value::Text(value.clone()));
            }
        }
        assignments.push(format!("updated_at = {NOW_MS_SQL}"));
        bind_values.push(Value::Integer(id));

        let sql = format!(
            "UPDATE contacts SET {} WHERE id = ?;",
            assignments.join(", ")
        );
        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn count_contacts(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get::<_, i64>(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative contact count `{count}`")))
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let id: ContactId = row.get("id")?;

    let email: String = row.get("email")?;
    if email.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty email in contacts.email for id {id}"
        )));
    }

    let name: String = row.get("name")?;
    if name.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty name in contacts.name for id {id}"
        )));
    }

    Ok(Contact {
        id,
        email,
        name,
        phone: row.get("phone")?,
        company: row.get("company")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

// SQLite reports unique failures as "UNIQUE constraint failed: contacts.email".
fn unique_violation_field(err: &rusqlite::Error) -> Option<&'static str> {
    match err {
        rusqlite::Error::SqliteFailure(inner, message)
            if inner.code == ErrorCode::ConstraintViolation
                && inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            let column = message
                .as_deref()
                .and_then(|text| text.rsplit('.').next())
                .unwrap_or_default();
            Some(match column {
                "email" => "email",
                _ => "unknown",
            })
        }
        _ => None,
    }
}
