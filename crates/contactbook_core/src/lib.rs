//! Core domain logic for Contactbook.
//! This crate owns contact validation, persistence and the action boundary
//! consumed by front ends.

pub mod action;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use action::contact_actions::ContactActions;
pub use action::form_data::FormData;
pub use action::invalidation::{
    contact_view, LogInvalidator, RecordingInvalidator, ViewInvalidator, CONTACTS_VIEW,
};
pub use action::result::{ActionFailure, ActionResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, ContactId, ContactPatch, NewContact};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use service::contact_service::{ContactService, ContactServiceError, ContactServiceResult};
pub use validation::contact_schema::{
    validate_create, validate_update, ContactField, FieldIssue, FieldMap, ValidationError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
