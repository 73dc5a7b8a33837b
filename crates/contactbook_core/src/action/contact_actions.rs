//! Contact create/update/delete actions.
//!
//! # Responsibility
//! - Run one submission through validate -> execute -> invalidate.
//! - Map validation and service failures into `ActionResult` failures.
//!
//! # Invariants
//! - A validation failure never reaches the service.
//! - Invalidation happens only after a successful mutation: the listing
//!   view always, the record view for update and delete.
//! - Panics raised while executing are contained and reported as
//!   `ActionFailure::Unknown`.
//! - Log events carry ids and error codes only, never field values.

use crate::action::form_data::FormData;
use crate::action::invalidation::{contact_view, ViewInvalidator, CONTACTS_VIEW};
use crate::action::result::{ActionFailure, ActionResult, UNEXPECTED_ERROR_MESSAGE};
use crate::model::contact::{Contact, ContactId};
use crate::repo::contact_repo::ContactRepository;
use crate::service::contact_service::{ContactService, ContactServiceError};
use crate::validation::contact_schema::{validate_create, validate_update, ValidationError};
use log::{error, info, warn};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

pub const CONFLICT_EMAIL_MESSAGE: &str = "A contact with this email already exists";
pub const PERSISTENCE_MESSAGE: &str = "Failed to save contact, please try again";

/// Action boundary over one contact service and one view notifier.
pub struct ContactActions<R: ContactRepository, N: ViewInvalidator> {
    service: ContactService<R>,
    notifier: N,
}

impl<R: ContactRepository, N: ViewInvalidator> ContactActions<R, N> {
    pub fn new(service: ContactService<R>, notifier: N) -> Self {
        Self { service, notifier }
    }

    /// Read access for list/detail views, which need no normalization.
    pub fn service(&self) -> &ContactService<R> {
        &self.service
    }

    /// Validates a create submission and inserts the contact.
    ///
    /// On success invalidates [`CONTACTS_VIEW`] only.
    pub fn create_contact(&self, form: &FormData) -> ActionResult<Contact> {
        let started_at = Instant::now();
        let payload = match validate_create(&form.create_fields()) {
            Ok(payload) => payload,
            Err(err) => return validation_failure("create", &err),
        };

        match self.execute("create", || self.service.create(&payload)) {
            Ok(contact) => {
                self.notifier.invalidate(CONTACTS_VIEW);
                info!(
                    "event=contact_action module=action action=create status=ok id={} duration_ms={}",
                    contact.id,
                    started_at.elapsed().as_millis()
                );
                ActionResult::success(contact)
            }
            Err(failure) => failure,
        }
    }

    /// Validates an update submission and applies the present fields.
    ///
    /// A submission with no usable fields is a successful no-op. On success
    /// invalidates [`CONTACTS_VIEW`] and the record view of `id`.
    pub fn update_contact(&self, id: ContactId, form: &FormData) -> ActionResult<Contact> {
        let started_at = Instant::now();
        let patch = match validate_update(&form.update_fields()) {
            Ok(patch) => patch,
            Err(err) => return validation_failure("update", &err),
        };

        match self.execute("update", || self.service.update(id, &patch)) {
            Ok(contact) => {
                self.invalidate_record(id);
                info!(
                    "event=contact_action module=action action=update status=ok id={id} noop={} duration_ms={}",
                    patch.is_empty(),
                    started_at.elapsed().as_millis()
                );
                ActionResult::success(contact)
            }
            Err(failure) => failure,
        }
    }

    /// Permanently deletes one contact.
    ///
    /// Delete carries no submission, so there is nothing to validate. On
    /// success invalidates [`CONTACTS_VIEW`] and the record view of `id`.
    pub fn delete_contact(&self, id: ContactId) -> ActionResult<()> {
        let started_at = Instant::now();

        match self.execute("delete", || self.service.delete(id)) {
            Ok(()) => {
                self.invalidate_record(id);
                info!(
                    "event=contact_action module=action action=delete status=ok id={id} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                ActionResult::done()
            }
            Err(failure) => failure,
        }
    }

    fn invalidate_record(&self, id: ContactId) {
        self.notifier.invalidate(CONTACTS_VIEW);
        self.notifier.invalidate(&contact_view(id));
    }

    fn execute<T, U>(
        &self,
        action: &'static str,
        call: impl FnOnce() -> Result<T, ContactServiceError>,
    ) -> Result<T, ActionResult<U>> {
        match catch_unwind(AssertUnwindSafe(call)) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(service_failure(action, &err)),
            Err(_) => {
                error!(
                    "event=contact_action module=action action={action} status=error error_code=panic"
                );
                Err(ActionResult::failure(
                    ActionFailure::Unknown,
                    UNEXPECTED_ERROR_MESSAGE,
                ))
            }
        }
    }
}

fn validation_failure<T>(action: &'static str, err: &ValidationError) -> ActionResult<T> {
    let fields = err
        .fields()
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(",");
    warn!(
        "event=contact_action module=action action={action} status=rejected error_code=validation fields={fields}"
    );
    ActionResult::failure(ActionFailure::Validation, err.to_string())
}

fn service_failure<T>(action: &'static str, err: &ContactServiceError) -> ActionResult<T> {
    match err {
        ContactServiceError::NotFound(id) => {
            warn!(
                "event=contact_action module=action action={action} status=rejected error_code=not_found id={id}"
            );
            ActionResult::failure(ActionFailure::NotFound, format!("Contact {id} not found"))
        }
        ContactServiceError::Conflict { field } => {
            warn!(
                "event=contact_action module=action action={action} status=rejected error_code=conflict field={field}"
            );
            let message = match *field {
                "email" => CONFLICT_EMAIL_MESSAGE.to_string(),
                other => format!("A contact with this {other} already exists"),
            };
            ActionResult::failure(ActionFailure::Conflict, message)
        }
        ContactServiceError::Persistence(inner) => {
            error!(
                "event=contact_action module=action action={action} status=error error_code=persistence error={inner}"
            );
            ActionResult::failure(ActionFailure::Persistence, PERSISTENCE_MESSAGE)
        }
        ContactServiceError::InconsistentState(details) => {
            error!(
                "event=contact_action module=action action={action} status=error error_code=inconsistent_state error={details}"
            );
            ActionResult::failure(ActionFailure::Unknown, UNEXPECTED_ERROR_MESSAGE)
        }
    }
}
