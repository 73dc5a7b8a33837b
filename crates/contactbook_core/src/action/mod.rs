//! Action boundary between raw submissions and the contact service.
//!
//! # Responsibility
//! - Adapt browser-style form submissions into validated service calls.
//! - Normalize every outcome into an inspectable `ActionResult`.
//! - Mark affected views stale after successful mutations.
//!
//! # Invariants
//! - Validation strictly precedes execution, which strictly precedes
//!   invalidation.
//! - No error or panic escapes an action call.
//! - Actions keep no state between invocations.

pub mod contact_actions;
pub mod form_data;
pub mod invalidation;
pub mod result;
