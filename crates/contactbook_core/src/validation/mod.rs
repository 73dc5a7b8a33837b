//! Input validation for untrusted contact submissions.
//!
//! # Responsibility
//! - Convert loosely-typed field maps into typed contact payloads.
//! - Report every violated field, not just the first one.
//!
//! # Invariants
//! - Validation is pure: no I/O, output depends only on input.
//! - Uniqueness is not checked here; the store owns that constraint.

pub mod contact_schema;
