//! Domain model for contact records.
//!
//! # Responsibility
//! - Define the canonical contact record and the payloads used to create
//!   and partially update it.
//!
//! # Invariants
//! - Every stored contact is identified by a store-assigned `ContactId`.
//! - Deletion is permanent; there is no tombstone state.

pub mod contact;
