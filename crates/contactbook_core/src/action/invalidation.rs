//! View invalidation targets and notifier implementations.
//!
//! The notifier is fire-and-forget: it returns nothing and must not fail in
//! a way the action layer has to handle.

use crate::model::contact::ContactId;
use log::info;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Listing view shown for all contacts.
pub const CONTACTS_VIEW: &str = "/contacts";

/// Detail view of one contact.
pub fn contact_view(id: ContactId) -> String {
    format!("{CONTACTS_VIEW}/{id}")
}

/// Marks named views stale so they are recomputed on next read.
pub trait ViewInvalidator {
    fn invalidate(&self, view_path: &str);
}

impl<T: ViewInvalidator + ?Sized> ViewInvalidator for &T {
    fn invalidate(&self, view_path: &str) {
        (**self).invalidate(view_path)
    }
}

/// Notifier that only records the invalidation in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogInvalidator;

impl ViewInvalidator for LogInvalidator {
    fn invalidate(&self, view_path: &str) {
        info!("event=view_invalidate module=action status=ok view={view_path}");
    }
}

/// Notifier that collects invalidated views in call order.
#[derive(Debug, Default)]
pub struct RecordingInvalidator {
    views: Mutex<Vec<String>>,
}

impl RecordingInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Views invalidated so far, in call order.
    pub fn views(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Removes and returns the recorded views.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.views.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ViewInvalidator for RecordingInvalidator {
    fn invalidate(&self, view_path: &str) {
        self.lock().push(view_path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{contact_view, RecordingInvalidator, ViewInvalidator};

    #[test]
    fn contact_view_is_nested_under_listing() {
        assert_eq!(contact_view(12), "/contacts/12");
    }

    #[test]
    fn recording_invalidator_keeps_call_order_and_drains() {
        let notifier = RecordingInvalidator::new();
        notifier.invalidate("/contacts");
        notifier.invalidate("/contacts/1");

        assert_eq!(notifier.take(), vec!["/contacts", "/contacts/1"]);
        assert!(notifier.views().is_empty());
    }

    #[test]
    fn references_forward_to_the_inner_notifier() {
        let notifier = RecordingInvalidator::new();
        let borrowed = &notifier;
        borrowed.invalidate("/contacts");
        assert_eq!(notifier.views(), vec!["/contacts"]);
    }
}
