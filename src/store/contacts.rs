use std::sync::{Arc, PoisonError, RwLock};

use crate::models::Contact;

/// Append-only contact list, filtered by tag on read.
#[derive(Debug, Clone, Default)]
pub struct ContactStore {
    contacts: Arc<RwLock<Vec<Contact>>>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append contacts in order. Duplicates are kept.
    pub fn append(&self, contacts: Vec<Contact>) {
        let mut guard = self
            .contacts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.extend(contacts);
    }

    /// Snapshot of the contacts carrying `tag`, or all contacts when `tag` is `None`.
    ///
    /// Matching is exact and case-sensitive. Insertion order is preserved.
    pub fn list_by_tag(&self, tag: Option<&str>) -> Vec<Contact> {
        let guard = self
            .contacts
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        match tag {
            Some(tag) => guard.iter().filter(|c| c.has_tag(tag)).cloned().collect(),
            None => guard.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.contacts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
