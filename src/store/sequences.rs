use std::sync::{Arc, PoisonError, RwLock};

use crate::models::{Sequence, SequenceStep};

use super::ids::{IdGenerator, TimestampIds};

/// Append-only list of sequences with lookup by id.
#[derive(Clone)]
pub struct SequenceStore {
    sequences: Arc<RwLock<Vec<Sequence>>>,
    ids: Arc<dyn IdGenerator>,
}

impl SequenceStore {
    pub fn new() -> Self {
        Self::with_ids(Arc::new(TimestampIds::new()))
    }

    pub fn with_ids(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            sequences: Arc::new(RwLock::new(Vec::new())),
            ids,
        }
    }

    /// Store a new sequence under a freshly generated id and return it.
    pub fn create(&self, name: String, emails: Vec<SequenceStep>) -> Sequence {
        let sequence = Sequence {
            id: self.ids.next_id(),
            name,
            emails,
        };
        self.sequences
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sequence.clone());
        sequence
    }

    /// All sequences in creation order.
    pub fn list(&self) -> Vec<Sequence> {
        self.sequences
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Sequence> {
        self.sequences
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }
}

impl Default for SequenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SequenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceStore")
            .field("sequences", &self.sequences)
            .finish_non_exhaustive()
    }
}
