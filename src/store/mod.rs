//! In-memory stores for contacts and sequences.
//!
//! Both stores are cheap to clone handles over shared state and live for the
//! lifetime of the process. Nothing is persisted.

mod contacts;
mod ids;
mod sequences;

pub use contacts::ContactStore;
pub use ids::{IdGenerator, TimestampIds};
pub use sequences::SequenceStore;
