//! Data model for tagmail.
//!
//! - [`Contact`]: a recipient with free-form tags. Append-only, never mutated.
//! - [`Sequence`]: an ordered list of [`SequenceStep`]s sent to a tagged cohort.
//! - [`DispatchResult`]: the per-run summary of one dispatch, built fresh for each call.

mod contact;
mod dispatch;
mod sequence;

pub use contact::*;
pub use dispatch::*;
pub use sequence::*;
