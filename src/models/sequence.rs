use serde::{Deserialize, Serialize};

/// A single email within a sequence.
///
/// `body` may contain the `{name}` placeholder, filled with the recipient's
/// name at send time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SequenceStep {
    pub subject: String,
    pub body: String,
}

/// A named, ordered list of steps sent in order to every member of a cohort.
///
/// Sequences are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sequence {
    /// Opaque id assigned by the store's id generator.
    pub id: String,
    pub name: String,
    pub emails: Vec<SequenceStep>,
}

/// Input for creating a new sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSequenceInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub emails: Vec<SequenceStep>,
}

/// Response returned after a sequence is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSequenceResponse {
    pub success: bool,
    pub sequence: Sequence,
}
