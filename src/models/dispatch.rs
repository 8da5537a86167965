use serde::{Deserialize, Serialize};

/// Input for dispatching a sequence to every contact carrying `tag`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchInput {
    #[serde(default)]
    pub tag: String,
    #[serde(rename = "sequenceId", default)]
    pub sequence_id: String,
}

/// Summary of one dispatch run.
///
/// `total` counts contacts in the cohort while `sent` counts successful step
/// sends, so a fully successful run has `sent == total * steps`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispatchResult {
    pub total: usize,
    pub sent: usize,
    pub errors: Vec<DispatchFailure>,
}

/// One failed step send, in the order it happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispatchFailure {
    pub email: String,
    pub error: String,
}
