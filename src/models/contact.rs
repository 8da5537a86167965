use serde::{Deserialize, Serialize};

/// A recipient that can be targeted by tag.
///
/// Contacts carry no identity of their own: two records with the same email
/// are both kept and both receive mail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub email: String,
    /// Tags in import order. Empty when the source row had no tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Contact {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Query parameters for listing contacts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListContactsQuery {
    pub tag: Option<String>,
}

/// Response returned after a contact import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub success: bool,
    pub imported: usize,
}
