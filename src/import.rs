//! CSV contact import.
//!
//! Expects a header row. Recognized columns:
//! - `name`, or `nome` when `name` is missing or empty
//! - `email` (required header)
//! - `tags`, a comma-separated list
//!
//! Other columns are ignored. Values are taken as given; no email validation
//! or deduplication happens here. Bytes that are not valid UTF-8 (legacy
//! spreadsheet exports) are decoded lossily instead of failing the file.

use std::io::Read;

use csv::ReaderBuilder;
use thiserror::Error;

use crate::models::Contact;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
}

/// Parse every data row of a headered CSV into contacts, in file order.
pub fn parse_contacts<R: Read>(reader: R) -> Result<Vec<Contact>, ImportError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.byte_headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| String::from_utf8_lossy(h).trim() == name)
    };

    let email = column("email").ok_or(ImportError::MissingColumn("email"))?;
    let name = column("name");
    let nome = column("nome");
    let tags = column("tags");

    let mut contacts = Vec::new();
    for record in rdr.byte_records() {
        let record = record?;
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(String::from_utf8_lossy)
                .unwrap_or_default()
        };

        let display_name = match field(name) {
            n if n.is_empty() => field(nome),
            n => n,
        };

        contacts.push(Contact {
            name: display_name.to_string(),
            email: field(Some(email)).to_string(),
            tags: parse_tags(&field(tags)),
        });
    }

    Ok(contacts)
}

/// Split a raw tag field on commas and trim each piece. Blank pieces are dropped.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
