//! Tag-targeted email sequences.
//!
//! Contacts are imported from CSV and grouped by tag. A sequence is an ordered
//! list of emails; dispatching a sequence to a tag sends every step to every
//! contact carrying that tag through an [`mailer::EmailSender`].

pub mod api;
pub mod config;
pub mod dispatch;
pub mod import;
pub mod mailer;
pub mod models;
pub mod store;
