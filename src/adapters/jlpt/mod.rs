//! JLPT vocabulary adapter
//!
//! One GET per level against the public vocabulary API, decoded through
//! [`LevelPayload`].

pub mod client;
pub mod models;

pub use client::{JlptVocabClient, VocabService};
pub use models::{LevelPayload, VocabEntry};
