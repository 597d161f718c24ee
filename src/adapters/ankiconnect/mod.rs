//! AnkiConnect adapter
//!
//! This module provides the integration with the AnkiConnect add-on: the
//! [`StudyService`] trait, its HTTP implementation and the wire models.

pub mod client;
pub mod models;
pub mod service;

pub use client::AnkiConnectClient;
pub use models::{CardInfo, CardReviewEntry, DayCount, NoteInfo, ReviewLogEntry, ReviewsByCard};
pub use service::StudyService;
