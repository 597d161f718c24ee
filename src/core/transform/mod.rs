//! Data transformation logic
//!
//! Pure steps between the remote services and the sinks:
//!
//! - [`tags`]: note to tag lookup built from one bulk request
//! - [`rows`]: card info to [`crate::domain::CardRow`]
//! - [`reviews`]: both review history shapes to [`crate::domain::ReviewRow`]
//! - [`vocab`]: level tagging and concatenation of vocabulary entries

pub mod reviews;
pub mod rows;
pub mod tags;
pub mod vocab;

pub use rows::RowBuilder;
pub use tags::TagIndex;
pub use vocab::VocabFrame;
