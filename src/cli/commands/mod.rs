//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod all;
pub mod export;
pub mod init;
pub mod study;
pub mod validate;
pub mod vocab;
