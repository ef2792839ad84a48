//! Shared utilities
//!
//! Error handling lives here so every layer reports failures the same way.

pub mod error;
