//! Integration tests for telegram-api-monitor
//!
//! These tests drive the public API the way the bot and the HTTP layer do,
//! without mocking.

pub mod config_tests;
pub mod http_tests;
pub mod recorder_tests;
