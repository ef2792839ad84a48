//! HTTP server implementation
//!
//! This module serves the recorder's exports, health and dashboard over HTTP.

pub mod routes;

pub mod builder;
pub mod server;
pub mod state;
mod utils;


pub use builder::{ServerBuilder, load_config, run_server};
pub use server::HttpServer;
pub use state::AppState;
