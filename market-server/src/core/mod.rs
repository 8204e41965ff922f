//! Core server infrastructure
//!
//! Configuration, shared state and HTTP server startup.

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
