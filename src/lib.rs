//! Employee Hub - department administration console
//!
//! This crate keeps a per-login view of the organization's departments in
//! sync with a remote directory: listing, adding and deleting departments,
//! showing department details and the managers or employees of a department.

pub mod config;
pub mod console;
pub mod directory;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use console::{Console, ConsoleEvent, ConsoleSession, ConsoleSnapshot};
pub use state::AppState;
