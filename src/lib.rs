//! Multi-user To-Do Server Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;
pub mod session;
pub mod templates;

pub use config::Config;
pub use db::{close_database, open_database, open_in_memory, Db};
pub use error::{AppError, Result};
pub use routes::router;
pub use security::PasswordHasher;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
    pub hasher: PasswordHasher,
}

impl AppState {
    /// Create a new AppState with the given database and configuration
    pub fn new(db: Db, config: Config) -> Result<Self> {
        let hasher = PasswordHasher::new(config.password_hash_cost)?;
        Ok(Self { db, config, hasher })
    }
}
