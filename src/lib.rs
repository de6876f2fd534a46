//! Tender API Library
//!
//! This crate provides the core functionality for the tender management
//! service: the tender mutation engine, its storage boundary and the HTTP
//! adapters around them.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use db::{DbPool, SqliteStore};
pub use services::TenderService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Database connection pool
    pub db: DbPool,
    /// SQLite-backed entity store
    pub store: Arc<SqliteStore>,
    /// Tender mutation engine
    pub tenders: Arc<TenderService>,
}

impl AppState {
    /// Assemble the state: one store over the pool, one engine over the store
    pub fn new(config: AppConfig, db: DbPool) -> Self {
        let store = Arc::new(SqliteStore::new(db.clone()));
        let tenders = Arc::new(TenderService::new(store.clone(), store.clone()));
        Self {
            config,
            db,
            store,
            tenders,
        }
    }
}
