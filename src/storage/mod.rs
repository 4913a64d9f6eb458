//! # Storage Layer
//!
//! Persistence of persona selections behind the [`PersonaStore`] trait.
//! Two backends: an in-memory map and a SQLite file. The backend is picked once
//! at startup by [`open_store`], which falls back to memory whenever the
//! database cannot be opened.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: SQLite backend with silent fallback to memory
//! - 1.0.0: In-memory store

pub mod memory;
pub mod model;
pub mod sqlite;

use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;
use thiserror::Error;

use crate::core::Config;

pub use memory::MemoryStore;
pub use model::{NewPersona, PersonaRecord};
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] ::sqlite::Error),
    #[error("corrupt row: {0}")]
    CorruptRow(String),
    #[error("storage task failed: {0}")]
    Task(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Where persona selections live
#[async_trait]
pub trait PersonaStore: Send + Sync {
    /// Persist a selection and return it with its assigned id
    async fn save_persona(&self, persona: NewPersona) -> StoreResult<PersonaRecord>;

    /// All selections made by a user, oldest first
    async fn personas_by_user(&self, user_id: i64) -> StoreResult<Vec<PersonaRecord>>;

    /// Short backend name for logs and the health endpoint
    fn backend_name(&self) -> &'static str;
}

/// Open the store described by the configuration.
///
/// No `DATABASE_PATH` means memory. A database that fails to open is logged
/// and replaced by memory so the server always starts.
pub fn open_store(config: &Config) -> Arc<dyn PersonaStore> {
    let Some(path) = config.database_path.as_deref() else {
        info!("💾 No DATABASE_PATH set, using in-memory persona storage");
        return Arc::new(MemoryStore::new());
    };

    match SqliteStore::open(path) {
        Ok(store) => {
            info!("💾 Using SQLite persona storage at {path}");
            Arc::new(store)
        }
        Err(e) => {
            warn!("Failed to open SQLite storage at {path}, falling back to memory storage: {e}");
            Arc::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_store_defaults_to_memory() {
        let store = open_store(&Config::default());
        assert_eq!(store.backend_name(), "memory");
    }

    #[test]
    fn test_open_store_uses_sqlite_when_configured() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            database_path: Some(dir.path().join("personas.db").to_string_lossy().into_owned()),
            ..Config::default()
        };
        let store = open_store(&config);
        assert_eq!(store.backend_name(), "sqlite");
    }

    #[test]
    fn test_open_store_falls_back_on_failure() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no/such/dir/personas.db");
        let config = Config {
            database_path: Some(missing.to_string_lossy().into_owned()),
            ..Config::default()
        };
        let store = open_store(&config);
        assert_eq!(store.backend_name(), "memory");
    }
}
