// Storage backend abstraction
// Decision: Use enum dispatch for backend selection at startup
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use std::sync::Arc;
use workshops_core::{NewWorkshop, WorkshopFilter, WorkshopPatch};

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;
use crate::config::ServerConfig;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend and bring its schema up to date
    pub async fn postgres(database_url: &str, max_connections: u32) -> Result<Self> {
        let db = Database::connect(database_url, max_connections).await?;
        db.migrate().await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Pick the backend from configuration: PostgreSQL when a URL is set
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        match &config.database_url {
            Some(url) => Self::postgres(url, config.database_max_connections).await,
            None => Ok(Self::in_memory()),
        }
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    // ============================================
    // Workshops
    // ============================================

    pub async fn create_workshop(&self, input: NewWorkshop) -> Result<WorkshopRow> {
        match self {
            Self::Postgres(db) => db.create_workshop(input).await,
            Self::InMemory(db) => db.create_workshop(input).await,
        }
    }

    pub async fn get_workshop(&self, id: i64) -> Result<Option<WorkshopRow>> {
        match self {
            Self::Postgres(db) => db.get_workshop(id).await,
            Self::InMemory(db) => db.get_workshop(id).await,
        }
    }

    pub async fn list_workshops(&self, filter: &WorkshopFilter) -> Result<Vec<WorkshopRow>> {
        match self {
            Self::Postgres(db) => db.list_workshops(filter).await,
            Self::InMemory(db) => db.list_workshops(filter).await,
        }
    }

    pub async fn update_workshop(
        &self,
        id: i64,
        input: WorkshopPatch,
    ) -> Result<Option<WorkshopRow>> {
        match self {
            Self::Postgres(db) => db.update_workshop(id, input).await,
            Self::InMemory(db) => db.update_workshop(id, input).await,
        }
    }

    pub async fn delete_workshop(&self, id: i64) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_workshop(id).await,
            Self::InMemory(db) => db.delete_workshop(id).await,
        }
    }
}
