// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: Sequential i64 ids starting at 1, never reused after delete
//
// This implementation mirrors the PostgreSQL repository API backed by an
// ordered map, allowing the control-plane to run without a database for
// development and tests.

use anyhow::Result;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use workshops_core::{NewWorkshop, Workshop, WorkshopFilter, WorkshopPatch};

use super::models::*;

#[derive(Default)]
struct Tables {
    workshops: BTreeMap<i64, WorkshopRow>,
    // Last id handed out; mirrors a BIGSERIAL sequence
    workshop_seq: i64,
}

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    tables: RwLock<Tables>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================
    // Workshops
    // ============================================

    pub async fn create_workshop(&self, input: NewWorkshop) -> Result<WorkshopRow> {
        let mut tables = self.tables.write();
        tables.workshop_seq += 1;
        let row = WorkshopRow {
            id: tables.workshop_seq,
            name: input.name,
            description: input.description,
            start_date: input.start_date,
            category: input.category,
            created_at: Utc::now(),
        };
        tables.workshops.insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn get_workshop(&self, id: i64) -> Result<Option<WorkshopRow>> {
        Ok(self.tables.read().workshops.get(&id).cloned())
    }

    pub async fn list_workshops(&self, filter: &WorkshopFilter) -> Result<Vec<WorkshopRow>> {
        let tables = self.tables.read();
        // BTreeMap iteration is already ordered by id
        Ok(tables
            .workshops
            .values()
            .filter(|row| filter.matches_category(&row.category))
            .cloned()
            .collect())
    }

    pub async fn update_workshop(
        &self,
        id: i64,
        input: WorkshopPatch,
    ) -> Result<Option<WorkshopRow>> {
        let mut tables = self.tables.write();
        let Some(row) = tables.workshops.get_mut(&id) else {
            return Ok(None);
        };

        let mut workshop = Workshop::from(row.clone());
        input.apply_to(&mut workshop);
        row.name = workshop.name;
        row.description = workshop.description;
        row.start_date = workshop.start_date;
        row.category = workshop.category;

        Ok(Some(row.clone()))
    }

    pub async fn delete_workshop(&self, id: i64) -> Result<bool> {
        Ok(self.tables.write().workshops.remove(&id).is_some())
    }
}
