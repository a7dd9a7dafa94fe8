// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use workshops_core::Workshop;

// ============================================
// Workshops
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct WorkshopRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl From<WorkshopRow> for Workshop {
    fn from(row: WorkshopRow) -> Self {
        Workshop {
            id: row.id,
            name: row.name,
            description: row.description,
            start_date: row.start_date,
            category: row.category,
            created_at: row.created_at,
        }
    }
}
