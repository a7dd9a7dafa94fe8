// Repository layer for PostgreSQL operations

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use workshops_core::{NewWorkshop, WorkshopFilter, WorkshopPatch};

use super::models::*;

/// Migrations embedded at compile time from `migrations/`
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection with an explicit pool size
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        Ok(Self { pool })
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ============================================
    // Workshops
    // ============================================

    pub async fn create_workshop(&self, input: NewWorkshop) -> Result<WorkshopRow> {
        let row = sqlx::query_as::<_, WorkshopRow>(
            r#"
            INSERT INTO workshops (name, description, start_date, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, start_date, category, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.start_date)
        .bind(&input.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_workshop(&self, id: i64) -> Result<Option<WorkshopRow>> {
        let row = sqlx::query_as::<_, WorkshopRow>(
            r#"
            SELECT id, name, description, start_date, category, created_at
            FROM workshops
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_workshops(&self, filter: &WorkshopFilter) -> Result<Vec<WorkshopRow>> {
        let rows = sqlx::query_as::<_, WorkshopRow>(
            r#"
            SELECT id, name, description, start_date, category, created_at
            FROM workshops
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY id ASC
            "#,
        )
        .bind(filter.category.as_deref())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_workshop(
        &self,
        id: i64,
        input: WorkshopPatch,
    ) -> Result<Option<WorkshopRow>> {
        let row = sqlx::query_as::<_, WorkshopRow>(
            r#"
            UPDATE workshops
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                start_date = COALESCE($4, start_date),
                category = COALESCE($5, category)
            WHERE id = $1
            RETURNING id, name, description, start_date, category, created_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.start_date)
        .bind(&input.category)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_workshop(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM workshops WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
