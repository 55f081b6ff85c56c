//! Work item repository for database operations

use anyhow::Result;
use common::model::Work;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewWork, WorkChanges};

/// Work item repository
#[derive(Clone)]
pub struct WorkRepository {
    pool: PgPool,
}

impl WorkRepository {
    /// Create a new work repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all work items owned by a user
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Work>> {
        let works = sqlx::query_as::<_, Work>(
            r#"
            SELECT id, title, description, status, end_date, created_at, owner_id
            FROM work
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(works)
    }

    /// Insert a new work item
    pub async fn create(&self, new_work: &NewWork) -> Result<Work> {
        info!("Creating work item for user: {}", new_work.owner_id);

        let work = sqlx::query_as::<_, Work>(
            r#"
            INSERT INTO work (id, title, description, status, end_date, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, status, end_date, created_at, owner_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_work.title)
        .bind(&new_work.description)
        .bind(new_work.status)
        .bind(new_work.end_date)
        .bind(new_work.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(work)
    }

    /// Apply partial changes to a work item
    ///
    /// The lookup is by id only, not scoped to an owner (see DESIGN.md).
    /// Returns `None` when no row matched.
    pub async fn update(&self, id: Uuid, changes: &WorkChanges) -> Result<Option<Work>> {
        let work = sqlx::query_as::<_, Work>(
            r#"
            UPDATE work
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                end_date = CASE WHEN $5 THEN $6 ELSE end_date END
            WHERE id = $1
            RETURNING id, title, description, status, end_date, created_at, owner_id
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.status)
        .bind(changes.end_date.is_some())
        .bind(changes.end_date.flatten())
        .fetch_optional(&self.pool)
        .await?;

        Ok(work)
    }

    /// Delete a work item if it exists
    ///
    /// Unconditional and not scoped to an owner; deleting an unknown id
    /// is a no-op.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM work WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
