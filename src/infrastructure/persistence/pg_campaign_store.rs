//! PostgreSQL implementation of the campaign store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use super::memory_campaign_store::{already_exists, not_found};
use crate::domain::entities::{Campaign, CampaignPatch, Link};
use crate::domain::repositories::CampaignStore;
use crate::error::AppError;

/// One row of the `campaigns` table.
#[derive(sqlx::FromRow)]
struct CampaignRow {
    id: String,
    name: String,
    country: String,
    links: Json<Vec<Link>>,
    created_at: DateTime<Utc>,
}

impl From<CampaignRow> for Campaign {
    fn from(row: CampaignRow) -> Self {
        Campaign {
            id: row.id,
            name: row.name,
            country: row.country,
            links: row.links.0,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository storing one row per campaign, links as a `JSONB` array.
///
/// Every mutation is a single `UPDATE`/`INSERT`/`DELETE` statement, so the
/// row lock Postgres takes for the statement provides the per-id atomicity:
/// appending a link is `links = links || $2`, evaluated against the
/// current row version, never a client-side read-modify-write.
pub struct PgCampaignStore {
    pool: Arc<PgPool>,
}

impl PgCampaignStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampaignStore for PgCampaignStore {
    async fn get(&self, id: &str) -> Result<Option<Campaign>, AppError> {
        let row = sqlx::query_as::<_, CampaignRow>(
            r#"
            SELECT id, name, country, links, created_at
            FROM campaigns
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Campaign::from))
    }

    async fn list(&self) -> Result<Vec<Campaign>, AppError> {
        let rows = sqlx::query_as::<_, CampaignRow>(
            r#"
            SELECT id, name, country, links, created_at
            FROM campaigns
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Campaign::from).collect())
    }

    async fn create(&self, campaign: Campaign) -> Result<Campaign, AppError> {
        let result = sqlx::query_as::<_, CampaignRow>(
            r#"
            INSERT INTO campaigns (id, name, country, links, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, country, links, created_at
            "#,
        )
        .bind(&campaign.id)
        .bind(&campaign.name)
        .bind(&campaign.country)
        .bind(Json(&campaign.links))
        .bind(campaign.created_at)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e)
                if e.as_database_error()
                    .is_some_and(|db| db.is_unique_violation()) =>
            {
                Err(already_exists(&campaign.id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, id: &str, patch: CampaignPatch) -> Result<Campaign, AppError> {
        let row = sqlx::query_as::<_, CampaignRow>(
            r#"
            UPDATE campaigns
            SET name = COALESCE($2, name),
                country = COALESCE($3, country)
            WHERE id = $1
            RETURNING id, name, country, links, created_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.country)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Campaign::from).ok_or_else(|| not_found(id))
    }

    async fn add_link(&self, id: &str, link: Link) -> Result<Campaign, AppError> {
        let row = sqlx::query_as::<_, CampaignRow>(
            r#"
            UPDATE campaigns
            SET links = links || $2
            WHERE id = $1
            RETURNING id, name, country, links, created_at
            "#,
        )
        .bind(id)
        .bind(Json([link]))
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Campaign::from).ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
