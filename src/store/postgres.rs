//! PostgreSQL accessor. Values are always bound, never formatted into SQL.

use super::FlavorStore;
use crate::config::Settings;
use crate::error::AppError;
use crate::model::{Flavor, NewFlavor};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const SELECT_ALL: &str = "SELECT * FROM flavors ORDER BY id";
const SELECT_BY_ID: &str = "SELECT * FROM flavors WHERE id = $1";
const INSERT: &str = "INSERT INTO flavors (name, is_favorite) VALUES ($1, $2) RETURNING *";
const UPDATE: &str =
    "UPDATE flavors SET name = $1, is_favorite = $2, updated_at = NOW() WHERE id = $3 RETURNING *";
const DELETE: &str = "DELETE FROM flavors WHERE id = $1 RETURNING *";

#[derive(Clone)]
pub struct PgFlavorStore {
    pool: PgPool,
}

impl PgFlavorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open the pool described by `settings`. Fails if the first connection cannot be made.
    pub async fn connect(settings: &Settings) -> Result<PgPool, AppError> {
        let options = settings.connect_options()?;
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(options)
            .await?;
        Ok(pool)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FlavorStore for PgFlavorStore {
    async fn list(&self) -> Result<Vec<Flavor>, AppError> {
        tracing::debug!(sql = %SELECT_ALL, "query");
        let rows = sqlx::query_as::<_, Flavor>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<Flavor>, AppError> {
        tracing::debug!(sql = %SELECT_BY_ID, id, "query");
        let row = sqlx::query_as::<_, Flavor>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, flavor: &NewFlavor) -> Result<Flavor, AppError> {
        tracing::debug!(sql = %INSERT, name = %flavor.name, is_favorite = flavor.is_favorite, "query");
        let row = sqlx::query_as::<_, Flavor>(INSERT)
            .bind(&flavor.name)
            .bind(flavor.is_favorite)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, flavor: &NewFlavor) -> Result<Option<Flavor>, AppError> {
        tracing::debug!(sql = %UPDATE, id, name = %flavor.name, is_favorite = flavor.is_favorite, "query");
        let row = sqlx::query_as::<_, Flavor>(UPDATE)
            .bind(&flavor.name)
            .bind(flavor.is_favorite)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<Option<Flavor>, AppError> {
        tracing::debug!(sql = %DELETE, id, "query");
        let row = sqlx::query_as::<_, Flavor>(DELETE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
