//! DDL and seed data for the `flavors` table.
//! `ensure_schema` is safe on every start; `seed` with `reset` destroys existing rows and only runs on request.

use crate::error::AppError;
use sqlx::PgPool;

/// Rows inserted by the seed step, in id order.
pub const SEED_FLAVORS: [(&str, bool); 4] = [
    ("Vanilla", true),
    ("Chocolate", false),
    ("Strawberry", false),
    ("Mint", true),
];

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS flavors (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        is_favorite BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

const DROP_TABLE: &str = "DROP TABLE IF EXISTS flavors";

/// Empty table with a used sequence: restart ids so seed rows get 1..=4.
const RESTART_IDS: &str = "TRUNCATE flavors RESTART IDENTITY";

const INSERT_SEED: &str = "INSERT INTO flavors (name, is_favorite) VALUES ($1, $2)";

/// Outcome of a seed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(usize),
    /// The table already held rows and `reset` was not requested.
    SkippedNotEmpty(i64),
}

/// Create the table if it does not exist. Never touches existing rows.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(CREATE_TABLE).execute(pool).await?;
    tracing::info!("flavors table ready");
    Ok(())
}

/// Insert the fixed seed rows with ids 1..=4. Without `reset`, a non-empty table
/// is left alone and an empty one has its id sequence restarted. With `reset`,
/// the table is dropped, recreated and seeded in one transaction.
pub async fn seed(pool: &PgPool, reset: bool) -> Result<SeedOutcome, AppError> {
    let mut tx = pool.begin().await?;
    if reset {
        tracing::warn!("dropping and recreating flavors table");
        sqlx::query(DROP_TABLE).execute(&mut *tx).await?;
        sqlx::query(CREATE_TABLE).execute(&mut *tx).await?;
    } else {
        sqlx::query(CREATE_TABLE).execute(&mut *tx).await?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM flavors")
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            tracing::info!(rows = count, "flavors table not empty, seed skipped");
            tx.rollback().await?;
            return Ok(SeedOutcome::SkippedNotEmpty(count));
        }
        sqlx::query(RESTART_IDS).execute(&mut *tx).await?;
    }
    for (name, is_favorite) in SEED_FLAVORS {
        sqlx::query(INSERT_SEED)
            .bind(name)
            .bind(is_favorite)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    tracing::info!(rows = SEED_FLAVORS.len(), "flavors table seeded");
    Ok(SeedOutcome::Seeded(SEED_FLAVORS.len()))
}
