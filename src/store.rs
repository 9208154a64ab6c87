//! `parts` table DDL and the PostgreSQL-backed [`PartStore`].

use crate::config::DatabaseSettings;
use crate::error::StoreError;
use crate::model::{NewPart, Part, PartId};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const PART_COLUMNS: &str = "part_id, name, description, quantity, price, category, created_at, updated_at";

/// Result of a full-replace update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// One row changed; carries the stored row.
    Updated(Part),
    /// The row exists but already held the submitted values.
    Unchanged,
    Missing,
}

/// Storage operations behind the `/api/parts` handlers.
#[async_trait]
pub trait PartStore: Send + Sync {
    /// All parts, newest (highest id) first.
    async fn list(&self) -> Result<Vec<Part>, StoreError>;

    async fn get(&self, id: PartId) -> Result<Option<Part>, StoreError>;

    async fn create(&self, part: &NewPart) -> Result<Part, StoreError>;

    async fn update(&self, id: PartId, part: &NewPart) -> Result<UpdateOutcome, StoreError>;

    /// Returns true when a row was removed.
    async fn delete(&self, id: PartId) -> Result<bool, StoreError>;

    /// Round-trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Open the pool and check out one connection so startup fails fast when the database is unreachable.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.pool_size)
        .connect_with(settings.connect_options()?)
        .await?;
    Ok(pool)
}

/// Create the `parts` table if it does not exist.
pub async fn ensure_parts_table(pool: &PgPool) -> Result<(), StoreError> {
    let ddl = r#"
        CREATE TABLE IF NOT EXISTS parts (
            part_id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0),
            price NUMERIC CHECK (price >= 0),
            category TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
    "#;
    sqlx::query(ddl).execute(pool).await?;
    Ok(())
}

#[derive(Clone)]
pub struct PgPartStore {
    pool: PgPool,
}

impl PgPartStore {
    pub fn new(pool: PgPool) -> Self {
        PgPartStore { pool }
    }
}

#[async_trait]
impl PartStore for PgPartStore {
    async fn list(&self) -> Result<Vec<Part>, StoreError> {
        let sql = format!("SELECT {} FROM parts ORDER BY part_id DESC", PART_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Part>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get(&self, id: PartId) -> Result<Option<Part>, StoreError> {
        let sql = format!("SELECT {} FROM parts WHERE part_id = $1", PART_COLUMNS);
        tracing::debug!(sql = %sql, part_id = %id, "query");
        let row = sqlx::query_as::<_, Part>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, part: &NewPart) -> Result<Part, StoreError> {
        let sql = format!(
            "INSERT INTO parts (name, description, quantity, price, category, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, NOW(), NOW()) RETURNING {}",
            PART_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as::<_, Part>(&sql)
            .bind(&part.name)
            .bind(&part.description)
            .bind(part.quantity)
            .bind(part.price)
            .bind(&part.category)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::MissingInsertId)
    }

    /// Both statements run on one checked-out connection; there is no transaction,
    /// so the existence check can observe a concurrent delete or update.
    async fn update(&self, id: PartId, part: &NewPart) -> Result<UpdateOutcome, StoreError> {
        let mut conn = self.pool.acquire().await?;
        // Only touch the row when something differs, so the row count reports changes rather than matches.
        let sql = format!(
            "UPDATE parts SET name = $1, description = $2, quantity = $3, price = $4, category = $5, updated_at = NOW() \
             WHERE part_id = $6 \
             AND (name, description, quantity, price, category) \
             IS DISTINCT FROM ($1::TEXT, $2::TEXT, $3::INTEGER, $4::NUMERIC, $5::TEXT) \
             RETURNING {}",
            PART_COLUMNS
        );
        tracing::debug!(sql = %sql, part_id = %id, "query");
        let mut rows = sqlx::query_as::<_, Part>(&sql)
            .bind(&part.name)
            .bind(&part.description)
            .bind(part.quantity)
            .bind(part.price)
            .bind(&part.category)
            .bind(id.get())
            .fetch_all(&mut *conn)
            .await?;
        match rows.len() {
            1 => Ok(UpdateOutcome::Updated(rows.remove(0))),
            0 => {
                let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM parts WHERE part_id = $1)")
                    .bind(id.get())
                    .fetch_one(&mut *conn)
                    .await?;
                Ok(if exists { UpdateOutcome::Unchanged } else { UpdateOutcome::Missing })
            }
            n => Err(StoreError::UnexpectedRowCount(n as u64)),
        }
    }

    async fn delete(&self, id: PartId) -> Result<bool, StoreError> {
        tracing::debug!(part_id = %id, "delete");
        let result = sqlx::query("DELETE FROM parts WHERE part_id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
