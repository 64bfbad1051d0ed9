//! # Shoe Repository
//!
//! Database operations for saved shoe configurations.
//!
//! Rows store catalog ids only. Prices and rule checks are computed from
//! `shoelab-core` by the caller, never persisted.
//!
//! ## Partial Updates
//! ```text
//! PATCH { "colorId": 21, "laceColorId": 53 }
//!      │
//!      ▼
//! ShoeConfig::provided() → [(colorId, 21), (laceColorId, 53)]
//!      │
//!      ▼
//! UPDATE shoes SET color_id = ?, lace_color_id = ? WHERE id = ? RETURNING ...
//! ```
//! Column names come from [`ShoeField::column`], never from the request, so
//! the dynamic SET list is not an injection vector.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations::SHOES_SCHEMA;
use shoelab_core::{FieldValue, NewShoe, Shoe, ShoeConfig};

const SHOE_COLUMNS: &str = "id, shoe_name, size_id, brand_id, type_id, color_id, \
                            cushion_id, cushion_color_id, lace_color_id";

/// The row a fresh database starts with.
///
/// Its size id (62) is outside the size catalog and the 6..=12 guard. It is
/// inserted directly and never passes through validation.
pub fn demo_shoe() -> NewShoe {
    NewShoe {
        shoe_name: "My New Daily Runners".to_string(),
        size_id: 62,
        brand_id: 1,
        type_id: 10,
        color_id: 20,
        cushion_id: 32,
        cushion_color_id: 41,
        lace_color_id: 51,
    }
}

/// Builds `UPDATE shoes SET ... WHERE id = ? RETURNING ...` for the fields
/// present in `patch`, or `None` when there are none.
fn set_query(id: i64, patch: &ShoeConfig) -> Option<QueryBuilder<'_, Sqlite>> {
    let provided = patch.provided();
    if provided.is_empty() {
        return None;
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE shoes SET ");
    let mut assignments = builder.separated(", ");
    for (field, value) in provided {
        assignments.push(field.column());
        assignments.push_unseparated(" = ");
        match value {
            FieldValue::Text(text) => assignments.push_bind_unseparated(text),
            FieldValue::Id(value) => assignments.push_bind_unseparated(value),
        };
    }
    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING ");
    builder.push(SHOE_COLUMNS);

    Some(builder)
}

/// Repository for shoe database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.shoes();
///
/// let saved = repo.insert(&new_shoe).await?;
/// let same = repo.get_by_id(saved.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ShoeRepository {
    pool: SqlitePool,
}

impl ShoeRepository {
    /// Creates a new ShoeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShoeRepository { pool }
    }

    /// Lists every saved shoe, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Shoe>> {
        let shoes = sqlx::query_as::<_, Shoe>(&format!(
            "SELECT {} FROM shoes ORDER BY id ASC",
            SHOE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = shoes.len(), "Listed shoes");
        Ok(shoes)
    }

    /// Gets a shoe by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Shoe))` - Shoe found
    /// * `Ok(None)` - No such id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Shoe>> {
        let shoe = sqlx::query_as::<_, Shoe>(&format!(
            "SELECT {} FROM shoes WHERE id = ?1",
            SHOE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shoe)
    }

    /// Inserts a new shoe and returns it with its assigned id.
    pub async fn insert(&self, shoe: &NewShoe) -> DbResult<Shoe> {
        debug!(name = %shoe.shoe_name, "Inserting shoe");

        let saved = sqlx::query_as::<_, Shoe>(&format!(
            r#"
            INSERT INTO shoes (
                shoe_name, size_id, brand_id, type_id,
                color_id, cushion_id, cushion_color_id, lace_color_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING {}
            "#,
            SHOE_COLUMNS
        ))
        .bind(&shoe.shoe_name)
        .bind(shoe.size_id)
        .bind(shoe.brand_id)
        .bind(shoe.type_id)
        .bind(shoe.color_id)
        .bind(shoe.cushion_id)
        .bind(shoe.cushion_color_id)
        .bind(shoe.lace_color_id)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = saved.id, "Inserted shoe");
        Ok(saved)
    }

    /// Applies the fields present in `patch` and returns the updated row.
    ///
    /// Absent fields keep their stored value. A patch with no fields returns
    /// the row unchanged.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No such id
    pub async fn update(&self, id: i64, patch: &ShoeConfig) -> DbResult<Shoe> {
        debug!(id, fields = patch.provided().len(), "Updating shoe");

        let Some(mut builder) = set_query(id, patch) else {
            return self
                .get_by_id(id)
                .await?
                .ok_or_else(|| DbError::not_found("Shoe", id));
        };

        builder
            .build_query_as::<Shoe>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Shoe", id))
    }

    /// Applies `patch` only if `check` accepts the stored row merged with it.
    ///
    /// The read, the check and the write share one transaction that takes
    /// the SQLite write lock before reading, so concurrent checked updates
    /// of the same row run one after the other and each checks the state
    /// the previous one left. Nothing is written when `check` fails.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound.into())` - No such id
    /// * `Err(e)` - `check` rejected the merged configuration
    pub async fn update_checked<E, F>(&self, id: i64, patch: &ShoeConfig, check: F) -> Result<Shoe, E>
    where
        E: From<DbError>,
        F: FnOnce(&ShoeConfig) -> Result<(), E>,
    {
        debug!(id, fields = patch.provided().len(), "Updating shoe (checked)");

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        // A write as the first statement acquires the write lock (waiting out
        // other writers) before the row is read.
        let claimed = sqlx::query("UPDATE shoes SET id = id WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;
        if claimed.rows_affected() == 0 {
            return Err(DbError::not_found("Shoe", id).into());
        }

        let current = sqlx::query_as::<_, Shoe>(&format!(
            "SELECT {} FROM shoes WHERE id = ?1",
            SHOE_COLUMNS
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(DbError::from)?;

        check(&current.merged(patch))?;

        let updated = match set_query(id, patch) {
            Some(mut builder) => builder
                .build_query_as::<Shoe>()
                .fetch_one(&mut *tx)
                .await
                .map_err(DbError::from)?,
            None => current,
        };

        tx.commit().await.map_err(DbError::from)?;
        Ok(updated)
    }

    /// Deletes a shoe.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No such id
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting shoe");

        let result = sqlx::query("DELETE FROM shoes WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Shoe", id));
        }

        Ok(())
    }

    /// Counts saved shoes.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shoes")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Inserts [`demo_shoe`] when the table is empty.
    ///
    /// Returns whether a row was inserted.
    pub async fn seed_if_empty(&self) -> DbResult<bool> {
        if self.count().await? > 0 {
            debug!("Shoes table already populated, skipping seed");
            return Ok(false);
        }

        let seeded = self.insert(&demo_shoe()).await?;
        info!(id = seeded.id, name = %seeded.shoe_name, "Seeded demo shoe");
        Ok(true)
    }

    /// Drops and recreates the `shoes` table, then seeds the demo row.
    ///
    /// Runs in one transaction: a failure leaves the previous table intact.
    pub async fn reset(&self) -> DbResult<Shoe> {
        let mut tx = self.pool.begin().await?;

        info!("Dropping shoes table");
        sqlx::query("DROP TABLE IF EXISTS shoes")
            .execute(&mut *tx)
            .await?;

        info!("Creating shoes table");
        sqlx::raw_sql(SHOES_SCHEMA).execute(&mut *tx).await?;

        let demo = demo_shoe();
        let seeded = sqlx::query_as::<_, Shoe>(&format!(
            r#"
            INSERT INTO shoes (
                shoe_name, size_id, brand_id, type_id,
                color_id, cushion_id, cushion_color_id, lace_color_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING {}
            "#,
            SHOE_COLUMNS
        ))
        .bind(&demo.shoe_name)
        .bind(demo.size_id)
        .bind(demo.brand_id)
        .bind(demo.type_id)
        .bind(demo.color_id)
        .bind(demo.cushion_id)
        .bind(demo.cushion_color_id)
        .bind(demo.lace_color_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(id = seeded.id, "Shoes table reset");
        Ok(seeded)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
