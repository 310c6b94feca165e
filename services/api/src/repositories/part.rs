//! Replaced-part repository for database operations

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewPart, ReplacedPart};

const PART_COLUMNS: &str = "id, order_id, old_part, new_part, part_value, created_at";

/// Replaced-part repository
#[derive(Clone)]
pub struct PartRepository {
    pool: PgPool,
}

impl PartRepository {
    /// Create a new part repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Parts for one order, newest first.
    pub async fn list_for_order(&self, order_id: Uuid) -> sqlx::Result<Vec<ReplacedPart>> {
        let sql = format!(
            "SELECT {PART_COLUMNS} FROM order_parts_replaced \
             WHERE order_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ReplacedPart>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Record a part swap on the order.
    pub async fn add(&self, order_id: Uuid, part: &NewPart) -> sqlx::Result<ReplacedPart> {
        let sql = format!(
            "INSERT INTO order_parts_replaced (order_id, old_part, new_part, part_value) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {PART_COLUMNS}"
        );
        sqlx::query_as::<_, ReplacedPart>(&sql)
            .bind(order_id)
            .bind(&part.old_part)
            .bind(&part.new_part)
            .bind(part.part_value)
            .fetch_one(&self.pool)
            .await
    }

    /// Remove one part; false when it does not belong to that order.
    pub async fn remove(&self, order_id: Uuid, part_id: Uuid) -> sqlx::Result<bool> {
        let deleted = sqlx::query_scalar::<_, Uuid>(
            "DELETE FROM order_parts_replaced WHERE id = $1 AND order_id = $2 RETURNING id",
        )
        .bind(part_id)
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted.is_some())
    }
}
