//! Order-photo repository for database operations

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewPhoto, OrderPhoto};

const PHOTO_COLUMNS: &str =
    "id, order_id, media_url, photo_type, media_type, duration_seconds, uploaded_at";

/// Order-photo repository
#[derive(Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    /// Create a new photo repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Photos for one order, newest upload first.
    pub async fn list_for_order(&self, order_id: Uuid) -> sqlx::Result<Vec<OrderPhoto>> {
        let sql = format!(
            "SELECT {PHOTO_COLUMNS} FROM order_photos \
             WHERE order_id = $1 ORDER BY uploaded_at DESC"
        );
        sqlx::query_as::<_, OrderPhoto>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Attach an uploaded photo or clip to the order.
    pub async fn add(&self, order_id: Uuid, photo: &NewPhoto) -> sqlx::Result<OrderPhoto> {
        let sql = format!(
            "INSERT INTO order_photos (order_id, media_url, photo_type, media_type, duration_seconds) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {PHOTO_COLUMNS}"
        );
        sqlx::query_as::<_, OrderPhoto>(&sql)
            .bind(order_id)
            .bind(&photo.media_url)
            .bind(photo.photo_type)
            .bind(photo.media_type)
            .bind(photo.duration_seconds)
            .fetch_one(&self.pool)
            .await
    }

    /// Remove one photo; false when it does not belong to that order.
    pub async fn remove(&self, order_id: Uuid, photo_id: Uuid) -> sqlx::Result<bool> {
        let deleted = sqlx::query_scalar::<_, Uuid>(
            "DELETE FROM order_photos WHERE id = $1 AND order_id = $2 RETURNING id",
        )
        .bind(photo_id)
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted.is_some())
    }
}
