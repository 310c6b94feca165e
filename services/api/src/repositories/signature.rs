//! Order-signature repository for database operations

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::OrderSignature;

const SIGNATURE_COLUMNS: &str = "id, order_id, signature_data, signed_at";

/// Order-signature repository
#[derive(Clone)]
pub struct SignatureRepository {
    pool: PgPool,
}

impl SignatureRepository {
    /// Create a new signature repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The order's signature, if one was collected.
    pub async fn find_for_order(&self, order_id: Uuid) -> sqlx::Result<Option<OrderSignature>> {
        let sql = format!(
            "SELECT {SIGNATURE_COLUMNS} FROM order_signatures WHERE order_id = $1"
        );
        sqlx::query_as::<_, OrderSignature>(&sql)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Store the signature for an order, replacing any earlier one. A
    /// single conditional upsert keeps the one-signature-per-order
    /// invariant under concurrent submissions.
    pub async fn upsert(
        &self,
        order_id: Uuid,
        signature_data: &str,
    ) -> sqlx::Result<OrderSignature> {
        let sql = format!(
            "INSERT INTO order_signatures (order_id, signature_data, signed_at) \
             VALUES ($1, $2, now()) \
             ON CONFLICT (order_id) DO UPDATE \
             SET signature_data = EXCLUDED.signature_data, signed_at = now() \
             RETURNING {SIGNATURE_COLUMNS}"
        );
        sqlx::query_as::<_, OrderSignature>(&sql)
            .bind(order_id)
            .bind(signature_data)
            .fetch_one(&self.pool)
            .await
    }
}
