//! Customer signature model, at most one per order

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::require;

/// Signature entity; `order_id` is unique, so a second submission
/// overwrites the first
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderSignature {
    pub id: Uuid,
    pub order_id: Uuid,
    pub signature_data: String,
    pub signed_at: DateTime<Utc>,
}

/// Upsert request body
#[derive(Debug, Deserialize)]
pub struct UpsertSignatureRequest {
    pub signature_data: Option<String>,
}

impl UpsertSignatureRequest {
    pub fn validate(self) -> Result<String, String> {
        require("signature_data", self.signature_data)
    }
}
