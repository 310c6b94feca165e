//! Service order entity, status machine, and order payloads

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::patch::double_option;
use crate::validation::require;

/// Lifecycle status of a service order. The wire labels are the ones the
/// field application has always shown its users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status")]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Pendente")]
    #[sqlx(rename = "Pendente")]
    Pending,
    #[serde(rename = "Em Andamento")]
    #[sqlx(rename = "Em Andamento")]
    InProgress,
    #[serde(rename = "Concluída")]
    #[sqlx(rename = "Concluída")]
    Completed,
    #[serde(rename = "Cancelada")]
    #[sqlx(rename = "Cancelada")]
    Cancelled,
}

impl OrderStatus {
    /// A terminal status is one no further transition is expected from.
    /// Nothing rejects such a transition; callers that care should check.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

/// Service order entity. `technician_id` never changes after creation and
/// every lookup is filtered by it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceOrder {
    pub id: Uuid,
    pub os_number: i64,
    pub technician_id: Uuid,
    pub status: OrderStatus,
    pub client_name: String,
    pub location: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub problem_description: String,
    pub service_description: Option<String>,
    pub internal_notes: Option<String>,
    pub start_datetime: DateTime<Utc>,
    pub completion_datetime: Option<DateTime<Utc>>,
    pub total_value: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated order creation payload
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub client_name: String,
    pub location: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub problem_description: String,
    pub service_description: Option<String>,
    pub internal_notes: Option<String>,
    pub status: OrderStatus,
}

/// Order creation request body
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub problem_description: Option<String>,
    pub service_description: Option<String>,
    pub internal_notes: Option<String>,
    pub status: Option<OrderStatus>,
}

impl CreateOrderRequest {
    /// Validate the five mandatory fields at the boundary.
    pub fn validate(self) -> Result<NewOrder, String> {
        Ok(NewOrder {
            client_name: require("client_name", self.client_name)?,
            location: require("location", self.location)?,
            contact_name: require("contact_name", self.contact_name)?,
            contact_phone: require("contact_phone", self.contact_phone)?,
            problem_description: require("problem_description", self.problem_description)?,
            service_description: self.service_description.filter(|s| !s.trim().is_empty()),
            internal_notes: self.internal_notes.filter(|s| !s.trim().is_empty()),
            status: self.status.unwrap_or_default(),
        })
    }
}

/// Partial update body. Never-null columns use plain `Option`; clearable
/// columns use the double-option so an explicit `null` clears them while an
/// omitted field keeps the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct OrderPatch {
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub problem_description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub service_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub internal_notes: Option<Option<String>>,
    pub status: Option<OrderStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub total_value: Option<Option<Decimal>>,
}
