//! Client directory model and payloads
//!
//! Clients are standalone contacts; an order remembers the client's name as
//! free text taken at creation time, so nothing here links to orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::patch::double_option;
use crate::validation::require;

/// Client entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated client creation payload
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
}

/// Client creation request body
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
}

impl CreateClientRequest {
    pub fn validate(self) -> Result<NewClient, String> {
        Ok(NewClient {
            name: require("name", self.name)?,
            phone: require("phone", self.phone)?,
            email: self.email.filter(|v| !v.trim().is_empty()),
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            notes: self.notes,
        })
    }
}

/// Partial update body; required columns stay plain options, optional
/// columns are clearable
#[derive(Debug, Default, Deserialize)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub zip_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Query parameters for the directory listing
#[derive(Debug, Default, Deserialize)]
pub struct ClientQuery {
    /// Free-text search over name, phone and email
    pub q: Option<String>,
}
