//! Technician identity model and auth payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::patch::double_option;
use crate::validation::{validate_email, validate_password};

/// Technician entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Technician {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New technician creation payload, validated
#[derive(Debug, Clone)]
pub struct NewTechnician {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Signup request body
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

impl SignupRequest {
    /// Validate the request at the boundary.
    pub fn validate(self) -> Result<NewTechnician, String> {
        let email = self.email.unwrap_or_default();
        validate_email(&email)?;

        let password = self.password.unwrap_or_default();
        validate_password(&password)?;

        Ok(NewTechnician {
            email,
            password,
            name: self.name.filter(|n| !n.trim().is_empty()),
        })
    }
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Profile update body; both fields are clearable
#[derive(Debug, Default, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }
}

/// Technician as exposed to callers; never carries the credential hash
#[derive(Debug, Clone, Serialize)]
pub struct TechnicianResponse {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Technician> for TechnicianResponse {
    fn from(technician: Technician) -> Self {
        Self {
            id: technician.id,
            email: technician.email,
            name: technician.name,
            phone: technician.phone,
            created_at: technician.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_requires_email_and_strong_password() {
        let missing_email = SignupRequest {
            email: None,
            password: Some("longenough".into()),
            name: None,
        };
        assert!(missing_email.validate().is_err());

        let weak = SignupRequest {
            email: Some("tech@example.com".into()),
            password: Some("short".into()),
            name: None,
        };
        assert!(weak.validate().is_err());

        let ok = SignupRequest {
            email: Some("tech@example.com".into()),
            password: Some("longenough".into()),
            name: Some("Rita".into()),
        };
        let new = ok.validate().expect("valid signup rejected");
        assert_eq!(new.email, "tech@example.com");
        assert_eq!(new.name.as_deref(), Some("Rita"));
    }

    #[test]
    fn response_never_serializes_the_hash() {
        let technician = Technician {
            id: Uuid::new_v4(),
            email: "tech@example.com".into(),
            password_hash: "argon2-hash".into(),
            name: None,
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&TechnicianResponse::from(technician)).unwrap();
        assert!(!json.contains("argon2-hash"));
    }
}
