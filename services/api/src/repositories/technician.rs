//! Technician repository for database operations

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewTechnician, ProfilePatch, Technician};

const TECHNICIAN_COLUMNS: &str =
    "id, email, password_hash, name, phone, created_at, updated_at";

/// Technician repository
#[derive(Clone)]
pub struct TechnicianRepository {
    pool: PgPool,
}

impl TechnicianRepository {
    /// Create a new technician repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new technician with a salted, hashed credential.
    pub async fn create(&self, new_technician: &NewTechnician) -> Result<Technician> {
        info!("creating technician {}", new_technician.email);

        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(new_technician.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
            .to_string();

        let sql = format!(
            "INSERT INTO technicians (email, password_hash, name) \
             VALUES ($1, $2, $3) \
             RETURNING {TECHNICIAN_COLUMNS}"
        );
        let technician = sqlx::query_as::<_, Technician>(&sql)
            .bind(&new_technician.email)
            .bind(&password_hash)
            .bind(&new_technician.name)
            .fetch_one(&self.pool)
            .await?;

        Ok(technician)
    }

    /// Find a technician by email, compared case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Technician>> {
        let sql = format!(
            "SELECT {TECHNICIAN_COLUMNS} FROM technicians WHERE LOWER(email) = LOWER($1)"
        );
        let technician = sqlx::query_as::<_, Technician>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(technician)
    }

    /// Find a technician by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Technician>> {
        let sql = format!("SELECT {TECHNICIAN_COLUMNS} FROM technicians WHERE id = $1");
        let technician = sqlx::query_as::<_, Technician>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(technician)
    }

    /// Verify a technician's password against the stored hash.
    pub fn verify_password(&self, technician: &Technician, password: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(&technician.password_hash)
            .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Apply a profile patch; omitted fields keep their stored value.
    pub async fn update_profile(
        &self,
        id: Uuid,
        patch: &ProfilePatch,
    ) -> Result<Option<Technician>> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(
            "UPDATE technicians SET updated_at = now()",
        );
        if let Some(name) = &patch.name {
            builder.push(", name = ").push_bind(name.as_deref());
        }
        if let Some(phone) = &patch.phone {
            builder.push(", phone = ").push_bind(phone.as_deref());
        }
        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING ").push(TECHNICIAN_COLUMNS);

        let technician = builder
            .build_query_as::<Technician>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(technician)
    }
}
