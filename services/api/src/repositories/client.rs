//! Client-directory repository for database operations
//!
//! Directory records carry no ownership scoping: any authenticated
//! technician may read or write any client.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{Client, ClientPatch, NewClient};

const CLIENT_COLUMNS: &str = "id, name, phone, email, address, city, state, zip_code, notes, \
     created_by, created_at, updated_at";

/// Client-directory repository
#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    /// Create a new client repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All clients ordered by name, optionally narrowed by a free-text
    /// term matched against name, phone and email.
    pub async fn search(&self, term: Option<&str>) -> sqlx::Result<Vec<Client>> {
        let sql = format!(
            "SELECT {CLIENT_COLUMNS} FROM clients \
             WHERE $1::text IS NULL \
                OR name ILIKE '%' || $1 || '%' \
                OR phone ILIKE '%' || $1 || '%' \
                OR email ILIKE '%' || $1 || '%' \
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, Client>(&sql)
            .bind(term)
            .fetch_all(&self.pool)
            .await
    }

    /// Find a client by ID
    pub async fn find_by_id(&self, id: Uuid) -> sqlx::Result<Option<Client>> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Create a new directory record, noting which technician added it.
    pub async fn create(
        &self,
        created_by: Uuid,
        client: &NewClient,
    ) -> sqlx::Result<Client> {
        let sql = format!(
            "INSERT INTO clients (name, phone, email, address, city, state, zip_code, notes, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {CLIENT_COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&sql)
            .bind(&client.name)
            .bind(&client.phone)
            .bind(&client.email)
            .bind(&client.address)
            .bind(&client.city)
            .bind(&client.state)
            .bind(&client.zip_code)
            .bind(&client.notes)
            .bind(created_by)
            .fetch_one(&self.pool)
            .await
    }

    /// Apply a partial update; only supplied fields are written.
    pub async fn update(&self, id: Uuid, patch: &ClientPatch) -> sqlx::Result<Option<Client>> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE clients SET updated_at = now()");

        if let Some(name) = &patch.name {
            builder.push(", name = ").push_bind(name);
        }
        if let Some(phone) = &patch.phone {
            builder.push(", phone = ").push_bind(phone);
        }
        if let Some(email) = &patch.email {
            builder.push(", email = ").push_bind(email.as_deref());
        }
        if let Some(address) = &patch.address {
            builder.push(", address = ").push_bind(address.as_deref());
        }
        if let Some(city) = &patch.city {
            builder.push(", city = ").push_bind(city.as_deref());
        }
        if let Some(state) = &patch.state {
            builder.push(", state = ").push_bind(state.as_deref());
        }
        if let Some(zip_code) = &patch.zip_code {
            builder.push(", zip_code = ").push_bind(zip_code.as_deref());
        }
        if let Some(notes) = &patch.notes {
            builder.push(", notes = ").push_bind(notes.as_deref());
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING ").push(CLIENT_COLUMNS);

        builder
            .build_query_as::<Client>()
            .fetch_optional(&self.pool)
            .await
    }

    /// Delete a client; false when the id is unknown.
    pub async fn delete(&self, id: Uuid) -> sqlx::Result<bool> {
        let deleted =
            sqlx::query_scalar::<_, Uuid>("DELETE FROM clients WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(deleted.is_some())
    }
}
