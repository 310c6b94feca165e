//! Service-order repository: lifecycle, ownership scoping, cascade delete
//!
//! Every lookup filters by the owning technician in SQL. An order that
//! exists but belongs to someone else comes back as `None`, the same as an
//! absent one.

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewOrder, OrderPatch, OrderStatus, ServiceOrder};

const ORDER_COLUMNS: &str = "id, os_number, technician_id, status, client_name, location, \
     contact_name, contact_phone, problem_description, service_description, internal_notes, \
     start_datetime, completion_datetime, total_value, created_at, updated_at";

/// Service-order repository
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new order owned by `technician_id`. The OS number comes
    /// from the database sequence; `start_datetime` is the insertion time.
    pub async fn create(
        &self,
        technician_id: Uuid,
        order: &NewOrder,
    ) -> sqlx::Result<ServiceOrder> {
        info!("creating service order for technician {technician_id}");

        let sql = format!(
            "INSERT INTO service_orders (technician_id, client_name, location, contact_name, \
             contact_phone, problem_description, service_description, internal_notes, status, \
             start_datetime) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now()) \
             RETURNING {ORDER_COLUMNS}"
        );
        sqlx::query_as::<_, ServiceOrder>(&sql)
            .bind(technician_id)
            .bind(&order.client_name)
            .bind(&order.location)
            .bind(&order.contact_name)
            .bind(&order.contact_phone)
            .bind(&order.problem_description)
            .bind(&order.service_description)
            .bind(&order.internal_notes)
            .bind(order.status)
            .fetch_one(&self.pool)
            .await
    }

    /// All orders owned by the technician, newest first.
    pub async fn list_for(&self, technician_id: Uuid) -> sqlx::Result<Vec<ServiceOrder>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM service_orders \
             WHERE technician_id = $1 \
             ORDER BY start_datetime DESC, created_at DESC"
        );
        sqlx::query_as::<_, ServiceOrder>(&sql)
            .bind(technician_id)
            .fetch_all(&self.pool)
            .await
    }

    /// One order, scoped to its owner.
    pub async fn find(
        &self,
        id: Uuid,
        technician_id: Uuid,
    ) -> sqlx::Result<Option<ServiceOrder>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM service_orders WHERE id = $1 AND technician_id = $2"
        );
        sqlx::query_as::<_, ServiceOrder>(&sql)
            .bind(id)
            .bind(technician_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Whether the order exists and belongs to the technician. Dependent
    /// collections run this before touching their rows, independently of
    /// the gateway's check.
    pub async fn owned(&self, id: Uuid, technician_id: Uuid) -> sqlx::Result<bool> {
        let row = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM service_orders WHERE id = $1 AND technician_id = $2",
        )
        .bind(id)
        .bind(technician_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Apply a partial update. Only supplied fields are written;
    /// `updated_at` always refreshes. Moving to `Concluída` stamps
    /// `completion_datetime`, moving anywhere else clears it.
    pub async fn update(
        &self,
        id: Uuid,
        technician_id: Uuid,
        patch: &OrderPatch,
    ) -> sqlx::Result<Option<ServiceOrder>> {
        let mut builder =
            QueryBuilder::<Postgres>::new("UPDATE service_orders SET updated_at = now()");

        if let Some(client_name) = &patch.client_name {
            builder.push(", client_name = ").push_bind(client_name);
        }
        if let Some(location) = &patch.location {
            builder.push(", location = ").push_bind(location);
        }
        if let Some(contact_name) = &patch.contact_name {
            builder.push(", contact_name = ").push_bind(contact_name);
        }
        if let Some(contact_phone) = &patch.contact_phone {
            builder.push(", contact_phone = ").push_bind(contact_phone);
        }
        if let Some(problem_description) = &patch.problem_description {
            builder
                .push(", problem_description = ")
                .push_bind(problem_description);
        }
        if let Some(service_description) = &patch.service_description {
            builder
                .push(", service_description = ")
                .push_bind(service_description.as_deref());
        }
        if let Some(internal_notes) = &patch.internal_notes {
            builder
                .push(", internal_notes = ")
                .push_bind(internal_notes.as_deref());
        }
        if let Some(total_value) = &patch.total_value {
            builder.push(", total_value = ").push_bind(*total_value);
        }
        if let Some(status) = patch.status {
            builder.push(", status = ").push_bind(status);
            if status == OrderStatus::Completed {
                builder.push(", completion_datetime = now()");
            } else {
                builder.push(", completion_datetime = NULL");
            }
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder
            .push(" AND technician_id = ")
            .push_bind(technician_id);
        builder.push(" RETURNING ").push(ORDER_COLUMNS);

        builder
            .build_query_as::<ServiceOrder>()
            .fetch_optional(&self.pool)
            .await
    }

    /// Delete an order together with all of its dependent records. The
    /// whole cascade runs in one transaction: either everything goes or
    /// nothing does.
    pub async fn delete(&self, id: Uuid, technician_id: Uuid) -> sqlx::Result<bool> {
        let mut tx = self.pool.begin().await?;

        let found = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM service_orders WHERE id = $1 AND technician_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(technician_id)
        .fetch_optional(&mut *tx)
        .await?;

        if found.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM order_photos WHERE order_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM order_parts_replaced WHERE order_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM order_signatures WHERE order_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM service_orders WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("deleted service order {id} and its dependent records");

        Ok(true)
    }
}
