//! Integration tests for the service-order lifecycle, ownership scoping,
//! dependent-record consistency and cascade deletion.
//!
//! These tests need a running PostgreSQL instance, so they are ignored
//! unless run explicitly with `cargo test -- --ignored`.

use api::models::{
    NewOrder, NewPart, NewPhoto, NewTechnician, MediaType, OrderPatch, OrderStatus, PhotoType,
    parts_total,
};
use api::repositories::{
    OrderRepository, PartRepository, PhotoRepository, SignatureRepository, TechnicianRepository,
};
use rust_decimal_macros::dec;
use serial_test::serial;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

async fn setup_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for integration tests");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("failed to connect to the test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to apply migrations");
    pool
}

async fn technician(pool: &PgPool) -> Uuid {
    TechnicianRepository::new(pool.clone())
        .create(&NewTechnician {
            email: format!("orders-{}@example.com", Uuid::new_v4()),
            password: "longenough".to_string(),
            name: Some("Tester".to_string()),
        })
        .await
        .expect("failed to create technician")
        .id
}

fn acme_order() -> NewOrder {
    NewOrder {
        client_name: "Acme".to_string(),
        location: "Rua X".to_string(),
        contact_name: "Joao".to_string(),
        contact_phone: "+551199999999".to_string(),
        problem_description: "no cooling".to_string(),
        service_description: None,
        internal_notes: None,
        status: OrderStatus::Pending,
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance (set DATABASE_URL)"]
async fn order_lifecycle_from_pending_to_completed() {
    let pool = setup_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let parts = PartRepository::new(pool.clone());
    let owner = technician(&pool).await;

    let order = orders.create(owner, &acme_order()).await.expect("create failed");
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.completion_datetime.is_none());
    assert!(order.os_number > 0);

    parts
        .add(order.id, &NewPart {
            old_part: "compressor".into(),
            new_part: "compressor embraco".into(),
            part_value: Some(dec!(50.00)),
        })
        .await
        .expect("add part failed");
    parts
        .add(order.id, &NewPart {
            old_part: "relay".into(),
            new_part: "relay danfoss".into(),
            part_value: Some(dec!(25.50)),
        })
        .await
        .expect("add part failed");

    let listed = parts.list_for_order(order.id).await.expect("list failed");
    assert_eq!(parts_total(&listed), dec!(75.50));

    let patch = OrderPatch {
        status: Some(OrderStatus::Completed),
        ..Default::default()
    };
    let completed = orders
        .update(order.id, owner, &patch)
        .await
        .expect("update failed")
        .expect("order vanished");
    assert_eq!(completed.status, OrderStatus::Completed);
    let completion = completed.completion_datetime.expect("completion missing");
    assert!(completion >= completed.start_datetime);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance (set DATABASE_URL)"]
async fn orders_are_invisible_to_other_technicians() {
    let pool = setup_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let owner = technician(&pool).await;
    let intruder = technician(&pool).await;

    let order = orders.create(owner, &acme_order()).await.expect("create failed");

    // Reads, updates and deletes by another technician all behave as if
    // the order did not exist.
    assert!(orders.find(order.id, intruder).await.unwrap().is_none());
    let patch = OrderPatch {
        status: Some(OrderStatus::Cancelled),
        ..Default::default()
    };
    assert!(orders.update(order.id, intruder, &patch).await.unwrap().is_none());
    assert!(!orders.delete(order.id, intruder).await.unwrap());

    // The owner still sees it untouched.
    let mine = orders.find(order.id, owner).await.unwrap().expect("missing");
    assert_eq!(mine.status, OrderStatus::Pending);
    assert_eq!(
        orders.list_for(intruder).await.unwrap().iter().filter(|o| o.id == order.id).count(),
        0
    );
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance (set DATABASE_URL)"]
async fn deleting_an_order_removes_every_dependent_record() {
    let pool = setup_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let photos = PhotoRepository::new(pool.clone());
    let parts = PartRepository::new(pool.clone());
    let signatures = SignatureRepository::new(pool.clone());
    let owner = technician(&pool).await;

    let order = orders.create(owner, &acme_order()).await.expect("create failed");
    photos
        .add(order.id, &NewPhoto {
            media_url: "https://cdn.example.com/before.jpg".into(),
            photo_type: PhotoType::Problem,
            media_type: MediaType::Image,
            duration_seconds: None,
        })
        .await
        .expect("add photo failed");
    parts
        .add(order.id, &NewPart {
            old_part: "thermostat".into(),
            new_part: "thermostat new".into(),
            part_value: Some(dec!(30.00)),
        })
        .await
        .expect("add part failed");
    signatures
        .upsert(order.id, "data:image/png;base64,AAAA")
        .await
        .expect("upsert failed");

    assert!(orders.delete(order.id, owner).await.expect("delete failed"));

    // Dependents are queried directly: empty results, not errors, and no
    // orphaned rows.
    assert!(photos.list_for_order(order.id).await.unwrap().is_empty());
    assert!(parts.list_for_order(order.id).await.unwrap().is_empty());
    assert!(signatures.find_for_order(order.id).await.unwrap().is_none());
    assert!(orders.find(order.id, owner).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance (set DATABASE_URL)"]
async fn second_signature_overwrites_the_first() {
    let pool = setup_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let signatures = SignatureRepository::new(pool.clone());
    let owner = technician(&pool).await;

    let order = orders.create(owner, &acme_order()).await.expect("create failed");

    signatures
        .upsert(order.id, "data:image/png;base64,FIRST")
        .await
        .expect("first upsert failed");
    signatures
        .upsert(order.id, "data:image/png;base64,SECOND")
        .await
        .expect("second upsert failed");

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM order_signatures WHERE order_id = $1")
            .bind(order.id)
            .fetch_one(&pool)
            .await
            .expect("count failed");
    assert_eq!(count, 1);

    let stored = signatures
        .find_for_order(order.id)
        .await
        .unwrap()
        .expect("signature missing");
    assert_eq!(stored.signature_data, "data:image/png;base64,SECOND");
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance (set DATABASE_URL)"]
async fn os_numbers_grow_and_are_never_reused() {
    let pool = setup_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let owner = technician(&pool).await;

    let first = orders.create(owner, &acme_order()).await.expect("create failed");
    let second = orders.create(owner, &acme_order()).await.expect("create failed");
    assert!(second.os_number > first.os_number);

    // Deleting the newest order must not free its number.
    assert!(orders.delete(second.id, owner).await.expect("delete failed"));
    let third = orders.create(owner, &acme_order()).await.expect("create failed");
    assert!(third.os_number > second.os_number);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance (set DATABASE_URL)"]
async fn partial_update_keeps_omitted_fields_and_clears_nulled_ones() {
    let pool = setup_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let owner = technician(&pool).await;

    let order = orders.create(owner, &acme_order()).await.expect("create failed");

    let patch: OrderPatch = serde_json::from_str(
        r#"{"service_description": "cleaned condenser", "internal_notes": "call back in a week"}"#,
    )
    .unwrap();
    let updated = orders
        .update(order.id, owner, &patch)
        .await
        .unwrap()
        .expect("order vanished");
    assert_eq!(updated.service_description.as_deref(), Some("cleaned condenser"));
    assert_eq!(updated.internal_notes.as_deref(), Some("call back in a week"));

    // Omitting service_description keeps it; nulling internal_notes clears it.
    let patch: OrderPatch = serde_json::from_str(r#"{"internal_notes": null}"#).unwrap();
    let updated = orders
        .update(order.id, owner, &patch)
        .await
        .unwrap()
        .expect("order vanished");
    assert_eq!(updated.service_description.as_deref(), Some("cleaned condenser"));
    assert_eq!(updated.internal_notes, None);
    assert_eq!(updated.client_name, "Acme");
    assert!(updated.updated_at >= order.updated_at);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance (set DATABASE_URL)"]
async fn terminal_statuses_are_not_enforced() {
    // Nothing rejects a transition out of a terminal status; reopening a
    // completed order clears its completion timestamp. This pins down a
    // deliberate design decision rather than an accident.
    let pool = setup_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let owner = technician(&pool).await;

    let order = orders.create(owner, &acme_order()).await.expect("create failed");

    let complete = OrderPatch {
        status: Some(OrderStatus::Completed),
        ..Default::default()
    };
    let completed = orders
        .update(order.id, owner, &complete)
        .await
        .unwrap()
        .expect("order vanished");
    assert!(completed.completion_datetime.is_some());

    let reopen = OrderPatch {
        status: Some(OrderStatus::InProgress),
        ..Default::default()
    };
    let reopened = orders
        .update(order.id, owner, &reopen)
        .await
        .unwrap()
        .expect("order vanished");
    assert_eq!(reopened.status, OrderStatus::InProgress);
    assert!(reopened.completion_datetime.is_none());
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance (set DATABASE_URL)"]
async fn concurrent_field_updates_are_last_write_wins() {
    // No optimistic concurrency token: two sessions writing different
    // fields both land, and a second write to the same field silently
    // replaces the first. Documented weak consistency, not serializability.
    let pool = setup_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let owner = technician(&pool).await;

    let order = orders.create(owner, &acme_order()).await.expect("create failed");

    let session_a = OrderPatch {
        location: Some("Rua Y".to_string()),
        ..Default::default()
    };
    let session_b = OrderPatch {
        contact_name: Some("Maria".to_string()),
        ..Default::default()
    };
    orders.update(order.id, owner, &session_a).await.unwrap().expect("order vanished");
    let merged = orders
        .update(order.id, owner, &session_b)
        .await
        .unwrap()
        .expect("order vanished");

    assert_eq!(merged.location, "Rua Y");
    assert_eq!(merged.contact_name, "Maria");
}
