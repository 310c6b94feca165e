//! Integration tests for the client directory.
//!
//! These tests need a running PostgreSQL instance, so they are ignored
//! unless run explicitly with `cargo test -- --ignored`.

use api::models::{ClientPatch, NewClient, NewTechnician};
use api::repositories::{ClientRepository, TechnicianRepository};
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
            email: format!("clients-{}@example.com", Uuid::new_v4()),
            password: "longenough".to_string(),
            name: Some("Tester".to_string()),
        })
        .await
        .expect("failed to create technician")
        .id
}

fn new_client(name: &str, phone: &str, email: Option<&str>) -> NewClient {
    NewClient {
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.map(str::to_string),
        address: None,
        city: None,
        state: None,
        zip_code: None,
        notes: None,
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance (set DATABASE_URL)"]
async fn free_text_search_matches_name_phone_and_email() {
    let pool = setup_pool().await;
    let clients = ClientRepository::new(pool.clone());
    let creator = technician(&pool).await;

    let marker = Uuid::new_v4().simple().to_string();
    clients
        .create(creator, &new_client(&format!("Geladeiras {marker}"), "+5511900000001", None))
        .await
        .expect("create failed");
    clients
        .create(creator, &new_client("Acme Frio", &format!("+55119{marker}"), None))
        .await
        .expect("create failed");
    clients
        .create(
            creator,
            &new_client("Sorveteria Polar", "+5511900000003", Some(&format!("{marker}@acme.com"))),
        )
        .await
        .expect("create failed");

    let found = clients.search(Some(&marker)).await.expect("search failed");
    assert_eq!(found.len(), 3);

    // Case-insensitive on names, ordered alphabetically.
    let by_name = clients
        .search(Some(&format!("geladeiras {marker}")))
        .await
        .expect("search failed");
    assert_eq!(by_name.len(), 1);
    assert!(by_name[0].name.starts_with("Geladeiras"));
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance (set DATABASE_URL)"]
async fn directory_records_are_not_ownership_scoped() {
    // Any authenticated technician may read and write any client record;
    // only the creating technician is remembered on the row.
    let pool = setup_pool().await;
    let clients = ClientRepository::new(pool.clone());
    let creator = technician(&pool).await;

    let client = clients
        .create(creator, &new_client("Padaria Estrela", "+5511900000004", None))
        .await
        .expect("create failed");
    assert_eq!(client.created_by, Some(creator));

    let patch: ClientPatch =
        serde_json::from_str(r#"{"notes": "prefers morning visits"}"#).unwrap();
    let updated = clients
        .update(client.id, &patch)
        .await
        .expect("update failed")
        .expect("client vanished");
    assert_eq!(updated.notes.as_deref(), Some("prefers morning visits"));

    // Explicit null clears the optional column.
    let patch: ClientPatch = serde_json::from_str(r#"{"notes": null}"#).unwrap();
    let cleared = clients
        .update(client.id, &patch)
        .await
        .expect("update failed")
        .expect("client vanished");
    assert_eq!(cleared.notes, None);

    assert!(clients.delete(client.id).await.expect("delete failed"));
    assert!(clients.find_by_id(client.id).await.unwrap().is_none());
}
