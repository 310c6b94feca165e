//! Integration tests for the identity store and capability round trip.
//!
//! These tests need a running PostgreSQL instance, so they are ignored
//! unless run explicitly with `cargo test -- --ignored`.

use api::jwt::{JwtConfig, JwtService};
use api::models::{NewTechnician, Technician};
use api::repositories::TechnicianRepository;
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

fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4())
}

async fn register(repo: &TechnicianRepository, email: &str, password: &str) -> Technician {
    repo.create(&NewTechnician {
        email: email.to_string(),
        password: password.to_string(),
        name: Some("Tester".to_string()),
    })
    .await
    .expect("failed to create technician")
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance (set DATABASE_URL)"]
async fn register_then_authenticate_resolves_to_the_same_technician() {
    let pool = setup_pool().await;
    let repo = TechnicianRepository::new(pool.clone());

    let email = unique_email("auth");
    let technician = register(&repo, &email, "correct horse battery").await;

    // The stored credential verifies, and only for the right password.
    let found = repo
        .find_by_email(&email)
        .await
        .expect("lookup failed")
        .expect("registered technician not found");
    assert!(repo.verify_password(&found, "correct horse battery").unwrap());
    assert!(!repo.verify_password(&found, "wrong password").unwrap());

    // The issued capability resolves back to the same identity.
    let jwt = JwtService::new(&JwtConfig {
        secret: "integration-test-secret".to_string(),
        token_expiry: 3600,
    });
    let token = jwt.issue(found.id, &found.email).expect("issue failed");
    let claims = jwt.resolve(&token).expect("resolve failed");
    assert_eq!(claims.sub, technician.id);
    assert_eq!(claims.email, email);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance (set DATABASE_URL)"]
async fn email_lookup_is_case_insensitive() {
    let pool = setup_pool().await;
    let repo = TechnicianRepository::new(pool.clone());

    let email = unique_email("case");
    let technician = register(&repo, &email, "longenough").await;

    let found = repo
        .find_by_email(&email.to_uppercase())
        .await
        .expect("lookup failed")
        .expect("uppercased lookup missed the technician");
    assert_eq!(found.id, technician.id);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance (set DATABASE_URL)"]
async fn profile_patch_updates_and_clears_fields() {
    let pool = setup_pool().await;
    let repo = TechnicianRepository::new(pool.clone());

    let technician = register(&repo, &unique_email("profile"), "longenough").await;

    let patch: api::models::ProfilePatch =
        serde_json::from_str(r#"{"name": "Rita", "phone": "+5511988887777"}"#).unwrap();
    let updated = repo
        .update_profile(technician.id, &patch)
        .await
        .expect("update failed")
        .expect("technician vanished");
    assert_eq!(updated.name.as_deref(), Some("Rita"));
    assert_eq!(updated.phone.as_deref(), Some("+5511988887777"));

    // Explicit null clears; an omitted field is untouched.
    let patch: api::models::ProfilePatch = serde_json::from_str(r#"{"phone": null}"#).unwrap();
    let updated = repo
        .update_profile(technician.id, &patch)
        .await
        .expect("update failed")
        .expect("technician vanished");
    assert_eq!(updated.name.as_deref(), Some("Rita"));
    assert_eq!(updated.phone, None);
}
