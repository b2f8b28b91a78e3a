//! Integration tests for the PostgreSQL document store
//!
//! These tests need a reachable PostgreSQL server (see `DATABASE_URL`) and are
//! ignored by default. Run them with `cargo test -- --ignored`.

use common::{
    collection::Filter,
    database::{DatabaseConfig, health_check, init_pool},
};
use serde_json::{Value, json};
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a running PostgreSQL server"]
async fn test_document_store_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env("postgres")?;
    let database = init_pool(&config).await?;
    assert!(health_check(&database).await?, "Database health check failed");

    let name = format!("it_{}", Uuid::new_v4().simple());
    database.ensure_collections(&[name.as_str()]).await?;
    let collection = database.collection(&name)?;

    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    collection
        .insert_one(first, &json!({ "id": first, "title": "Rust notes", "tags": ["lang"] }))
        .await?;
    collection
        .insert_one(second, &json!({ "id": second, "title": "Groceries", "tags": ["FOOD"] }))
        .await?;

    let all: Vec<Value> = collection.find_many(&Filter::All).await?;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["id"], json!(first));

    let hits: Vec<Value> = collection
        .find_many(&Filter::any_field_contains(&["title", "tags"], "food"))
        .await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], json!(second));

    let updated: Option<Value> = collection
        .update_one(&Filter::Id(first), &json!({ "title": "Rust" }))
        .await?;
    let updated = updated.expect("document should match");
    assert_eq!(updated["title"], "Rust");
    assert_eq!(updated["tags"], json!(["lang"]));

    assert_eq!(collection.delete_one(&Filter::Id(first)).await?, 1);
    assert_eq!(collection.delete_one(&Filter::Id(first)).await?, 0);

    let pool = sqlx::PgPool::connect(&config.database_url).await?;
    sqlx::query(&format!(r#"DROP TABLE IF EXISTS "{name}""#))
        .execute(&pool)
        .await?;
    pool.close().await;

    Ok(())
}
