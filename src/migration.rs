//! Schema setup. Every statement is `IF NOT EXISTS`, so running it on each start is safe.

use crate::error::AppError;
use crate::store::Store;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        phone_number TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS addresses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_id INTEGER NOT NULL,
        address_details TEXT NOT NULL,
        city TEXT NOT NULL,
        state TEXT NOT NULL,
        pin_code TEXT NOT NULL,
        FOREIGN KEY (customer_id) REFERENCES customers(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_addresses_customer_id ON addresses (customer_id)",
];

/// Create the customers and addresses tables. Call once before serving traffic.
pub async fn ensure_schema(store: &Store) -> Result<(), AppError> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(store.pool()).await?;
    }
    tracing::info!("schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_setup_is_idempotent() {
        let store = Store::in_memory().await.unwrap();
        ensure_schema(&store).await.unwrap();
        ensure_schema(&store).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('customers', 'addresses') ORDER BY name",
        )
        .fetch_all(store.pool())
        .await
        .unwrap();
        assert_eq!(tables, vec![("addresses".to_string(),), ("customers".to_string(),)]);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let store = Store::in_memory().await.unwrap();
        ensure_schema(&store).await.unwrap();

        let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(enabled, 1);

        let orphan = sqlx::query(
            "INSERT INTO addresses (customer_id, address_details, city, state, pin_code) VALUES (999, '1 Main St', 'Austin', 'TX', '78701')",
        )
        .execute(store.pool())
        .await;
        assert!(orphan.is_err());
    }
}
