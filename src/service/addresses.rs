//! Address operations, always scoped to an existing customer.

use crate::error::AppError;
use crate::model::Address;
use crate::service::customers::ensure_exists;
use crate::service::RequestValidator;
use crate::sql::{address_list, delete_address, insert_address, update_address, AddressFilter};
use crate::store::Store;
use serde_json::Value;

pub struct AddressService;

impl AddressService {
    /// Addresses of one customer matching every given filter, newest first.
    /// An unknown customer simply has no addresses.
    pub async fn list(store: &Store, customer_id: i64, filter: &AddressFilter) -> Result<Vec<Address>, AppError> {
        store
            .fetch_all(&address_list(customer_id, &filter.normalized()))
            .await
    }

    pub async fn create(store: &Store, customer_id: i64, payload: &Value) -> Result<Address, AppError> {
        let input = RequestValidator::validate_address(payload).map_err(AppError::Validation)?;
        ensure_exists(store, customer_id).await?;
        let created: Address = store
            .fetch_optional(&insert_address(customer_id, &input))
            .await
            .map_err(foreign_key_violation_as_missing_customer)?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        tracing::info!(customer_id, address_id = created.id, "address created");
        Ok(created)
    }

    pub async fn update(store: &Store, id: i64, payload: &Value) -> Result<Address, AppError> {
        let input = RequestValidator::validate_address(payload).map_err(AppError::Validation)?;
        store
            .fetch_optional(&update_address(id, &input))
            .await?
            .ok_or_else(AppError::address_not_found)
    }

    pub async fn delete(store: &Store, id: i64) -> Result<(), AppError> {
        if store.execute(&delete_address(id)).await? == 0 {
            return Err(AppError::address_not_found());
        }
        tracing::info!(address_id = id, "address deleted");
        Ok(())
    }
}

/// The customer can be deleted between the existence check and the insert.
fn foreign_key_violation_as_missing_customer(err: AppError) -> AppError {
    match err {
        AppError::Db(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => AppError::customer_not_found(),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::ensure_schema;
    use crate::model::AddressInput;

    fn input() -> AddressInput {
        AddressInput {
            address_details: "12 Congress Ave".into(),
            city: "Austin".into(),
            state: "TX".into(),
            pin_code: "78701".into(),
        }
    }

    #[tokio::test]
    async fn insert_for_missing_customer_maps_to_not_found() {
        let store = Store::in_memory().await.unwrap();
        ensure_schema(&store).await.unwrap();

        let err = store
            .fetch_optional::<Address>(&insert_address(4242, &input()))
            .await
            .map_err(foreign_key_violation_as_missing_customer)
            .unwrap_err();
        match err {
            AppError::NotFound(message) => assert_eq!(message, "Customer not found"),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_errors_pass_through() {
        let err = foreign_key_violation_as_missing_customer(AppError::Db(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, AppError::Db(sqlx::Error::PoolTimedOut)));
    }
}
