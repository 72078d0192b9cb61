//! Customer operations: validation, existence and phone checks, then the store.

use crate::error::AppError;
use crate::model::{Customer, CustomerDetail, CustomerWithCount};
use crate::response::{Page, PaginationMeta};
use crate::service::RequestValidator;
use crate::sql::{
    customer_list, delete_customer, insert_customer, select_counted_customer, select_customer_by_phone,
    select_customer_id, update_customer, CustomerListQuery,
};
use crate::store::Store;
use serde_json::Value;

pub struct CustomerService;

impl CustomerService {
    /// One page of customers plus metadata computed from the same filter.
    pub async fn list(store: &Store, query: &CustomerListQuery) -> Result<Page<CustomerDetail>, AppError> {
        let sql = customer_list(query);
        let rows: Vec<CustomerWithCount> = store.fetch_all(&sql.data).await?;
        let (total,): (i64,) = store.fetch_optional(&sql.count).await?.unwrap_or((0,));
        Ok(Page {
            data: rows.into_iter().map(CustomerDetail::from).collect(),
            pagination: PaginationMeta::new(total, query.page, query.page_size),
        })
    }

    pub async fn get(store: &Store, id: i64) -> Result<CustomerDetail, AppError> {
        let row: CustomerWithCount = store
            .fetch_optional(&select_counted_customer(id))
            .await?
            .ok_or_else(AppError::customer_not_found)?;
        Ok(row.into())
    }

    pub async fn create(store: &Store, payload: &Value) -> Result<Customer, AppError> {
        let input = RequestValidator::validate_customer(payload).map_err(AppError::Validation)?;
        ensure_phone_free(store, &input.phone_number, None).await?;
        let created: Customer = store
            .fetch_optional(&insert_customer(&input))
            .await
            .map_err(unique_violation_as_conflict)?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        tracing::info!(customer_id = created.id, "customer created");
        Ok(created)
    }

    /// Returns the plain row, without address count.
    pub async fn update(store: &Store, id: i64, payload: &Value) -> Result<Customer, AppError> {
        let input = RequestValidator::validate_customer(payload).map_err(AppError::Validation)?;
        ensure_exists(store, id).await?;
        ensure_phone_free(store, &input.phone_number, Some(id)).await?;
        store
            .fetch_optional(&update_customer(id, &input))
            .await
            .map_err(unique_violation_as_conflict)?
            .ok_or_else(AppError::customer_not_found)
    }

    /// Addresses owned by the customer are removed by the cascade.
    pub async fn delete(store: &Store, id: i64) -> Result<(), AppError> {
        if store.execute(&delete_customer(id)).await? == 0 {
            return Err(AppError::customer_not_found());
        }
        tracing::info!(customer_id = id, "customer deleted");
        Ok(())
    }
}

pub(crate) async fn ensure_exists(store: &Store, id: i64) -> Result<(), AppError> {
    let found: Option<(i64,)> = store.fetch_optional(&select_customer_id(id)).await?;
    found.map(|_| ()).ok_or_else(AppError::customer_not_found)
}

async fn ensure_phone_free(store: &Store, phone: &str, except: Option<i64>) -> Result<(), AppError> {
    let holder: Option<(i64,)> = store
        .fetch_optional(&select_customer_by_phone(phone, except))
        .await?;
    match holder {
        Some(_) => Err(AppError::duplicate_phone()),
        None => Ok(()),
    }
}

/// A concurrent writer can claim the phone between the check and the write; the UNIQUE
/// constraint catches that and it is reported the same way as the pre-check.
fn unique_violation_as_conflict(err: AppError) -> AppError {
    match err {
        AppError::Db(sqlx::Error::Database(db)) if db.is_unique_violation() => AppError::duplicate_phone(),
        other => other,
    }
}
