//! Transaction helpers.
//!
//! Handlers pass a closure over the open transaction; commit happens on
//! `Ok`, rollback on `Err`. Mutating game operations go through
//! [`with_write_txn`], which additionally holds the process-wide write
//! lock for the whole check-then-write sequence.

use sea_orm::{DatabaseTransaction, TransactionTrait};
use std::future::Future;
use std::pin::Pin;

use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'c> FnOnce(
        &'c DatabaseTransaction,
    ) -> Pin<Box<dyn Future<Output = Result<R, AppError>> + 'c>>,
{
    let db = require_db(state)?;
    let txn = db.begin().await?;
    match f(&txn).await {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            // Rollback failure is unreportable past the original error.
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

/// Like [`with_txn`], but serialized against every other writer.
pub async fn with_write_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'c> FnOnce(
        &'c DatabaseTransaction,
    ) -> Pin<Box<dyn Future<Output = Result<R, AppError>> + 'c>>,
{
    let _guard = state.acquire_write_lock().await;
    with_txn(state, f).await
}
