//! # Expense Repository
//!
//! Abstraction over the remote expense store and the driver that executes
//! ledger requests against it. The browser implementation is
//! [`ApiClient`](crate::services::api::ApiClient); tests substitute an
//! in-memory fake.

use async_trait::async_trait;
use shared::{DropdownField, Expense, ExpenseDraft, ExpenseId, ExpenseTypeTotal, Period};

use crate::error::ApiError;
use crate::state::ledger::{LedgerRequest, LedgerResponse};

/// Remote CRUD and aggregation operations on expenses.
///
/// Futures are not `Send`: the dashboard runs on the browser's single thread.
#[async_trait(?Send)]
pub trait ExpenseRepository {
    /// Expenses attributed to `period`, in server order
    async fn list_by_period(&self, period: Period) -> Result<Vec<Expense>, ApiError>;

    /// Sum of amounts per expense type for `period`
    async fn group_by_expense_type(&self, period: Period) -> Result<Vec<ExpenseTypeTotal>, ApiError>;

    /// Vocabulary for one of the entry form's dropdowns
    async fn custom_dropdown(&self, field: DropdownField) -> Result<Vec<String>, ApiError>;

    async fn create(&self, draft: &ExpenseDraft) -> Result<Expense, ApiError>;

    async fn delete_by_id(&self, id: &ExpenseId) -> Result<(), ApiError>;

    async fn delete_batch(&self, ids: &[ExpenseId]) -> Result<(), ApiError>;
}

/// Run one ledger request and package its outcome for the controller
pub async fn execute<R>(repository: &R, request: LedgerRequest) -> LedgerResponse
where
    R: ExpenseRepository + ?Sized,
{
    match request {
        LedgerRequest::FetchRows { ticket, period } => LedgerResponse::Rows {
            ticket,
            result: repository.list_by_period(period).await,
        },
        LedgerRequest::FetchChart { ticket, period } => LedgerResponse::Chart {
            ticket,
            period,
            result: repository.group_by_expense_type(period).await,
        },
        LedgerRequest::Create { draft } => LedgerResponse::Created {
            result: repository.create(&draft).await,
        },
        LedgerRequest::DeleteOne { id } => {
            let result = repository.delete_by_id(&id).await;
            LedgerResponse::DeletedOne { id, result }
        }
        LedgerRequest::DeleteBatch { ids } => {
            let result = repository.delete_batch(&ids).await;
            LedgerResponse::DeletedBatch { ids, result }
        }
    }
}
