use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{DropdownField, Expense, ExpenseDraft, ExpenseId, ExpenseTypeTotal, Period};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::services::repository::ExpenseRepository;

/// API client for the expenses REST service
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_base_url(config.api_base_url.clone())
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn list_url(&self, period: Period) -> String {
        format!(
            "{}/expenses?month={}&year={}",
            self.base_url,
            period.month.ordinal(),
            period.year
        )
    }

    pub fn group_by_url(&self, period: Period) -> String {
        format!(
            "{}/expenses/groupBy?month={}&year={}&groupBy=expenseType",
            self.base_url,
            period.month.ordinal(),
            period.year
        )
    }

    pub fn dropdown_url(&self, field: DropdownField) -> String {
        format!(
            "{}/expenses/getCustomDropdowns?field={}",
            self.base_url,
            field.as_query_value()
        )
    }

    pub fn create_url(&self, past: bool) -> String {
        if past {
            format!("{}/expenses/past", self.base_url)
        } else {
            format!("{}/expenses", self.base_url)
        }
    }

    pub fn delete_one_url(&self, id: &ExpenseId) -> String {
        format!("{}/expenses/id/{}", self.base_url, urlencoding::encode(id.as_str()))
    }

    pub fn delete_batch_url(&self, ids: &[ExpenseId]) -> String {
        let query = ids
            .iter()
            .map(|id| format!("ids={}", urlencoding::encode(id.as_str())))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}/expenses?{}", self.base_url, query)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    check_status(&response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn check_status(response: &Response) -> Result<(), ApiError> {
    if response.ok() {
        return Ok(());
    }
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ApiError::Status { status, body })
}

fn network(e: gloo::net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

#[async_trait(?Send)]
impl ExpenseRepository for ApiClient {
    async fn list_by_period(&self, period: Period) -> Result<Vec<Expense>, ApiError> {
        let response = Request::get(&self.list_url(period))
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn group_by_expense_type(&self, period: Period) -> Result<Vec<ExpenseTypeTotal>, ApiError> {
        let response = Request::get(&self.group_by_url(period))
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn custom_dropdown(&self, field: DropdownField) -> Result<Vec<String>, ApiError> {
        let response = Request::get(&self.dropdown_url(field))
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn create(&self, draft: &ExpenseDraft) -> Result<Expense, ApiError> {
        let request = match draft.to_past_request() {
            Some(body) => Request::post(&self.create_url(true)).json(&body),
            None => Request::post(&self.create_url(false)).json(&draft.to_request()),
        }
        .map_err(|e| ApiError::Encode(e.to_string()))?;

        let response = request.send().await.map_err(network)?;
        read_json(response).await
    }

    async fn delete_by_id(&self, id: &ExpenseId) -> Result<(), ApiError> {
        let response = Request::delete(&self.delete_one_url(id))
            .send()
            .await
            .map_err(network)?;
        check_status(&response).await
    }

    async fn delete_batch(&self, ids: &[ExpenseId]) -> Result<(), ApiError> {
        let response = Request::delete(&self.delete_batch_url(ids))
            .send()
            .await
            .map_err(network)?;
        check_status(&response).await
    }
}
