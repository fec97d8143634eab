//! Transaction handlers
//!
//! All validation and sanitization for incoming transaction data lives here:
//! the core treats validated inputs as a precondition and never re-checks.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::{
    normalize_category, sanitize_text, AppError, AppState, SuccessResponse, MAX_PAGE_LIMIT,
    MAX_TEXT_LENGTH,
};
use fincast_core::models::{
    NewTransaction, SortOrder, Transaction, TransactionFilter, TransactionType,
};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Start date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// End date (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Filter to a category
    pub category: Option<String>,
    /// Filter by type (income, expense)
    #[serde(rename = "type")]
    pub tx_type: Option<String>,
    /// Maximum rows to return
    pub limit: Option<i64>,
}

/// Request body for recording a transaction
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    #[serde(rename = "type")]
    pub tx_type: String,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    /// Transaction date (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
}

pub(crate) fn parse_date(value: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::bad_request(&format!("Invalid {} format (use YYYY-MM-DD)", field))
    })
}

/// Validate and sanitize a create request into a core insert shape
pub(crate) fn validate_transaction(
    body: CreateTransactionRequest,
) -> Result<NewTransaction, AppError> {
    let tx_type: TransactionType = body
        .tx_type
        .parse()
        .map_err(|e: String| AppError::bad_request(&e))?;

    if !body.amount.is_finite() || body.amount <= 0.0 {
        return Err(AppError::bad_request("Amount must be a positive number"));
    }

    let category = normalize_category(&body.category);
    if category.is_empty() {
        return Err(AppError::bad_request("Category is required"));
    }

    let description = body
        .description
        .as_deref()
        .map(sanitize_text)
        .filter(|d| !d.is_empty());
    if let Some(ref d) = description {
        if d.len() > MAX_TEXT_LENGTH {
            return Err(AppError::bad_request("Description is too long"));
        }
    }

    let date = match body.date.as_deref() {
        Some(value) => parse_date(value, "date")?,
        None => Utc::now().date_naive(),
    };

    Ok(NewTransaction {
        tx_type,
        amount: body.amount,
        category,
        description,
        date,
    })
}

/// GET /api/transactions - List transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListTransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let start_date = params
        .start_date
        .as_deref()
        .map(|s| parse_date(s, "start_date"))
        .transpose()?;
    let end_date = params
        .end_date
        .as_deref()
        .map(|s| parse_date(s, "end_date"))
        .transpose()?;

    let tx_type = params
        .tx_type
        .as_deref()
        .map(|s| s.parse::<TransactionType>())
        .transpose()
        .map_err(|e| AppError::bad_request(&e))?;

    let limit = params.limit.unwrap_or(100).clamp(1, MAX_PAGE_LIMIT);

    let transactions = state.db.list_transactions(&TransactionFilter {
        start_date,
        end_date,
        category: params.category.as_deref().map(normalize_category),
        tx_type,
        sort: SortOrder::Descending,
        limit: Some(limit),
    })?;

    Ok(Json(transactions))
}

/// POST /api/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    let new_tx = validate_transaction(body)?;

    let id = state.db.insert_transaction(&new_tx)?;
    let stored = state
        .db
        .get_transaction(id)?
        .ok_or_else(|| AppError::internal("Transaction vanished after insert"))?;

    tracing::debug!(id, category = %stored.category, "Transaction recorded");

    Ok(Json(stored))
}

/// DELETE /api/transactions/:id - Remove a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.db.delete_transaction(id)? {
        return Err(AppError::not_found("Transaction not found"));
    }

    Ok(Json(SuccessResponse { success: true }))
}
