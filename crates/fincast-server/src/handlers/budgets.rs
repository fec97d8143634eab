//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{normalize_category, AppError, AppState, SuccessResponse};
use fincast_core::models::{Budget, NewBudget, TransactionType};

/// Request body for setting a budget
#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    pub category: String,
    pub amount: f64,
    /// Budget type (income, expense); defaults to expense
    #[serde(rename = "type")]
    pub budget_type: Option<String>,
}

/// GET /api/budgets - List all budgets
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Budget>>, AppError> {
    let budgets = state.db.list_budgets()?;
    Ok(Json(budgets))
}

/// POST /api/budgets - Create or replace the budget for a category
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBudgetRequest>,
) -> Result<Json<Budget>, AppError> {
    let category = normalize_category(&body.category);
    if category.is_empty() {
        return Err(AppError::bad_request("Category is required"));
    }

    if !body.amount.is_finite() || body.amount <= 0.0 {
        return Err(AppError::bad_request("Amount must be a positive number"));
    }

    let budget_type = match body.budget_type.as_deref() {
        Some(value) => value
            .parse::<TransactionType>()
            .map_err(|e| AppError::bad_request(&e))?,
        None => TransactionType::Expense,
    };

    let id = state.db.upsert_budget(&NewBudget {
        category,
        amount: body.amount,
        budget_type,
    })?;

    let stored = state
        .db
        .get_budget(id)?
        .ok_or_else(|| AppError::internal("Budget vanished after upsert"))?;

    Ok(Json(stored))
}

/// DELETE /api/budgets/:id - Remove a budget
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.db.delete_budget(id)? {
        return Err(AppError::not_found("Budget not found"));
    }

    Ok(Json(SuccessResponse { success: true }))
}
