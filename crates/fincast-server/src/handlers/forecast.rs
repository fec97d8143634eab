//! Forecast and recommendation handlers
//!
//! Thin layer over the forecast core: fetch the snapshot, run the pure
//! functions, shape the JSON.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use fincast_core::forecast::{backtest, monthly_totals, predictor_for, BudgetRecommender, SurplusRecommender};
use fincast_core::models::{
    AccuracyRecord, MonthBucket, Recommendation, SortOrder, SurplusAdvice, Transaction,
    TransactionFilter,
};
use fincast_core::{PredictorKind, SpendingHistory};

/// Query parameters for the forecast endpoint
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Prediction strategy (moving-average, regression)
    pub strategy: Option<String>,
}

/// Forecast response
///
/// `prediction: null` plus a message signals "no forecast possible yet"
/// (fewer than 3 months of history) - a degenerate output, not an error.
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub prediction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub strategy: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// Backtest accuracy response
#[derive(Debug, Serialize)]
pub struct AccuracyResponse {
    /// The most recent 3 backtested months
    pub predictions: Vec<AccuracyRecord>,
    /// Mean accuracy across ALL backtested months, rounded to an integer
    pub average_accuracy: i64,
    pub total_predictions: usize,
}

/// Query parameters for the surplus-mode recommendation
#[derive(Debug, Deserialize)]
pub struct SurplusQuery {
    /// The single aggregate budget for the current month
    pub monthly_budget: f64,
}

/// Fetch the full transaction history, oldest first (forecasting order)
fn fetch_history(state: &AppState) -> Result<Vec<Transaction>, AppError> {
    state
        .db
        .list_transactions(&TransactionFilter {
            sort: SortOrder::Ascending,
            ..Default::default()
        })
        .map_err(Into::into)
}

/// First and last day of the month containing `today`
fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap();
    let next_first = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1).unwrap()
    };
    (first, next_first.pred_opt().unwrap())
}

/// GET /api/forecast - Next-month spending estimate
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<ForecastResponse>, AppError> {
    let kind: PredictorKind = match params.strategy.as_deref() {
        Some(value) => value.parse().map_err(|e: String| AppError::bad_request(&e))?,
        None => PredictorKind::default(),
    };

    let transactions = fetch_history(&state)?;
    let history = SpendingHistory::from_transactions(&transactions);
    let predictor = predictor_for(kind);

    let response = match predictor.predict(&history) {
        Some(result) => ForecastResponse {
            prediction: Some(result.prediction),
            confidence: result.confidence,
            strategy: predictor.kind().as_str(),
            message: None,
        },
        None => ForecastResponse {
            prediction: None,
            confidence: None,
            strategy: predictor.kind().as_str(),
            message: Some("Not enough history to forecast (need 3 months of data)"),
        },
    };

    Ok(Json(response))
}

/// GET /api/forecast/trends - Monthly income/expense buckets
pub async fn get_trends(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, MonthBucket>>, AppError> {
    let transactions = fetch_history(&state)?;
    Ok(Json(monthly_totals(&transactions)))
}

/// GET /api/forecast/accuracy - Backtested forecast accuracy
pub async fn get_accuracy(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AccuracyResponse>, AppError> {
    let transactions = fetch_history(&state)?;
    let report = backtest(&monthly_totals(&transactions));

    Ok(Json(AccuracyResponse {
        predictions: report.recent(3).to_vec(),
        average_accuracy: report.average_accuracy().round() as i64,
        total_predictions: report.total(),
    }))
}

/// GET /api/recommendations - Per-category budget recommendations
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Recommendation>>, AppError> {
    let transactions = fetch_history(&state)?;
    let budgets = state.db.list_budgets()?;
    let monthly = monthly_totals(&transactions);
    let today = Utc::now().date_naive();

    let recommendations = BudgetRecommender.recommend(&transactions, &budgets, &monthly, today);

    Ok(Json(recommendations))
}

/// GET /api/recommendations/surplus - Aggregate-budget (surplus mode) advice
pub async fn get_surplus_recommendation(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SurplusQuery>,
) -> Result<Json<SurplusAdvice>, AppError> {
    if !params.monthly_budget.is_finite() || params.monthly_budget <= 0.0 {
        return Err(AppError::bad_request(
            "monthly_budget must be a positive number",
        ));
    }

    let today = Utc::now().date_naive();
    let (first, last) = month_bounds(today);

    let current_month = state.db.list_transactions(&TransactionFilter {
        start_date: Some(first),
        end_date: Some(last),
        ..Default::default()
    })?;

    let advice = SurplusRecommender::new(params.monthly_budget).recommend(&current_month);

    Ok(Json(advice))
}
