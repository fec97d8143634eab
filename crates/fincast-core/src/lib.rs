//! Fincast Core Library
//!
//! Shared functionality for the Fincast spending forecaster:
//! - Database access and migrations (transactions, budgets)
//! - Monthly aggregation of transactions
//! - Next-period spending prediction (moving average, linear regression)
//! - Rolling backtest accuracy scoring
//! - Rule-based budget recommendations (per-category and surplus modes)

pub mod db;
pub mod error;
pub mod forecast;
pub mod models;

pub use db::Database;
pub use error::{Error, Result};
pub use forecast::{
    backtest, monthly_totals, predictor_for, BudgetRecommender, LinearRegressionPredictor,
    MovingAveragePredictor, Predictor, PredictorKind, SpendingHistory, SurplusRecommender,
};
pub use models::{
    AccuracyRecord, AdviceKind, BacktestReport, Budget, MonthBucket, NewBudget, NewTransaction,
    PredictionResult, Priority, Recommendation, SortOrder, SurplusAdvice, Transaction,
    TransactionFilter, TransactionType,
};
