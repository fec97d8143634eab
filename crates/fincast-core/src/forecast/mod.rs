//! Forecast Engine - Spending Forecasts and Recommendations
//!
//! The forecast engine turns a snapshot of recorded transactions and budgets
//! into forward-looking output:
//!
//! - **Aggregator** - calendar-month income/expense buckets
//! - **Predictor** - next-period spending estimate (moving average or
//!   linear regression, selectable by the caller)
//! - **Backtester** - replays the predictor over history to score realized
//!   accuracy
//! - **Recommender** - budget-compliance advisories (per-category mode and
//!   surplus mode)
//!
//! Every component is a pure function over the snapshot it is given: no I/O,
//! no shared state, and the "current time" reference is always passed in by
//! the caller.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fincast_core::forecast::{monthly_totals, SpendingHistory, predictor_for, PredictorKind};
//!
//! let history = SpendingHistory::from_transactions(&transactions);
//! let prediction = predictor_for(PredictorKind::MovingAverage).predict(&history);
//! ```

pub mod aggregate;
pub mod backtest;
pub mod predictor;
pub mod recommend;

pub use aggregate::{month_key, monthly_totals};
pub use backtest::{backtest, BACKTEST_WINDOW};
pub use predictor::{
    predictor_for, LinearRegressionPredictor, MovingAveragePredictor, Predictor, PredictorKind,
    SpendingHistory,
};
pub use recommend::{BudgetRecommender, SurplusRecommender, GENERAL_CATEGORY};

/// Round to 2 decimal places (money and percentage outputs)
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
