//! Next-period spending prediction strategies
//!
//! Two interchangeable strategies behind the [`Predictor`] trait:
//!
//! - [`MovingAveragePredictor`] (production default) averages the last three
//!   monthly expense totals and scores itself with a coefficient-of-variation
//!   confidence.
//! - [`LinearRegressionPredictor`] fits an ordinary-least-squares trend over
//!   the flat chronological list of expense amounts and extrapolates one step.
//!
//! Both exact formulas are load-bearing for the backtester and the tests; do
//! not "improve" them without adjusting both.

use std::collections::BTreeMap;

use super::{aggregate::monthly_totals, round2};
use crate::models::{MonthBucket, PredictionResult, Transaction, TransactionType};

/// Months of history the moving average needs before it will forecast
pub(crate) const WINDOW: usize = 3;

/// Prediction strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PredictorKind {
    #[default]
    MovingAverage,
    LinearRegression,
}

impl PredictorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MovingAverage => "moving-average",
            Self::LinearRegression => "regression",
        }
    }
}

impl std::str::FromStr for PredictorKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "moving-average" | "moving_average" | "average" => Ok(Self::MovingAverage),
            "regression" | "linear-regression" | "linear_regression" => Ok(Self::LinearRegression),
            _ => Err(format!(
                "Unknown predictor: {}. Available: moving-average, regression",
                s
            )),
        }
    }
}

impl std::fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared strategy input, built once per call from a transaction snapshot
///
/// Holds both shapes the strategies need: the monthly bucket map (moving
/// average, backtest) and the flat chronological expense amounts (regression).
#[derive(Debug, Clone)]
pub struct SpendingHistory {
    monthly: BTreeMap<String, MonthBucket>,
    expense_amounts: Vec<f64>,
}

impl SpendingHistory {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let monthly = monthly_totals(transactions);

        let mut expenses: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.tx_type == TransactionType::Expense)
            .collect();
        expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

        Self {
            monthly,
            expense_amounts: expenses.iter().map(|t| t.amount).collect(),
        }
    }

    pub fn monthly(&self) -> &BTreeMap<String, MonthBucket> {
        &self.monthly
    }

    pub fn expense_amounts(&self) -> &[f64] {
        &self.expense_amounts
    }
}

/// Trait for prediction strategies
pub trait Predictor: Send + Sync {
    /// Which strategy this is
    fn kind(&self) -> PredictorKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Produce a next-period estimate, or `None` when the history is too
    /// short for this strategy to say anything
    fn predict(&self, history: &SpendingHistory) -> Option<PredictionResult>;
}

/// Get the strategy for a selector value
pub fn predictor_for(kind: PredictorKind) -> Box<dyn Predictor> {
    match kind {
        PredictorKind::MovingAverage => Box::new(MovingAveragePredictor),
        PredictorKind::LinearRegression => Box::new(LinearRegressionPredictor),
    }
}

/// Average of the last three monthly expense totals
pub struct MovingAveragePredictor;

impl Predictor for MovingAveragePredictor {
    fn kind(&self) -> PredictorKind {
        PredictorKind::MovingAverage
    }

    fn name(&self) -> &'static str {
        "3-month moving average"
    }

    fn predict(&self, history: &SpendingHistory) -> Option<PredictionResult> {
        let expenses: Vec<f64> = history.monthly().values().map(|b| b.expenses).collect();
        if expenses.len() < WINDOW {
            return None;
        }

        let recent = &expenses[expenses.len() - WINDOW..];
        let mean = recent.iter().sum::<f64>() / WINDOW as f64;

        // Confidence: 1 - coefficient of variation, clamped to 0..100.
        // A mean of 0 is defined as confidence 0 (no division by zero).
        let confidence = if mean == 0.0 {
            0.0
        } else {
            let variance =
                recent.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / WINDOW as f64;
            let cv = variance.sqrt() / mean;
            ((1.0 - cv) * 100.0).clamp(0.0, 100.0)
        };

        Some(PredictionResult {
            prediction: mean,
            confidence: Some(confidence),
        })
    }
}

/// Ordinary-least-squares trend over chronological expense amounts
///
/// Fits `y = slope*x + intercept` with `x = 0..n-1` and predicts at `x = n`.
/// A zero denominator (fewer than 2 points) yields the defined degenerate
/// result of 0 rather than an error.
pub struct LinearRegressionPredictor;

impl Predictor for LinearRegressionPredictor {
    fn kind(&self) -> PredictorKind {
        PredictorKind::LinearRegression
    }

    fn name(&self) -> &'static str {
        "linear regression"
    }

    fn predict(&self, history: &SpendingHistory) -> Option<PredictionResult> {
        let amounts = history.expense_amounts();
        let n = amounts.len() as f64;

        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_xy = 0.0;
        let mut sum_xx = 0.0;
        for (i, y) in amounts.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
        }

        let denominator = n * sum_xx - sum_x * sum_x;
        if denominator == 0.0 {
            return Some(PredictionResult {
                prediction: 0.0,
                confidence: None,
            });
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;
        let predicted = (slope * n + intercept).max(0.0);

        Some(PredictionResult {
            prediction: round2(predicted),
            confidence: None,
        })
    }
}
