//! Domain models for Fincast

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Direction of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense transaction
///
/// Amounts are always positive; `tx_type` carries the direction. Category is
/// stored lowercase and trimmed (normalized at the validation edge, not here).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A new transaction to be recorded (before DB insertion)
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub tx_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// A per-category spending (or income) budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub budget_type: TransactionType,
    pub created_at: DateTime<Utc>,
}

/// A new budget to be stored (before DB insertion)
#[derive(Debug, Clone)]
pub struct NewBudget {
    pub category: String,
    pub amount: f64,
    pub budget_type: TransactionType,
}

impl NewBudget {
    /// Budget for a spending category (the common case)
    pub fn expense(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount,
            budget_type: TransactionType::Expense,
        }
    }
}

/// Aggregated income/expense totals for one calendar month
///
/// Keyed externally by `YYYY-MM`. Built fresh on every aggregation call;
/// never persisted or cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub income: f64,
    pub expenses: f64,
}

/// A next-period spending estimate
///
/// `confidence` is only attached by strategies that can score themselves
/// (the moving average); 0–100, higher is steadier history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Urgency of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A budget-compliance advisory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Category the advice applies to; "general" for cross-category advice
    pub category: String,
    pub message: String,
    pub priority: Priority,
}

/// One backtested month: what the model predicted vs what happened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracyRecord {
    /// Month key (`YYYY-MM`)
    pub month: String,
    pub predicted: f64,
    pub actual: f64,
    /// Realized accuracy, 0–100
    pub accuracy: f64,
}

/// Full backtest output with summary accessors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BacktestReport {
    /// All computed records, chronological
    pub records: Vec<AccuracyRecord>,
}

impl BacktestReport {
    /// The most recent `n` records (chronological order preserved)
    pub fn recent(&self, n: usize) -> &[AccuracyRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Arithmetic mean accuracy across ALL computed records; 0 when empty
    pub fn average_accuracy(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.records.iter().map(|r| r.accuracy).sum::<f64>() / self.records.len() as f64
    }

    /// Total number of backtested months
    pub fn total(&self) -> usize {
        self.records.len()
    }
}

/// Tone of a surplus-mode advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceKind {
    Positive,
    Warning,
}

impl AdviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Warning => "warning",
        }
    }
}

/// Surplus-mode recommendation output
///
/// A different shape from [`Recommendation`] on purpose: surplus mode works
/// against one aggregate monthly budget, not a per-category budget list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurplusAdvice {
    pub kind: AdviceKind,
    /// Set on warnings: the category with the highest spending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
}

/// Sort direction for transaction listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first, for general queries
    #[default]
    Descending,
    /// Oldest first, for backtesting
    Ascending,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Descending => "DESC",
            Self::Ascending => "ASC",
        }
    }
}

/// Filter for transaction queries
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub tx_type: Option<TransactionType>,
    pub sort: SortOrder,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_transaction_type_round_trip() {
        assert_eq!(TransactionType::Expense.as_str(), "expense");
        assert_eq!(
            TransactionType::from_str("INCOME").unwrap(),
            TransactionType::Income
        );
        assert!(TransactionType::from_str("transfer").is_err());
    }

    #[test]
    fn test_backtest_report_summary() {
        let report = BacktestReport {
            records: vec![
                AccuracyRecord {
                    month: "2026-01".into(),
                    predicted: 100.0,
                    actual: 100.0,
                    accuracy: 100.0,
                },
                AccuracyRecord {
                    month: "2026-02".into(),
                    predicted: 100.0,
                    actual: 200.0,
                    accuracy: 50.0,
                },
            ],
        };

        assert_eq!(report.total(), 2);
        assert_eq!(report.average_accuracy(), 75.0);
        assert_eq!(report.recent(1)[0].month, "2026-02");
        // Asking for more than exists returns everything
        assert_eq!(report.recent(5).len(), 2);
    }

    #[test]
    fn test_empty_backtest_report() {
        let report = BacktestReport::default();
        assert_eq!(report.average_accuracy(), 0.0);
        assert!(report.recent(3).is_empty());
    }

    #[test]
    fn test_prediction_serializes_without_null_confidence() {
        let p = PredictionResult {
            prediction: 40.0,
            confidence: None,
        };
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("confidence").is_none());
    }
}
