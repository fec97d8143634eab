//! Rolling backtest of the moving-average forecast

use std::collections::BTreeMap;

use super::{predictor::WINDOW, round2};
use crate::models::{AccuracyRecord, BacktestReport, MonthBucket};

/// Months of history each backtested prediction looks back on
pub const BACKTEST_WINDOW: usize = WINDOW;

/// Replay the moving-average forecast over historical months
///
/// For each month with at least [`BACKTEST_WINDOW`] predecessors, predict its
/// expenses as the mean of the preceding window and score the realized
/// accuracy: `clamp(0, 100, (1 - |predicted - actual| / actual) * 100)`, with
/// a zero actual defined as accuracy 0. Values are rounded to 2 decimals.
///
/// Fewer than `BACKTEST_WINDOW + 1` months means nothing can be scored and
/// the report is empty (mean accuracy reads as 0).
pub fn backtest(monthly: &BTreeMap<String, MonthBucket>) -> BacktestReport {
    let months: Vec<(&String, f64)> = monthly.iter().map(|(k, b)| (k, b.expenses)).collect();

    if months.len() <= BACKTEST_WINDOW {
        return BacktestReport::default();
    }

    let mut records = Vec::with_capacity(months.len() - BACKTEST_WINDOW);
    for i in BACKTEST_WINDOW..months.len() {
        let window = &months[i - BACKTEST_WINDOW..i];
        let predicted = window.iter().map(|(_, e)| e).sum::<f64>() / BACKTEST_WINDOW as f64;
        let (month, actual) = (months[i].0, months[i].1);

        let accuracy = if actual == 0.0 {
            0.0
        } else {
            ((1.0 - (predicted - actual).abs() / actual) * 100.0).clamp(0.0, 100.0)
        };

        records.push(AccuracyRecord {
            month: month.clone(),
            predicted: round2(predicted),
            actual: round2(actual),
            accuracy: round2(accuracy),
        });
    }

    BacktestReport { records }
}
