//! Monthly aggregation of transactions

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{MonthBucket, Transaction, TransactionType};

/// Month key for a date, `YYYY-MM` (the first 7 characters of the ISO form)
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Group transactions into calendar-month buckets of total income/expense
///
/// Buckets only exist for months that have at least one transaction. The
/// `BTreeMap` keeps keys chronologically sorted, which the predictor and
/// backtester rely on. Pure and deterministic; amounts are assumed already
/// validated (positive) by the caller.
pub fn monthly_totals(transactions: &[Transaction]) -> BTreeMap<String, MonthBucket> {
    let mut buckets: BTreeMap<String, MonthBucket> = BTreeMap::new();

    for tx in transactions {
        let bucket = buckets.entry(month_key(tx.date)).or_default();
        match tx.tx_type {
            TransactionType::Expense => bucket.expenses += tx.amount,
            TransactionType::Income => bucket.income += tx.amount,
        }
    }

    buckets
}
