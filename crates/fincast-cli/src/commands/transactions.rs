//! Transaction command implementations

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use fincast_core::db::Database;
use fincast_core::models::{
    NewTransaction, SortOrder, TransactionFilter, TransactionType,
};

use super::truncate;

pub fn cmd_add(
    db: &Database,
    tx_type: &str,
    amount: f64,
    category: &str,
    description: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let tx_type: TransactionType = tx_type.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    if !amount.is_finite() || amount <= 0.0 {
        bail!("Amount must be a positive number");
    }

    let category = category.trim().to_lowercase();
    if category.is_empty() {
        bail!("Category is required");
    }

    let date = match date {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .context("Invalid --date format (use YYYY-MM-DD)")?,
        None => Utc::now().date_naive(),
    };

    let id = db.insert_transaction(&NewTransaction {
        tx_type,
        amount,
        category: category.clone(),
        description: description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
        date,
    })?;

    println!(
        "✅ Recorded {} of ${:.2} in {} on {} (id {})",
        tx_type, amount, category, date, id
    );

    Ok(())
}

pub fn cmd_transactions_list(
    db: &Database,
    limit: i64,
    category: Option<&str>,
    tx_type: Option<&str>,
) -> Result<()> {
    let tx_type = tx_type
        .map(|s| s.parse::<TransactionType>())
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let transactions = db.list_transactions(&TransactionFilter {
        category: category.map(|c| c.trim().to_lowercase()),
        tx_type,
        sort: SortOrder::Descending,
        limit: Some(limit),
        ..Default::default()
    })?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  fincast add -t expense -a 42.50 -c food");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = match tx.tx_type {
            TransactionType::Expense => format!("\x1b[31m${:.2}\x1b[0m", tx.amount), // Red
            TransactionType::Income => format!("\x1b[32m+${:.2}\x1b[0m", tx.amount), // Green
        };

        println!(
            "   [{}] {} │ {:>10} │ {:<12} │ {}",
            tx.id,
            tx.date,
            amount_str,
            truncate(&tx.category, 12),
            truncate(tx.description.as_deref().unwrap_or(""), 30)
        );
    }

    Ok(())
}
