//! Budget command implementations

use anyhow::{bail, Result};
use fincast_core::db::Database;
use fincast_core::models::{NewBudget, TransactionType};

pub fn cmd_budget_set(db: &Database, category: &str, amount: f64, budget_type: &str) -> Result<()> {
    let budget_type: TransactionType =
        budget_type.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    if !amount.is_finite() || amount <= 0.0 {
        bail!("Amount must be a positive number");
    }

    let category = category.trim().to_lowercase();
    if category.is_empty() {
        bail!("Category is required");
    }

    db.upsert_budget(&NewBudget {
        category: category.clone(),
        amount,
        budget_type,
    })?;

    println!("✅ Budget set: {} at ${:.2}/month", category, amount);

    Ok(())
}

pub fn cmd_budget_list(db: &Database) -> Result<()> {
    let budgets = db.list_budgets()?;

    if budgets.is_empty() {
        println!("No budgets set. Add one with:");
        println!("  fincast budget set food 300");
        return Ok(());
    }

    println!();
    println!("💰 Budgets");
    println!("   ─────────────────────────────────────────────────────────────");

    for budget in budgets {
        println!(
            "   [{}] {:<15} │ {:>10} │ {}",
            budget.id,
            budget.category,
            format!("${:.2}", budget.amount),
            budget.budget_type
        );
    }

    Ok(())
}

pub fn cmd_budget_remove(db: &Database, id: i64) -> Result<()> {
    if !db.delete_budget(id)? {
        bail!("Budget {} not found", id);
    }

    println!("✅ Removed budget {}", id);
    Ok(())
}
