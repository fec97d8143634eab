//! Forecast, accuracy, and recommendation command implementations

use anyhow::Result;
use chrono::Utc;
use fincast_core::db::Database;
use fincast_core::forecast::{
    backtest, monthly_totals, predictor_for, BudgetRecommender, SurplusRecommender,
};
use fincast_core::models::{AdviceKind, SortOrder, TransactionFilter};
use fincast_core::{PredictorKind, SpendingHistory};

fn fetch_history(db: &Database) -> Result<Vec<fincast_core::models::Transaction>> {
    // Oldest first: the forecasting order
    Ok(db.list_transactions(&TransactionFilter {
        sort: SortOrder::Ascending,
        ..Default::default()
    })?)
}

pub fn cmd_forecast(db: &Database, strategy: &str) -> Result<()> {
    let kind: PredictorKind = strategy.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let transactions = fetch_history(db)?;
    let history = SpendingHistory::from_transactions(&transactions);
    let predictor = predictor_for(kind);

    println!();
    println!("🔮 Spending Forecast ({})", predictor.name());
    println!("   ─────────────────────────────────────────────────────────────");

    match predictor.predict(&history) {
        Some(result) => {
            println!("   Next month: ${:.2}", result.prediction);
            if let Some(confidence) = result.confidence {
                println!("   Confidence: {:.0}%", confidence);
            }
        }
        None => {
            println!("   Not enough history to forecast (need 3 months of data).");
        }
    }

    Ok(())
}

pub fn cmd_accuracy(db: &Database) -> Result<()> {
    let transactions = fetch_history(db)?;
    let report = backtest(&monthly_totals(&transactions));

    println!();
    println!("🎯 Forecast Accuracy");
    println!("   ─────────────────────────────────────────────────────────────");

    if report.records.is_empty() {
        println!("   Nothing to backtest yet (need 4 months of data).");
        return Ok(());
    }

    for record in report.recent(3) {
        println!(
            "   {} │ predicted {:>9} │ actual {:>9} │ {:.1}% accurate",
            record.month,
            format!("${:.2}", record.predicted),
            format!("${:.2}", record.actual),
            record.accuracy
        );
    }

    println!();
    println!(
        "   Average accuracy: {:.0}% over {} backtested months",
        report.average_accuracy(),
        report.total()
    );

    Ok(())
}

pub fn cmd_recommend(db: &Database, monthly_budget: Option<f64>) -> Result<()> {
    // Surplus mode: one aggregate budget figure instead of the budget list
    if let Some(budget) = monthly_budget {
        if !budget.is_finite() || budget <= 0.0 {
            anyhow::bail!("--monthly-budget must be a positive number");
        }
        return cmd_recommend_surplus(db, budget);
    }

    let transactions = db.list_transactions(&TransactionFilter::default())?;
    let budgets = db.list_budgets()?;
    let monthly = monthly_totals(&transactions);
    let today = Utc::now().date_naive();

    let recommendations = BudgetRecommender.recommend(&transactions, &budgets, &monthly, today);

    println!();
    println!("💡 Recommendations");
    println!("   ─────────────────────────────────────────────────────────────");

    if recommendations.is_empty() {
        println!("   All good - spending is within budget.");
        return Ok(());
    }

    for rec in recommendations {
        let marker = match rec.priority {
            fincast_core::models::Priority::High => "❗",
            fincast_core::models::Priority::Medium => "⚠️ ",
        };
        println!("   {} [{}] {}", marker, rec.category, rec.message);
    }

    Ok(())
}

fn cmd_recommend_surplus(db: &Database, monthly_budget: f64) -> Result<()> {
    use chrono::{Datelike, NaiveDate};

    let today = Utc::now().date_naive();
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap();

    let current_month = db.list_transactions(&TransactionFilter {
        start_date: Some(first),
        ..Default::default()
    })?;

    let advice = SurplusRecommender::new(monthly_budget).recommend(&current_month);

    println!();
    println!("💡 Surplus Check (budget ${:.2})", monthly_budget);
    println!("   ─────────────────────────────────────────────────────────────");

    let marker = match advice.kind {
        AdviceKind::Positive => "✅",
        AdviceKind::Warning => "❗",
    };
    println!("   {} {}", marker, advice.message);

    Ok(())
}
