//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fincast - Record spending, forecast next month, stay on budget
#[derive(Parser)]
#[command(name = "fincast")]
#[command(about = "Spending forecaster and budget advisor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "fincast.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show database status (path, size, row counts)
    Status,

    /// Record an income or expense transaction
    Add {
        /// Transaction type: income or expense
        #[arg(short = 't', long = "type")]
        tx_type: String,

        /// Amount (positive)
        #[arg(short, long)]
        amount: f64,

        /// Category (e.g., food, rent)
        #[arg(short, long)]
        category: String,

        /// Optional free-text description
        #[arg(short, long)]
        description: Option<String>,

        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List recorded transactions
    Transactions {
        /// Maximum rows to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Filter to a category
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by type: income or expense
        #[arg(short = 't', long = "type")]
        tx_type: Option<String>,
    },

    /// Manage per-category budgets
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },

    /// Forecast next month's spending
    Forecast {
        /// Prediction strategy: moving-average or regression
        #[arg(short, long, default_value = "moving-average")]
        strategy: String,
    },

    /// Show backtested forecast accuracy
    Accuracy,

    /// Show budget recommendations
    Recommend {
        /// Switch to surplus mode: compare total spending against one
        /// aggregate monthly budget instead of per-category budgets
        #[arg(long)]
        monthly_budget: Option<f64>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set (or replace) the budget for a category
    Set {
        /// Category the budget applies to
        category: String,

        /// Budget amount (positive)
        amount: f64,

        /// Budget type: income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        budget_type: String,
    },

    /// List all budgets
    List,

    /// Remove a budget
    Remove {
        /// Budget ID (see 'fincast budget list')
        id: i64,
    },
}
