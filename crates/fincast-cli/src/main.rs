//! Fincast CLI - Spending forecaster and budget advisor
//!
//! Usage:
//!   fincast init                              Initialize database
//!   fincast add -t expense -a 42.50 -c food   Record a transaction
//!   fincast forecast                          Predict next month's spending
//!   fincast serve --port 3000                 Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Status => commands::cmd_status(&cli.db),
        Commands::Add {
            tx_type,
            amount,
            category,
            description,
            date,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(
                &db,
                &tx_type,
                amount,
                &category,
                description.as_deref(),
                date.as_deref(),
            )
        }
        Commands::Transactions {
            limit,
            category,
            tx_type,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_transactions_list(&db, limit, category.as_deref(), tx_type.as_deref())
        }
        Commands::Budget { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                BudgetAction::Set {
                    category,
                    amount,
                    budget_type,
                } => commands::cmd_budget_set(&db, &category, amount, &budget_type),
                BudgetAction::List => commands::cmd_budget_list(&db),
                BudgetAction::Remove { id } => commands::cmd_budget_remove(&db, id),
            }
        }
        Commands::Forecast { strategy } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_forecast(&db, &strategy)
        }
        Commands::Accuracy => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_accuracy(&db)
        }
        Commands::Recommend { monthly_budget } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_recommend(&db, monthly_budget)
        }
        Commands::Serve { port, host } => commands::cmd_serve(&cli.db, &host, port).await,
    }
}
