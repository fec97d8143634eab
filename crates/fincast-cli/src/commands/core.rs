//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database status

use std::path::Path;

use anyhow::{Context, Result};
use fincast_core::db::Database;

/// Open the database, running migrations if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path.to_str().unwrap();
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record a transaction: fincast add -t expense -a 42.50 -c food");
    println!("  2. Set a budget:         fincast budget set food 300");
    println!("  3. Forecast spending:    fincast forecast");

    Ok(())
}

pub fn cmd_status(db_path: &Path) -> Result<()> {
    use std::fs;

    println!();
    println!("📊 Fincast Status");
    println!("   ─────────────────────────────────────────────────────────────");

    // Database path
    println!("   Database: {}", db_path.display());

    // Check if database file exists and get size
    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }

        let db = open_db(db_path)?;
        println!();
        println!("   Transactions: {}", db.transaction_count()?);
        println!("   Budgets: {}", db.budget_count()?);
    } else {
        println!("   Size: (database not initialized)");
        println!();
        println!("   Run 'fincast init' to get started.");
    }

    Ok(())
}
