//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, status) and shared utilities (open_db)
//! - `transactions` - Transaction commands (add, list)
//! - `budgets` - Budget management commands (set, list, remove)
//! - `forecast` - Forecast, accuracy, and recommendation commands
//! - `serve` - Web server command

pub mod budgets;
pub mod core;
pub mod forecast;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use forecast::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
