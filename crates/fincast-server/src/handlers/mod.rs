//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod budgets;
pub mod forecast;
pub mod health;
pub mod transactions;

// Re-export all handlers for use in router
pub use budgets::*;
pub use forecast::*;
pub use health::*;
pub use transactions::*;
