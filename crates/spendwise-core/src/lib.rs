//! Spendwise Core
//!
//! Core types and utilities shared across Spendwise components.
//!
//! This crate provides:
//! - Error types and result handling
//! - Expense record types used by the store and the HTTP layer
//! - Spending insights and budget heuristics computed over stored expenses

pub mod error;
pub mod insights;
pub mod types;

pub use error::{Error, Result};
pub use insights::{BudgetBreakdown, BudgetRecommendation, Insights};
pub use types::{Expense, ExpenseDraft, NewExpense, ValidExpense, DEFAULT_PAYMENT_METHOD};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::insights::{BudgetRecommendation, Insights};
    pub use crate::types::{Expense, NewExpense};
}
