//! Aggregate spending insights and budget heuristics

use crate::types::Expense;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Days used to scale the per-expense average into a monthly budget
const DAYS_PER_MONTH: f64 = 30.0;

const ESSENTIALS_SHARE: f64 = 0.5;
const SAVINGS_SHARE: f64 = 0.3;
const DISCRETIONARY_SHARE: f64 = 0.2;

/// Totals across all stored expenses
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Insights {
    /// Sum of every expense amount
    pub total_spent: f64,

    /// Sum of amounts per category
    pub category_totals: BTreeMap<String, f64>,
}

impl Insights {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let mut insights = Self::default();
        for expense in expenses {
            insights.total_spent += expense.amount;
            *insights
                .category_totals
                .entry(expense.category.clone())
                .or_insert(0.0) += expense.amount;
        }
        insights
    }
}

/// Suggested monthly budget and its split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecommendation {
    pub recommended_monthly_budget: f64,
    pub breakdown: BudgetBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub essentials: f64,
    pub savings: f64,
    pub discretionary: f64,
}

impl BudgetRecommendation {
    /// Average expense amount scaled to a 30-day month, split 50/30/20.
    ///
    /// An empty history yields a zero budget.
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let total: f64 = expenses.iter().map(|e| e.amount).sum();
        let monthly = total / expenses.len().max(1) as f64 * DAYS_PER_MONTH;

        Self {
            recommended_monthly_budget: monthly,
            breakdown: BudgetBreakdown {
                essentials: monthly * ESSENTIALS_SHARE,
                savings: monthly * SAVINGS_SHARE,
                discretionary: monthly * DISCRETIONARY_SHARE,
            },
        }
    }
}
