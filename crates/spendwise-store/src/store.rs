//! Store trait

use async_trait::async_trait;
use spendwise_core::{Expense, ExpenseDraft, Result};
use std::sync::Arc;

/// Expense record store
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Persist a draft and return it with its assigned id
    async fn create(&self, draft: ExpenseDraft) -> Result<Expense>;

    /// Page through expenses, newest first
    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Expense>>;

    /// Every stored expense, in insertion order
    async fn all(&self) -> Result<Vec<Expense>>;

    /// Number of stored expenses
    async fn count(&self) -> Result<usize>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Store shared across request handlers
pub type SharedStore = Arc<dyn ExpenseStore>;

/// Order by date descending, newer ids first on equal dates
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
}

/// Newest-first page of `records`
pub(crate) fn page(records: &[Expense], skip: usize, limit: usize) -> Vec<Expense> {
    let mut sorted = records.to_vec();
    sort_newest_first(&mut sorted);
    sorted.into_iter().skip(skip).take(limit).collect()
}
