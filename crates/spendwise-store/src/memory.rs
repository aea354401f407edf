//! In-memory store

use crate::store::{page, ExpenseStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use spendwise_core::{Expense, ExpenseDraft, Result};

/// Records held in process memory; lost on restart
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Expense>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn create(&self, draft: ExpenseDraft) -> Result<Expense> {
        let mut records = self.records.write();
        let id = records.last().map_or(1, |e| e.id + 1);
        let expense = draft.with_id(id);
        records.push(expense.clone());
        Ok(expense)
    }

    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Expense>> {
        Ok(page(&self.records.read(), skip, limit))
    }

    async fn all(&self) -> Result<Vec<Expense>> {
        Ok(self.records.read().clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().len())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
