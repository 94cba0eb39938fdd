//! In-memory ledger snapshot, used to evaluate the reconciler over a plain
//! list of transactions.

use anyhow::Result;
use async_trait::async_trait;

use super::traits::{LedgerFilter, LedgerStore};
use crate::backend::domain::models::transaction::Transaction;

#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    transactions: Vec<Transaction>,
}

impl InMemoryLedger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn query(&mut self, filter: &LedgerFilter) -> Result<Vec<Transaction>> {
        let mut matches: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(matches)
    }

    async fn aggregate_sum(&mut self, filter: &LedgerFilter) -> Result<f64> {
        Ok(self
            .transactions
            .iter()
            .filter(|tx| filter.matches(tx))
            .map(|tx| tx.amount.abs())
            .sum())
    }
}
