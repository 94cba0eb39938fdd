//! # Storage Traits
//!
//! The ledger abstraction the reconciler depends on. It is implemented for a
//! live SQLite connection (including one borrowed from an open database
//! transaction) and for an in-memory snapshot.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::transaction::{Transaction, TransactionType};

/// Sign of a transaction on the signed view (income positive, expense negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSign {
    Positive,
    Negative,
    Zero,
}

/// Ledger query filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerFilter {
    pub category: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub amount_sign: Option<AmountSign>,
}

impl LedgerFilter {
    /// Every expense in one category
    pub fn expenses_in(category: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            transaction_type: Some(TransactionType::Expense),
            amount_sign: None,
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(category) = &self.category {
            if &transaction.category != category {
                return false;
            }
        }
        if let Some(transaction_type) = self.transaction_type {
            if transaction.transaction_type != transaction_type {
                return false;
            }
        }
        match self.amount_sign {
            None => true,
            Some(AmountSign::Positive) => transaction.signed_amount() > 0.0,
            Some(AmountSign::Negative) => transaction.signed_amount() < 0.0,
            Some(AmountSign::Zero) => transaction.amount == 0.0,
        }
    }
}

/// Trait defining the ledger operations the domain core requires
#[async_trait]
pub trait LedgerStore: Send {
    /// Transactions matching the filter, most recent first
    async fn query(&mut self, filter: &LedgerFilter) -> Result<Vec<Transaction>>;

    /// Sum of absolute amounts of the matching transactions (zero if none)
    async fn aggregate_sum(&mut self, filter: &LedgerFilter) -> Result<f64>;
}
