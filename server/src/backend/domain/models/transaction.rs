use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::{require_positive, require_text};
use crate::backend::domain::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(DomainError::validation(format!("Unknown transaction type '{}'", other))),
        }
    }
}

/// A ledger entry. `amount` is always an unsigned magnitude; direction lives
/// in `transaction_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
}

impl Transaction {
    /// Income positive, expense negative
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("Description", &self.description)?;
        require_text("Category", &self.category)?;
        require_positive("Amount", self.amount)
    }
}

/// Split a legacy signed amount into the canonical magnitude and type.
/// Zero has no direction and is rejected.
pub fn from_signed_amount(amount: f64) -> DomainResult<(f64, TransactionType)> {
    require_positive("Amount", amount.abs())?;
    if amount < 0.0 {
        Ok((-amount, TransactionType::Expense))
    } else {
        Ok((amount, TransactionType::Income))
    }
}
