use super::{require_positive, require_text};
use crate::backend::domain::errors::{DomainError, DomainResult};

/// A savings goal. `total` never drops below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Pot {
    pub id: String,
    pub name: String,
    pub target: f64,
    pub total: f64,
    pub theme: String,
}

impl Pot {
    pub fn validate(&self) -> DomainResult<()> {
        require_text("Pot name", &self.name)?;
        require_text("Theme", &self.theme)?;
        require_positive("Target", self.target)?;
        if !self.total.is_finite() || self.total < 0.0 {
            return Err(DomainError::validation("Pot total cannot be negative"));
        }
        Ok(())
    }

    pub fn deposit(&mut self, amount: f64) -> DomainResult<()> {
        require_positive("Deposit amount", amount)?;
        self.total += amount;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: f64) -> DomainResult<()> {
        require_positive("Withdrawal amount", amount)?;
        if amount > self.total {
            return Err(DomainError::InsufficientFunds {
                requested: amount,
                available: self.total,
            });
        }
        self.total -= amount;
        Ok(())
    }
}
