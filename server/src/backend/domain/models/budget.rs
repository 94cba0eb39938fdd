use chrono::NaiveDate;
use std::str::FromStr;

use super::{require_positive, require_text};
use crate::backend::domain::errors::{DomainError, DomainResult};

/// Alert threshold applied when alerts are enabled without an explicit value
pub const DEFAULT_ALERT_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetPeriod {
    Monthly,
    Quarterly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Quarterly => "quarterly",
            BudgetPeriod::Yearly => "yearly",
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "monthly" => Ok(BudgetPeriod::Monthly),
            "quarterly" => Ok(BudgetPeriod::Quarterly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(DomainError::validation(format!("Unknown budget period '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BudgetAlerts {
    pub enabled: bool,
    pub threshold: Option<f64>,
}

impl BudgetAlerts {
    /// The percentage that triggers a "near" status, if alerts are on
    pub fn effective_threshold(&self) -> Option<f64> {
        if self.enabled {
            Some(self.threshold.unwrap_or(DEFAULT_ALERT_THRESHOLD))
        } else {
            None
        }
    }
}

/// A spending limit on one category. `spent` is a cached aggregate of the
/// ledger, written only by the reconciler.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub amount: f64,
    pub spent: f64,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub alerts: BudgetAlerts,
}

impl Budget {
    pub fn validate(&self) -> DomainResult<()> {
        require_text("Category", &self.category)?;
        require_positive("Budget amount", self.amount)?;

        if let Some(end_date) = self.end_date {
            if end_date < self.start_date {
                return Err(DomainError::validation("End date cannot precede start date"));
            }
        }

        if let Some(threshold) = self.alerts.threshold {
            if !(threshold > 0.0 && threshold <= 100.0) {
                return Err(DomainError::validation(
                    "Alert threshold must be greater than 0 and at most 100",
                ));
            }
        }

        Ok(())
    }
}
