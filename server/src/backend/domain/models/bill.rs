use chrono::{DateTime, Utc};
use std::str::FromStr;

use super::{require_positive, require_text};
use crate::backend::domain::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillFrequency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl BillFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillFrequency::Weekly => "weekly",
            BillFrequency::Monthly => "monthly",
            BillFrequency::Quarterly => "quarterly",
            BillFrequency::Yearly => "yearly",
        }
    }
}

impl FromStr for BillFrequency {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "weekly" => Ok(BillFrequency::Weekly),
            "monthly" => Ok(BillFrequency::Monthly),
            "quarterly" => Ok(BillFrequency::Quarterly),
            "yearly" => Ok(BillFrequency::Yearly),
            other => Err(DomainError::validation(format!("Unknown bill frequency '{}'", other))),
        }
    }
}

/// A bill to pay. Its status is never stored; see `classifier::assess_bill`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    pub category: String,
    pub is_paid: bool,
    pub frequency: Option<BillFrequency>,
}

impl Bill {
    pub fn validate(&self) -> DomainResult<()> {
        require_text("Bill name", &self.name)?;
        require_text("Category", &self.category)?;
        require_positive("Bill amount", self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_validate() {
        let mut bill = Bill {
            id: "bill-1".to_string(),
            name: "Electricity".to_string(),
            amount: 100.0,
            due_date: Utc.with_ymd_and_hms(2024, 8, 15, 0, 0, 0).unwrap(),
            category: "Bills".to_string(),
            is_paid: false,
            frequency: Some(BillFrequency::Monthly),
        };
        assert!(bill.validate().is_ok());

        bill.amount = -1.0;
        assert!(bill.validate().is_err());

        bill.amount = 100.0;
        bill.name = String::new();
        assert!(bill.validate().is_err());
    }
}
