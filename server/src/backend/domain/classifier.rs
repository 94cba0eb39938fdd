//! # Status Classifier
//!
//! Pure functions deriving display status from stored fields: bill status
//! and due urgency, budget alert status, pot progress. Nothing here touches
//! storage, and "now" is always passed in by the caller.

use chrono::{DateTime, Utc};

use crate::backend::domain::models::bill::Bill;
use crate::backend::domain::models::budget::{Budget, BudgetAlerts};
use crate::backend::domain::models::pot::Pot;

/// Bills due within this many days are "due soon"
pub const DUE_SOON_DAYS: i64 = 7;

const MS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatus {
    Paid,
    Pending,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBucket {
    Overdue,
    DueSoon,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Under,
    Near,
    Over,
}

/// Everything derived for a bill at a given instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillAssessment {
    pub status: BillStatus,
    pub days_until_due: i64,
    pub due_bucket: DueBucket,
}

/// Everything derived for a budget from its cached spent value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetAssessment {
    pub status: BudgetStatus,
    /// Negative when over budget
    pub remaining: f64,
    pub percentage_used: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BillTotals {
    pub count: usize,
    pub total: f64,
}

impl BillTotals {
    fn add(&mut self, amount: f64) {
        self.count += 1;
        self.total += amount;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BillSummary {
    pub paid: BillTotals,
    pub upcoming: BillTotals,
    pub due_soon: BillTotals,
    pub overdue: BillTotals,
}

/// Paid always wins; otherwise a bill is overdue strictly after its due instant.
pub fn bill_status(is_paid: bool, due_date: DateTime<Utc>, now: DateTime<Utc>) -> BillStatus {
    if is_paid {
        BillStatus::Paid
    } else if due_date < now {
        BillStatus::Overdue
    } else {
        BillStatus::Pending
    }
}

pub fn classify_bill_status(bill: &Bill, now: DateTime<Utc>) -> BillStatus {
    bill_status(bill.is_paid, bill.due_date, now)
}

/// Whole days until `due_date`, rounded up. Negative once overdue.
pub fn days_until_due(due_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = due_date.signed_duration_since(now).num_milliseconds() as f64;
    // ceil of a small negative fraction is -0.0, which casts to 0
    (millis / MS_PER_DAY).ceil() as i64
}

pub fn classify_due(days_until_due: i64) -> DueBucket {
    if days_until_due < 0 {
        DueBucket::Overdue
    } else if days_until_due <= DUE_SOON_DAYS {
        DueBucket::DueSoon
    } else {
        DueBucket::Upcoming
    }
}

pub fn assess_bill(bill: &Bill, now: DateTime<Utc>) -> BillAssessment {
    let days = days_until_due(bill.due_date, now);
    BillAssessment {
        status: classify_bill_status(bill, now),
        days_until_due: days,
        due_bucket: classify_due(days),
    }
}

/// Totals of paid, upcoming (unpaid and not yet overdue), due-soon (the
/// upcoming bills due within a week) and overdue bills.
pub fn summarize_bills(bills: &[Bill], now: DateTime<Utc>) -> BillSummary {
    let mut summary = BillSummary::default();

    for bill in bills {
        let assessment = assess_bill(bill, now);
        match assessment.status {
            BillStatus::Paid => summary.paid.add(bill.amount),
            BillStatus::Overdue => summary.overdue.add(bill.amount),
            BillStatus::Pending => {
                summary.upcoming.add(bill.amount);
                if assessment.due_bucket == DueBucket::DueSoon {
                    summary.due_soon.add(bill.amount);
                }
            }
        }
    }

    summary
}

pub fn budget_status(spent: f64, amount: f64, alerts: &BudgetAlerts) -> BudgetStatus {
    if spent > amount {
        return BudgetStatus::Over;
    }

    match alerts.effective_threshold() {
        Some(threshold) if amount > 0.0 && spent / amount * 100.0 >= threshold => BudgetStatus::Near,
        _ => BudgetStatus::Under,
    }
}

pub fn classify_budget_status(budget: &Budget) -> BudgetStatus {
    budget_status(budget.spent, budget.amount, &budget.alerts)
}

pub fn assess_budget(budget: &Budget) -> BudgetAssessment {
    let percentage_used = if budget.amount > 0.0 {
        budget.spent / budget.amount * 100.0
    } else {
        0.0
    };

    BudgetAssessment {
        status: classify_budget_status(budget),
        remaining: budget.amount - budget.spent,
        percentage_used,
    }
}

/// Rounded percentage of the target saved. Not clamped, so a pot past its
/// target reports more than 100.
pub fn pot_progress(total: f64, target: f64) -> i64 {
    if target <= 0.0 {
        return 0;
    }
    (total / target * 100.0).round() as i64
}

pub fn classify_pot_progress(pot: &Pot) -> i64 {
    pot_progress(pot.total, pot.target)
}
