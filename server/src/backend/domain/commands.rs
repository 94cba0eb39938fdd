//! Domain-level command and query types.
//!
//! Services accept and return these; the REST layer maps the public DTOs
//! from the `shared` crate to and from them.

pub mod transactions {
    use chrono::NaiveDate;

    use crate::backend::domain::models::transaction::{Transaction, TransactionType};
    use crate::backend::domain::reconciler::ReconciledBudget;
    use crate::backend::domain::sorting::SortBy;

    /// Input for recording a transaction. `amount` is already an unsigned
    /// magnitude.
    #[derive(Debug, Clone)]
    pub struct CreateTransactionCommand {
        pub description: String,
        pub amount: f64,
        pub category: String,
        pub transaction_type: TransactionType,
        /// Defaults to today
        pub date: Option<NaiveDate>,
    }

    /// Partial edit. Unset fields keep their current value.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateTransactionCommand {
        pub description: Option<String>,
        pub amount: Option<f64>,
        pub category: Option<String>,
        pub transaction_type: Option<TransactionType>,
        pub date: Option<NaiveDate>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct TransactionListQuery {
        pub search: Option<String>,
        pub category: Option<String>,
        pub transaction_type: Option<TransactionType>,
        pub sort: SortBy,
        pub limit: Option<u32>,
        pub offset: Option<u32>,
    }

    #[derive(Debug, Clone)]
    pub struct TransactionListResult {
        pub transactions: Vec<Transaction>,
        /// Matches before paging
        pub total_count: usize,
    }

    /// Result of a create or update, with the budgets it touched
    #[derive(Debug, Clone)]
    pub struct TransactionMutationResult {
        pub transaction: Transaction,
        pub reconciled_budgets: Vec<ReconciledBudget>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteTransactionResult {
        pub deleted_id: String,
        pub reconciled_budgets: Vec<ReconciledBudget>,
    }
}

pub mod budgets {
    use chrono::NaiveDate;

    use crate::backend::domain::classifier::BudgetAssessment;
    use crate::backend::domain::models::budget::{Budget, BudgetAlerts, BudgetPeriod};
    use crate::backend::domain::reconciler::BudgetDrift;

    #[derive(Debug, Clone)]
    pub struct CreateBudgetCommand {
        pub category: String,
        pub amount: f64,
        pub period: BudgetPeriod,
        /// Defaults to today
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub alerts: Option<BudgetAlerts>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateBudgetCommand {
        pub category: Option<String>,
        pub amount: Option<f64>,
        pub period: Option<BudgetPeriod>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub alerts: Option<BudgetAlerts>,
    }

    /// A budget together with its derived status
    #[derive(Debug, Clone)]
    pub struct BudgetView {
        pub budget: Budget,
        pub assessment: BudgetAssessment,
    }

    #[derive(Debug, Clone)]
    pub struct DriftReport {
        pub checked: usize,
        pub drifted: Vec<BudgetDrift>,
    }
}

pub mod bills {
    use chrono::{DateTime, Utc};

    use crate::backend::domain::classifier::{BillAssessment, BillStatus};
    use crate::backend::domain::models::bill::{Bill, BillFrequency};
    use crate::backend::domain::models::transaction::Transaction;
    use crate::backend::domain::reconciler::ReconciledBudget;
    use crate::backend::domain::sorting::SortBy;

    #[derive(Debug, Clone)]
    pub struct CreateBillCommand {
        pub name: String,
        pub amount: f64,
        pub due_date: DateTime<Utc>,
        pub category: String,
        pub frequency: Option<BillFrequency>,
        pub is_paid: bool,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateBillCommand {
        pub name: Option<String>,
        pub amount: Option<f64>,
        pub due_date: Option<DateTime<Utc>>,
        pub category: Option<String>,
        pub frequency: Option<BillFrequency>,
        pub is_paid: Option<bool>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct BillListQuery {
        pub search: Option<String>,
        pub status: Option<BillStatus>,
        pub sort: SortBy,
    }

    /// A bill with its status as of the request time
    #[derive(Debug, Clone)]
    pub struct BillView {
        pub bill: Bill,
        pub assessment: BillAssessment,
    }

    #[derive(Debug, Clone)]
    pub struct PayBillResult {
        pub bill: BillView,
        /// The expense recorded for the payment, if one was requested
        pub transaction: Option<Transaction>,
        pub reconciled_budgets: Vec<ReconciledBudget>,
    }
}

pub mod pots {
    use crate::backend::domain::models::pot::Pot;

    #[derive(Debug, Clone)]
    pub struct CreatePotCommand {
        pub name: String,
        pub target: f64,
        pub theme: String,
        pub total: Option<f64>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdatePotCommand {
        pub name: Option<String>,
        pub target: Option<f64>,
        pub theme: Option<String>,
    }

    /// A pot with its rounded progress percentage
    #[derive(Debug, Clone)]
    pub struct PotView {
        pub pot: Pot,
        pub percentage: i64,
    }

    #[derive(Debug, Clone)]
    pub struct PotListResult {
        pub pots: Vec<PotView>,
        pub total_saved: f64,
    }
}

pub mod overview {
    use super::budgets::BudgetView;
    use super::pots::PotView;
    use crate::backend::domain::aggregation::{Balance, MonthlyTotals};
    use crate::backend::domain::classifier::BillSummary;
    use crate::backend::domain::models::transaction::Transaction;

    #[derive(Debug, Clone)]
    pub struct MonthlySeries {
        pub months: Vec<MonthlyTotals>,
        pub gradient_offset: f64,
    }

    #[derive(Debug, Clone)]
    pub struct Overview {
        pub balance: Balance,
        pub pots_total_saved: f64,
        pub pots: Vec<PotView>,
        pub budgets: Vec<BudgetView>,
        pub bill_summary: BillSummary,
        pub recent_transactions: Vec<Transaction>,
    }
}
