//! Request and response types shared between the dashboard API and its clients.
//!
//! Dates travel as ISO-8601 strings: calendar dates (`YYYY-MM-DD`) for
//! transactions and budgets, RFC 3339 timestamps for bill due dates.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Direction of a ledger entry. Amounts are always unsigned magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    /// Unsigned magnitude
    pub amount: f64,
    pub category: String,
    pub transaction_type: TransactionType,
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub description: String,
    /// Magnitude when `transaction_type` is given. Without a type the sign
    /// decides: negative amounts are expenses, positive amounts income.
    pub amount: f64,
    pub category: String,
    pub transaction_type: Option<TransactionType>,
    /// Defaults to today when omitted
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTransactionRequest {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub date: Option<String>,
}

/// Sort orders offered by every list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Latest,
    Oldest,
    AToZ,
    ZToA,
    Highest,
    Lowest,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionListRequest {
    /// Case-insensitive match against description and category
    pub search: Option<String>,
    pub category: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub sort: Option<SortBy>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
    /// Number of matches before `limit`/`offset` were applied
    pub total_count: usize,
}

/// A budget whose cached spent total was recomputed by a write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledBudget {
    pub budget_id: String,
    pub category: String,
    pub spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionMutationResponse {
    pub transaction: Transaction,
    pub reconciled_budgets: Vec<ReconciledBudget>,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTransactionResponse {
    pub deleted_id: String,
    pub reconciled_budgets: Vec<ReconciledBudget>,
    pub success_message: String,
}

// ---------------------------------------------------------------------------
// Budgets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Monthly,
    Quarterly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlerts {
    pub enabled: bool,
    /// Percentage of the limit that raises a "near" status (defaults to 80)
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Under,
    Near,
    Over,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub amount: f64,
    pub spent: f64,
    pub period: BudgetPeriod,
    pub start_date: String,
    pub end_date: Option<String>,
    pub alerts: BudgetAlerts,
    pub status: BudgetStatus,
    /// `amount - spent`, negative when over budget
    pub remaining: f64,
    pub percentage_used: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBudgetRequest {
    pub category: String,
    pub amount: f64,
    pub period: BudgetPeriod,
    /// Defaults to today when omitted
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub alerts: Option<BudgetAlerts>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBudgetRequest {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub period: Option<BudgetPeriod>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub alerts: Option<BudgetAlerts>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetResponse {
    pub budget: Budget,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetListResponse {
    pub budgets: Vec<Budget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub reconciled_budgets: Vec<ReconciledBudget>,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetDrift {
    pub budget_id: String,
    pub category: String,
    pub cached_spent: f64,
    pub ledger_spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReportResponse {
    pub checked: usize,
    pub drifted: Vec<BudgetDrift>,
}

// ---------------------------------------------------------------------------
// Bills
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillFrequency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Paid,
    Pending,
    Overdue,
}

/// Urgency bucket derived from the number of days until a bill is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueBucket {
    Overdue,
    DueSoon,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: String,
    pub name: String,
    pub amount: f64,
    /// RFC 3339 timestamp
    pub due_date: String,
    pub category: String,
    pub is_paid: bool,
    pub frequency: Option<BillFrequency>,
    pub status: BillStatus,
    /// Negative when overdue
    pub days_until_due: i64,
    pub due_bucket: DueBucket,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBillRequest {
    pub name: String,
    pub amount: f64,
    /// RFC 3339 timestamp or calendar date (midnight UTC)
    pub due_date: String,
    pub category: String,
    pub frequency: Option<BillFrequency>,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBillRequest {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub due_date: Option<String>,
    pub category: Option<String>,
    pub frequency: Option<BillFrequency>,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillListRequest {
    pub search: Option<String>,
    pub status: Option<BillStatus>,
    pub sort: Option<SortBy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillListResponse {
    pub bills: Vec<Bill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayBillRequest {
    /// Also record an expense transaction for the bill amount
    #[serde(default)]
    pub record_transaction: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillResponse {
    pub bill: Bill,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayBillResponse {
    pub bill: Bill,
    pub transaction: Option<Transaction>,
    pub reconciled_budgets: Vec<ReconciledBudget>,
    pub success_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillTotals {
    pub count: usize,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillSummary {
    pub paid: BillTotals,
    /// Unpaid bills that are not overdue yet
    pub upcoming: BillTotals,
    /// Subset of `upcoming` due within the next seven days
    pub due_soon: BillTotals,
    pub overdue: BillTotals,
}

// ---------------------------------------------------------------------------
// Pots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pot {
    pub id: String,
    pub name: String,
    pub target: f64,
    pub total: f64,
    pub theme: String,
    /// Rounded progress towards the target, not clamped at 100
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePotRequest {
    pub name: String,
    pub target: f64,
    pub theme: String,
    /// Starting balance, defaults to zero
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePotRequest {
    pub name: Option<String>,
    pub target: Option<f64>,
    pub theme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotMoneyRequest {
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotResponse {
    pub pot: Pot,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotListResponse {
    pub pots: Vec<Pot>,
    pub total_saved: f64,
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotalsResponse {
    pub categories: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// "MMM yyyy", e.g. "Jan 2024"
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeriesResponse {
    /// Chronological order
    pub months: Vec<MonthlyTotal>,
    /// Split point for a two-colour net cash flow gradient, in `[0, 1]`
    pub gradient_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub income: f64,
    pub expenses: f64,
    pub current: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub balance: Balance,
    pub pots_total_saved: f64,
    pub pots: Vec<Pot>,
    pub budgets: Vec<Budget>,
    pub bill_summary: BillSummary,
    pub recent_transactions: Vec<Transaction>,
}

/// Body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&TransactionType::Expense).unwrap(), "\"expense\"");
        assert_eq!(serde_json::to_string(&BudgetPeriod::Quarterly).unwrap(), "\"quarterly\"");
        assert_eq!(serde_json::to_string(&DueBucket::DueSoon).unwrap(), "\"due_soon\"");
        assert_eq!(serde_json::to_string(&SortBy::AToZ).unwrap(), "\"a_to_z\"");
    }

    #[test]
    fn test_optional_request_fields_may_be_omitted() {
        let request: CreateTransactionRequest = serde_json::from_str(
            r#"{"description":"Coffee","amount":-3.5,"category":"Dining Out"}"#,
        )
        .unwrap();
        assert_eq!(request.transaction_type, None);
        assert_eq!(request.date, None);

        let pay: PayBillRequest = serde_json::from_str("{}").unwrap();
        assert!(!pay.record_transaction);
    }
}
