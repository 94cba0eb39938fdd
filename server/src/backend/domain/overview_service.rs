//! Dashboard summaries composed from the entity services and the
//! aggregation engine. Nothing here writes.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::backend::domain::aggregation::{
    aggregate_by_category, aggregate_by_month, balance, gradient_offset, net_cash_flow,
    CategoryTotals,
};
use crate::backend::domain::bill_service::BillService;
use crate::backend::domain::budget_service::BudgetService;
use crate::backend::domain::commands::overview::{MonthlySeries, Overview};
use crate::backend::domain::errors::DomainResult;
use crate::backend::domain::pot_service::PotService;
use crate::backend::domain::transaction_service::TransactionService;

/// Number of transactions shown on the overview
pub const RECENT_TRANSACTIONS: usize = 5;

#[derive(Clone)]
pub struct OverviewService {
    transaction_service: TransactionService,
    budget_service: BudgetService,
    bill_service: BillService,
    pot_service: PotService,
}

impl OverviewService {
    pub fn new(
        transaction_service: TransactionService,
        budget_service: BudgetService,
        bill_service: BillService,
        pot_service: PotService,
    ) -> Self {
        Self {
            transaction_service,
            budget_service,
            bill_service,
            pot_service,
        }
    }

    pub async fn overview(&self, now: DateTime<Utc>) -> DomainResult<Overview> {
        info!("Building dashboard overview");

        // Ledger comes back most recent first
        let transactions = self.transaction_service.all_transactions().await?;
        let pots = self.pot_service.list_pots().await?;
        let budgets = self.budget_service.list_budgets().await?;
        let bill_summary = self.bill_service.bill_summary(now).await?;

        Ok(Overview {
            balance: balance(&transactions),
            pots_total_saved: pots.total_saved,
            pots: pots.pots,
            budgets,
            bill_summary,
            recent_transactions: transactions.into_iter().take(RECENT_TRANSACTIONS).collect(),
        })
    }

    pub async fn category_totals(&self) -> DomainResult<Vec<CategoryTotals>> {
        let transactions = self.transaction_service.all_transactions().await?;
        Ok(aggregate_by_category(&transactions))
    }

    pub async fn monthly_series(&self) -> DomainResult<MonthlySeries> {
        let transactions = self.transaction_service.all_transactions().await?;
        let months = aggregate_by_month(&transactions);
        let gradient_offset = gradient_offset(&net_cash_flow(&months));
        Ok(MonthlySeries {
            months,
            gradient_offset,
        })
    }
}
