use shared::{
    Balance as BalanceDto, CategoryTotal, CategoryTotalsResponse, MonthlySeriesResponse,
    MonthlyTotal, OverviewResponse,
};

use super::bill_mapper::BillMapper;
use super::budget_mapper::BudgetMapper;
use super::pot_mapper::PotMapper;
use super::transaction_mapper::TransactionMapper;
use crate::backend::domain::aggregation::{Balance, CategoryTotals};
use crate::backend::domain::commands::overview::{MonthlySeries, Overview};

pub struct AnalyticsMapper;

impl AnalyticsMapper {
    pub fn to_category_totals_response(totals: Vec<CategoryTotals>) -> CategoryTotalsResponse {
        CategoryTotalsResponse {
            categories: totals
                .into_iter()
                .map(|t| CategoryTotal {
                    category: t.category,
                    income: t.income,
                    expense: t.expense,
                })
                .collect(),
        }
    }

    pub fn to_monthly_series_response(series: MonthlySeries) -> MonthlySeriesResponse {
        MonthlySeriesResponse {
            months: series
                .months
                .into_iter()
                .map(|m| MonthlyTotal {
                    net: m.net(),
                    month: m.month,
                    income: m.income,
                    expenses: m.expenses,
                })
                .collect(),
            gradient_offset: series.gradient_offset,
        }
    }

    pub fn balance_to_dto(domain: Balance) -> BalanceDto {
        BalanceDto {
            income: domain.income,
            expenses: domain.expenses,
            current: domain.current,
        }
    }

    pub fn to_overview_response(overview: Overview) -> OverviewResponse {
        OverviewResponse {
            balance: Self::balance_to_dto(overview.balance),
            pots_total_saved: overview.pots_total_saved,
            pots: PotMapper::to_dto_list(overview.pots),
            budgets: BudgetMapper::to_dto_list(overview.budgets),
            bill_summary: BillMapper::summary_to_dto(overview.bill_summary),
            recent_transactions: TransactionMapper::to_dto_list(overview.recent_transactions),
        }
    }
}
