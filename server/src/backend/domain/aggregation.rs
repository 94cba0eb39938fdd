//! # Aggregation Engine
//!
//! Pure summaries over a slice of ledger transactions: totals per category,
//! a chronological monthly series, net cash flow and the overall balance.

use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};

use crate::backend::domain::models::transaction::{Transaction, TransactionType};

/// chrono format of the canonical month key, e.g. "Jan 2024"
pub const MONTH_KEY_FORMAT: &str = "%b %Y";

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals {
    pub category: String,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotals {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

impl MonthlyTotals {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Balance {
    pub income: f64,
    pub expenses: f64,
    pub current: f64,
}

/// Income and expense totals per category, sorted by category name
pub fn aggregate_by_category(transactions: &[Transaction]) -> Vec<CategoryTotals> {
    let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();

    for tx in transactions {
        let entry = totals.entry(tx.category.as_str()).or_insert((0.0, 0.0));
        match tx.transaction_type {
            TransactionType::Income => entry.0 += tx.amount.abs(),
            TransactionType::Expense => entry.1 += tx.amount.abs(),
        }
    }

    totals
        .into_iter()
        .map(|(category, (income, expense))| CategoryTotals {
            category: category.to_string(),
            income,
            expense,
        })
        .collect()
}

pub fn month_key(date: NaiveDate) -> String {
    date.format(MONTH_KEY_FORMAT).to_string()
}

/// First day of the month named by a key produced by [`month_key`]
pub fn parse_month_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01 {}", key), "%d %b %Y").ok()
}

/// Income and expense totals per calendar month, oldest month first
pub fn aggregate_by_month(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut months: HashMap<(i32, u32), MonthlyTotals> = HashMap::new();

    for tx in transactions {
        let entry = months
            .entry((tx.date.year(), tx.date.month()))
            .or_insert_with(|| MonthlyTotals {
                month: month_key(tx.date),
                income: 0.0,
                expenses: 0.0,
            });
        match tx.transaction_type {
            TransactionType::Income => entry.income += tx.amount.abs(),
            TransactionType::Expense => entry.expenses += tx.amount.abs(),
        }
    }

    let mut series: Vec<MonthlyTotals> = months.into_values().collect();
    series.sort_by_key(|m| parse_month_key(&m.month));
    series
}

/// Net cash flow (income minus expenses) for each month of a series
pub fn net_cash_flow(series: &[MonthlyTotals]) -> Vec<f64> {
    series.iter().map(MonthlyTotals::net).collect()
}

/// Fraction of a vertical gradient drawn in the positive colour, given the
/// net values of a series: 0 when nothing is positive, 1 when nothing is
/// negative, otherwise the position of zero between max and min.
pub fn gradient_offset(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);

    if max <= 0.0 {
        0.0
    } else if min >= 0.0 {
        1.0
    } else {
        max / (max - min)
    }
}

pub fn balance(transactions: &[Transaction]) -> Balance {
    let (income, expenses) = transactions.iter().fold((0.0, 0.0), |(income, expenses), tx| {
        match tx.transaction_type {
            TransactionType::Income => (income + tx.amount.abs(), expenses),
            TransactionType::Expense => (income, expenses + tx.amount.abs()),
        }
    });

    Balance {
        income,
        expenses,
        current: income - expenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(category: &str, transaction_type: TransactionType, amount: f64, y: i32, m: u32, d: u32) -> Transaction {
        Transaction {
            id: format!("{}-{}-{}", category, m, d),
            description: category.to_string(),
            amount,
            category: category.to_string(),
            transaction_type,
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    #[test]
    fn test_aggregate_by_category() {
        let txs = vec![
            tx("Groceries", TransactionType::Expense, 50.0, 2024, 8, 1),
            tx("Bills", TransactionType::Expense, 100.0, 2024, 8, 2),
            tx("Bills", TransactionType::Expense, 240.0, 2024, 8, 3),
            tx("Bills", TransactionType::Income, 20.0, 2024, 8, 4),
        ];

        let totals = aggregate_by_category(&txs);
        assert_eq!(
            totals,
            vec![
                CategoryTotals { category: "Bills".to_string(), income: 20.0, expense: 340.0 },
                CategoryTotals { category: "Groceries".to_string(), income: 0.0, expense: 50.0 },
            ]
        );
        assert!(aggregate_by_category(&[]).is_empty());
    }

    #[test]
    fn test_month_key_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
        assert_eq!(month_key(date), "Jan 2024");
        assert_eq!(parse_month_key("Jan 2024"), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(parse_month_key("not a month"), None);
    }

    #[test]
    fn test_monthly_series_is_chronological() {
        let txs = vec![
            tx("Salary", TransactionType::Income, 3000.0, 2024, 1, 5),
            tx("Bills", TransactionType::Expense, 400.0, 2023, 12, 20),
            tx("Bills", TransactionType::Expense, 100.0, 2024, 1, 8),
            tx("Salary", TransactionType::Income, 2500.0, 2023, 12, 1),
            tx("Dining", TransactionType::Expense, 30.0, 2023, 4, 1),
        ];

        let series = aggregate_by_month(&txs);
        let keys: Vec<&str> = series.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(keys, vec!["Apr 2023", "Dec 2023", "Jan 2024"]);

        assert_eq!(series[1].income, 2500.0);
        assert_eq!(series[1].expenses, 400.0);
        assert_eq!(series[2].net(), 2900.0);
    }

    #[test]
    fn test_gradient_offset() {
        assert_eq!(gradient_offset(&[]), 0.0);
        assert_eq!(gradient_offset(&[-10.0, -5.0]), 0.0);
        assert_eq!(gradient_offset(&[0.0, 5.0]), 1.0);
        assert_eq!(gradient_offset(&[300.0, -100.0]), 0.75);
    }

    #[test]
    fn test_net_cash_flow() {
        let series = vec![
            MonthlyTotals { month: "Dec 2023".to_string(), income: 100.0, expenses: 150.0 },
            MonthlyTotals { month: "Jan 2024".to_string(), income: 300.0, expenses: 0.0 },
        ];
        assert_eq!(net_cash_flow(&series), vec![-50.0, 300.0]);
    }

    #[test]
    fn test_balance() {
        let txs = vec![
            tx("Salary", TransactionType::Income, 3000.0, 2024, 8, 1),
            tx("Bills", TransactionType::Expense, 340.0, 2024, 8, 2),
        ];
        assert_eq!(balance(&txs), Balance { income: 3000.0, expenses: 340.0, current: 2660.0 });
        assert_eq!(balance(&[]), Balance::default());
    }
}
