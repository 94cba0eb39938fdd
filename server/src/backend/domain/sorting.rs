//! Search and sort shared by the transaction and bill list views.

use chrono::{NaiveDateTime, NaiveTime};
use std::cmp::Ordering;

use crate::backend::domain::models::bill::Bill;
use crate::backend::domain::models::transaction::Transaction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    Latest,
    Oldest,
    AToZ,
    ZToA,
    Highest,
    Lowest,
}

/// An item that can appear in a sorted list view
pub trait Sortable {
    fn sort_date(&self) -> NaiveDateTime;
    fn sort_name(&self) -> &str;
    fn sort_amount(&self) -> f64;
    /// Text fields a search term is matched against
    fn search_fields(&self) -> Vec<&str>;
}

impl Sortable for Transaction {
    fn sort_date(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }

    fn sort_name(&self) -> &str {
        &self.description
    }

    fn sort_amount(&self) -> f64 {
        self.amount
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.description.as_str(), self.category.as_str()]
    }
}

impl Sortable for Bill {
    fn sort_date(&self) -> NaiveDateTime {
        self.due_date.naive_utc()
    }

    fn sort_name(&self) -> &str {
        &self.name
    }

    fn sort_amount(&self) -> f64 {
        self.amount
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str()]
    }
}

/// Stable sort; ties keep their incoming order
pub fn sort_items<T: Sortable>(items: &mut [T], sort_by: SortBy) {
    match sort_by {
        SortBy::Latest => items.sort_by(|a, b| b.sort_date().cmp(&a.sort_date())),
        SortBy::Oldest => items.sort_by(|a, b| a.sort_date().cmp(&b.sort_date())),
        SortBy::AToZ => items.sort_by(|a, b| compare_names(a, b)),
        SortBy::ZToA => items.sort_by(|a, b| compare_names(b, a)),
        SortBy::Highest => items.sort_by(|a, b| compare_amounts(b, a)),
        SortBy::Lowest => items.sort_by(|a, b| compare_amounts(a, b)),
    }
}

/// Case-insensitive substring match on any search field. An empty or blank
/// term matches everything.
pub fn matches_search<T: Sortable>(item: &T, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

fn compare_names<T: Sortable>(a: &T, b: &T) -> Ordering {
    a.sort_name().to_lowercase().cmp(&b.sort_name().to_lowercase())
}

fn compare_amounts<T: Sortable>(a: &T, b: &T) -> Ordering {
    a.sort_amount().total_cmp(&b.sort_amount())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::transaction::TransactionType;
    use chrono::NaiveDate;

    fn tx(description: &str, amount: f64, day: u32) -> Transaction {
        Transaction {
            id: description.to_string(),
            description: description.to_string(),
            amount,
            category: "General".to_string(),
            transaction_type: TransactionType::Expense,
            date: NaiveDate::from_ymd_opt(2024, 8, day).unwrap(),
        }
    }

    fn ids(items: &[Transaction]) -> Vec<&str> {
        items.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_sort_orders() {
        let mut items = vec![tx("banana", 20.0, 2), tx("Apple", 5.0, 9), tx("cherry", 50.0, 5)];

        sort_items(&mut items, SortBy::Latest);
        assert_eq!(ids(&items), vec!["Apple", "cherry", "banana"]);

        sort_items(&mut items, SortBy::Oldest);
        assert_eq!(ids(&items), vec!["banana", "cherry", "Apple"]);

        sort_items(&mut items, SortBy::AToZ);
        assert_eq!(ids(&items), vec!["Apple", "banana", "cherry"]);

        sort_items(&mut items, SortBy::ZToA);
        assert_eq!(ids(&items), vec!["cherry", "banana", "Apple"]);

        sort_items(&mut items, SortBy::Highest);
        assert_eq!(ids(&items), vec!["cherry", "banana", "Apple"]);

        sort_items(&mut items, SortBy::Lowest);
        assert_eq!(ids(&items), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_matches_search() {
        let item = tx("Weekly Groceries", 20.0, 1);
        assert!(matches_search(&item, "grocer"));
        assert!(matches_search(&item, "GENERAL"));
        assert!(matches_search(&item, "  "));
        assert!(!matches_search(&item, "rent"));
    }
}
