//! Bill board — the grouped checklist view.
//!
//! Bills are grouped by category in the fixed category order, empty groups
//! are dropped, and each group is ordered overdue-first, then by due date,
//! then newest first. Also carries the "due this month" totals.

use crate::{
    analytics::{in_same_month, is_overdue},
    ledger::Bill,
    logo,
    types::{Category, Money},
};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillBoard {
    pub due_this_month_total: Money,
    pub due_this_month_count: usize,
    pub groups: Vec<CategoryGroup>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryGroup {
    pub category: Category,
    pub icon: &'static str,
    pub bills: Vec<BoardEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardEntry {
    #[serde(flatten)]
    pub bill: Bill,
    pub overdue: bool,
    pub logo_url: Option<String>,
    pub fallback_icon: &'static str,
}

/// Overdue first; then by due date; dated before undated; then newest `created_at`.
pub fn board_order(a: &Bill, b: &Bill, now: NaiveDateTime) -> Ordering {
    let overdue = is_overdue(b, now).cmp(&is_overdue(a, now));
    overdue.then_with(|| match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.created_at.cmp(&a.created_at),
    })
}

pub fn due_this_month(bills: &[Bill], now: NaiveDateTime) -> (Money, usize) {
    let today = now.date();
    let due: Vec<&Bill> = bills
        .iter()
        .filter(|b| b.due_date.is_some_and(|d| in_same_month(d, today)))
        .collect();
    let total = due.iter().filter_map(|b| b.amount).sum();
    (total, due.len())
}

pub fn build_board(bills: &[Bill], now: NaiveDateTime, logo_base_url: &str) -> BillBoard {
    let (due_this_month_total, due_this_month_count) = due_this_month(bills, now);

    let groups = Category::ALL
        .into_iter()
        .filter_map(|category| {
            let mut members: Vec<&Bill> =
                bills.iter().filter(|b| b.category == category).collect();
            if members.is_empty() {
                return None;
            }
            members.sort_by(|a, b| board_order(a, b, now));
            Some(CategoryGroup {
                category,
                icon: category.icon(),
                bills: members
                    .into_iter()
                    .map(|bill| BoardEntry {
                        overdue: is_overdue(bill, now),
                        logo_url: logo::logo_url(logo_base_url, &bill.name),
                        fallback_icon: logo::fallback_icon(&bill.name, bill.category),
                        bill: bill.clone(),
                    })
                    .collect(),
            })
        })
        .collect();

    BillBoard {
        due_this_month_total,
        due_this_month_count,
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bill(id: i64, category: Category, due: Option<NaiveDate>, created_day: u32) -> Bill {
        Bill {
            id,
            name: format!("bill-{id}"),
            category,
            due_date: due,
            amount: Some(10.0),
            created_at: date(2024, 1, created_day).and_hms_opt(8, 0, 0).unwrap(),
        }
    }

    fn now() -> NaiveDateTime {
        date(2024, 3, 15).and_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn groups_follow_category_order_and_skip_empty() {
        let bills = vec![
            bill(1, Category::Other, None, 1),
            bill(2, Category::Utilities, None, 1),
            bill(3, Category::Loans, None, 1),
        ];
        let board = build_board(&bills, now(), "https://logo.example");
        let order: Vec<Category> = board.groups.iter().map(|g| g.category).collect();
        assert_eq!(order, [Category::Utilities, Category::Loans, Category::Other]);
    }

    #[test]
    fn overdue_first_then_due_date_then_newest() {
        let bills = vec![
            bill(1, Category::Utilities, None, 1),
            bill(2, Category::Utilities, Some(date(2024, 4, 2)), 1),
            bill(3, Category::Utilities, Some(date(2024, 3, 20)), 1),
            bill(4, Category::Utilities, Some(date(2024, 3, 1)), 1),
            bill(5, Category::Utilities, None, 9),
        ];
        let board = build_board(&bills, now(), "https://logo.example");
        let ids: Vec<i64> = board.groups[0].bills.iter().map(|e| e.bill.id).collect();
        assert_eq!(ids, [4, 3, 2, 5, 1]);
        assert!(board.groups[0].bills[0].overdue);
        assert!(!board.groups[0].bills[1].overdue);
    }

    #[test]
    fn due_this_month_counts_all_but_sums_priced() {
        let mut unpriced = bill(2, Category::Other, Some(date(2024, 3, 30)), 1);
        unpriced.amount = None;
        let bills = vec![
            bill(1, Category::Other, Some(date(2024, 3, 2)), 1),
            unpriced,
            bill(3, Category::Other, Some(date(2024, 4, 1)), 1),
            bill(4, Category::Other, Some(date(2023, 3, 10)), 1),
        ];
        assert_eq!(due_this_month(&bills, now()), (10.0, 2));
    }
}
