//! Spending analytics over the full bill and payment sets.
//!
//! `build_report` is pure: the same bills, payments and `now` always give
//! the same report. Nothing is cached; the server recomputes per request.
//!
//! Two outputs keep their historical meaning on purpose:
//!   - `totalDue` sums every bill with an amount, paid this cycle or not.
//!   - `upcomingBills` is "bills with a due date", not filtered to the future.

use crate::{
    clock::BillClock,
    error::BillResult,
    ledger::{Bill, Payment},
    store::BillStore,
    types::{BillId, Category, Money},
};
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Number of calendar months in `monthlySpending`, ending with the current one.
pub const MONTH_WINDOW: u32 = 6;

/// Maximum length of the `upcomingBills` and `overdueBills` lists.
pub const LIST_LIMIT: usize = 5;

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub summary: SpendingSummary,
    pub spending_by_category: BTreeMap<Category, Money>,
    pub monthly_spending: Vec<MonthlySpending>,
    pub upcoming_bills: Vec<Bill>,
    pub overdue_bills: Vec<Bill>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    pub total_bills: usize,
    pub paid_bills: usize,
    pub total_spent: Money,
    pub total_due: Money,
    pub bills_paid_this_month: usize,
    pub bills_due_this_month: usize,
    pub overdue_bills: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlySpending {
    /// "Mon YYYY", e.g. "Jan 2024".
    pub month: String,
    pub amount: Money,
}

// ── Date helpers ─────────────────────────────────────────────────────────────

/// A due date is reached at local midnight of that day.
pub fn is_overdue(bill: &Bill, now: NaiveDateTime) -> bool {
    bill.due_date
        .is_some_and(|due| due.and_time(NaiveTime::MIN) < now)
}

pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub(crate) fn in_same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// `[start, end)` bounds of the calendar month beginning at `start`.
fn month_bounds(start: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let end = start.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX);
    (start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
}

// ── Aggregation ──────────────────────────────────────────────────────────────

pub fn build_report(bills: &[Bill], payments: &[Payment], now: NaiveDateTime) -> AnalyticsReport {
    let today = now.date();

    let total_spent: Money = payments.iter().map(|p| p.amount).sum();
    let total_due: Money = bills.iter().filter_map(|b| b.amount).sum();

    let overdue: Vec<&Bill> = bills.iter().filter(|b| is_overdue(b, now)).collect();

    let (month_start, month_end) = month_bounds(first_of_month(today));
    let bills_paid_this_month = payments
        .iter()
        .filter(|p| p.paid_at >= month_start && p.paid_at < month_end)
        .count();
    let bills_due_this_month = bills
        .iter()
        .filter(|b| b.due_date.is_some_and(|d| in_same_month(d, today)))
        .count();

    AnalyticsReport {
        summary: SpendingSummary {
            total_bills: bills.len(),
            paid_bills: payments.len(),
            total_spent,
            total_due,
            bills_paid_this_month,
            bills_due_this_month,
            overdue_bills: overdue.len(),
        },
        spending_by_category: spending_by_category(bills, payments),
        monthly_spending: monthly_spending(payments, today),
        upcoming_bills: bills
            .iter()
            .filter(|b| b.due_date.is_some())
            .take(LIST_LIMIT)
            .cloned()
            .collect(),
        overdue_bills: overdue.into_iter().take(LIST_LIMIT).cloned().collect(),
    }
}

/// Attribute each payment to its bill's current category.
/// Payments whose bill is gone are left out.
pub fn spending_by_category(bills: &[Bill], payments: &[Payment]) -> BTreeMap<Category, Money> {
    let by_id: HashMap<BillId, &Bill> = bills.iter().map(|b| (b.id, b)).collect();
    let mut totals = BTreeMap::new();
    for payment in payments {
        match by_id.get(&payment.bill_id) {
            Some(bill) => *totals.entry(bill.category).or_insert(0.0) += payment.amount,
            None => log::trace!(
                "Payment {} references missing bill {}",
                payment.id,
                payment.bill_id
            ),
        }
    }
    totals
}

/// Totals for the `MONTH_WINDOW` months ending with the month of `today`, oldest first.
pub fn monthly_spending(payments: &[Payment], today: NaiveDate) -> Vec<MonthlySpending> {
    let current = first_of_month(today);
    (0..MONTH_WINDOW)
        .rev()
        .map(|back| {
            let start = current
                .checked_sub_months(Months::new(back))
                .unwrap_or(NaiveDate::MIN);
            let (from, until) = month_bounds(start);
            let amount = payments
                .iter()
                .filter(|p| p.paid_at >= from && p.paid_at < until)
                .map(|p| p.amount)
                .sum();
            MonthlySpending {
                month: start.format("%b %Y").to_string(),
                amount,
            }
        })
        .collect()
}

/// Load both tables and build the report as of the clock's current instant.
pub fn report_from_store(store: &BillStore, clock: &BillClock) -> BillResult<AnalyticsReport> {
    let bills = store.all_bills()?;
    let payments = store.all_payments()?;
    let report = build_report(&bills, &payments, clock.now());
    log::debug!(
        "Analytics over {} bills and {} payments",
        bills.len(),
        payments.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn payment(id: i64, bill_id: i64, amount: Money, paid_at: NaiveDateTime) -> Payment {
        Payment { id, bill_id, amount, paid_at }
    }

    #[test]
    fn month_window_crosses_year_boundary() {
        let months = monthly_spending(&[], NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(
            labels,
            ["Sep 2023", "Oct 2023", "Nov 2023", "Dec 2023", "Jan 2024", "Feb 2024"]
        );
    }

    #[test]
    fn month_bucket_is_half_open() {
        let first_of_march = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_time(NaiveTime::MIN);
        let payments = [
            payment(1, 1, 10.0, first_of_march),
            payment(2, 1, 5.0, first_of_march - chrono::Duration::seconds(1)),
        ];
        let months = monthly_spending(&payments, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        assert_eq!(months[5].month, "Mar 2024");
        assert_eq!(months[5].amount, 10.0);
        assert_eq!(months[4].amount, 5.0);
    }

    #[test]
    fn payments_outside_window_are_ignored() {
        let payments = [payment(1, 1, 99.0, at(2023, 1, 5))];
        let months = monthly_spending(&payments, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        assert!(months.iter().all(|m| m.amount == 0.0));
    }
}
