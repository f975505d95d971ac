//! Bill ledger — create, edit, mark-as-paid, and delete.
//!
//! Bills are recurring: paying one records a Payment and rolls the bill's
//! due date forward by `RECURRENCE_DAYS`. A bill has no stored paid flag.
//! Payments are never updated or deleted, and survive their bill's deletion.

use crate::{
    clock::BillClock,
    command::BillCommand,
    error::{BillError, BillResult},
    store::BillStore,
    types::{BillId, Category, Money, PaymentId},
};
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Days a due date advances each time the bill is paid.
pub const RECURRENCE_DAYS: u64 = 30;

// ── Records ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: BillId,
    pub name: String,
    pub category: Category,
    pub due_date: Option<NaiveDate>,
    pub amount: Option<Money>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub bill_id: BillId,
    pub amount: Money,
    pub paid_at: NaiveDateTime,
}

/// Validated input for a new bill.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub name: String,
    pub category: Category,
    pub due_date: Option<NaiveDate>,
    pub amount: Option<Money>,
}

impl NewBill {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: Category::Other,
            due_date: None,
            amount: None,
        }
    }
}

/// Sparse edit. `None` leaves a field alone; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillPatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub due_date: Option<Option<NaiveDate>>,
    pub amount: Option<Option<Money>>,
}

impl BillPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.due_date.is_none()
            && self.amount.is_none()
    }

    pub fn apply_to(self, bill: &mut Bill) {
        if let Some(name) = self.name {
            bill.name = name;
        }
        if let Some(category) = self.category {
            bill.category = category;
        }
        if let Some(due_date) = self.due_date {
            bill.due_date = due_date;
        }
        if let Some(amount) = self.amount {
            bill.amount = amount;
        }
    }
}

/// Result of a mark-as-paid request.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// A payment was stored and the due date (if any) advanced.
    Recorded { bill: Bill, payment: Payment },
    /// The bill has no amount, so nothing was written.
    Skipped { bill: Bill },
}

impl PaymentOutcome {
    pub fn bill(&self) -> &Bill {
        match self {
            PaymentOutcome::Recorded { bill, .. } | PaymentOutcome::Skipped { bill } => bill,
        }
    }

    pub fn into_bill(self) -> Bill {
        match self {
            PaymentOutcome::Recorded { bill, .. } | PaymentOutcome::Skipped { bill } => bill,
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self, PaymentOutcome::Recorded { .. })
    }

    pub fn status(&self) -> &'static str {
        match self {
            PaymentOutcome::Recorded { .. } => "recorded",
            PaymentOutcome::Skipped { .. } => "skipped",
        }
    }
}

/// What executing a `BillCommand` produced.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerOutcome {
    Saved(Bill),
    Paid(PaymentOutcome),
    Deleted { id: BillId },
}

/// Due date after one payment cycle: plain day arithmetic, not month-aware.
pub fn next_due_date(due: NaiveDate) -> BillResult<NaiveDate> {
    due.checked_add_days(Days::new(RECURRENCE_DAYS))
        .ok_or_else(|| BillError::validation("dueDate", format!("{due} cannot be advanced")))
}

// ── Ledger ───────────────────────────────────────────────────────────────────

pub struct BillLedger<'a> {
    store: &'a BillStore,
    clock: &'a BillClock,
}

impl<'a> BillLedger<'a> {
    pub fn new(store: &'a BillStore, clock: &'a BillClock) -> Self {
        Self { store, clock }
    }

    pub fn execute(&self, command: BillCommand) -> BillResult<LedgerOutcome> {
        match command {
            BillCommand::Create(new) => self.create(new).map(LedgerOutcome::Saved),
            BillCommand::Edit { id, patch } => self.edit(id, patch).map(LedgerOutcome::Saved),
            BillCommand::MarkPaid { id } => self.mark_paid(id).map(LedgerOutcome::Paid),
            BillCommand::Delete { id } => {
                self.delete(id)?;
                Ok(LedgerOutcome::Deleted { id })
            }
        }
    }

    pub fn list(&self) -> BillResult<Vec<Bill>> {
        self.store.all_bills()
    }

    pub fn create(&self, new: NewBill) -> BillResult<Bill> {
        let bill = self.store.insert_bill(&new, self.clock.now())?;
        log::info!(
            "Bill {} created: '{}' [{}]",
            bill.id,
            bill.name,
            bill.category
        );
        Ok(bill)
    }

    pub fn edit(&self, id: BillId, patch: BillPatch) -> BillResult<Bill> {
        let mut bill = self.store.require_bill(id)?;
        if patch.is_empty() {
            log::debug!("Bill {id}: empty edit, nothing to write");
            return Ok(bill);
        }
        patch.apply_to(&mut bill);
        self.store.update_bill(&bill)?;
        log::info!("Bill {id} updated");
        Ok(bill)
    }

    /// Record one payment cycle for the bill.
    ///
    /// A bill without an amount is left untouched and reported as `Skipped`.
    pub fn mark_paid(&self, id: BillId) -> BillResult<PaymentOutcome> {
        let mut bill = self.store.require_bill(id)?;
        let Some(amount) = bill.amount else {
            log::warn!("Bill {id} has no amount; mark-as-paid skipped");
            return Ok(PaymentOutcome::Skipped { bill });
        };

        let next_due = bill.due_date.map(next_due_date).transpose()?;
        let payment = self
            .store
            .record_payment(id, amount, self.clock.now(), next_due)?;
        if next_due.is_some() {
            bill.due_date = next_due;
        }

        log::info!(
            "Bill {id} paid {amount:.2}; next due {}",
            bill.due_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "none".into())
        );
        Ok(PaymentOutcome::Recorded { bill, payment })
    }

    /// Hard delete. Payments for the bill are kept.
    pub fn delete(&self, id: BillId) -> BillResult<()> {
        self.store.delete_bill(id)?;
        log::info!("Bill {id} deleted");
        Ok(())
    }
}
