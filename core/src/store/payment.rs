use super::BillStore;
use crate::{
    error::BillResult,
    ledger::Payment,
    types::{BillId, Money},
};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Row};

fn payment_from_row(row: &Row<'_>) -> rusqlite::Result<Payment> {
    Ok(Payment {
        id: row.get(0)?,
        bill_id: row.get(1)?,
        amount: row.get(2)?,
        paid_at: row.get(3)?,
    })
}

impl BillStore {
    // ── Payment ───────────────────────────────────────────────────

    pub fn insert_payment(
        &self,
        bill_id: BillId,
        amount: Money,
        paid_at: NaiveDateTime,
    ) -> BillResult<Payment> {
        self.conn.execute(
            "INSERT INTO payment (bill_id, amount, paid_at) VALUES (?1, ?2, ?3)",
            params![bill_id, amount, paid_at],
        )?;
        Ok(Payment {
            id: self.conn.last_insert_rowid(),
            bill_id,
            amount,
            paid_at,
        })
    }

    /// Insert the payment and roll the bill's due date in one transaction.
    /// `next_due_date` of `None` leaves the due date column untouched.
    pub fn record_payment(
        &self,
        bill_id: BillId,
        amount: Money,
        paid_at: NaiveDateTime,
        next_due_date: Option<NaiveDate>,
    ) -> BillResult<Payment> {
        let tx = self.conn.unchecked_transaction()?;
        let payment = self.insert_payment(bill_id, amount, paid_at)?;
        if let Some(due) = next_due_date {
            self.set_due_date(bill_id, Some(due))?;
        }
        tx.commit()?;
        Ok(payment)
    }

    /// Every payment in insertion order.
    pub fn all_payments(&self) -> BillResult<Vec<Payment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, bill_id, amount, paid_at FROM payment ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], payment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn payments_for_bill(&self, bill_id: BillId) -> BillResult<Vec<Payment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, bill_id, amount, paid_at FROM payment
             WHERE bill_id = ?1 ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![bill_id], payment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn payment_count(&self) -> BillResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM payment", [], |row| row.get(0))?;
        Ok(count)
    }
}
