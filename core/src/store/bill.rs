use super::BillStore;
use crate::{
    error::{BillError, BillResult},
    ledger::{Bill, NewBill},
    types::{BillId, Category},
};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, types::Type, OptionalExtension, Row};

const BILL_COLUMNS: &str = "id, name, category, due_date, amount, created_at";

fn bill_from_row(row: &Row<'_>) -> rusqlite::Result<Bill> {
    let category: String = row.get(2)?;
    let category = category
        .parse::<Category>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    Ok(Bill {
        id: row.get(0)?,
        name: row.get(1)?,
        category,
        due_date: row.get(3)?,
        amount: row.get(4)?,
        created_at: row.get(5)?,
    })
}

impl BillStore {
    // ── Bill ──────────────────────────────────────────────────────

    pub fn insert_bill(&self, new: &NewBill, created_at: NaiveDateTime) -> BillResult<Bill> {
        self.conn.execute(
            "INSERT INTO bill (name, category, due_date, amount, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &new.name,
                new.category.as_str(),
                new.due_date,
                new.amount,
                created_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(Bill {
            id,
            name: new.name.clone(),
            category: new.category,
            due_date: new.due_date,
            amount: new.amount,
            created_at,
        })
    }

    pub fn bill(&self, id: BillId) -> BillResult<Option<Bill>> {
        let sql = format!("SELECT {BILL_COLUMNS} FROM bill WHERE id = ?1");
        let bill = self
            .conn
            .query_row(&sql, params![id], bill_from_row)
            .optional()?;
        Ok(bill)
    }

    /// Like `bill`, but a missing row is an error.
    pub fn require_bill(&self, id: BillId) -> BillResult<Bill> {
        self.bill(id)?.ok_or(BillError::NotFound { id })
    }

    /// Every bill in store order (ascending id).
    pub fn all_bills(&self) -> BillResult<Vec<Bill>> {
        let sql = format!("SELECT {BILL_COLUMNS} FROM bill ORDER BY id ASC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], bill_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn bill_count(&self) -> BillResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM bill", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Persist every mutable column of `bill`. `id` and `created_at` are never written.
    pub fn update_bill(&self, bill: &Bill) -> BillResult<()> {
        let changed = self.conn.execute(
            "UPDATE bill SET name = ?1, category = ?2, due_date = ?3, amount = ?4
             WHERE id = ?5",
            params![
                &bill.name,
                bill.category.as_str(),
                bill.due_date,
                bill.amount,
                bill.id,
            ],
        )?;
        if changed == 0 {
            return Err(BillError::NotFound { id: bill.id });
        }
        Ok(())
    }

    pub fn set_due_date(&self, id: BillId, due_date: Option<NaiveDate>) -> BillResult<()> {
        let changed = self.conn.execute(
            "UPDATE bill SET due_date = ?1 WHERE id = ?2",
            params![due_date, id],
        )?;
        if changed == 0 {
            return Err(BillError::NotFound { id });
        }
        Ok(())
    }

    /// Hard delete. Payments referencing the bill are left in place.
    pub fn delete_bill(&self, id: BillId) -> BillResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM bill WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(BillError::NotFound { id });
        }
        Ok(())
    }
}
