//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The ledger and the HTTP handlers call store methods; they never execute SQL directly.

use crate::error::BillResult;
use rusqlite::Connection;

mod bill;
mod payment;

pub struct BillStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl BillStore {
    pub fn open(path: &str) -> BillResult<Self> {
        if path == ":memory:" {
            return Self::in_memory();
        }
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        log::debug!("Opened bill store at {path}");
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> BillResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases, this returns a new in-memory database (isolated).
    pub fn reopen(&self) -> BillResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order. Safe to run on every start.
    pub fn migrate(&self) -> BillResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_bills.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_payments.sql"))?;
        Ok(())
    }

    /// Open an in-memory store with the schema applied.
    pub fn in_memory_migrated() -> BillResult<Self> {
        let store = Self::in_memory()?;
        store.migrate()?;
        Ok(store)
    }
}
