//! Store tests — schema, persistence across connections, and row mapping.

use billdesk_core::{
    error::BillError,
    ledger::NewBill,
    store::BillStore,
    types::Category,
};
use chrono::NaiveDate;

fn created_at() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_milli_opt(23, 59, 58, 250)
        .unwrap()
}

/// Running migrations twice is harmless; the server migrates on every start.
#[test]
fn migrate_is_idempotent() {
    let store = BillStore::in_memory().unwrap();
    store.migrate().unwrap();
    store.migrate().unwrap();
    assert_eq!(store.bill_count().unwrap(), 0);
}

/// Every column survives a write/read cycle, including the category name
/// with a slash and a sub-second timestamp.
#[test]
fn bill_columns_round_trip() {
    let store = BillStore::in_memory_migrated().unwrap();
    let new = NewBill {
        name: "Mortgage".into(),
        category: Category::RentMortgage,
        due_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        amount: Some(1850.25),
    };

    let inserted = store.insert_bill(&new, created_at()).unwrap();
    let loaded = store.require_bill(inserted.id).unwrap();

    assert_eq!(loaded, inserted);
    assert_eq!(loaded.category, Category::RentMortgage);
    assert_eq!(loaded.created_at, created_at());
}

/// Data written through one connection is visible after reopening a file database.
#[test]
fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("billdesk.db");

    let store = BillStore::open(path.to_str().unwrap()).unwrap();
    store.migrate().unwrap();
    let bill = store.insert_bill(&NewBill::named("Water"), created_at()).unwrap();
    store.insert_payment(bill.id, 12.0, created_at()).unwrap();

    let reopened = store.reopen().unwrap();
    assert_eq!(reopened.all_bills().unwrap(), vec![bill]);
    assert_eq!(reopened.payment_count().unwrap(), 1);
}

/// Deleting or updating a missing row is reported, not ignored.
#[test]
fn missing_rows_are_not_found() {
    let store = BillStore::in_memory_migrated().unwrap();
    assert!(matches!(store.delete_bill(9), Err(BillError::NotFound { id: 9 })));
    assert!(matches!(store.set_due_date(9, None), Err(BillError::NotFound { id: 9 })));
    assert_eq!(store.bill(9).unwrap(), None);
}

/// A failed due-date update rolls back the payment inserted in the same transaction.
#[test]
fn record_payment_is_atomic() {
    let store = BillStore::in_memory_migrated().unwrap();

    let result = store.record_payment(
        42,
        10.0,
        created_at(),
        NaiveDate::from_ymd_opt(2024, 4, 1),
    );

    assert!(matches!(result, Err(BillError::NotFound { id: 42 })));
    assert_eq!(store.payment_count().unwrap(), 0);
}
