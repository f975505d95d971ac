//! billdesk-core — recurring bill tracking: storage, mutations, and analytics.

pub mod analytics;
pub mod board;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logo;
pub mod store;
pub mod types;
