#![doc(test(attr(deny(warnings))))]

//! Tally keeps a personal ledger of income and expense transactions, the
//! category names used to file them, and the display currency. State lives in
//! a [`store::LedgerStore`] that writes itself to a key-value persistence
//! surface after every change and reads itself back when opened.
//!
//! ```
//! use tally::{storage::MemoryStore, LedgerStore, TransactionDraft};
//!
//! let mut store = LedgerStore::open(Box::new(MemoryStore::new()));
//! store.add_transaction(TransactionDraft::new("Income", "Salary", "1000")).unwrap();
//! store.add_transaction(TransactionDraft::new("Expense", "Food", "200")).unwrap();
//! assert_eq!(store.balance(), 800.0);
//! ```

pub mod cli;
pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod sitemap;
pub mod storage;
pub mod store;
pub mod time;
pub mod utils;

pub use domain::{
    AmountInput, AmountPolicy, CategoryTaxonomy, LedgerState, Summary, Transaction,
    TransactionDraft, TransactionId, TransactionKind,
};
pub use errors::{CliError, LedgerError};
pub use store::LedgerStore;

/// Initializes global tracing. Safe to call more than once.
pub fn init() {
    utils::init_tracing();
}
