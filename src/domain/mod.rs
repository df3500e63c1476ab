pub mod category;
pub mod common;
pub mod ledger;
pub mod transaction;

pub use category::CategoryTaxonomy;
pub use common::{Displayable, TransactionId};
pub use ledger::{LedgerState, Summary, DEFAULT_CURRENCY};
pub use transaction::{
    parse_amount_prefix, AmountInput, AmountPolicy, Transaction, TransactionDraft,
    TransactionKind,
};
