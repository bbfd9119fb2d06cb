mod core;
pub mod backend;
pub mod config;
pub mod form;
pub mod format;
pub mod store;

pub use crate::core::{Ledger, Transaction, TransactionType, TransactionId, Amount, Draft, LedgerError, LedgerResult};
pub use crate::core::{ledger, transaction, error};
pub use crate::store::LedgerStore;
