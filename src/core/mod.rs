pub mod error;
pub mod transaction;
pub mod ledger;

pub use error::{LedgerError, LedgerResult};
pub use transaction::{Transaction, TransactionType, TransactionId, Amount, Draft};
pub use ledger::Ledger;
