use thiserror::Error;

use crate::core::transaction::TransactionId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Occurs when a transaction is submitted without a description,
    /// or with one made only of whitespace.
    #[error("description must not be empty")]
    EmptyDescription,
    /// Occurs when an amount is not strictly positive,
    /// or has more than two decimal places.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
    /// Occurs when a transaction type is neither income nor expense.
    #[error("unknown transaction type: {0:?}")]
    UnknownType(String),
    /// Occurs when attempting to reference a transaction
    /// by an id which does not exist on the ledger
    #[error("no such transaction id: {0}")]
    NotFound(TransactionId),
    /// Occurs when a stored ledger holds the same id more than once.
    #[error("duplicate transaction id: {0}")]
    DuplicateId(TransactionId),
    /// Occurs when no id above the largest existing one is left.
    #[error("transaction ids exhausted")]
    IdOverflow,
}

pub type LedgerResult<T> = Result<T, LedgerError>;
