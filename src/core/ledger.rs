use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::core::error::{LedgerError, LedgerResult};
use crate::core::transaction::{Transaction, TransactionId, TransactionType, Draft, Amount};

/// Transactions ordered newest first. Serializes as a plain JSON array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>
}

impl Ledger {
    pub fn new() -> Ledger {
        return Ledger { transactions: Vec::new() };
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Ledger {
        return Ledger { transactions };
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    /// Drops records breaking the ledger invariants: invalid fields, or
    /// an id already used by an earlier (newer) record. Returns why each
    /// dropped record was rejected.
    pub fn discard_invalid(&mut self) -> Vec<LedgerError> {
        let mut seen = HashSet::new();
        let mut rejected = Vec::new();
        self.transactions.retain(|t| {
            if let Err(err) = t.validate() {
                rejected.push(err);
                return false;
            }
            if !seen.insert(t.id()) {
                rejected.push(LedgerError::DuplicateId(t.id()));
                return false;
            }
            return true;
        });
        return rejected;
    }

    /// Ids are the creation time in milliseconds, bumped past the
    /// largest existing id when the clock hasn't moved on.
    fn next_id(&self, now: DateTime<Utc>) -> LedgerResult<TransactionId> {
        let candidate = now.timestamp_millis();
        return match self.transactions.iter().map(|t| t.id()).max() {
            Some(max) if max >= candidate => max.checked_add(1).ok_or(LedgerError::IdOverflow),
            _ => Ok(candidate)
        };
    }

    pub fn insert(&mut self, draft: Draft, now: DateTime<Utc>) -> LedgerResult<&Transaction> {
        let id = self.next_id(now)?;
        self.transactions.insert(0, Transaction::from_draft(id, draft, now));
        return Ok(&self.transactions[0]);
    }

    pub fn update(&mut self, id: TransactionId, draft: Draft) -> LedgerResult<&Transaction> {
        let transaction = self.transactions.iter_mut()
            .find(|t| t.id() == id)
            .ok_or(LedgerError::NotFound(id))?;
        transaction.apply(draft);
        return Ok(transaction);
    }

    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let position = self.transactions.iter().position(|t| t.id() == id)?;
        return Some(self.transactions.remove(position));
    }

    pub fn balance(&self) -> Amount {
        return self.transactions.iter()
            .map(|t| t.signed_amount()).sum();
    }

    fn total_of(&self, kind: TransactionType) -> Amount {
        return self.transactions.iter()
            .filter(|t| t.kind() == kind)
            .map(|t| t.amount()).sum();
    }

    pub fn total_income(&self) -> Amount {
        self.total_of(TransactionType::Income)
    }

    pub fn total_expense(&self) -> Amount {
        self.total_of(TransactionType::Expense)
    }
}
