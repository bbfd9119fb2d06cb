//! State of the entry form: the fields being typed and whether they
//! create a new transaction or edit an existing one.
use crate::backend::Storage;
use crate::core::{Transaction, TransactionId, TransactionType, LedgerResult};
use crate::core::transaction::{is_amount_input, parse_amount};
use crate::store::LedgerStore;

#[derive(Debug, PartialEq)]
pub enum Submitted {
    Added(Transaction),
    Updated(Transaction)
}

impl Submitted {
    pub fn transaction(&self) -> &Transaction {
        match self {
            Self::Added(t) | Self::Updated(t) => t
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct EntryForm {
    pub description: String,
    amount: String,
    pub kind: TransactionType,
    editing: Option<TransactionId>
}

impl EntryForm {
    pub fn new() -> EntryForm {
        EntryForm::default()
    }

    pub fn amount_input(&self) -> &str {
        &self.amount
    }

    /// Takes the typed amount only if it is made of digits and at most
    /// one decimal point. Returns whether the field changed.
    pub fn set_amount_input(&mut self, text: &str) -> bool {
        if !is_amount_input(text) {
            return false;
        }
        self.amount = text.to_owned();
        return true;
    }

    pub fn editing(&self) -> Option<TransactionId> {
        self.editing
    }

    pub fn begin_edit(&mut self, transaction: &Transaction) {
        self.description = transaction.description().to_owned();
        self.amount = transaction.amount().to_string();
        self.kind = transaction.kind();
        self.editing = Some(transaction.id());
    }

    pub fn submit_label(&self) -> &'static str {
        match self.editing {
            Some(_) => "Update",
            None => "Add"
        }
    }

    /// Adds or updates through `store`. The form is cleared on success
    /// and left as is on failure.
    pub fn submit<S: Storage>(&mut self, store: &mut LedgerStore<S>) -> LedgerResult<Submitted> {
        let amount = parse_amount(&self.amount)?;
        let submitted = match self.editing {
            Some(id) => Submitted::Updated(store.update(id, &self.description, amount, self.kind)?),
            None => Submitted::Added(store.add(&self.description, amount, self.kind)?)
        };
        self.reset();
        return Ok(submitted);
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn reset(&mut self) {
        *self = EntryForm::default();
    }
}
