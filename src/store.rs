//! The ledger store: an in-memory [`Ledger`] mirrored to a [`Storage`]
//! slot after every change.
//!
//! Loading never fails. A slot that is absent, unreadable or does not
//! parse yields an empty ledger; records that parse but break the ledger
//! invariants are dropped one by one. Writes are fire-and-forget: a failed
//! write is logged and the in-memory state is kept.
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use crate::backend::Storage;
use crate::core::{Ledger, Draft, Transaction, TransactionId, TransactionType, Amount, LedgerResult};

/// Name of the slot the ledger is persisted under unless configured otherwise.
pub const DEFAULT_KEY: &str = "transactions";

pub struct LedgerStore<S: Storage> {
    storage: S,
    key: String,
    ledger: Ledger
}

impl<S: Storage> LedgerStore<S> {
    pub fn load(storage: S) -> Self {
        Self::load_slot(storage, DEFAULT_KEY)
    }

    pub fn load_slot(storage: S, key: &str) -> Self {
        let mut ledger = match storage.get(key) {
            Ok(Some(content)) => match serde_json::from_str::<Ledger>(&content) {
                Ok(ledger) => ledger,
                Err(err) => {
                    warn!("discarding unreadable ledger in slot {:?}: {}", key, err);
                    Ledger::new()
                }
            },
            Ok(None) => {
                debug!("slot {:?} is empty, starting a new ledger", key);
                Ledger::new()
            },
            Err(err) => {
                warn!("failed to read slot {:?}, starting a new ledger: {}", key, err);
                Ledger::new()
            }
        };
        for rejected in ledger.discard_invalid() {
            warn!("dropping stored transaction from slot {:?}: {}", key, rejected);
        }
        info!("loaded {} transactions", ledger.len());
        return LedgerStore { storage, key: key.to_owned(), ledger };
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.ledger.get(id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn add(&mut self, description: &str, amount: Amount, kind: TransactionType) -> LedgerResult<Transaction> {
        self.add_at(description, amount, kind, Utc::now())
    }

    /// Like [`add`](Self::add), with an explicit creation time.
    pub fn add_at(&mut self, description: &str, amount: Amount, kind: TransactionType, now: DateTime<Utc>) -> LedgerResult<Transaction> {
        let draft = Draft::new(description, amount, kind)?;
        let created = self.ledger.insert(draft, now)?.clone();
        info!("added {} {}", created.kind(), created.id());
        self.persist();
        return Ok(created);
    }

    pub fn update(&mut self, id: TransactionId, description: &str, amount: Amount, kind: TransactionType) -> LedgerResult<Transaction> {
        let draft = Draft::new(description, amount, kind)?;
        let updated = self.ledger.update(id, draft)?.clone();
        info!("updated {}", id);
        self.persist();
        return Ok(updated);
    }

    pub fn remove(&mut self, id: TransactionId) -> bool {
        match self.ledger.remove(id) {
            Some(_) => {
                info!("removed {}", id);
                self.persist();
                true
            },
            None => {
                debug!("nothing to remove for {}", id);
                false
            }
        }
    }

    pub fn balance(&self) -> Amount {
        self.ledger.balance()
    }

    fn persist(&mut self) {
        let content = match serde_json::to_string(&self.ledger) {
            Ok(content) => content,
            Err(err) => {
                error!("failed to serialize ledger: {}", err);
                return;
            }
        };
        if let Err(err) = self.storage.set(&self.key, &content) {
            error!("failed to persist ledger to slot {:?}: {}", self.key, err);
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::backend::{MemoryStore, Storage};
    use crate::core::{Ledger, LedgerError};
    use crate::core::transaction::TransactionType::{Income, Expense};
    use crate::store::{LedgerStore, DEFAULT_KEY};

    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[fixture]
    fn store() -> LedgerStore<MemoryStore> {
        LedgerStore::load(MemoryStore::new())
    }

    fn persisted(store: &LedgerStore<MemoryStore>) -> Option<Ledger> {
        store.storage().get(DEFAULT_KEY).unwrap()
            .map(|content| serde_json::from_str(&content).unwrap())
    }

    #[rstest]
    fn starts_empty(store: LedgerStore<MemoryStore>) {
        assert!(store.transactions().is_empty());
        assert_eq!(store.balance(), Decimal::ZERO);
        assert_eq!(persisted(&store), None);
    }

    #[rstest]
    fn salary_and_coffee(mut store: LedgerStore<MemoryStore>) {
        store.add("Salary", dec!(1000), Income).unwrap();
        store.add("Coffee", dec!(5), Expense).unwrap();
        assert_eq!(store.balance(), dec!(995));
    }

    #[rstest]
    fn add_grows_by_one(mut store: LedgerStore<MemoryStore>) {
        store.add("Salary", dec!(1000), Income).unwrap();
        let created = store.add("Book", dec!(12.5), Expense).unwrap();

        assert_eq!(store.transactions().len(), 2);
        assert_eq!(created.amount(), dec!(12.5));
        assert_eq!(created.kind(), Expense);
        assert_eq!(store.transactions()[0], created);
        assert_eq!(persisted(&store).unwrap(), *store.ledger());
    }

    #[rstest]
    fn invalid_add_is_noop(mut store: LedgerStore<MemoryStore>) {
        store.add("Salary", dec!(1000), Income).unwrap();
        let before = persisted(&store);

        assert_eq!(store.add("", dec!(10), Expense), Err(LedgerError::EmptyDescription));
        assert!(matches!(store.add("Lunch", dec!(0), Expense), Err(LedgerError::InvalidAmount(..))));
        assert!(matches!(store.add("Lunch", dec!(0.001), Expense), Err(LedgerError::InvalidAmount(..))));

        assert_eq!(store.transactions().len(), 1);
        assert_eq!(persisted(&store), before);
    }

    #[rstest]
    fn update_replaces_amount(mut store: LedgerStore<MemoryStore>) {
        let original = store.add("Salary", dec!(100), Income).unwrap();
        let updated = store.update(original.id(), "Dinner", dec!(50), Expense).unwrap();

        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.date(), original.date());
        assert_eq!(updated.description(), "Dinner");
        assert_eq!(store.balance(), dec!(-50));
        assert_eq!(persisted(&store).unwrap(), *store.ledger());
    }

    #[rstest]
    fn invalid_update_is_noop(mut store: LedgerStore<MemoryStore>) {
        let original = store.add("Salary", dec!(100), Income).unwrap();
        let before = persisted(&store);

        let res = store.update(original.id(), "  ", dec!(50), Expense);
        assert_eq!(res, Err(LedgerError::EmptyDescription));
        let res = store.update(original.id(), "Dinner", dec!(0.005), Expense);
        assert!(matches!(res, Err(LedgerError::InvalidAmount(..))));

        assert_eq!(store.get(original.id()), Some(&original));
        assert_eq!(persisted(&store), before);
    }

    #[rstest]
    fn update_after_remove(mut store: LedgerStore<MemoryStore>) {
        let created = store.add("Salary", dec!(1000), Income).unwrap();
        assert!(store.remove(created.id()));

        let res = store.update(created.id(), "Salary", dec!(1200), Income);
        assert_eq!(res, Err(LedgerError::NotFound(created.id())));
        assert_eq!(persisted(&store).unwrap(), Ledger::new());
    }

    #[rstest]
    fn remove_unknown(mut store: LedgerStore<MemoryStore>) {
        let created = store.add("Salary", dec!(1000), Income).unwrap();
        let before = store.ledger().clone();

        assert!(!store.remove(created.id() + 1));
        assert_eq!(*store.ledger(), before);
    }

    #[rstest]
    fn reload_round_trip(mut store: LedgerStore<MemoryStore>) {
        store.add("Salary", dec!(1000), Income).unwrap();
        store.add("Rent", dec!(400), Expense).unwrap();
        store.add("Coffee", dec!(3.5), Expense).unwrap();
        let expected = store.ledger().clone();

        let reloaded = LedgerStore::load(store.into_storage());
        assert_eq!(*reloaded.ledger(), expected);
        assert_eq!(reloaded.balance(), dec!(596.5));
    }

    #[test]
    fn corrupt_slot_loads_empty() {
        let store = LedgerStore::load(MemoryStore::with_slot(DEFAULT_KEY, "{not json"));
        assert!(store.transactions().is_empty());
    }

    #[test]
    fn broken_records_dropped() {
        let stored = r#"[
            {"id":1,"description":"","amount":-50,"type":"income","date":"2024-01-02T00:00:00Z"},
            {"id":1,"description":"Coffee","amount":5,"type":"expense","date":"2024-01-01T00:00:00Z"}
        ]"#;
        let store = LedgerStore::load(MemoryStore::with_slot(DEFAULT_KEY, stored));

        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.get(1).unwrap().description(), "Coffee");
        assert_eq!(store.balance(), dec!(-5));
    }

    #[test]
    fn duplicate_ids_keep_newest() {
        let stored = r#"[
            {"id":7,"description":"Salary","amount":1000,"type":"income","date":"2024-01-02T00:00:00Z"},
            {"id":7,"description":"Coffee","amount":5,"type":"expense","date":"2024-01-01T00:00:00Z"}
        ]"#;
        let mut store = LedgerStore::load(MemoryStore::with_slot(DEFAULT_KEY, stored));

        assert_eq!(store.transactions().len(), 1);
        assert!(store.remove(7));
        assert!(store.transactions().is_empty());
    }

    #[test]
    fn exhausted_ids_reject_add() {
        let stored = r#"[{"id":9223372036854775807,"description":"Salary","amount":1,"type":"income","date":"2024-01-01T00:00:00Z"}]"#;
        let mut store = LedgerStore::load(MemoryStore::with_slot(DEFAULT_KEY, stored));

        let res = store.add("Salary", dec!(1), Income);
        assert_eq!(res, Err(LedgerError::IdOverflow));
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.storage().get(DEFAULT_KEY).unwrap().as_deref(), Some(stored));
    }

    #[test]
    fn custom_slot() {
        let mut store = LedgerStore::load_slot(MemoryStore::new(), "household");
        store.add("Groceries", dec!(80), Expense).unwrap();

        let storage = store.into_storage();
        assert!(storage.get("household").unwrap().is_some());
        assert!(storage.get(DEFAULT_KEY).unwrap().is_none());
    }

    #[test]
    fn bad_slot_name_fails_soft() {
        let mut store = LedgerStore::load_slot(MemoryStore::new(), "not a key");
        let created = store.add("Groceries", dec!(80), Expense).unwrap();
        assert_eq!(store.get(created.id()), Some(&created));
    }
}
