use std::collections::HashMap;

use crate::backend::interface::{Storage, Result, check_key};

/// Storage that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn with_slot(key: &str, value: &str) -> MemoryStore {
        let mut slots = HashMap::new();
        slots.insert(key.to_owned(), value.to_owned());
        return MemoryStore { slots };
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        self.slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
