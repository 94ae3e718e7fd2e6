use super::backend::KvBackend;
use crate::error::{NomadError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory key-value backend for testing.
///
/// Uses `RefCell` for interior mutability since the data layer is
/// single-threaded. This avoids the overhead of `RwLock` while still allowing
/// the `KvBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
    simulate_read_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation (quota exceeded, access denied).
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Enable read error simulation.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// Test helper to plant a raw value, bypassing write error simulation.
    /// Useful for seeding corrupt payloads.
    pub fn put(&self, key: &str, raw: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
    }

    /// Test helper returning the raw stored value, bypassing read error simulation.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KvBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(NomadError::Store("Simulated read error".to_string()));
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(NomadError::Store("Simulated write error".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(NomadError::Store("Simulated write error".to_string()));
        }
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
