use crate::error::Result;

/// Abstract interface for the durable key-value medium.
///
/// This trait handles the "how" of storage (filesystem vs memory), while the
/// sub-stores handle the "what" (id sets, review buckets, the profile).
/// Values are opaque strings; every sub-store writes JSON.
pub trait KvBackend {
    /// Read the raw value stored under `key`.
    /// Returns Ok(None) if nothing is stored.
    /// Returns Err only on actual access failures (permissions, disk failure).
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be whole-value (no partial writes visible to a later `get`).
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

impl<B: KvBackend + ?Sized> KvBackend for &B {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}
