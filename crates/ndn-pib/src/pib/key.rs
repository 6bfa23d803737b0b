//! Key registry — public-key records keyed by name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{PibError, Result};
use crate::name::Name;

/// Cryptosystem of a stored public key.
///
/// The registry records and returns the type opaquely; it never
/// interprets the key bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    Rsa,
    Ec,
}

/// An owned public-key record: type plus opaque encoded bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyInfo {
    pub key_type: KeyType,
    /// Encoded key bits, compared byte-for-byte.
    pub bits: Vec<u8>,
}

#[derive(Debug)]
struct KeyEntry {
    name: Name,
    info: PublicKeyInfo,
}

/// In-memory registry of public keys, keyed by canonical name URI.
///
/// The registry exclusively owns each record; reads hand out owned
/// copies, so later mutation never invalidates a returned value.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    records: HashMap<String, KeyEntry>,
}

impl KeyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `true` if a key named `name` is registered.
    pub fn contains(&self, name: &Name) -> bool {
        self.records.contains_key(&name.to_uri())
    }

    /// Register a key.
    ///
    /// Re-registering identical content is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `PibError::Duplicate` when `name` is already registered
    /// with a different `(key_type, bits)` pair.
    pub fn insert(&mut self, name: &Name, key_type: KeyType, bits: &[u8]) -> Result<()> {
        let uri = name.to_uri();
        if let Some(existing) = self.records.get(&uri) {
            if existing.info.key_type == key_type && existing.info.bits == bits {
                return Ok(());
            }
            return Err(PibError::Duplicate(format!(
                "key already registered with different content: {name}"
            )));
        }
        self.records.insert(
            uri,
            KeyEntry {
                name: name.clone(),
                info: PublicKeyInfo {
                    key_type,
                    bits: bits.to_vec(),
                },
            },
        );
        Ok(())
    }

    /// Return an owned copy of the record for `name`.
    ///
    /// # Errors
    ///
    /// Returns `PibError::NotFound` when no such key is registered.
    pub fn get(&self, name: &Name) -> Result<PublicKeyInfo> {
        self.records
            .get(&name.to_uri())
            .map(|entry| entry.info.clone())
            .ok_or_else(|| PibError::NotFound(format!("key not found: {name}")))
    }

    /// Remove the record for `name`, returning `true` if it existed.
    pub fn remove(&mut self, name: &Name) -> bool {
        self.records.remove(&name.to_uri()).is_some()
    }

    /// Return every registered key name, in unspecified order.
    pub fn names(&self) -> Vec<Name> {
        self.records.values().map(|e| e.name.clone()).collect()
    }

    /// Return the names of keys under `prefix`, in unspecified order.
    pub fn names_with_prefix(&self, prefix: &Name) -> Vec<Name> {
        self.records
            .values()
            .filter(|e| prefix.is_prefix_of(&e.name))
            .map(|e| e.name.clone())
            .collect()
    }

    /// Return the number of registered keys.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return `true` when no keys are registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
