//! Certificate registry — signed key/validity bindings keyed by name.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PibError, Result};
use crate::name::Name;

/// Inclusive validity interval of a certificate, second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityPeriod {
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

impl ValidityPeriod {
    /// Create a validity interval `[not_before, not_after]`.
    pub fn new(not_before: DateTime<Utc>, not_after: DateTime<Utc>) -> Self {
        Self {
            not_before,
            not_after,
        }
    }

    /// Check whether `time` falls within the interval, inclusive at
    /// both endpoints.
    pub fn covers(&self, time: &DateTime<Utc>) -> bool {
        self.not_before <= *time && *time <= self.not_after
    }
}

/// A stored certificate: a signed binding of a subject key to a
/// validity interval.
///
/// The registry treats signature and issuer data as opaque bytes;
/// validating either is trust-policy work that lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Certificate name, the registry key.
    pub name: Name,
    /// Name of the key this certificate speaks for.
    pub subject_key: Name,
    /// Validity interval.
    pub validity: ValidityPeriod,
    /// Opaque signature bytes.
    pub signature: Vec<u8>,
    /// Opaque issuer-identifying data.
    pub issuer: Vec<u8>,
}

/// In-memory registry of certificates, keyed by canonical name URI.
///
/// Records are exclusively owned; reads hand out owned copies.
#[derive(Debug, Default)]
pub struct CertificateRegistry {
    records: HashMap<String, Certificate>,
}

impl CertificateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `true` if a certificate named `name` is registered.
    pub fn contains(&self, name: &Name) -> bool {
        self.records.contains_key(&name.to_uri())
    }

    /// Register a certificate under its own name.
    ///
    /// Re-registering a field-wise identical record is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `PibError::Duplicate` when the name is already registered
    /// with a different record.
    pub fn insert(&mut self, certificate: Certificate) -> Result<()> {
        let uri = certificate.name.to_uri();
        if let Some(existing) = self.records.get(&uri) {
            if *existing == certificate {
                return Ok(());
            }
            return Err(PibError::Duplicate(format!(
                "certificate already registered with different content: {}",
                certificate.name
            )));
        }
        self.records.insert(uri, certificate);
        Ok(())
    }

    /// Return an owned copy of the certificate named `name`.
    ///
    /// # Errors
    ///
    /// Returns `PibError::NotFound` when no such certificate is registered.
    pub fn get(&self, name: &Name) -> Result<Certificate> {
        self.records
            .get(&name.to_uri())
            .cloned()
            .ok_or_else(|| PibError::NotFound(format!("certificate not found: {name}")))
    }

    /// Remove the certificate named `name`, returning `true` if it existed.
    pub fn remove(&mut self, name: &Name) -> bool {
        self.records.remove(&name.to_uri()).is_some()
    }

    /// Return every registered certificate name, in unspecified order.
    pub fn names(&self) -> Vec<Name> {
        self.records.values().map(|c| c.name.clone()).collect()
    }

    /// Return the names of certificates belonging to `key`: those whose
    /// subject key matches, plus any named under the key's prefix (the
    /// conventional certificate naming).
    pub fn names_of_key(&self, key: &Name) -> Vec<Name> {
        self.records
            .values()
            .filter(|c| c.subject_key == *key || key.is_prefix_of(&c.name))
            .map(|c| c.name.clone())
            .collect()
    }

    /// Return the number of registered certificates.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return `true` when no certificates are registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
