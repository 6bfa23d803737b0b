//! Public-information base — the store of locally known identities,
//! public keys, and certificates, with per-entity default selection.
//!
//! [`Pib`] is the capability interface; [`MemoryPib`] is the in-process
//! backend. The store records what it is told and answers existence and
//! default queries; it does not evaluate trust policy.

pub mod certificate;
pub mod defaults;
pub mod identity;
pub mod key;
pub mod memory;

pub use certificate::{Certificate, CertificateRegistry, ValidityPeriod};
pub use defaults::DefaultResolver;
pub use identity::IdentityRegistry;
pub use key::{KeyRegistry, KeyType, PublicKeyInfo};
pub use memory::MemoryPib;

use crate::error::{PibError, Result};
use crate::name::Name;

/// Capability interface for an identity/key/certificate store.
///
/// Every read returns an owned copy, so a value handed out earlier is
/// never invalidated by a later mutation. Implementations provide no
/// internal locking; callers sharing a store across threads must
/// serialize access externally.
///
/// The listing operations are dual-mode: with `only_default = false`
/// they return every known name (order not significant), with `true`
/// a singleton holding the relevant default, or nothing when no
/// default is set.
pub trait Pib {
    // ── Identities ────────────────────────────────────────────────────────────

    /// Return `true` if `name` is a known identity.
    fn identity_exists(&self, name: &Name) -> bool;

    /// Record `name` as a known identity. Idempotent.
    fn add_identity(&mut self, name: &Name);

    /// Remove an identity together with its keys, their certificates,
    /// and every default that referenced a removed entity, as one
    /// logical operation.
    ///
    /// # Errors
    ///
    /// Returns `PibError::NotFound` when the identity does not exist.
    fn delete_identity(&mut self, name: &Name) -> Result<()>;

    /// List identity names (dual-mode, see trait docs).
    fn list_identities(&self, only_default: bool) -> Vec<Name>;

    // ── Keys ──────────────────────────────────────────────────────────────────

    /// Return `true` if a key named `name` is registered.
    fn key_exists(&self, name: &Name) -> bool;

    /// Register a public key. Re-adding identical content is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `PibError::Duplicate` when `name` is already registered
    /// with different content.
    fn add_public_key(&mut self, name: &Name, key_type: KeyType, bits: &[u8]) -> Result<()>;

    /// Return an owned copy of the key record.
    ///
    /// # Errors
    ///
    /// Returns `PibError::NotFound` when no such key is registered.
    fn get_public_key(&self, name: &Name) -> Result<PublicKeyInfo>;

    /// Remove a key together with its certificates; clears every
    /// default that referenced a removed entity.
    ///
    /// # Errors
    ///
    /// Returns `PibError::NotFound` when the key does not exist.
    fn delete_key(&mut self, name: &Name) -> Result<()>;

    /// List key names (dual-mode). The default slot resolves through
    /// the default identity's default key.
    fn list_keys(&self, only_default: bool) -> Vec<Name>;

    /// List the keys under `identity`'s prefix (dual-mode; the default
    /// slot is that identity's own default key).
    fn list_keys_of_identity(&self, identity: &Name, only_default: bool) -> Vec<Name>;

    // ── Certificates ──────────────────────────────────────────────────────────

    /// Return `true` if a certificate named `name` is registered.
    fn certificate_exists(&self, name: &Name) -> bool;

    /// Register a certificate under its own name. Re-adding an
    /// identical record is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `PibError::Duplicate` when the name is already registered
    /// with a different record.
    fn add_certificate(&mut self, certificate: Certificate) -> Result<()>;

    /// Return an owned copy of the certificate.
    ///
    /// # Errors
    ///
    /// Returns `PibError::NotFound` when no such certificate is registered.
    fn get_certificate(&self, name: &Name) -> Result<Certificate>;

    /// Remove a certificate; clears any default naming it.
    ///
    /// # Errors
    ///
    /// Returns `PibError::NotFound` when the certificate does not exist.
    fn delete_certificate(&mut self, name: &Name) -> Result<()>;

    /// List certificate names (dual-mode). The default slot resolves
    /// through the default identity's default key's default certificate.
    fn list_certificates(&self, only_default: bool) -> Vec<Name>;

    /// List the certificates belonging to `key` (dual-mode; the default
    /// slot is that key's own default certificate).
    fn list_certificates_of_key(&self, key: &Name, only_default: bool) -> Vec<Name>;

    // ── Defaults ──────────────────────────────────────────────────────────────

    /// The process-wide default identity.
    ///
    /// # Errors
    ///
    /// Returns `PibError::NoDefault` when unset.
    fn default_identity(&self) -> Result<Name>;

    /// The default key for `identity`.
    ///
    /// # Errors
    ///
    /// Returns `PibError::NoDefault` when unset for that identity.
    fn default_key_for_identity(&self, identity: &Name) -> Result<Name>;

    /// The default certificate for `key`.
    ///
    /// # Errors
    ///
    /// Returns `PibError::NoDefault` when unset for that key.
    fn default_certificate_for_key(&self, key: &Name) -> Result<Name>;

    /// Unconditionally record `name` as the default identity.
    fn set_default_identity_unchecked(&mut self, name: &Name);

    /// Unconditionally record `key` as `identity`'s default key.
    fn set_default_key_for_identity_unchecked(&mut self, identity: &Name, key: &Name);

    /// Unconditionally record `certificate` as `key`'s default
    /// certificate.
    fn set_default_certificate_for_key_unchecked(&mut self, key: &Name, certificate: &Name);

    /// Validate that `name` is a known identity, then make it the
    /// default.
    ///
    /// # Errors
    ///
    /// Returns `PibError::NotFound` when the identity does not exist.
    fn set_default_identity(&mut self, name: &Name) -> Result<()> {
        if !self.identity_exists(name) {
            return Err(PibError::NotFound(format!("identity not found: {name}")));
        }
        self.set_default_identity_unchecked(name);
        Ok(())
    }

    /// Validate that both the identity and the key exist, then record
    /// `key` as `identity`'s default key.
    ///
    /// # Errors
    ///
    /// Returns `PibError::NotFound` when either entity does not exist.
    fn set_default_key_for_identity(&mut self, identity: &Name, key: &Name) -> Result<()> {
        if !self.identity_exists(identity) {
            return Err(PibError::NotFound(format!(
                "identity not found: {identity}"
            )));
        }
        if !self.key_exists(key) {
            return Err(PibError::NotFound(format!("key not found: {key}")));
        }
        self.set_default_key_for_identity_unchecked(identity, key);
        Ok(())
    }

    /// Validate that both the key and the certificate exist, then
    /// record `certificate` as `key`'s default certificate.
    ///
    /// # Errors
    ///
    /// Returns `PibError::NotFound` when either entity does not exist.
    fn set_default_certificate_for_key(&mut self, key: &Name, certificate: &Name) -> Result<()> {
        if !self.key_exists(key) {
            return Err(PibError::NotFound(format!("key not found: {key}")));
        }
        if !self.certificate_exists(certificate) {
            return Err(PibError::NotFound(format!(
                "certificate not found: {certificate}"
            )));
        }
        self.set_default_certificate_for_key_unchecked(key, certificate);
        Ok(())
    }
}
