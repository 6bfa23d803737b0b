//! Default resolver — which identity, key, and certificate to use when
//! the caller does not name one.
//!
//! Defaults are scoped: one default key per identity and one default
//! certificate per key, held in maps keyed by the owning entity's
//! canonical URI. The resolver itself stores whatever it is told; the
//! store's public setters validate that a target exists before writing,
//! and its delete paths call the `forget_*` methods so no default ever
//! dangles between calls.

use std::collections::HashMap;

use crate::name::Name;

/// Scoped default settings for a store.
#[derive(Debug, Default)]
pub struct DefaultResolver {
    default_identity: Option<Name>,
    /// identity URI → that identity's default key name.
    default_keys: HashMap<String, Name>,
    /// key URI → that key's default certificate name.
    default_certificates: HashMap<String, Name>,
}

impl DefaultResolver {
    /// Create a resolver with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// The process-wide default identity, if set.
    pub fn identity(&self) -> Option<&Name> {
        self.default_identity.as_ref()
    }

    /// The default key for `identity`, if set.
    pub fn key_for_identity(&self, identity: &Name) -> Option<&Name> {
        self.default_keys.get(&identity.to_uri())
    }

    /// The default certificate for `key`, if set.
    pub fn certificate_for_key(&self, key: &Name) -> Option<&Name> {
        self.default_certificates.get(&key.to_uri())
    }

    // ── Unconditional setters ─────────────────────────────────────────────────

    /// Overwrite the default identity.
    pub fn set_identity(&mut self, name: &Name) {
        self.default_identity = Some(name.clone());
    }

    /// Overwrite `identity`'s default key.
    pub fn set_key_for_identity(&mut self, identity: &Name, key: &Name) {
        self.default_keys.insert(identity.to_uri(), key.clone());
    }

    /// Overwrite `key`'s default certificate.
    pub fn set_certificate_for_key(&mut self, key: &Name, certificate: &Name) {
        self.default_certificates
            .insert(key.to_uri(), certificate.clone());
    }

    // ── Cascade clearing ──────────────────────────────────────────────────────

    /// Drop every default owned by a deleted identity: the process-wide
    /// default if it named this identity, and its default-key slot.
    pub fn forget_identity(&mut self, identity: &Name) {
        if self.default_identity.as_ref() == Some(identity) {
            self.default_identity = None;
        }
        self.default_keys.remove(&identity.to_uri());
    }

    /// Drop every default referencing a deleted key: default-key slots
    /// that named it, and its own default-certificate slot.
    pub fn forget_key(&mut self, key: &Name) {
        self.default_keys.retain(|_, v| v != key);
        self.default_certificates.remove(&key.to_uri());
    }

    /// Drop every default-certificate slot naming a deleted certificate.
    pub fn forget_certificate(&mut self, certificate: &Name) {
        self.default_certificates.retain(|_, v| v != certificate);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
