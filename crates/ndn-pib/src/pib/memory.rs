//! In-process [`Pib`] backend.

use log::debug;

use crate::error::{PibError, Result};
use crate::name::Name;
use crate::pib::certificate::{Certificate, CertificateRegistry};
use crate::pib::defaults::DefaultResolver;
use crate::pib::identity::IdentityRegistry;
use crate::pib::key::{KeyRegistry, KeyType, PublicKeyInfo};
use crate::pib::Pib;

/// In-memory public-information base.
///
/// Owns the three registries and the default resolver. Keys associate
/// to identities by name prefix, the conventional naming; the store
/// does not enforce the convention on insert, it only uses it for
/// cascades and per-identity listings. Certificates associate to keys
/// by their subject-key field or by key-name prefix.
#[derive(Debug, Default)]
pub struct MemoryPib {
    identities: IdentityRegistry,
    keys: KeyRegistry,
    certificates: CertificateRegistry,
    defaults: DefaultResolver,
}

impl MemoryPib {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `key` and its certificates, clearing affected defaults.
    /// Returns `true` if the key existed.
    fn remove_key_cascade(&mut self, key: &Name) -> bool {
        if !self.keys.remove(key) {
            return false;
        }
        for cert in self.certificates.names_of_key(key) {
            self.certificates.remove(&cert);
            self.defaults.forget_certificate(&cert);
            debug!("cascade removed certificate {cert}");
        }
        self.defaults.forget_key(key);
        true
    }
}

impl Pib for MemoryPib {
    // ── Identities ────────────────────────────────────────────────────────────

    fn identity_exists(&self, name: &Name) -> bool {
        self.identities.contains(name)
    }

    fn add_identity(&mut self, name: &Name) {
        if self.identities.insert(name) {
            debug!("added identity {name}");
        }
    }

    fn delete_identity(&mut self, name: &Name) -> Result<()> {
        let identity = self
            .identities
            .remove(name)
            .ok_or_else(|| PibError::NotFound(format!("identity not found: {name}")))?;

        let owned_keys = self.keys.names_with_prefix(&identity);
        for key in &owned_keys {
            self.remove_key_cascade(key);
        }
        self.defaults.forget_identity(&identity);
        debug!(
            "deleted identity {identity} with {} owned key(s)",
            owned_keys.len()
        );
        Ok(())
    }

    fn list_identities(&self, only_default: bool) -> Vec<Name> {
        if only_default {
            return self.defaults.identity().cloned().into_iter().collect();
        }
        self.identities.names()
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    fn key_exists(&self, name: &Name) -> bool {
        self.keys.contains(name)
    }

    fn add_public_key(&mut self, name: &Name, key_type: KeyType, bits: &[u8]) -> Result<()> {
        self.keys.insert(name, key_type, bits)?;
        debug!("added key {name} ({} byte(s))", bits.len());
        Ok(())
    }

    fn get_public_key(&self, name: &Name) -> Result<PublicKeyInfo> {
        self.keys.get(name)
    }

    fn delete_key(&mut self, name: &Name) -> Result<()> {
        if !self.remove_key_cascade(name) {
            return Err(PibError::NotFound(format!("key not found: {name}")));
        }
        debug!("deleted key {name}");
        Ok(())
    }

    fn list_keys(&self, only_default: bool) -> Vec<Name> {
        if only_default {
            return self
                .defaults
                .identity()
                .and_then(|identity| self.defaults.key_for_identity(identity))
                .cloned()
                .into_iter()
                .collect();
        }
        self.keys.names()
    }

    fn list_keys_of_identity(&self, identity: &Name, only_default: bool) -> Vec<Name> {
        if only_default {
            return self
                .defaults
                .key_for_identity(identity)
                .cloned()
                .into_iter()
                .collect();
        }
        self.keys.names_with_prefix(identity)
    }

    // ── Certificates ──────────────────────────────────────────────────────────

    fn certificate_exists(&self, name: &Name) -> bool {
        self.certificates.contains(name)
    }

    fn add_certificate(&mut self, certificate: Certificate) -> Result<()> {
        let name = certificate.name.clone();
        self.certificates.insert(certificate)?;
        debug!("added certificate {name}");
        Ok(())
    }

    fn get_certificate(&self, name: &Name) -> Result<Certificate> {
        self.certificates.get(name)
    }

    fn delete_certificate(&mut self, name: &Name) -> Result<()> {
        if !self.certificates.remove(name) {
            return Err(PibError::NotFound(format!(
                "certificate not found: {name}"
            )));
        }
        self.defaults.forget_certificate(name);
        debug!("deleted certificate {name}");
        Ok(())
    }

    fn list_certificates(&self, only_default: bool) -> Vec<Name> {
        if only_default {
            return self
                .defaults
                .identity()
                .and_then(|identity| self.defaults.key_for_identity(identity))
                .and_then(|key| self.defaults.certificate_for_key(key))
                .cloned()
                .into_iter()
                .collect();
        }
        self.certificates.names()
    }

    fn list_certificates_of_key(&self, key: &Name, only_default: bool) -> Vec<Name> {
        if only_default {
            return self
                .defaults
                .certificate_for_key(key)
                .cloned()
                .into_iter()
                .collect();
        }
        self.certificates.names_of_key(key)
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    fn default_identity(&self) -> Result<Name> {
        self.defaults
            .identity()
            .cloned()
            .ok_or_else(|| PibError::NoDefault("no default identity set".to_string()))
    }

    fn default_key_for_identity(&self, identity: &Name) -> Result<Name> {
        self.defaults
            .key_for_identity(identity)
            .cloned()
            .ok_or_else(|| {
                PibError::NoDefault(format!("no default key set for identity {identity}"))
            })
    }

    fn default_certificate_for_key(&self, key: &Name) -> Result<Name> {
        self.defaults
            .certificate_for_key(key)
            .cloned()
            .ok_or_else(|| {
                PibError::NoDefault(format!("no default certificate set for key {key}"))
            })
    }

    fn set_default_identity_unchecked(&mut self, name: &Name) {
        self.defaults.set_identity(name);
    }

    fn set_default_key_for_identity_unchecked(&mut self, identity: &Name, key: &Name) {
        self.defaults.set_key_for_identity(identity, key);
    }

    fn set_default_certificate_for_key_unchecked(&mut self, key: &Name, certificate: &Name) {
        self.defaults.set_certificate_for_key(key, certificate);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
