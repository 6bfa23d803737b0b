//! Hierarchical names — the identifiers for identities, keys, and
//! certificates.
//!
//! A [`Name`] is an ordered sequence of opaque binary components. The
//! store only needs three operations from it: structural equality, a
//! component-wise prefix test, and a canonical URI string that is
//! injective over distinct component sequences (registries key their
//! maps by that string). The full NDN URI grammar (typed components,
//! version markers, scheme prefixes) is out of scope here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PibError, Result};

// ── NameComponent ─────────────────────────────────────────────────────────────

/// A single opaque binary component of a [`Name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameComponent(pub Vec<u8>);

impl NameComponent {
    /// Return the raw component bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for NameComponent {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<&[u8]> for NameComponent {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for NameComponent {
    /// Render the component in escaped URI form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(self.0.len());
        escape_component(&self.0, &mut out);
        write!(f, "{out}")
    }
}

// ── Name ──────────────────────────────────────────────────────────────────────

/// An ordered sequence of opaque binary components.
///
/// Two names are equal iff their component sequences are equal.
/// [`Name::to_uri`] produces the canonical string form used as the
/// registry map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Name {
    components: Vec<NameComponent>,
}

impl Name {
    /// Create the empty name (`/`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a name from the given components.
    pub fn from_components(components: Vec<NameComponent>) -> Self {
        Self { components }
    }

    /// Return the component sequence.
    pub fn components(&self) -> &[NameComponent] {
        &self.components
    }

    /// Return the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Return `true` for the empty name.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Component-wise prefix test. The empty name is a prefix of every
    /// name, and every name is a prefix of itself.
    pub fn is_prefix_of(&self, other: &Name) -> bool {
        if self.components.len() > other.components.len() {
            return false;
        }
        self.components
            .iter()
            .zip(other.components.iter())
            .all(|(a, b)| a == b)
    }

    /// Canonical URI form: components joined by `/`, bytes outside the
    /// unreserved set percent-encoded as uppercase `%XX`. A component
    /// made up solely of periods (the empty component included) carries
    /// three extra periods, so the empty name never collides with a
    /// one-component name.
    ///
    /// Distinct component sequences always produce distinct strings, so
    /// the result is usable as a collision-free map key.
    pub fn to_uri(&self) -> String {
        if self.components.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for component in &self.components {
            out.push('/');
            escape_component(&component.0, &mut out);
        }
        out
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uri())
    }
}

impl FromStr for Name {
    type Err = PibError;

    /// Parse the slash-separated escaped form produced by [`Name::to_uri`].
    ///
    /// A leading `/` is optional; `/` alone is the empty name. Redundant
    /// slashes carry no component and are skipped.
    fn from_str(s: &str) -> Result<Self> {
        let body = s.strip_prefix('/').unwrap_or(s);
        let mut components = Vec::new();
        for segment in body.split('/') {
            if segment.is_empty() {
                continue;
            }
            components.push(NameComponent(unescape_component(segment)?));
        }
        Ok(Self { components })
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_uri())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Escaping ──────────────────────────────────────────────────────────────────

/// RFC 3986 unreserved characters pass through unescaped.
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

/// Render one component. An all-period component is padded with three
/// extra periods; anything else is percent-escaped byte by byte.
fn escape_component(bytes: &[u8], out: &mut String) {
    if bytes.iter().all(|&b| b == b'.') {
        for _ in 0..bytes.len() + 3 {
            out.push('.');
        }
        return;
    }
    for &b in bytes {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
}

/// Invert [`escape_component`] for one non-empty segment.
fn unescape_component(segment: &str) -> Result<Vec<u8>> {
    let raw = segment.as_bytes();
    if raw.iter().all(|&b| b == b'.') {
        if raw.len() < 3 {
            return Err(PibError::Decode(format!(
                "period component missing its padding periods: '{segment}'"
            )));
        }
        return Ok(vec![b'.'; raw.len() - 3]);
    }
    unescape(segment)
}

fn unescape(segment: &str) -> Result<Vec<u8>> {
    let raw = segment.as_bytes();
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'%' {
            let hex = raw
                .get(i + 1..i + 3)
                .ok_or_else(|| PibError::Decode(format!("truncated percent-escape in '{segment}'")))?;
            let s = std::str::from_utf8(hex)
                .map_err(|_| PibError::Decode(format!("invalid percent-escape in '{segment}'")))?;
            let byte = u8::from_str_radix(s, 16)
                .map_err(|_| PibError::Decode(format!("invalid percent-escape in '{segment}'")))?;
            out.push(byte);
            i += 3;
        } else {
            out.push(raw[i]);
            i += 1;
        }
    }
    Ok(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
