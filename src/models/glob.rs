use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Delimiter placed on both sides of a group's mnemonic (`_c_pp` -> `c`).
pub const MNEMONIC_DELIMITER: char = '_';

static MNEMONIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_])_").expect("Invalid mnemonic regex"));

/// Errors raised while registering glob groups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Glob group identifier cannot be empty")]
    EmptyIdentifier,

    #[error("Glob group identifier {0:?} carries more than one mnemonic")]
    MultipleMnemonics(String),
}

/// Identifier of a glob group, validated once at registration time.
///
/// The identifier may embed a single-character mnemonic surrounded by
/// [`MNEMONIC_DELIMITER`], e.g. `_c_pp` or `_t_ests`. The mnemonic is what the
/// menu binds to a key; identifiers without one are still valid but get no key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GlobGroupId {
    raw: String,
    #[serde(skip)]
    mnemonic: Option<char>,
}

impl GlobGroupId {
    /// Validate and build an identifier
    pub fn new(raw: impl Into<String>) -> Result<Self, RegistryError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(RegistryError::EmptyIdentifier);
        }

        let mut captures = MNEMONIC_PATTERN.captures_iter(&raw);
        let mnemonic = captures
            .next()
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().chars().next());
        if captures.next().is_some() {
            return Err(RegistryError::MultipleMnemonics(raw));
        }

        Ok(Self { raw, mnemonic })
    }

    /// The identifier exactly as registered
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The single mnemonic character, if the identifier carries one
    pub fn mnemonic(&self) -> Option<char> {
        self.mnemonic
    }

    /// Human-readable name with the mnemonic delimiters stripped (`_c_pp` -> `cpp`)
    pub fn label(&self) -> String {
        match MNEMONIC_PATTERN.find(&self.raw) {
            Some(found) if self.mnemonic.is_some() => {
                let mut label = String::with_capacity(self.raw.len());
                label.push_str(&self.raw[..found.start()]);
                label.extend(self.mnemonic);
                label.push_str(&self.raw[found.end()..]);
                label
            }
            _ => self.raw.clone(),
        }
    }
}

impl fmt::Display for GlobGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<&str> for GlobGroupId {
    type Error = RegistryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A glob string handed verbatim to the search tool. Never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobPattern(String);

impl GlobPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GlobPattern {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GlobPattern {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Mapping from group identifier to its ordered glob patterns.
///
/// Populated during setup and read-only while a menu session is active.
/// Iteration follows registration order, which is also the menu order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobRegistry {
    groups: IndexMap<GlobGroupId, Vec<GlobPattern>>,
}

impl GlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the patterns for `id`, overwriting any prior entry in place
    pub fn register<I, P>(&mut self, id: GlobGroupId, patterns: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<GlobPattern>,
    {
        let patterns: Vec<GlobPattern> = patterns.into_iter().map(Into::into).collect();
        tracing::debug!("Registered glob group {} with {} patterns", id, patterns.len());
        self.groups.insert(id, patterns);
    }

    /// Patterns of a group; unregistered groups resolve to an empty slice
    pub fn patterns(&self, id: &GlobGroupId) -> &[GlobPattern] {
        self.groups.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Swap the whole contents for another registry (between sessions only)
    pub fn replace_all(&mut self, other: GlobRegistry) {
        self.groups = other.groups;
    }

    pub fn contains(&self, id: &GlobGroupId) -> bool {
        self.groups.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GlobGroupId, &[GlobPattern])> {
        self.groups.iter().map(|(id, patterns)| (id, patterns.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
