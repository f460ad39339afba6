//! Data models for globscope.
//!
//! - [`GlobGroupId`], [`GlobPattern`], [`GlobRegistry`]: the named glob groups and their patterns
//! - [`ClassificationState`]: the include/exclude sets mutated during one menu session
//! - [`GroupStatus`] and [`SearchMode`]: derived display status and query interpretation
//! - [`GroupsConfig`], [`UserConfig`], [`IgnoreConfig`]: YAML-backed configuration
//!
//! The registry is owned by the configuration layer and read-only during a session.
//! A `ClassificationState` belongs to exactly one session and is threaded through the
//! pure functions in [`crate::state`] by value; there is no global state.

pub mod classification;
pub mod config;
pub mod glob;

pub use classification::{ClassificationState, GroupStatus, SearchMode};
pub use config::{GroupsConfig, IgnoreConfig, SearchSettings, UserConfig};
pub use glob::{GlobGroupId, GlobPattern, GlobRegistry, MNEMONIC_DELIMITER, RegistryError};
