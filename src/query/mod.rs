//! Search argument compilation.
//!
//! Turns a [`ClassificationState`] plus externally supplied ignore lists into the
//! ordered argument list for the search tool. Order is part of the contract: the
//! tool lets later globs narrow earlier ones, so all negated globs come first and
//! positive globs last, with the literal flag in front of everything.

use crate::models::{ClassificationState, SearchMode};
use camino::{Utf8Path, Utf8PathBuf};

/// Flag asking the search tool to treat the query as fixed text
pub const LITERAL_FLAG: &str = "--fixed-strings";

/// Prefix of every glob filter argument
pub const GLOB_FLAG: &str = "--glob=";

fn positive_glob(pattern: &str) -> String {
    format!("{GLOB_FLAG}{pattern}")
}

fn negated_glob(pattern: &str) -> String {
    format!("{GLOB_FLAG}!{pattern}")
}

/// Compile the ordered search tool arguments.
///
/// 1. the literal flag, when `mode` is [`SearchMode::Literal`]
/// 2. one negated glob per excluded pattern (set order)
/// 3. one negated glob per entry of `default_ignores`
/// 4. one positive glob per included pattern (set order)
///
/// Glob syntax is never checked here; that is the search tool's business.
pub fn build_arguments(
    state: &ClassificationState,
    default_ignores: &[String],
    mode: SearchMode,
) -> Vec<String> {
    let mut arguments = Vec::with_capacity(
        1 + state.exclude.len() + default_ignores.len() + state.include.len(),
    );

    if mode.is_literal() {
        arguments.push(LITERAL_FLAG.to_string());
    }

    arguments.extend(state.excluded().map(|p| negated_glob(p.as_str())));
    arguments.extend(default_ignores.iter().map(|ignore| negated_glob(ignore)));
    arguments.extend(state.included().map(|p| positive_glob(p.as_str())));

    arguments
}

/// Ignore lists supplied by project discovery for the current search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultIgnores {
    pub files: Vec<String>,
    pub directories: Vec<String>,
}

impl DefaultIgnores {
    pub fn new<F, D, S>(files: F, directories: D) -> Self
    where
        F: IntoIterator<Item = S>,
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            directories: directories.into_iter().map(Into::into).collect(),
        }
    }

    /// Flatten into glob strings: files as given, then directories with a trailing `/`
    pub fn to_globs(&self) -> Vec<String> {
        let directories = self.directories.iter().map(|dir| {
            if dir.ends_with('/') {
                dir.clone()
            } else {
                format!("{dir}/")
            }
        });

        self.files.iter().cloned().chain(directories).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }
}

impl From<&crate::models::IgnoreConfig> for DefaultIgnores {
    fn from(config: &crate::models::IgnoreConfig) -> Self {
        Self {
            files: config.files.clone(),
            directories: config.directories.clone(),
        }
    }
}

/// Everything the search executor needs for one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Compiled filter/mode arguments, in order
    pub arguments: Vec<String>,
    pub query: String,
    pub root: Utf8PathBuf,
}

impl SearchRequest {
    pub fn new(arguments: Vec<String>, query: impl Into<String>, root: &Utf8Path) -> Self {
        Self {
            arguments,
            query: query.into(),
            root: root.to_path_buf(),
        }
    }
}
