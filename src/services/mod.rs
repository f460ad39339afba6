//! Services module - the collaborators around the classification core.
//!
//! # Components
//!
//! - [`SearchExecutor`]: the seam through which a compiled [`SearchRequest`](crate::query::SearchRequest)
//!   is run. [`RipgrepExecutor`] implements it by spawning ripgrep on the tokio runtime:
//!   - prepends its own output flags, then passes the compiled arguments through untouched
//!   - enforces the configured timeout and kills the child when it expires
//!   - maps exit code 1 to "no matches" and any higher code to [`SearchError::ToolFailed`]
//!   - parses `path:line:column:text` lines into [`SearchMatch`] values
//!
//! - [`detect_project_root`]: finds the search root by walking up to the nearest
//!   version-control or project marker.
//!
//! Neither service knows anything about glob groups or classification; they only
//! receive plain arguments and paths.

pub mod project;
pub mod search;

pub use project::{PROJECT_MARKERS, detect_project_root};
pub use search::{
    RipgrepExecutor, SearchError, SearchExecutor, SearchMatch, SearchOutcome,
};
