// Globscope - classify glob groups and launch a scoped ripgrep search
//
// This is the library crate containing the classification core, the argument
// builder and the collaborators around them. The binary crate (main.rs)
// provides the interactive terminal entry point.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod query;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{
    ClassificationState, GlobGroupId, GlobPattern, GlobRegistry, GroupStatus, SearchMode,
};
pub use query::{DefaultIgnores, SearchRequest, build_arguments};
pub use state::{MenuSession, StateChange, classify, reset};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
