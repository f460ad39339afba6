use crate::models::SearchSettings;
use crate::query::SearchRequest;
use camino::Utf8PathBuf;
use regex::Regex;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;
use tokio::runtime::Handle;
use tokio::time::timeout;

/// Output flags the executor always passes so results can be parsed
const OUTPUT_FLAGS: [&str; 4] = ["--color=never", "--no-heading", "--line-number", "--column"];

/// Shortest timeout a search may be given; zero would fail every search at once
pub const MIN_SEARCH_TIMEOUT_SECS: u64 = 1;

/// A single matching line reported by the search tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub path: Utf8PathBuf,
    pub line: u64,
    pub column: u64,
    pub text: String,
}

/// Result of one search invocation
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub matches: Vec<SearchMatch>,
    pub exit_code: i32,
    pub duration: Duration,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Number of distinct files with at least one match
    pub fn file_count(&self) -> usize {
        let mut paths: Vec<&Utf8PathBuf> = self.matches.iter().map(|m| &m.path).collect();
        paths.sort();
        paths.dedup();
        paths.len()
    }

    pub fn summary(&self) -> String {
        if self.matches.is_empty() {
            "No matches".to_string()
        } else {
            format!(
                "{} matches in {} files ({:.2}s)",
                self.matches.len(),
                self.file_count(),
                self.duration.as_secs_f32()
            )
        }
    }
}

/// Errors that can occur while running a search
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search tool not found: {0}")]
    ToolNotFound(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Process error: {0}")]
    ProcessError(#[from] std::io::Error),

    #[error("Search tool exited with code {code}: {stderr}")]
    ToolFailed { code: i32, stderr: String },
}

/// Runs a compiled search request and collects its results.
///
/// The compiled arguments of a [`SearchRequest`] are passed through unmodified.
#[cfg_attr(test, mockall::automock)]
pub trait SearchExecutor {
    fn execute(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError>;
}

/// Executes searches with ripgrep as a subprocess.
///
/// The process runs on the tokio runtime behind `runtime`; `execute` blocks the
/// calling (menu) thread until it finishes or times out. On timeout the child
/// is killed.
pub struct RipgrepExecutor {
    ripgrep_exe: String,
    timeout: Duration,
    runtime: Handle,

    /// Matches `path:line:column:text` lines of ripgrep's output
    line_pattern: Regex,
}

impl RipgrepExecutor {
    pub fn new(ripgrep_exe: impl Into<String>, timeout: Duration, runtime: Handle) -> Self {
        Self {
            ripgrep_exe: ripgrep_exe.into(),
            timeout,
            runtime,
            line_pattern: Regex::new(r"^(.+?):(\d+):(\d+):(.*)$").expect("Invalid match line regex"),
        }
    }

    /// Build from settings; a timeout below [`MIN_SEARCH_TIMEOUT_SECS`] is raised to it
    pub fn from_settings(settings: &SearchSettings, runtime: Handle) -> Self {
        if settings.search_timeout < MIN_SEARCH_TIMEOUT_SECS {
            tracing::warn!(
                "search_timeout of {}s is too short, using {}s",
                settings.search_timeout,
                MIN_SEARCH_TIMEOUT_SECS
            );
        }
        let secs = settings.search_timeout.max(MIN_SEARCH_TIMEOUT_SECS);

        Self::new(
            settings.ripgrep_exe.clone(),
            Duration::from_secs(secs),
            runtime,
        )
    }

    /// Full argument vector for the ripgrep process (program name excluded)
    pub fn build_command_args(&self, request: &SearchRequest) -> Vec<String> {
        let mut args: Vec<String> = OUTPUT_FLAGS.iter().map(|f| f.to_string()).collect();
        args.extend(request.arguments.iter().cloned());
        args.push("--".to_string());
        args.push(request.query.clone());
        args.push(request.root.to_string());
        args
    }

    /// Parse ripgrep's `path:line:column:text` output
    pub fn parse_output(&self, stdout: &str) -> Vec<SearchMatch> {
        stdout
            .lines()
            .filter_map(|line| {
                let caps = self.line_pattern.captures(line)?;
                Some(SearchMatch {
                    path: Utf8PathBuf::from(&caps[1]),
                    line: caps[2].parse().ok()?,
                    column: caps[3].parse().ok()?,
                    text: caps[4].to_string(),
                })
            })
            .collect()
    }

    /// Run the search asynchronously
    pub async fn run(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        let args = self.build_command_args(request);
        tracing::info!("Executing: {} {}", self.ripgrep_exe, args.join(" "));

        let start = Instant::now();

        let child = Command::new(&self.ripgrep_exe)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => SearchError::ToolNotFound(self.ripgrep_exe.clone()),
                _ => SearchError::ProcessError(e),
            })?;

        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::warn!("Search timed out after {:?}", self.timeout);
                SearchError::Timeout(self.timeout)
            })??;

        let duration = start.elapsed();
        let exit_code = output.status.code().unwrap_or(-1);

        tracing::info!(
            "Search completed in {:.2}s with exit code {}",
            duration.as_secs_f32(),
            exit_code
        );

        // ripgrep: 0 = matches, 1 = no matches, anything else = error
        let matches = match exit_code {
            0 => self.parse_output(&String::from_utf8_lossy(&output.stdout)),
            1 => Vec::new(),
            code => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                tracing::error!("Search tool failed ({}): {}", code, stderr);
                return Err(SearchError::ToolFailed { code, stderr });
            }
        };

        Ok(SearchOutcome {
            matches,
            exit_code,
            duration,
        })
    }
}

impl SearchExecutor for RipgrepExecutor {
    fn execute(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        self.runtime.block_on(self.run(request))
    }
}
