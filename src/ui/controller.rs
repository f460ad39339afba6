// Menu Controller - drives one interactive classification session
//
// It wires together:
// - MenuBindings (keys -> glob groups)
// - MenuSession (classification state)
// - QueryBuilder (argument compilation)
// - SearchExecutor (the actual search)
//
// Input is read line by line and the menu is re-rendered after every line.

use crate::metrics::Metrics;
use crate::models::{GlobRegistry, SearchMode};
use crate::query::{DefaultIgnores, SearchRequest};
use crate::services::{SearchExecutor, SearchOutcome};
use crate::state::{MenuSession, StateChange};
use crate::ui::menu::{MenuAction, MenuBindings, render_menu};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::{BufRead, Write};
use std::sync::Arc;

/// How a menu session ended
#[derive(Debug)]
pub enum SessionOutcome {
    /// A search ran to completion
    Searched {
        request: SearchRequest,
        outcome: SearchOutcome,
    },
    /// The user quit (or input ended) without a successful search
    Abandoned,
}

/// Controller for the glob classification menu
///
/// Each call to [`run`](Self::run) is an independent session with its own
/// classification state; nothing carries over between runs.
pub struct MenuController<E: SearchExecutor> {
    registry: Arc<GlobRegistry>,
    bindings: MenuBindings,
    executor: E,
    ignores: DefaultIgnores,
    root: Utf8PathBuf,
    initial_mode: SearchMode,
    metrics: Arc<Metrics>,
}

impl<E: SearchExecutor> MenuController<E> {
    pub fn new(
        registry: Arc<GlobRegistry>,
        executor: E,
        ignores: DefaultIgnores,
        root: &Utf8Path,
        initial_mode: SearchMode,
        metrics: Arc<Metrics>,
    ) -> Self {
        let bindings = MenuBindings::from_registry(&registry);
        tracing::info!(
            "Menu ready: {} groups, {} bound to keys, root={}",
            registry.len(),
            bindings.len(),
            root
        );

        Self {
            registry,
            bindings,
            executor,
            ignores,
            root: root.to_path_buf(),
            initial_mode,
            metrics,
        }
    }

    pub fn bindings(&self) -> &MenuBindings {
        &self.bindings
    }

    /// Run one session until a search completes, the user quits, or input ends
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<SessionOutcome> {
        let mut session = MenuSession::new(Arc::clone(&self.registry), self.initial_mode);

        loop {
            write!(output, "{}> ", render_menu(&session, &self.bindings))?;
            output.flush()?;

            let Some(line) = read_line(&mut input)? else {
                tracing::info!("Input closed, abandoning session");
                return Ok(SessionOutcome::Abandoned);
            };

            for action in self.bindings.parse_line(&line) {
                match action {
                    MenuAction::Toggle(group) => {
                        let changes = session.toggle(&group);
                        self.metrics.record_toggle();
                        log_changes(&changes);
                    }
                    MenuAction::ToggleMode => log_changes(&session.toggle_mode()),
                    MenuAction::Reset => {
                        log_changes(&session.reset());
                        self.metrics.record_reset();
                    }
                    MenuAction::Quit => {
                        tracing::info!("Session abandoned by user");
                        return Ok(SessionOutcome::Abandoned);
                    }
                    MenuAction::Unbound(key) => {
                        writeln!(output, "No action bound to '{}'", key)?;
                    }
                    MenuAction::Search => {
                        if let Some(outcome) = self.search(&session, &mut input, &mut output)? {
                            return Ok(outcome);
                        }
                        // Anything typed after the search request is dropped
                        break;
                    }
                }
            }
        }
    }

    /// Prompt for a query and run it.
    ///
    /// Returns `None` when the user cancelled with an empty query or the search
    /// failed, in which case the session continues.
    fn search<R: BufRead, W: Write>(
        &self,
        session: &MenuSession,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<SessionOutcome>> {
        write!(output, "Search ({}): ", session.mode())?;
        output.flush()?;

        let Some(query) = read_line(input)? else {
            return Ok(Some(SessionOutcome::Abandoned));
        };
        // Only the line terminator is input framing; surrounding spaces are part of the query
        let query = query.trim_end_matches(['\r', '\n']);
        if query.trim().is_empty() {
            writeln!(output, "Search cancelled")?;
            return Ok(None);
        }

        let request = SearchRequest::new(session.compile_arguments(&self.ignores), query, &self.root);
        tracing::info!(
            "Searching {:?} in {} with {:?}",
            request.query,
            request.root,
            request.arguments
        );

        match self.executor.execute(&request) {
            Ok(outcome) => {
                self.metrics
                    .record_search(outcome.matches.len(), outcome.duration);
                write_results(output, &outcome)?;
                Ok(Some(SessionOutcome::Searched { request, outcome }))
            }
            Err(e) => {
                self.metrics.record_failed_search();
                tracing::error!("Search failed: {}", e);
                writeln!(output, "Search failed: {}", e)?;
                Ok(None)
            }
        }
    }
}

/// Read one line; `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read menu input")?;
    Ok((read > 0).then_some(line))
}

fn write_results<W: Write>(output: &mut W, outcome: &SearchOutcome) -> Result<()> {
    for m in &outcome.matches {
        writeln!(output, "{}:{}:{}: {}", m.path, m.line, m.column, m.text)?;
    }
    writeln!(output, "{}", outcome.summary())?;
    Ok(())
}

fn log_changes(changes: &[StateChange]) {
    for change in changes {
        tracing::debug!("State change: {:?}", change);
    }
}
