// Menu adapter - key bindings, input parsing and rendering
//
// Every glob group whose identifier carries a mnemonic is bound to that key.
// A handful of keys are reserved for session commands and never bound to groups.

use crate::models::{GlobGroupId, GlobRegistry};
use crate::state::MenuSession;
use indexmap::IndexMap;
use std::fmt::Write;

/// Toggle between literal and regex search
pub const KEY_TOGGLE_MODE: char = '*';
/// Clear all classifications
pub const KEY_RESET: char = '0';
/// Abandon the session without searching
pub const KEY_QUIT: char = '.';

pub const RESERVED_KEYS: [char; 3] = [KEY_TOGGLE_MODE, KEY_RESET, KEY_QUIT];

/// A user intent reported by the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Toggle(GlobGroupId),
    Search,
    ToggleMode,
    Reset,
    Quit,
    /// A key with nothing bound to it
    Unbound(char),
}

/// Key -> glob group bindings derived from the registry, in registry order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuBindings {
    keys: IndexMap<char, GlobGroupId>,
}

impl MenuBindings {
    /// Bind each group's mnemonic.
    ///
    /// Groups without a mnemonic get no binding. A mnemonic that collides with a
    /// reserved key or an earlier group is skipped with a warning.
    pub fn from_registry(registry: &GlobRegistry) -> Self {
        let mut keys = IndexMap::new();

        for (id, _) in registry.iter() {
            let Some(key) = id.mnemonic() else {
                continue;
            };

            if RESERVED_KEYS.contains(&key) {
                tracing::warn!("Mnemonic '{}' of {} is a reserved key, not bound", key, id);
            } else if let Some(existing) = keys.get(&key) {
                tracing::warn!(
                    "Mnemonic '{}' of {} is already bound to {}, not bound",
                    key,
                    id,
                    existing
                );
            } else {
                keys.insert(key, id.clone());
            }
        }

        Self { keys }
    }

    pub fn group_for(&self, key: char) -> Option<&GlobGroupId> {
        self.keys.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &GlobGroupId)> {
        self.keys.iter().map(|(key, id)| (*key, id))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Translate one line of input into actions.
    ///
    /// An empty line requests the search; otherwise every non-blank character is
    /// one keypress, so `cr` toggles two groups in a row.
    pub fn parse_line(&self, line: &str) -> Vec<MenuAction> {
        let line = line.trim();
        if line.is_empty() {
            return vec![MenuAction::Search];
        }

        line.chars()
            .filter(|c| !c.is_whitespace())
            .map(|key| self.action_for(key))
            .collect()
    }

    pub fn action_for(&self, key: char) -> MenuAction {
        match key {
            KEY_TOGGLE_MODE => MenuAction::ToggleMode,
            KEY_RESET => MenuAction::Reset,
            KEY_QUIT => MenuAction::Quit,
            _ => match self.group_for(key) {
                Some(id) => MenuAction::Toggle(id.clone()),
                None => MenuAction::Unbound(key),
            },
        }
    }
}

/// Draw the menu for the current session state
pub fn render_menu(session: &MenuSession, bindings: &MenuBindings) -> String {
    let mut out = String::new();
    let label_width = bindings
        .iter()
        .map(|(_, id)| id.label().chars().count())
        .max()
        .unwrap_or(0);

    let _ = writeln!(out, "Glob groups (mode: {})", session.mode());
    for (key, id) in bindings.iter() {
        let patterns: Vec<&str> = session
            .registry()
            .patterns(id)
            .iter()
            .map(|p| p.as_str())
            .collect();
        let _ = writeln!(
            out,
            "  [{}] {}  {:<width$}  {}",
            session.group_status(id).marker(),
            key,
            id.label(),
            patterns.join(" "),
            width = label_width
        );
    }
    let _ = writeln!(
        out,
        "  <enter> search  {} toggle mode  {} reset  {} quit",
        KEY_TOGGLE_MODE, KEY_RESET, KEY_QUIT
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchMode;
    use std::sync::Arc;

    fn registry() -> GlobRegistry {
        let mut registry = GlobRegistry::new();
        registry.register(GlobGroupId::new("_c_pp").unwrap(), ["*.h", "*.cc"]);
        registry.register(GlobGroupId::new("_r_ust").unwrap(), ["*.rs"]);
        registry.register(GlobGroupId::new("docs").unwrap(), ["*.md"]);
        registry.register(GlobGroupId::new("_c_make").unwrap(), ["CMakeLists.txt"]);
        registry.register(GlobGroupId::new("_0_ld").unwrap(), ["*.old"]);
        registry
    }

    #[test]
    fn test_bindings_skip_missing_and_colliding_mnemonics() {
        let bindings = MenuBindings::from_registry(&registry());

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.group_for('c').unwrap().as_str(), "_c_pp");
        assert_eq!(bindings.group_for('r').unwrap().as_str(), "_r_ust");
        assert!(bindings.group_for('0').is_none());
    }

    #[test]
    fn test_parse_line() {
        let bindings = MenuBindings::from_registry(&registry());

        assert_eq!(bindings.parse_line("\n"), vec![MenuAction::Search]);
        assert_eq!(
            bindings.parse_line("c r"),
            vec![
                MenuAction::Toggle(GlobGroupId::new("_c_pp").unwrap()),
                MenuAction::Toggle(GlobGroupId::new("_r_ust").unwrap()),
            ]
        );
        assert_eq!(
            bindings.parse_line("*0.z"),
            vec![
                MenuAction::ToggleMode,
                MenuAction::Reset,
                MenuAction::Quit,
                MenuAction::Unbound('z'),
            ]
        );
    }

    #[test]
    fn test_render_menu_shows_status() {
        let registry = Arc::new(registry());
        let bindings = MenuBindings::from_registry(&registry);
        let mut session = MenuSession::new(registry, SearchMode::Literal);
        session.toggle(&GlobGroupId::new("_r_ust").unwrap());

        let menu = render_menu(&session, &bindings);

        assert!(menu.starts_with("Glob groups (mode: literal)"));
        assert!(menu.contains("[+] r  rust"));
        assert!(menu.contains("[ ] c  cpp "));
        assert!(menu.contains("*.h *.cc"));
        assert!(!menu.contains("docs"));
    }
}
