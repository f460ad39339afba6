// UI module - the interactive glob menu
//
// This module contains:
// - MenuBindings / render_menu: maps mnemonics to groups and draws the menu
// - MenuController: runs one classification session and hands off to the search

pub mod controller;
pub mod menu;

pub use controller::{MenuController, SessionOutcome};
pub use menu::{MenuAction, MenuBindings, render_menu};
