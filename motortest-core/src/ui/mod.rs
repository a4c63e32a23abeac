//! Operator interface
//!
//! Screens, the main menu table, the add-motor wizard's name editor, the
//! AutoTest sequence and the navigator that ties them to button input.

pub mod autotest;
pub mod list;
pub mod menu;
pub mod name_editor;
pub mod navigator;
pub mod screen;

pub use autotest::{AutoTest, AutoTestOutcome, AutoTestPhase, AUTOTEST_CYCLES};
pub use list::{ListCursor, VISIBLE_ROWS};
pub use menu::{main_menu, MenuAction, MenuItems, MenuState};
pub use name_editor::{Glyph, NameEditor};
pub use navigator::{Navigator, RenderView, UiContext, INTRO_MS};
pub use screen::{Screen, WizardStep};
