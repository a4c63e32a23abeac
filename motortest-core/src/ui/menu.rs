//! Main menu table
//!
//! The menu is a fixed table of (label, visibility, action) entries. The
//! visible list is rebuilt from current state every frame and confirm
//! dispatches the action stored alongside the highlighted label, so
//! conditional entries can never shift another entry's action.

use heapless::Vec;

use crate::i18n::TextKey;

/// What a main-menu entry does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    StartStop,
    ToggleDirection,
    ToggleBrake,
    ToggleEnable,
    AutoTest,
    SelectMotor,
    AddMotor,
    DeleteActive,
    Settings,
    About,
    Back,
}

/// State the menu labels and visibility depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub running: bool,
    pub clockwise: bool,
    pub has_brake: bool,
    pub brake_engaged: bool,
    /// Enable command, when the operator can toggle it
    pub enable_command: Option<bool>,
    pub profile_count: usize,
    pub autotest: bool,
    pub back_item: bool,
}

struct MenuEntry {
    label: fn(&MenuState) -> TextKey,
    visible: fn(&MenuState) -> bool,
    action: MenuAction,
}

const MENU_LEN: usize = 11;

const MAIN_MENU: [MenuEntry; MENU_LEN] = [
    MenuEntry {
        label: |s| if s.running { TextKey::MenuStop } else { TextKey::MenuStart },
        visible: |_| true,
        action: MenuAction::StartStop,
    },
    MenuEntry {
        label: |s| if s.clockwise { TextKey::MenuSetCcw } else { TextKey::MenuSetCw },
        visible: |_| true,
        action: MenuAction::ToggleDirection,
    },
    MenuEntry {
        label: |s| if s.brake_engaged { TextKey::MenuBrakeOff } else { TextKey::MenuBrakeOn },
        visible: |s| s.has_brake,
        action: MenuAction::ToggleBrake,
    },
    MenuEntry {
        label: |s| match s.enable_command {
            Some(true) => TextKey::MenuEnableOff,
            _ => TextKey::MenuEnableOn,
        },
        visible: |s| s.enable_command.is_some(),
        action: MenuAction::ToggleEnable,
    },
    MenuEntry {
        label: |_| TextKey::MenuAutoTest,
        visible: |s| s.autotest,
        action: MenuAction::AutoTest,
    },
    MenuEntry {
        label: |_| TextKey::MenuSelectMotor,
        visible: |s| s.profile_count > 0,
        action: MenuAction::SelectMotor,
    },
    MenuEntry {
        label: |_| TextKey::MenuAddMotor,
        visible: |_| true,
        action: MenuAction::AddMotor,
    },
    MenuEntry {
        label: |_| TextKey::MenuDeleteActive,
        visible: |s| s.profile_count > 0,
        action: MenuAction::DeleteActive,
    },
    MenuEntry {
        label: |_| TextKey::MenuSettings,
        visible: |_| true,
        action: MenuAction::Settings,
    },
    MenuEntry {
        label: |_| TextKey::MenuAbout,
        visible: |_| true,
        action: MenuAction::About,
    },
    MenuEntry {
        label: |_| TextKey::MenuBack,
        visible: |s| s.back_item,
        action: MenuAction::Back,
    },
];

/// Visible menu: labels with their bound actions
pub type MenuItems = Vec<(TextKey, MenuAction), MENU_LEN>;

/// Build the visible main menu for the current state
pub fn main_menu(state: &MenuState) -> MenuItems {
    let mut items = MenuItems::new();
    for entry in MAIN_MENU.iter().filter(|e| (e.visible)(state)) {
        // capacity equals the table length
        let _ = items.push(((entry.label)(state), entry.action));
    }
    items
}
