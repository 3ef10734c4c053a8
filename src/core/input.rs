//! Editor input events and keyboard shortcut mapping

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::voxel::pick::Hit;

/// Mouse button or touch contact that produced an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// A pointer event already resolved against the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Screen position in pixels (top-left origin)
    pub screen: Vec2,
    pub button: PointerButton,
    /// Whether any button is held during a move (camera drag)
    pub buttons_held: bool,
    /// What the pointer ray struck, if anything
    pub hit: Option<Hit>,
}

impl PointerEvent {
    pub fn new(screen: Vec2, hit: Option<Hit>) -> Self {
        Self {
            screen,
            button: PointerButton::Primary,
            buttons_held: false,
            hit,
        }
    }

    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    #[must_use]
    pub fn held(mut self) -> Self {
        self.buttons_held = true;
        self
    }
}

/// Editor-level keyboard commands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    Undo,
    Redo,
    SelectAll,
    ShiftUp,
    ShiftDown,
    Escape,
    ToggleCameraLock,
    ExtendPattern,
    ClearAll,
}

/// A physical key, reduced to the ones the editor binds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Char(char),
    ArrowUp,
    ArrowDown,
    Escape,
    Space,
    Enter,
}

/// Modifier keys held with a key press
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Cmd on macOS
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { ctrl: false, meta: false, shift: false };
    pub const CTRL: Modifiers = Modifiers { ctrl: true, meta: false, shift: false };

    /// Ctrl or Cmd
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Key plus modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Editor command bound to this chord, if any.
    ///
    /// Ctrl/Cmd+Z undo, Ctrl/Cmd+Shift+Z redo, Ctrl/Cmd+A select all,
    /// Ctrl/Cmd+Up/Down shift the selection, Escape, Space toggles the
    /// camera lock, Enter extends the last placement pattern.
    pub fn command(&self) -> Option<KeyCommand> {
        let m = self.modifiers;
        match self.key {
            Key::Char(c) if m.command() && c.eq_ignore_ascii_case(&'z') => {
                Some(if m.shift { KeyCommand::Redo } else { KeyCommand::Undo })
            }
            Key::Char(c) if m.command() && c.eq_ignore_ascii_case(&'a') => Some(KeyCommand::SelectAll),
            Key::ArrowUp if m.command() => Some(KeyCommand::ShiftUp),
            Key::ArrowDown if m.command() => Some(KeyCommand::ShiftDown),
            Key::Escape => Some(KeyCommand::Escape),
            Key::Space => Some(KeyCommand::ToggleCameraLock),
            Key::Enter => Some(KeyCommand::ExtendPattern),
            _ => None,
        }
    }
}
