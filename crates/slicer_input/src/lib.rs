use derive_more::Constructor;
use nalgebra::Point2;
use strum::{Display, EnumCount};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumCount, Display)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
pub enum ButtonAction {
    Down,
    Up,
}

/// The keys the editor reacts to. Everything else arrives as `Other`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
pub enum Key {
    Z,
    Delete,
    Backspace,
    Other,
}

#[derive(Constructor, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Ctrl on Windows and Linux, Command on macOS. Either one counts.
    #[inline]
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A single input event in widget-local coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Pointer {
        button: PointerButton,
        action: ButtonAction,
        position: Point2<f32>,
    },
    PointerMotion {
        position: Point2<f32>,
    },
    Key {
        key: Key,
        action: ButtonAction,
        modifiers: Modifiers,
        /// Set for auto-repeat events generated while a key is held.
        repeat: bool,
    },
}

impl InputEvent {
    pub fn pointer_down(position: Point2<f32>) -> Self {
        Self::Pointer {
            button: PointerButton::Primary,
            action: ButtonAction::Down,
            position,
        }
    }

    pub fn pointer_up(position: Point2<f32>) -> Self {
        Self::Pointer {
            button: PointerButton::Primary,
            action: ButtonAction::Up,
            position,
        }
    }

    pub fn pointer_move(position: Point2<f32>) -> Self {
        Self::PointerMotion { position }
    }

    pub fn key_down(key: Key, modifiers: Modifiers) -> Self {
        Self::Key {
            key,
            action: ButtonAction::Down,
            modifiers,
            repeat: false,
        }
    }

    /// A fresh (non-repeat) press of the undo shortcut.
    pub fn is_undo(&self) -> bool {
        matches!(
            self,
            Self::Key {
                key: Key::Z,
                action: ButtonAction::Down,
                modifiers,
                repeat: false,
            } if modifiers.command()
        )
    }

    /// A fresh press of Delete or Backspace.
    pub fn is_delete(&self) -> bool {
        matches!(
            self,
            Self::Key {
                key: Key::Delete | Key::Backspace,
                action: ButtonAction::Down,
                repeat: false,
                ..
            }
        )
    }
}
