// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input vocabulary and the shortcut table.

use crate::event::Intent;

bitflags::bitflags! {
    /// Keyboard modifiers held during an input event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0001;
        /// Control key.
        const CTRL  = 0b0010;
        /// Alt / Option key.
        const ALT   = 0b0100;
        /// Meta / Command / Windows key.
        const META  = 0b1000;
    }
}

impl Modifiers {
    /// Whether the platform command modifier (Ctrl or Meta) is held.
    pub fn command(self) -> bool {
        self.intersects(Self::CTRL | Self::META)
    }
}

/// Pointer button that changed state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left / primary button.
    Primary,
    /// Right / secondary button.
    Secondary,
    /// Middle / wheel button.
    Auxiliary,
}

/// Intent bound to a key chord, if any.
///
/// `key` is a key name as reported by the platform: `"Delete"`,
/// `"Backspace"`, or a single character. Letters match either case.
///
/// | chord | intent |
/// |---|---|
/// | Delete, Backspace | [`Intent::DeleteSelection`] |
/// | Ctrl/Meta + Z | [`Intent::Undo`] |
/// | Ctrl + Y, Ctrl/Meta + Shift + Z | [`Intent::Redo`] |
/// | Ctrl/Meta + A | [`Intent::SelectAll`] |
pub fn chord_intent(key: &str, modifiers: Modifiers) -> Option<Intent> {
    match key {
        "Delete" | "Backspace" => return Some(Intent::DeleteSelection),
        _ => {}
    }
    let mut chars = key.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return None;
    };
    let shift = modifiers.contains(Modifiers::SHIFT);
    match c.to_ascii_lowercase() {
        'z' if modifiers.command() && shift => Some(Intent::Redo),
        'z' if modifiers.command() => Some(Intent::Undo),
        'y' if modifiers.contains(Modifiers::CTRL) => Some(Intent::Redo),
        'a' if modifiers.command() => Some(Intent::SelectAll),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chord_table() {
        let none = Modifiers::empty();
        assert_eq!(chord_intent("Delete", none), Some(Intent::DeleteSelection));
        assert_eq!(chord_intent("Backspace", none), Some(Intent::DeleteSelection));
        assert_eq!(chord_intent("z", Modifiers::CTRL), Some(Intent::Undo));
        assert_eq!(chord_intent("z", Modifiers::META), Some(Intent::Undo));
        assert_eq!(chord_intent("y", Modifiers::CTRL), Some(Intent::Redo));
        assert_eq!(chord_intent("y", Modifiers::META), None);
        assert_eq!(
            chord_intent("Z", Modifiers::META | Modifiers::SHIFT),
            Some(Intent::Redo)
        );
        assert_eq!(chord_intent("a", Modifiers::CTRL), Some(Intent::SelectAll));
        assert_eq!(chord_intent("a", none), None);
        assert_eq!(chord_intent("z", none), None);
        assert_eq!(chord_intent("Enter", Modifiers::CTRL), None);
    }
}
