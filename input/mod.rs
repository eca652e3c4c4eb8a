/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Input handling for the browser shell.
//!
//! Keyboard shortcuts are handled here. Pointer interaction (clicks on the
//! toolbar, the tab strip, bookmark entries) arrives as already-routed
//! intents from the embedding surface.

use keyboard_types::{Key, KeyState, KeyboardEvent, Modifiers, NamedKey};

use crate::app::ShellIntent;

/// Keyboard actions collected from raw key events.
///
/// This struct decouples input detection (requires the host's event stream)
/// from action application (pure state mutation), making actions testable.
#[derive(Default)]
pub struct KeyboardActions {
    pub new_tab: bool,
    pub close_tab: bool,
    pub next_tab: bool,
    pub previous_tab: bool,
    /// Ctrl+1..9; slot 9 means the last tab.
    pub jump_to_slot: Option<u8>,
}

/// Collect keyboard actions from a batch of key events (input detection
/// only). Shortcuts are skipped entirely while a text field owns the
/// keyboard, so typing in the address bar never mutates the tab strip.
pub fn collect_actions(events: &[KeyboardEvent], text_input_focused: bool) -> KeyboardActions {
    let mut actions = KeyboardActions::default();
    if text_input_focused {
        return actions;
    }

    for event in events {
        if event.state != KeyState::Down || event.is_composing {
            continue;
        }
        if !event.modifiers.contains(Modifiers::CONTROL) {
            continue;
        }

        match &event.key {
            // Ctrl+Tab / Ctrl+Shift+Tab: cycle through the strip
            Key::Named(NamedKey::Tab) => {
                if event.modifiers.contains(Modifiers::SHIFT) {
                    actions.previous_tab = true;
                } else {
                    actions.next_tab = true;
                }
            },
            Key::Character(character) => match character.as_str() {
                // Ctrl+T: new tab
                "t" | "T" => actions.new_tab = true,
                // Ctrl+W: close active tab
                "w" | "W" => actions.close_tab = true,
                // Ctrl+1..9: jump to tab by position
                digit => {
                    if let Ok(slot) = digit.parse::<u8>()
                        && (1..=9).contains(&slot)
                    {
                        actions.jump_to_slot = Some(slot);
                    }
                },
            },
            _ => {},
        }
    }

    actions
}

/// Convert keyboard actions to shell intents without applying them.
pub fn intents_from_actions(actions: &KeyboardActions) -> Vec<ShellIntent> {
    let mut intents = Vec::new();
    if actions.new_tab {
        intents.push(ShellIntent::CreateTab { url: None });
    }
    if actions.close_tab {
        intents.push(ShellIntent::CloseActiveTab);
    }
    if actions.next_tab {
        intents.push(ShellIntent::ActivateNextTab);
    }
    if actions.previous_tab {
        intents.push(ShellIntent::ActivatePreviousTab);
    }
    if let Some(slot) = actions.jump_to_slot {
        intents.push(ShellIntent::ActivateTabAt { slot });
    }
    intents
}
