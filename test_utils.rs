/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Helpers shared by unit tests and the scenarios integration crate.

use keyboard_types::{Code, Key, KeyState, KeyboardEvent, Location, Modifiers};

use crate::desktop::runner::HeadlessShell;
use crate::prefs::ShellPreferences;

/// A shell pumped to idle on its start page. Reloads are armed with a
/// zero delay so scenarios never have to sleep.
pub fn settled_shell(start_url: &str) -> HeadlessShell {
    let preferences = ShellPreferences {
        reload_delay_ms: 0,
        ..ShellPreferences::default()
    };
    let mut shell = HeadlessShell::new(preferences, start_url.to_string());
    shell.run_until_idle(32);
    shell
}

/// A key press with the given modifiers held.
pub fn key_down(key: Key, modifiers: Modifiers) -> KeyboardEvent {
    KeyboardEvent {
        state: KeyState::Down,
        key,
        code: Code::Unidentified,
        location: Location::Standard,
        modifiers,
        repeat: false,
        is_composing: false,
    }
}

/// Ctrl plus a printable character.
pub fn ctrl_char(character: &str) -> KeyboardEvent {
    key_down(Key::Character(character.to_string()), Modifiers::CONTROL)
}
