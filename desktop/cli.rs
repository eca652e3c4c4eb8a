/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::env;
use std::time::Duration;

use log::info;

use crate::desktop::runner::HeadlessShell;
use crate::parser::default_start_url;
use crate::prefs::{ArgumentParsingResult, parse_command_line_arguments};

/// Sleep between idle pumps so a quiet session does not spin a core.
const IDLE_PUMP_INTERVAL: Duration = Duration::from_millis(4);

pub fn main() {
    // Skip the first argument, which is the binary name.
    let args: Vec<String> = env::args().skip(1).collect();
    let (preferences, start_location) = match parse_command_line_arguments(&args) {
        ArgumentParsingResult::Run(preferences, start_location) => (preferences, start_location),
        ArgumentParsingResult::Exit => {
            std::process::exit(0);
        },
        ArgumentParsingResult::ErrorParsing => {
            std::process::exit(1);
        },
    };

    crate::init_tracing(preferences.tracing_filter.as_deref());

    let start_url = default_start_url(start_location.as_deref(), &preferences);
    info!("tabshell {} starting at {start_url}", crate::VERSION);

    let mut shell = HeadlessShell::new(preferences, start_url);
    shell.set_exit_when_idle(true);
    while shell.pump() {
        if shell.last_pump_was_idle() {
            std::thread::sleep(IDLE_PUMP_INTERVAL);
        }
    }

    info!(
        "session over: {} tab(s), {} bookmark(s)",
        shell.app.tabs.len(),
        shell.app.bookmarks.len()
    );
}
