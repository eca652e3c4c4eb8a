/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! tabshell is a tabbed browser shell split in two layers: a
//! toolkit-free core that tracks tabs, per-tab navigation history,
//! bookmarks and color history, and a headless desktop runtime that
//! drives the core through a cooperative pump.

use tracing_subscriber::EnvFilter;

pub mod app;
pub mod bookmarks;
pub mod colors;
pub mod desktop;
pub mod history;
pub mod input;
pub mod parser;
pub mod prefs;
pub mod tabs;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod window;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the global tracing subscriber. Explicit directives win over
/// `RUST_LOG`; with neither, informational and up is kept.
pub fn init_tracing(filter_directives: Option<&str>) {
    let filter = match filter_directives {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn main() {
    desktop::cli::main()
}
