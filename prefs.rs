/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Shell preferences: a TOML file under the platform config directory,
//! overridden field by field from the command line.

use std::fmt;
use std::path::{Path, PathBuf};

use bpaf::Bpaf;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOMEPAGE: &str = "https://www.google.com/";
pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://www.google.com/search?q=%s";
pub const DEFAULT_RELOAD_DELAY_MS: u64 = 1000;

const PREFS_FILE_NAME: &str = "prefs.toml";
const CONFIG_DIR_NAME: &str = "tabshell";

/// User-tunable shell behavior. Everything has a default, so a missing or
/// partial preferences file is fine.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ShellPreferences {
    /// Landing url for the first tab and the back-navigation boundary.
    pub homepage: String,
    /// Search url with a `%s` placeholder for the percent-encoded query.
    pub search_template: String,
    /// Delay between the clear and re-load phases of a reload.
    pub reload_delay_ms: u64,
    /// Tracing filter directives, e.g. `info,tabshell=debug`.
    pub tracing_filter: Option<String>,
    /// Headed hosts live out of tree; the in-tree runtime is headless.
    pub headless: bool,
}

impl Default for ShellPreferences {
    fn default() -> Self {
        Self {
            homepage: DEFAULT_HOMEPAGE.to_string(),
            search_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
            reload_delay_ms: DEFAULT_RELOAD_DELAY_MS,
            tracing_filter: None,
            headless: true,
        }
    }
}

#[derive(Debug)]
pub enum PrefsError {
    Io(String),
    Parse(String),
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefsError::Io(e) => write!(f, "IO error: {e}"),
            PrefsError::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

/// Path of the preferences file, honoring an explicit directory override.
/// `None` when the platform exposes no config directory.
pub fn prefs_file_path(config_dir_override: Option<&Path>) -> Option<PathBuf> {
    let base = match config_dir_override {
        Some(dir) => dir.to_path_buf(),
        None => dirs::config_dir()?.join(CONFIG_DIR_NAME),
    };
    Some(base.join(PREFS_FILE_NAME))
}

/// Load preferences from disk. A missing file (or missing config dir) is
/// the default preferences; a malformed file is an error so the caller can
/// decide whether to fall back.
pub fn load_preferences(
    config_dir_override: Option<&Path>,
) -> Result<ShellPreferences, PrefsError> {
    let Some(path) = prefs_file_path(config_dir_override) else {
        return Ok(ShellPreferences::default());
    };
    if !path.exists() {
        return Ok(ShellPreferences::default());
    }
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| PrefsError::Io(format!("Failed to read {}: {e}", path.display())))?;
    toml::from_str(&contents)
        .map_err(|e| PrefsError::Parse(format!("Failed to parse {}: {e}", path.display())))
}

/// Command line surface. Everything here is a preference override or a
/// startup location, not an interactive protocol.
#[derive(Bpaf, Clone, Debug)]
#[bpaf(options, version)]
pub struct CommandLineArgs {
    /// Load this location in the first tab instead of the homepage.
    /// Free text is resolved through the search template.
    #[bpaf(argument("URL"))]
    pub url: Option<String>,
    /// Override the configured homepage url.
    #[bpaf(argument("URL"))]
    pub homepage: Option<String>,
    /// Override the search template; `%s` marks the query position.
    #[bpaf(argument("TEMPLATE"))]
    pub search_template: Option<String>,
    /// Override the reload completion delay in milliseconds.
    #[bpaf(argument("MS"))]
    pub reload_delay_ms: Option<u64>,
    /// Tracing filter directives, overriding RUST_LOG.
    #[bpaf(argument("FILTER"))]
    pub tracing_filter: Option<String>,
    /// Read preferences from this directory instead of the platform
    /// config directory.
    #[bpaf(argument("DIR"))]
    pub config_dir: Option<PathBuf>,
}

pub enum ArgumentParsingResult {
    /// Merged preferences plus the requested startup location, if any.
    Run(ShellPreferences, Option<String>),
    /// Help or version was printed; nothing to run.
    Exit,
    ErrorParsing,
}

pub fn parse_command_line_arguments(args: &[String]) -> ArgumentParsingResult {
    let str_args: Vec<&str> = args.iter().map(String::as_str).collect();
    let cli = match command_line_args().run_inner(str_args.as_slice()) {
        Ok(cli) => cli,
        Err(failure) => {
            let requested_exit = matches!(failure, bpaf::ParseFailure::Stdout(..));
            failure.print_mesage(80);
            if requested_exit {
                return ArgumentParsingResult::Exit;
            }
            return ArgumentParsingResult::ErrorParsing;
        },
    };

    let mut preferences = match load_preferences(cli.config_dir.as_deref()) {
        Ok(preferences) => preferences,
        Err(e) => {
            log::warn!("Failed to load preferences: {e}. Using defaults.");
            ShellPreferences::default()
        },
    };
    if let Some(homepage) = cli.homepage {
        preferences.homepage = homepage;
    }
    if let Some(search_template) = cli.search_template {
        preferences.search_template = search_template;
    }
    if let Some(reload_delay_ms) = cli.reload_delay_ms {
        preferences.reload_delay_ms = reload_delay_ms;
    }
    if let Some(tracing_filter) = cli.tracing_filter {
        preferences.tracing_filter = Some(tracing_filter);
    }

    ArgumentParsingResult::Run(preferences, cli.url)
}
