/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Address input resolution: free text in, navigable url out.

use crate::prefs::ShellPreferences;

/// Resolve location-bar input. Input carrying an explicit `http://` or
/// `https://` scheme is taken literally; anything else becomes a search
/// query, including the empty string.
pub fn location_input_to_url(input: &str, search_template: &str) -> String {
    if input.starts_with("http://") || input.starts_with("https://") {
        return input.to_string();
    }
    search_query_url(input, search_template)
}

/// Substitute the percent-encoded query into the `%s` placeholder of a
/// search template.
pub fn search_query_url(query: &str, search_template: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    search_template.replace("%s", &encoded)
}

/// Url for the first tab: an explicit command line location wins (resolved
/// through the same input rules), else the homepage preference.
pub fn default_start_url(cli_url: Option<&str>, preferences: &ShellPreferences) -> String {
    match cli_url {
        Some(input) => location_input_to_url(input, &preferences.search_template),
        None => preferences.homepage.clone(),
    }
}

/// Content views expect a scheme. Scheme-less urls handed to the load
/// boundary get `https://` prefixed; empty urls (blank replacement tabs)
/// pass through untouched.
pub fn normalize_load_url(url: &str) -> String {
    if url.is_empty() || url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    format!("https://{url}")
}
