/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::app::BrowserShellApp;

/// The address text the toolbar shows for the active tab: the empty string
/// while the tab sits at the configured home URL, the literal URL otherwise.
pub(crate) fn location_display_text(app: &BrowserShellApp) -> &str {
    let url = app.tabs.active().url.as_str();
    if url == app.history.home_url() {
        ""
    } else {
        url
    }
}

pub(crate) fn update_location_in_toolbar(
    location_dirty: bool,
    location: &mut String,
    app: &BrowserShellApp,
) -> bool {
    // A user edit in flight owns the field until submit or focus loss.
    if location_dirty {
        return false;
    }

    let display = location_display_text(app);
    if *location != display {
        *location = display.to_string();
        return true;
    }
    false
}

pub(crate) fn update_can_go_back_and_forward(
    can_go_back: &mut bool,
    can_go_forward: &mut bool,
    app: &BrowserShellApp,
) -> bool {
    let tab = app.tabs.active_id();
    let current = &app.tabs.active().url;
    let state_can_go_back = app.history.can_go_back(tab, current);
    let state_can_go_forward = app.history.can_go_forward(tab);

    let can_go_back_changed = *can_go_back != state_can_go_back;
    let can_go_forward_changed = *can_go_forward != state_can_go_forward;
    *can_go_back = state_can_go_back;
    *can_go_forward = state_can_go_forward;
    can_go_back_changed || can_go_forward_changed
}
