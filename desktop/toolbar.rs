/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Toolbar view model: address field, navigation control state and the tab
//! strip, kept as plain data so any host surface can render it.

use crate::app::{BrowserShellApp, ShellIntent};
use crate::desktop::status_sync::{update_can_go_back_and_forward, update_location_in_toolbar};
use crate::tabs::{TabId, strip_label};

#[derive(Debug, Default)]
pub struct ToolbarState {
    pub location: String,
    /// Set while the user is editing the address field; suspends syncing
    /// from the active tab until submit.
    pub location_dirty: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// One rendered tab in the strip.
#[derive(Debug, PartialEq, Eq)]
pub struct TabStripEntry {
    pub tab: TabId,
    pub label: String,
    pub active: bool,
}

impl ToolbarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit_location(&mut self, text: impl Into<String>) {
        self.location = text.into();
        self.location_dirty = true;
    }

    /// Enter in the address field: hand the text to the reducer. The field
    /// stops being dirty so the next sync reflects wherever the submit
    /// actually landed.
    pub fn submit_location(&mut self) -> ShellIntent {
        self.location_dirty = false;
        ShellIntent::SubmitLocation {
            input: self.location.clone(),
        }
    }

    /// Pull toolbar state from the shell; true when anything changed.
    pub fn sync(&mut self, app: &BrowserShellApp) -> bool {
        let location_changed =
            update_location_in_toolbar(self.location_dirty, &mut self.location, app);
        let nav_changed =
            update_can_go_back_and_forward(&mut self.can_go_back, &mut self.can_go_forward, app);
        location_changed || nav_changed
    }
}

pub fn tab_strip_entries(app: &BrowserShellApp) -> Vec<TabStripEntry> {
    let active = app.tabs.active_id();
    app.tabs
        .iter()
        .map(|tab| TabStripEntry {
            tab: tab.id,
            label: strip_label(&tab.title),
            active: tab.id == active,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_marks_dirty_and_submit_clears_it() {
        let mut toolbar = ToolbarState::new();
        toolbar.edit_location("exam");
        assert!(toolbar.location_dirty);

        toolbar.edit_location("example.com");
        let intent = toolbar.submit_location();
        assert!(!toolbar.location_dirty);
        assert_eq!(
            intent,
            ShellIntent::SubmitLocation {
                input: "example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_sync_follows_navigation_and_respects_edits() {
        let mut app = BrowserShellApp::new_for_testing();
        let mut toolbar = ToolbarState::new();

        // At home the field stays empty.
        assert!(!toolbar.sync(&app));
        assert_eq!(toolbar.location, "");

        app.apply_intents([ShellIntent::NavigateActiveTo {
            url: "https://a.example/".to_string(),
        }]);
        assert!(toolbar.sync(&app));
        assert_eq!(toolbar.location, "https://a.example/");
        assert!(toolbar.can_go_back);

        toolbar.edit_location("https://b");
        app.apply_intents([ShellIntent::NavigateActiveTo {
            url: "https://c.example/".to_string(),
        }]);
        toolbar.sync(&app);
        assert_eq!(toolbar.location, "https://b");
    }

    #[test]
    fn test_reload_blank_phase_shows_an_empty_field() {
        let mut app = BrowserShellApp::new_for_testing();
        let mut toolbar = ToolbarState::new();
        app.apply_intents([ShellIntent::NavigateActiveTo {
            url: "https://a.example/".to_string(),
        }]);
        toolbar.sync(&app);

        app.apply_intents([ShellIntent::RequestReload]);
        assert!(toolbar.sync(&app));
        assert_eq!(toolbar.location, "");
    }

    #[test]
    fn test_strip_labels_truncate_and_fall_back() {
        let mut app = BrowserShellApp::new_for_testing();
        let first = app.tabs.active_id();
        app.apply_intents([ShellIntent::CreateTab { url: None }]);
        let second = app.tabs.active_id();
        app.apply_intents([ShellIntent::ViewTitleChanged {
            tab: second,
            title: Some("A very long page title".to_string()),
        }]);

        let entries = tab_strip_entries(&app);
        assert_eq!(
            entries,
            vec![
                TabStripEntry {
                    tab: first,
                    label: "New Tab".to_string(),
                    active: false,
                },
                TabStripEntry {
                    tab: second,
                    label: "A very lon...".to_string(),
                    active: true,
                },
            ]
        );
    }
}
