/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Session registry: the ordered strip of tabs and the active-tab pointer.

use std::fmt;

use uuid::Uuid;

/// Maximum number of title characters shown on a tab strip label.
pub const STRIP_LABEL_MAX_CHARS: usize = 10;
/// Label shown for tabs that have not reported a title yet.
pub const UNTITLED_STRIP_LABEL: &str = "New Tab";

/// Stable identity of one browsing session. Survives url and title changes;
/// history stacks and view bindings are keyed by it.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct TabId(Uuid);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One browsing session: a url, a title, and a stable id.
#[derive(Clone, Debug, PartialEq)]
pub struct Tab {
    pub id: TabId,
    pub url: String,
    pub title: String,
}

impl Tab {
    fn new(url: String) -> Self {
        Self {
            id: TabId::new(),
            url,
            title: String::new(),
        }
    }
}

/// What a [`TabStrip::close_tab`] call did, so callers can clean up
/// per-tab resources (history stacks, view bindings) without re-deriving
/// the activation decision.
#[derive(Clone, Debug, PartialEq)]
pub struct TabCloseOutcome {
    pub closed: TabId,
    /// The active tab after the close.
    pub activated: TabId,
    /// Set when closing the last remaining tab synthesized a fresh empty
    /// replacement.
    pub replacement: Option<TabId>,
}

/// Insertion-ordered tab collection with one active pointer.
///
/// Invariants: the strip always holds at least one tab, and the active id
/// always names a live tab. Closing the last tab immediately synthesizes a
/// replacement with empty url and title rather than leaving the strip empty.
#[derive(Clone, Debug)]
pub struct TabStrip {
    tabs: Vec<Tab>,
    active: TabId,
}

impl TabStrip {
    /// Create a strip holding a single tab at `initial_url`. The title is
    /// left empty until the content view reports one.
    pub fn new(initial_url: impl Into<String>) -> Self {
        let tab = Tab::new(initial_url.into());
        let active = tab.id;
        Self {
            tabs: vec![tab],
            active,
        }
    }

    /// Append a new tab at `initial_url` and make it active.
    pub fn create_tab(&mut self, initial_url: impl Into<String>) -> TabId {
        let tab = Tab::new(initial_url.into());
        let id = tab.id;
        self.tabs.push(tab);
        self.active = id;
        id
    }

    /// Remove the named tab. Returns `None` (and changes nothing) when the
    /// id is unknown.
    ///
    /// If the closed tab was active, the tab immediately preceding it in
    /// display order is activated, falling back to the first remaining tab.
    /// Closing the last tab synthesizes one empty replacement.
    pub fn close_tab(&mut self, id: TabId) -> Option<TabCloseOutcome> {
        let index = self.index_of(id)?;
        self.tabs.remove(index);

        if self.tabs.is_empty() {
            let replacement = Tab::new(String::new());
            let replacement_id = replacement.id;
            self.tabs.push(replacement);
            self.active = replacement_id;
            return Some(TabCloseOutcome {
                closed: id,
                activated: replacement_id,
                replacement: Some(replacement_id),
            });
        }

        if self.active == id {
            self.active = self.tabs[index.saturating_sub(1)].id;
        }
        Some(TabCloseOutcome {
            closed: id,
            activated: self.active,
            replacement: None,
        })
    }

    /// Move the active pointer. Unknown ids are a silent no-op; returns
    /// whether the pointer actually moved.
    pub fn set_active(&mut self, id: TabId) -> bool {
        if self.active == id || self.index_of(id).is_none() {
            return false;
        }
        self.active = id;
        true
    }

    /// Update the named tab's url. No-op when the tab is gone; returns
    /// whether anything changed.
    pub fn update_url(&mut self, id: TabId, url: impl Into<String>) -> bool {
        let url = url.into();
        let Some(tab) = self.get_mut(id) else {
            return false;
        };
        if tab.url == url {
            return false;
        }
        tab.url = url;
        true
    }

    /// Update the named tab's title. No-op when the tab is gone; returns
    /// whether anything changed.
    pub fn update_title(&mut self, id: TabId, title: impl Into<String>) -> bool {
        let title = title.into();
        let Some(tab) = self.get_mut(id) else {
            return false;
        };
        if tab.title == title {
            return false;
        }
        tab.title = title;
        true
    }

    pub fn active_id(&self) -> TabId {
        self.active
    }

    pub fn active(&self) -> &Tab {
        self.tabs
            .iter()
            .find(|tab| tab.id == self.active)
            .expect("active tab id must name a live tab")
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| tab.id == id)
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.index_of(id).is_some()
    }

    fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    /// Tabs in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Id of the tab after the active one, wrapping at the end.
    pub fn next_tab_id(&self) -> TabId {
        let index = self
            .index_of(self.active)
            .expect("active tab id must name a live tab");
        self.tabs[(index + 1) % self.tabs.len()].id
    }

    /// Id of the tab before the active one, wrapping at the start.
    pub fn previous_tab_id(&self) -> TabId {
        let index = self
            .index_of(self.active)
            .expect("active tab id must name a live tab");
        self.tabs[(index + self.tabs.len() - 1) % self.tabs.len()].id
    }

    /// Id of the tab at a zero-based strip position.
    pub fn tab_id_at(&self, index: usize) -> Option<TabId> {
        self.tabs.get(index).map(|tab| tab.id)
    }

    /// Id of the last tab in the strip.
    pub fn last_tab_id(&self) -> TabId {
        self.tabs
            .last()
            .map(|tab| tab.id)
            .expect("strip always holds at least one tab")
    }
}

/// Label shown on the strip for a tab title: truncated to
/// [`STRIP_LABEL_MAX_CHARS`] characters with an ellipsis, with a fixed
/// fallback for untitled tabs.
pub fn strip_label(title: &str) -> String {
    if title.is_empty() {
        return UNTITLED_STRIP_LABEL.to_string();
    }
    truncate_with_ellipsis(title, STRIP_LABEL_MAX_CHARS)
}

/// Truncate to `max_chars` characters (not bytes) and append `...` when
/// anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
