/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Per-tab navigation history: ordered back/forward stacks keyed by tab id.
//!
//! Every transition takes the tab's current url as an explicit argument and
//! reports the url the tab should display next, so handlers stay pure
//! functions of (state, event) and are testable without any mounted view.
//!
//! Home boundary policy: the home url participates in the back stack like
//! any other url (back navigates *to* home), but a back action is refused
//! whenever the tab's current url equals the home url, so back never walks
//! past the home page. Forward has no home gating.

use std::collections::HashMap;

use crate::tabs::TabId;

/// Back and forward stacks for one tab. Oldest entry at the bottom of
/// `back`; most recent undo on top of `forward`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabHistory {
    back: Vec<String>,
    forward: Vec<String>,
}

/// The history table: one [`TabHistory`] per live tab.
#[derive(Clone, Debug)]
pub struct HistoryTracker {
    stacks: HashMap<TabId, TabHistory>,
    home_url: String,
}

impl HistoryTracker {
    pub fn new(home_url: impl Into<String>) -> Self {
        Self {
            stacks: HashMap::new(),
            home_url: home_url.into(),
        }
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    /// Create empty stacks for a newly opened tab.
    pub fn register_tab(&mut self, tab: TabId) {
        self.stacks.entry(tab).or_default();
    }

    /// Drop the tab's stacks entirely. Closing a tab must leave no dangling
    /// history entry.
    pub fn remove_tab(&mut self, tab: TabId) {
        self.stacks.remove(&tab);
    }

    pub fn is_registered(&self, tab: TabId) -> bool {
        self.stacks.contains_key(&tab)
    }

    /// Record a navigation from `current` to `new_url` (address submit,
    /// bookmark click, or an external navigation reported by the content
    /// view). Returns whether the tab's url should change.
    ///
    /// Navigating to the current url is a no-op. The push is skipped when
    /// `current` is already on top of the back stack, which makes duplicate
    /// delivery of the same previous→new event pair harmless. A fresh
    /// navigation always invalidates the forward branch.
    pub fn navigate(&mut self, tab: TabId, current: &str, new_url: &str) -> bool {
        let Some(history) = self.stacks.get_mut(&tab) else {
            return false;
        };
        if new_url == current {
            return false;
        }
        if history.back.last().map(String::as_str) != Some(current) {
            history.back.push(current.to_string());
        }
        history.forward.clear();
        true
    }

    /// Undo one navigation. Returns the url to display, or `None` when back
    /// is unavailable (empty stack, unknown tab, or the tab is sitting on
    /// the home url).
    pub fn back(&mut self, tab: TabId, current: &str) -> Option<String> {
        if !self.can_go_back(tab, current) {
            return None;
        }
        let history = self.stacks.get_mut(&tab)?;
        let target = history.back.pop()?;
        history.forward.push(current.to_string());
        Some(target)
    }

    /// Redo one undone navigation. Returns the url to display, or `None`
    /// when the forward stack is empty or the tab is unknown.
    pub fn forward(&mut self, tab: TabId, current: &str) -> Option<String> {
        let history = self.stacks.get_mut(&tab)?;
        let target = history.forward.pop()?;
        history.back.push(current.to_string());
        Some(target)
    }

    pub fn can_go_back(&self, tab: TabId, current: &str) -> bool {
        if current == self.home_url {
            return false;
        }
        self.stacks
            .get(&tab)
            .is_some_and(|history| !history.back.is_empty())
    }

    pub fn can_go_forward(&self, tab: TabId) -> bool {
        self.stacks
            .get(&tab)
            .is_some_and(|history| !history.forward.is_empty())
    }

    /// Back stack contents, oldest first. Empty for unknown tabs.
    pub fn back_entries(&self, tab: TabId) -> &[String] {
        self.stacks
            .get(&tab)
            .map(|history| history.back.as_slice())
            .unwrap_or(&[])
    }

    /// Forward stack contents, oldest undo first. Empty for unknown tabs.
    pub fn forward_entries(&self, tab: TabId) -> &[String] {
        self.stacks
            .get(&tab)
            .map(|history| history.forward.as_slice())
            .unwrap_or(&[])
    }

    #[cfg(test)]
    fn snapshot(&self, tab: TabId) -> TabHistory {
        self.stacks.get(&tab).cloned().unwrap_or_default()
    }
}
