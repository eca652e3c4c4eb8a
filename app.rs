/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Application state management for the browser shell.
//!
//! All mutation flows through [`BrowserShellApp::apply_intents`]: input
//! handlers and the content-view event pipeline reduce to [`ShellIntent`]
//! values, the reducer updates the tab strip / history / stores, and side
//! effects (loads to issue, notices to show, chrome commands, clipboard
//! writes) accumulate in pending queues the driver drains once per pump.

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::bookmarks::{BookmarkAddOutcome, BookmarkStore, DUPLICATE_BOOKMARK_NOTICE};
use crate::colors::{COLOR_SAVED_NOTICE, ColorFormat, ColorHistory, format_color};
use crate::history::HistoryTracker;
use crate::parser::location_input_to_url;
use crate::prefs::ShellPreferences;
use crate::tabs::{TabId, TabStrip};
use crate::window::{ChromeCommand, UNTITLED_PAGE_TITLE};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Transient user-visible message, drained by the driver once per pump.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// Text waiting to be written to the system clipboard. The driver performs
/// the actual write and reports the outcome as a notice.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClipboardCopyRequest {
    pub text: String,
    pub format: ColorFormat,
}

/// An armed reload: the owning tab shows an empty URL until the deadline
/// passes and the stored URL is re-issued. At most one per tab.
#[derive(Clone, Debug, Eq, PartialEq)]
struct PendingReload {
    tab: TabId,
    url: String,
    deadline: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellIntent {
    /// Open a new tab; `None` falls back to the configured homepage.
    CreateTab { url: Option<String> },
    CloseTab { tab: TabId },
    CloseActiveTab,
    ActivateTab { tab: TabId },
    ActivateNextTab,
    ActivatePreviousTab,
    /// Ctrl+1..9 jump; slot 9 always lands on the last tab.
    ActivateTabAt { slot: u8 },
    /// Address bar submit; free text resolves through the search template.
    SubmitLocation { input: String },
    /// Navigate the active tab to an already-resolved URL (bookmark click).
    NavigateActiveTo { url: String },
    GoBack,
    GoForward,
    RequestReload,
    /// The bound content view reported a navigation it performed itself.
    ViewUrlChanged { tab: TabId, new_url: String },
    ViewTitleChanged { tab: TabId, title: Option<String> },
    AddBookmarkForActiveTab,
    RemoveBookmark { index: usize },
    OpenBookmark { index: usize },
    SaveColor { hex: String },
    EraseColorHistory,
    CopyColor { hex: String, format: ColorFormat },
    RequestMinimize,
    RequestMaximize,
    RequestCloseWindow,
}

pub struct BrowserShellApp {
    pub tabs: TabStrip,
    pub history: HistoryTracker,
    pub bookmarks: BookmarkStore,
    pub colors: ColorHistory,
    preferences: ShellPreferences,
    reload_delay: Duration,
    pending_loads: Vec<(TabId, String)>,
    pending_notices: Vec<Notice>,
    pending_chrome_commands: Vec<ChromeCommand>,
    pending_clipboard_copy: Option<ClipboardCopyRequest>,
    pending_reloads: Vec<PendingReload>,
}

impl BrowserShellApp {
    /// Create the shell with a single tab at `start_url`. The initial load
    /// is queued so the driver issues it through the same path as every
    /// later one.
    pub fn new(preferences: ShellPreferences, start_url: String) -> Self {
        let tabs = TabStrip::new(start_url.clone());
        let mut history = HistoryTracker::new(preferences.homepage.clone());
        history.register_tab(tabs.active_id());
        let initial_load = (tabs.active_id(), start_url);
        let reload_delay = Duration::from_millis(preferences.reload_delay_ms);
        Self {
            tabs,
            history,
            bookmarks: BookmarkStore::new(),
            colors: ColorHistory::new(),
            preferences,
            reload_delay,
            pending_loads: vec![initial_load],
            pending_notices: Vec::new(),
            pending_chrome_commands: Vec::new(),
            pending_clipboard_copy: None,
            pending_reloads: Vec::new(),
        }
    }

    /// Create a shell with default preferences, starting at the homepage
    /// (for tests).
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_for_testing() -> Self {
        let preferences = ShellPreferences::default();
        let start_url = preferences.homepage.clone();
        Self::new(preferences, start_url)
    }

    pub fn preferences(&self) -> &ShellPreferences {
        &self.preferences
    }

    pub fn apply_intents<I>(&mut self, intents: I)
    where
        I: IntoIterator<Item = ShellIntent>,
    {
        for intent in intents {
            self.apply_intent(intent);
        }
    }

    fn apply_intent(&mut self, intent: ShellIntent) {
        match intent {
            ShellIntent::CreateTab { url } => {
                let url = url.unwrap_or_else(|| self.preferences.homepage.clone());
                let tab = self.tabs.create_tab(url.clone());
                self.history.register_tab(tab);
                self.pending_loads.push((tab, url));
            },
            ShellIntent::CloseTab { tab } => self.close_tab(tab),
            ShellIntent::CloseActiveTab => {
                let tab = self.tabs.active_id();
                self.close_tab(tab);
            },
            ShellIntent::ActivateTab { tab } => {
                self.tabs.set_active(tab);
            },
            ShellIntent::ActivateNextTab => {
                let next = self.tabs.next_tab_id();
                self.tabs.set_active(next);
            },
            ShellIntent::ActivatePreviousTab => {
                let previous = self.tabs.previous_tab_id();
                self.tabs.set_active(previous);
            },
            ShellIntent::ActivateTabAt { slot } => self.activate_tab_at_slot(slot),
            ShellIntent::SubmitLocation { input } => {
                let url = location_input_to_url(&input, &self.preferences.search_template);
                self.navigate_active(url);
            },
            ShellIntent::NavigateActiveTo { url } => self.navigate_active(url),
            ShellIntent::GoBack => {
                let tab = self.tabs.active_id();
                let current = self.tabs.active().url.clone();
                if let Some(url) = self.history.back(tab, &current) {
                    self.tabs.update_url(tab, url.clone());
                    self.pending_loads.push((tab, url));
                }
            },
            ShellIntent::GoForward => {
                let tab = self.tabs.active_id();
                let current = self.tabs.active().url.clone();
                if let Some(url) = self.history.forward(tab, &current) {
                    self.tabs.update_url(tab, url.clone());
                    self.pending_loads.push((tab, url));
                }
            },
            ShellIntent::RequestReload => self.request_reload(),
            ShellIntent::ViewUrlChanged { tab, new_url } => {
                let Some(current) = self.tabs.get(tab).map(|tab| tab.url.clone()) else {
                    debug!("dropping url change for vanished tab {tab}");
                    return;
                };
                // History transition first: the push must observe the
                // pre-navigation URL.
                self.history.navigate(tab, &current, &new_url);
                self.tabs.update_url(tab, new_url);
            },
            ShellIntent::ViewTitleChanged { tab, title } => {
                let resolved = match title {
                    Some(title) if !title.is_empty() => title,
                    _ => UNTITLED_PAGE_TITLE.to_string(),
                };
                self.tabs.update_title(tab, resolved);
            },
            ShellIntent::AddBookmarkForActiveTab => self.add_bookmark_for_active_tab(),
            ShellIntent::RemoveBookmark { index } => {
                self.bookmarks.remove(index);
            },
            ShellIntent::OpenBookmark { index } => {
                let url = self.bookmarks.get(index).map(|bookmark| bookmark.url.clone());
                if let Some(url) = url {
                    self.navigate_active(url);
                }
            },
            ShellIntent::SaveColor { hex } => {
                self.colors.save(hex);
                self.pending_notices.push(Notice::info(COLOR_SAVED_NOTICE));
            },
            ShellIntent::EraseColorHistory => self.colors.erase(),
            ShellIntent::CopyColor { hex, format } => match format_color(&hex, format) {
                Some(text) => {
                    self.pending_clipboard_copy = Some(ClipboardCopyRequest { text, format });
                },
                None => {
                    warn!("cannot format {hex:?} as {}", format.label());
                    self.pending_notices
                        .push(Notice::warning(format!("Unrecognized color value: {hex}")));
                },
            },
            ShellIntent::RequestMinimize => {
                self.pending_chrome_commands.push(ChromeCommand::Minimize);
            },
            ShellIntent::RequestMaximize => {
                self.pending_chrome_commands.push(ChromeCommand::Maximize);
            },
            ShellIntent::RequestCloseWindow => {
                self.pending_chrome_commands.push(ChromeCommand::CloseWindow);
            },
        }
    }

    /// Shared navigation path for address submits, bookmark clicks and
    /// explicit URL intents. A successful transition updates the tab and
    /// queues the load; no-ops (same URL, vanished tab) leave every queue
    /// untouched.
    fn navigate_active(&mut self, new_url: String) {
        let tab = self.tabs.active_id();
        let current = self.tabs.active().url.clone();
        if !self.history.navigate(tab, &current, &new_url) {
            return;
        }
        self.tabs.update_url(tab, new_url.clone());
        self.pending_loads.push((tab, new_url));
    }

    fn close_tab(&mut self, tab: TabId) {
        let Some(outcome) = self.tabs.close_tab(tab) else {
            return;
        };
        self.history.remove_tab(outcome.closed);
        self.pending_loads.retain(|(pending, _)| *pending != outcome.closed);
        self.pending_reloads.retain(|pending| pending.tab != outcome.closed);
        if let Some(replacement) = outcome.replacement {
            self.history.register_tab(replacement);
        }
    }

    fn activate_tab_at_slot(&mut self, slot: u8) {
        if slot == 0 {
            return;
        }
        let target = if slot == 9 {
            Some(self.tabs.last_tab_id())
        } else {
            self.tabs.tab_id_at(usize::from(slot) - 1)
        };
        if let Some(tab) = target {
            self.tabs.set_active(tab);
        }
    }

    /// Arm (or re-arm) the two-phase reload of the active tab. The URL
    /// blanks immediately; [`Self::poll_reload_deadlines`] restores it once
    /// the delay passes.
    fn request_reload(&mut self) {
        let tab = self.tabs.active_id();
        let deadline = Instant::now() + self.reload_delay;
        if let Some(pending) = self.pending_reloads.iter_mut().find(|pending| pending.tab == tab) {
            pending.deadline = deadline;
            return;
        }
        let url = self.tabs.active().url.clone();
        if url.is_empty() {
            return;
        }
        self.tabs.update_url(tab, "");
        self.pending_reloads.push(PendingReload { tab, url, deadline });
    }

    /// Complete every reload whose deadline has passed. Completions whose
    /// tab is gone are discarded.
    pub fn poll_reload_deadlines(&mut self, now: Instant) {
        let mut index = 0;
        while index < self.pending_reloads.len() {
            if self.pending_reloads[index].deadline > now {
                index += 1;
                continue;
            }
            let due = self.pending_reloads.remove(index);
            if !self.tabs.contains(due.tab) {
                debug!("discarding reload completion for closed tab {}", due.tab);
                continue;
            }
            self.tabs.update_url(due.tab, due.url.clone());
            self.pending_loads.push((due.tab, due.url));
        }
    }

    pub fn has_pending_reload(&self, tab: TabId) -> bool {
        self.pending_reloads.iter().any(|pending| pending.tab == tab)
    }

    pub fn has_pending_load_for(&self, tab: TabId) -> bool {
        self.pending_loads.iter().any(|(pending, _)| *pending == tab)
    }

    pub fn has_armed_reloads(&self) -> bool {
        !self.pending_reloads.is_empty()
    }

    pub fn reload_deadline(&self, tab: TabId) -> Option<Instant> {
        self.pending_reloads
            .iter()
            .find(|pending| pending.tab == tab)
            .map(|pending| pending.deadline)
    }

    fn add_bookmark_for_active_tab(&mut self) {
        let (title, url) = {
            let tab = self.tabs.active();
            (tab.title.clone(), tab.url.clone())
        };
        match self.bookmarks.add(&title, url) {
            BookmarkAddOutcome::Added => {},
            BookmarkAddOutcome::DuplicateUrl => {
                self.pending_notices.push(Notice::warning(DUPLICATE_BOOKMARK_NOTICE));
            },
        }
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.pending_notices.push(notice);
    }

    /// Consume the loads the driver should issue to the content view.
    pub fn take_pending_loads(&mut self) -> Vec<(TabId, String)> {
        std::mem::take(&mut self.pending_loads)
    }

    pub fn take_pending_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending_notices)
    }

    pub fn take_pending_chrome_commands(&mut self) -> Vec<ChromeCommand> {
        std::mem::take(&mut self.pending_chrome_commands)
    }

    pub fn take_pending_clipboard_copy(&mut self) -> Option<ClipboardCopyRequest> {
        self.pending_clipboard_copy.take()
    }
}
