/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The seam between the shell and its embedded content views: the event
//! queue views report into, the binding that ties one mounted view to one
//! tab, and the window chrome contract.

use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use log::debug;

use crate::tabs::TabId;

/// Title applied when a view reports none.
pub const UNTITLED_PAGE_TITLE: &str = "Untitled";

/// Identity of one mounted content view instance. A tab gets a fresh view
/// id every time a view is mounted for it, so stale events from torn-down
/// views are recognizable.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct ViewId(u64);

impl From<u64> for ViewId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// The embedded component that actually fetches and renders web content.
/// Opaque to the shell: it accepts load directives and reports progress
/// through [`ShellWindow`] events.
pub trait ContentView {
    fn id(&self) -> ViewId;
    /// Ask the view to load `url`. Completion arrives asynchronously as a
    /// [`ViewEventKind::Navigated`] event.
    fn load(&self, url: &str);
}

/// Fire-and-forget window chrome commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChromeCommand {
    Minimize,
    Maximize,
    CloseWindow,
}

/// Host window chrome. Implementations are thin platform wrappers; the
/// in-tree runtime uses [`NoopChrome`].
pub trait WindowChrome {
    fn minimize(&self) {}
    fn maximize(&self) {}
    fn close_window(&self) {}

    fn handle_command(&self, command: ChromeCommand) {
        match command {
            ChromeCommand::Minimize => self.minimize(),
            ChromeCommand::Maximize => self.maximize(),
            ChromeCommand::CloseWindow => self.close_window(),
        }
    }
}

/// Chrome for hosts without any window to command.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopChrome;

impl WindowChrome for NoopChrome {}

/// Navigation-relevant events emitted by content views.
#[derive(Clone, Debug)]
pub struct ViewEvent {
    pub seq: u64,
    pub kind: ViewEventKind,
}

#[derive(Clone, Debug)]
pub enum ViewEventKind {
    /// The view finished a load or an in-page navigation.
    Navigated { view_id: ViewId, url: String },
    /// The page reported a title; `None` resolves to
    /// [`UNTITLED_PAGE_TITLE`] downstream.
    TitleChanged {
        view_id: ViewId,
        title: Option<String>,
    },
}

impl ViewEventKind {
    pub fn view_id(&self) -> ViewId {
        match self {
            ViewEventKind::Navigated { view_id, .. } => *view_id,
            ViewEventKind::TitleChanged { view_id, .. } => *view_id,
        }
    }
}

/// Per-window queue of pending view events, drained once per pump by the
/// runtime. Sequence numbers come from a shared counter so event order is
/// reconstructable from logs even across windows.
pub struct ShellWindow {
    /// Pending events emitted by content-view callbacks.
    pending_view_events: RefCell<Vec<ViewEvent>>,
    /// Shared sequence source; stamped at emission.
    view_event_sequence: Arc<AtomicU64>,
    /// Whether toolbar/tab state should be re-synced on the next pump.
    needs_update: Cell<bool>,
    /// Optional runtime tracing for event ordering diagnostics.
    trace_view_events: bool,
    /// Monotonic startup timestamp used for trace log deltas.
    trace_view_events_started_at: Instant,
    /// Sequence number for event queue drains.
    trace_view_event_drains: Cell<u64>,
}

impl ShellWindow {
    pub fn new(view_event_sequence: Arc<AtomicU64>) -> Self {
        Self {
            pending_view_events: Default::default(),
            view_event_sequence,
            needs_update: Default::default(),
            trace_view_events: std::env::var_os("TABSHELL_TRACE_VIEW_EVENTS").is_some(),
            trace_view_events_started_at: Instant::now(),
            trace_view_event_drains: Cell::new(0),
        }
    }

    pub fn notify_navigated(&self, view_id: ViewId, url: impl Into<String>) {
        let event = self.new_view_event(ViewEventKind::Navigated {
            view_id,
            url: url.into(),
        });
        self.trace_view_event(&event);
        self.pending_view_events.borrow_mut().push(event);
        self.set_needs_update();
    }

    pub fn notify_title_changed(&self, view_id: ViewId, title: Option<String>) {
        let event = self.new_view_event(ViewEventKind::TitleChanged { view_id, title });
        self.trace_view_event(&event);
        self.pending_view_events.borrow_mut().push(event);
        self.set_needs_update();
    }

    pub fn set_needs_update(&self) {
        self.needs_update.set(true);
    }

    pub fn take_needs_update(&self) -> bool {
        self.needs_update.take()
    }

    /// Drain all pending view events in arrival order.
    pub fn take_pending_view_events(&self) -> Vec<ViewEvent> {
        let events = std::mem::take(&mut *self.pending_view_events.borrow_mut());
        if self.trace_view_events {
            let drain_id = self.trace_view_event_drains.get() + 1;
            self.trace_view_event_drains.set(drain_id);
            let elapsed_ms = self.trace_view_events_started_at.elapsed().as_millis();
            debug!(
                "view_event_trace drain={} t_ms={} count={}",
                drain_id,
                elapsed_ms,
                events.len()
            );
        }
        events
    }

    fn trace_view_event(&self, event: &ViewEvent) {
        if !self.trace_view_events {
            return;
        }
        let elapsed_ms = self.trace_view_events_started_at.elapsed().as_millis();
        match &event.kind {
            ViewEventKind::Navigated { view_id, url } => {
                debug!(
                    "view_event_trace seq={} t_ms={} kind=navigated view={:?} url={}",
                    event.seq, elapsed_ms, view_id, url
                );
            },
            ViewEventKind::TitleChanged { view_id, title } => {
                debug!(
                    "view_event_trace seq={} t_ms={} kind=title_changed view={:?} title_present={}",
                    event.seq,
                    elapsed_ms,
                    view_id,
                    title.as_deref().is_some_and(|t| !t.is_empty())
                );
            },
        }
    }

    fn new_view_event(&self, kind: ViewEventKind) -> ViewEvent {
        let seq = self.view_event_sequence.fetch_add(1, Ordering::Relaxed) + 1;
        ViewEvent { seq, kind }
    }

    #[cfg(test)]
    pub(crate) fn enqueue_test_view_event_kind(&self, kind: ViewEventKind) {
        let event = self.new_view_event(kind);
        self.pending_view_events.borrow_mut().push(event);
    }
}

/// The exclusive subscription tying one mounted content view to the tab it
/// feeds. At most one binding is live per window; binding a new view
/// releases the previous one, and events from unbound views are stale by
/// definition.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewBinding {
    bound: Option<(ViewId, TabId)>,
}

impl ViewBinding {
    /// Bind `view_id` to `tab_id`, releasing any previous binding first.
    /// Returns the released pair, if any.
    pub fn bind(&mut self, view_id: ViewId, tab_id: TabId) -> Option<(ViewId, TabId)> {
        let released = self.bound.take();
        self.bound = Some((view_id, tab_id));
        released
    }

    pub fn release(&mut self) -> Option<(ViewId, TabId)> {
        self.bound.take()
    }

    /// Release only when the binding currently feeds `tab_id`. Used on tab
    /// close so a binding already moved to another tab survives.
    pub fn release_for_tab(&mut self, tab_id: TabId) -> Option<ViewId> {
        match self.bound {
            Some((view_id, bound_tab)) if bound_tab == tab_id => {
                self.bound = None;
                Some(view_id)
            },
            _ => None,
        }
    }

    pub fn bound_view(&self) -> Option<ViewId> {
        self.bound.map(|(view_id, _)| view_id)
    }

    pub fn bound_tab(&self) -> Option<TabId> {
        self.bound.map(|(_, tab_id)| tab_id)
    }

    /// The tab this event source routes to, or `None` when the source is
    /// not the bound view (a stale event).
    pub fn routes(&self, view_id: ViewId) -> Option<TabId> {
        match self.bound {
            Some((bound_view, tab_id)) if bound_view == view_id => Some(tab_id),
            _ => None,
        }
    }
}
