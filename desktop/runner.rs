/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The headless session driver: owns the shell state, the window event
//! queue and the simulated content view, and advances everything with a
//! cooperative pump.
//!
//! One pump is one full turn: replay load completions as view events,
//! drain the event queue through the pipeline into the reducer, poll
//! reload deadlines, carry out side effects (clipboard, chrome, loads) and
//! sync the toolbar. All of it runs on the caller's thread; the only
//! cross-thread hand-off is the completion channel the view writes to.

use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::time::Instant;

use arboard::Clipboard;
use crossbeam_channel::{Receiver, unbounded};
use keyboard_types::KeyboardEvent;
use log::{info, warn};

use crate::app::{BrowserShellApp, ClipboardCopyRequest, Notice};
use crate::desktop::event_pipeline::shell_intents_from_view_events;
use crate::desktop::sim_view::{SimulatedContentView, SimulatedPageLoad};
use crate::desktop::toolbar::ToolbarState;
use crate::desktop::view_controller::{issue_pending_loads, reconcile_binding};
use crate::input::{collect_actions, intents_from_actions};
use crate::parser::normalize_load_url;
use crate::prefs::ShellPreferences;
use crate::window::{
    ChromeCommand, ContentView, NoopChrome, ShellWindow, ViewBinding, ViewId, WindowChrome,
};

pub struct HeadlessShell {
    pub app: BrowserShellApp,
    pub toolbar: ToolbarState,
    window: ShellWindow,
    view: SimulatedContentView,
    completions: Receiver<SimulatedPageLoad>,
    binding: ViewBinding,
    chrome: Box<dyn WindowChrome>,
    clipboard: Option<Clipboard>,
    clipboard_probed: bool,
    notices: Vec<Notice>,
    exit_scheduled: Cell<bool>,
    last_pump_was_idle: bool,
    exit_when_idle: bool,
}

impl HeadlessShell {
    pub fn new(preferences: ShellPreferences, start_url: String) -> Self {
        Self::with_chrome(preferences, start_url, Box::new(NoopChrome))
    }

    pub fn with_chrome(
        preferences: ShellPreferences,
        start_url: String,
        chrome: Box<dyn WindowChrome>,
    ) -> Self {
        let app = BrowserShellApp::new(preferences, start_url);
        let window = ShellWindow::new(Arc::new(AtomicU64::new(0)));
        let (completion_sender, completions) = unbounded();
        let view = SimulatedContentView::new(ViewId::from(1), completion_sender);
        Self {
            app,
            toolbar: ToolbarState::new(),
            window,
            view,
            completions,
            binding: ViewBinding::default(),
            chrome,
            clipboard: None,
            clipboard_probed: false,
            notices: Vec::new(),
            exit_scheduled: Cell::new(false),
            last_pump_was_idle: false,
            exit_when_idle: false,
        }
    }

    /// Exit the pump loop once a pump finds no work and no reload is armed.
    pub fn set_exit_when_idle(&mut self, exit_when_idle: bool) {
        self.exit_when_idle = exit_when_idle;
    }

    pub fn window(&self) -> &ShellWindow {
        &self.window
    }

    pub fn view(&self) -> &SimulatedContentView {
        &self.view
    }

    pub fn schedule_exit(&self) {
        self.exit_scheduled.set(true);
    }

    pub fn last_pump_was_idle(&self) -> bool {
        self.last_pump_was_idle
    }

    /// Drain accumulated notices (newest last).
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Type into the address field and press Enter.
    pub fn submit_location(&mut self, text: &str) {
        self.toolbar.edit_location(text);
        let intent = self.toolbar.submit_location();
        self.app.apply_intents([intent]);
    }

    /// Feed raw key events through shortcut detection into the reducer.
    pub fn handle_key_events(&mut self, events: &[KeyboardEvent], text_input_focused: bool) {
        let actions = collect_actions(events, text_input_focused);
        self.app.apply_intents(intents_from_actions(&actions));
    }

    /// One cooperative turn. Returns false once shutdown is scheduled.
    pub fn pump(&mut self) -> bool {
        let mut worked = false;

        worked |= self.apply_page_load_completions() > 0;

        let events = self.window.take_pending_view_events();
        worked |= !events.is_empty();
        let intents = shell_intents_from_view_events(events, &self.binding);
        self.app.apply_intents(intents);

        self.app.poll_reload_deadlines(Instant::now());

        if let Some(request) = self.app.take_pending_clipboard_copy() {
            worked = true;
            self.copy_to_clipboard(request);
        }

        for command in self.app.take_pending_chrome_commands() {
            worked = true;
            if command == ChromeCommand::CloseWindow {
                self.schedule_exit();
            }
            self.chrome.handle_command(command);
        }

        let outcome = reconcile_binding(&self.app, &mut self.binding, self.view.id());
        worked |= outcome.rebound;
        if let Some(url) = outcome.load {
            self.view.load(&normalize_load_url(&url));
        }

        worked |= issue_pending_loads(&mut self.app, &self.binding, &self.view) > 0;

        if self.toolbar.sync(&self.app) {
            worked = true;
            self.window.set_needs_update();
        }

        for notice in self.app.take_pending_notices() {
            worked = true;
            info!("notice: {}", notice.message);
            self.notices.push(notice);
        }

        self.last_pump_was_idle = !worked;
        if self.exit_when_idle && !worked && !self.app.has_armed_reloads() {
            self.schedule_exit();
        }
        !self.exit_scheduled.get()
    }

    /// Pump until a turn finds no work, shutdown is scheduled, or
    /// `max_pumps` turns have run. Returns the number of turns taken.
    pub fn run_until_idle(&mut self, max_pumps: usize) -> usize {
        for performed in 1..=max_pumps {
            let continue_running = self.pump();
            if !continue_running || self.last_pump_was_idle {
                return performed;
            }
        }
        max_pumps
    }

    fn apply_page_load_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions.try_recv() {
            self.window.notify_navigated(completion.view_id, completion.url);
            self.window.notify_title_changed(completion.view_id, completion.title);
            applied += 1;
        }
        applied
    }

    fn copy_to_clipboard(&mut self, request: ClipboardCopyRequest) {
        let notice = match self.clipboard() {
            Some(clipboard) => match clipboard.set_text(request.text) {
                Ok(()) => Notice::info(request.format.copied_notice()),
                Err(error) => {
                    warn!("clipboard write failed: {error}");
                    Notice::warning("Could not copy to clipboard")
                },
            },
            None => Notice::warning("Clipboard is not available"),
        };
        self.app.push_notice(notice);
    }

    /// The clipboard connection is opened on first use; headless hosts
    /// without one degrade to warning notices.
    fn clipboard(&mut self) -> Option<&mut Clipboard> {
        if !self.clipboard_probed {
            self.clipboard_probed = true;
            self.clipboard = match Clipboard::new() {
                Ok(clipboard) => Some(clipboard),
                Err(error) => {
                    warn!("clipboard unavailable: {error}");
                    None
                },
            };
        }
        self.clipboard.as_mut()
    }
}
