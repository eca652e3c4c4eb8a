/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Content-view lifecycle management for the browser shell.
//!
//! Keeps the single view binding pointed at the active tab and issues the
//! reducer's pending loads to the bound view. All view operations the
//! driver performs live here, in focused testable functions.

use log::debug;

use crate::app::BrowserShellApp;
use crate::parser::normalize_load_url;
use crate::window::{ContentView, ViewBinding, ViewId};

pub(crate) struct BindingReconcileOutcome {
    pub rebound: bool,
    /// URL to hand the view when the binding moved to a tab whose content
    /// it is not showing yet.
    pub load: Option<String>,
}

/// Point the binding at the active tab. Moving the binding re-issues the
/// newly bound tab's URL so the view shows what the tab claims, except
/// when the reducer already queued a load for that tab (fresh tabs) or
/// there is nothing to show yet (first bind, empty URL).
pub(crate) fn reconcile_binding(
    app: &BrowserShellApp,
    binding: &mut ViewBinding,
    view_id: ViewId,
) -> BindingReconcileOutcome {
    let active = app.tabs.active_id();
    if binding.routes(view_id) == Some(active) {
        return BindingReconcileOutcome {
            rebound: false,
            load: None,
        };
    }

    let previous = binding.bind(view_id, active);
    let url = app.tabs.active().url.as_str();
    let load = (previous.is_some() && !url.is_empty() && !app.has_pending_load_for(active))
        .then(|| url.to_string());
    BindingReconcileOutcome {
        rebound: true,
        load,
    }
}

/// Drain the reducer's pending loads into the bound view. Loads for tabs
/// the view is not bound to are dropped (the tab was closed or switched
/// away before the driver got here); empty URLs have nothing to load.
pub(crate) fn issue_pending_loads(
    app: &mut BrowserShellApp,
    binding: &ViewBinding,
    view: &dyn ContentView,
) -> usize {
    let mut issued = 0;
    for (tab, url) in app.take_pending_loads() {
        if binding.bound_tab() != Some(tab) {
            debug!("skipping load for unbound tab {tab}: {url}");
            continue;
        }
        if url.is_empty() {
            continue;
        }
        view.load(&normalize_load_url(&url));
        issued += 1;
    }
    issued
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::app::ShellIntent;
    use crate::prefs::DEFAULT_HOMEPAGE;

    struct RecordingView {
        id: ViewId,
        loads: RefCell<Vec<String>>,
    }

    impl RecordingView {
        fn new(id: ViewId) -> Self {
            Self {
                id,
                loads: RefCell::new(Vec::new()),
            }
        }
    }

    impl ContentView for RecordingView {
        fn id(&self) -> ViewId {
            self.id
        }

        fn load(&self, url: &str) {
            self.loads.borrow_mut().push(url.to_string());
        }
    }

    #[test]
    fn test_first_bind_issues_no_load() {
        let app = BrowserShellApp::new_for_testing();
        let mut binding = ViewBinding::default();

        let outcome = reconcile_binding(&app, &mut binding, ViewId::from(1));

        assert!(outcome.rebound);
        assert_eq!(outcome.load, None);
        assert_eq!(binding.bound_tab(), Some(app.tabs.active_id()));
    }

    #[test]
    fn test_tab_switch_rebinds_and_reloads() {
        let mut app = BrowserShellApp::new_for_testing();
        let first = app.tabs.active_id();
        let view = ViewId::from(1);
        let mut binding = ViewBinding::default();
        reconcile_binding(&app, &mut binding, view);

        app.apply_intents([ShellIntent::CreateTab {
            url: Some("https://b.example/".to_string()),
        }]);
        // The fresh tab's load is already queued; rebinding adds none.
        let outcome = reconcile_binding(&app, &mut binding, view);
        assert!(outcome.rebound);
        assert_eq!(outcome.load, None);
        app.take_pending_loads();

        app.apply_intents([ShellIntent::ActivateTab { tab: first }]);
        let outcome = reconcile_binding(&app, &mut binding, view);
        assert_eq!(outcome.load, Some(app.preferences().homepage.clone()));

        // Stable active tab: nothing to do.
        let outcome = reconcile_binding(&app, &mut binding, view);
        assert!(!outcome.rebound);
    }

    #[test]
    fn test_replacement_tab_has_nothing_to_load() {
        let mut app = BrowserShellApp::new_for_testing();
        let view = ViewId::from(1);
        let mut binding = ViewBinding::default();
        reconcile_binding(&app, &mut binding, view);

        app.apply_intents([ShellIntent::CloseActiveTab]);
        let outcome = reconcile_binding(&app, &mut binding, view);

        assert!(outcome.rebound);
        assert_eq!(outcome.load, None);
    }

    #[test]
    fn test_pending_loads_are_normalized_and_filtered() {
        let mut app = BrowserShellApp::new_for_testing();
        let view = RecordingView::new(ViewId::from(1));
        let mut binding = ViewBinding::default();
        reconcile_binding(&app, &mut binding, view.id());
        app.take_pending_loads();

        app.apply_intents([ShellIntent::NavigateActiveTo {
            url: "example.com/docs".to_string(),
        }]);
        let issued = issue_pending_loads(&mut app, &binding, &view);

        assert_eq!(issued, 1);
        assert_eq!(view.loads.borrow().as_slice(), &["https://example.com/docs"]);
    }

    #[test]
    fn test_loads_for_unbound_tabs_are_dropped() {
        let mut app = BrowserShellApp::new_for_testing();
        let view = RecordingView::new(ViewId::from(1));
        let mut binding = ViewBinding::default();
        reconcile_binding(&app, &mut binding, view.id());
        app.take_pending_loads();

        // A load for the first tab is still queued when a new tab takes
        // over the binding; it must not leak into the new tab's view.
        app.apply_intents([
            ShellIntent::NavigateActiveTo {
                url: "https://a.example/".to_string(),
            },
            ShellIntent::CreateTab { url: None },
        ]);
        reconcile_binding(&app, &mut binding, view.id());

        let issued = issue_pending_loads(&mut app, &binding, &view);
        assert_eq!(issued, 1);
        assert_eq!(view.loads.borrow().as_slice(), &[DEFAULT_HOMEPAGE]);
    }
}
