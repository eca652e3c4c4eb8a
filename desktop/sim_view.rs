/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! A content view with no engine behind it, used by the headless runtime
//! and the scenario tests. Every `load` is acknowledged by handing a
//! completion to the driver over a channel; the driver replays completions
//! as `Navigated` / `TitleChanged` events on the shared window queue.

use std::cell::RefCell;
use std::collections::HashMap;

use crossbeam_channel::Sender;
use log::{debug, warn};
use url::Url;

use crate::window::{ContentView, ViewId};

/// One acknowledged load, consumed on the driver thread.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimulatedPageLoad {
    pub view_id: ViewId,
    pub url: String,
    pub title: Option<String>,
}

pub struct SimulatedContentView {
    id: ViewId,
    completions: Sender<SimulatedPageLoad>,
    staged_titles: RefCell<HashMap<String, String>>,
}

impl SimulatedContentView {
    pub fn new(id: ViewId, completions: Sender<SimulatedPageLoad>) -> Self {
        Self {
            id,
            completions,
            staged_titles: RefCell::new(HashMap::new()),
        }
    }

    /// Preset the title the simulated page at `url` reports once loaded.
    /// Unstaged pages fall back to their host name.
    pub fn stage_title(&self, url: impl Into<String>, title: impl Into<String>) {
        self.staged_titles.borrow_mut().insert(url.into(), title.into());
    }
}

impl ContentView for SimulatedContentView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn load(&self, url: &str) {
        debug!("simulated view {:?} loading {url}", self.id);
        let title = self
            .staged_titles
            .borrow()
            .get(url)
            .cloned()
            .or_else(|| derived_title(url));
        let completion = SimulatedPageLoad {
            view_id: self.id,
            url: url.to_string(),
            title,
        };
        if self.completions.send(completion).is_err() {
            warn!("dropping load completion, driver is gone: {url}");
        }
    }
}

fn derived_title(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::unbounded;

    use super::*;

    #[test]
    fn test_loads_are_acknowledged_in_order() {
        let (sender, receiver) = unbounded();
        let view = SimulatedContentView::new(ViewId::from(1), sender);

        view.load("https://a.example/");
        view.load("https://b.example/");

        let first = receiver.try_recv().unwrap();
        assert_eq!(first.url, "https://a.example/");
        assert_eq!(first.title, Some("a.example".to_string()));
        assert_eq!(receiver.try_recv().unwrap().url, "https://b.example/");
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_staged_titles_win_over_derived_ones() {
        let (sender, receiver) = unbounded();
        let view = SimulatedContentView::new(ViewId::from(1), sender);
        view.stage_title("https://a.example/", "Landing Page");

        view.load("https://a.example/");

        assert_eq!(
            receiver.try_recv().unwrap().title,
            Some("Landing Page".to_string())
        );
    }

    #[test]
    fn test_unparseable_urls_report_no_title() {
        let (sender, receiver) = unbounded();
        let view = SimulatedContentView::new(ViewId::from(1), sender);

        view.load("not a url");

        assert_eq!(receiver.try_recv().unwrap().title, None);
    }
}
