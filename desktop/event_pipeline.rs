/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use log::debug;

use crate::app::ShellIntent;
use crate::window::{ViewBinding, ViewEvent, ViewEventKind};

/// Translate drained content-view events into reducer intents, routed
/// through the binding table. Events from a view that is not the currently
/// bound one are stale (the tab was closed or switched away while the event
/// sat in the queue); they are counted, logged and dropped.
pub(crate) fn shell_intents_from_view_events(
    events: Vec<ViewEvent>,
    binding: &ViewBinding,
) -> Vec<ShellIntent> {
    let mut intents = Vec::with_capacity(events.len());
    let mut stale_events = 0usize;
    for event in events {
        let Some(tab) = binding.routes(event.kind.view_id()) else {
            stale_events += 1;
            debug!(
                "dropping stale view event seq={} view={:?}",
                event.seq,
                event.kind.view_id()
            );
            continue;
        };
        match event.kind {
            ViewEventKind::Navigated { url, .. } => {
                intents.push(ShellIntent::ViewUrlChanged { tab, new_url: url });
            },
            ViewEventKind::TitleChanged { title, .. } => {
                intents.push(ShellIntent::ViewTitleChanged { tab, title });
            },
        }
    }
    if stale_events > 0 {
        debug!("dropped {stale_events} stale view events");
    }
    intents
}
