/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Contains files specific to the tabshell app for Desktop systems.

pub(crate) mod cli;
mod event_pipeline;
pub mod runner;
pub mod sim_view;
mod status_sync;
pub mod toolbar;
mod view_controller;
