/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Session-scoped bookmark list, unique by url.

use crate::tabs::truncate_with_ellipsis;

/// Bookmark titles are cut to this many characters for display.
pub const BOOKMARK_TITLE_MAX_CHARS: usize = 25;
pub const DUPLICATE_BOOKMARK_NOTICE: &str = "You have already bookmarked this page";

#[derive(Clone, Debug, PartialEq)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BookmarkAddOutcome {
    Added,
    /// A bookmark with the same url already exists; the list is unchanged.
    DuplicateUrl,
}

/// Insertion-ordered bookmark collection. Unbounded; lives for the session
/// only.
#[derive(Clone, Debug, Default)]
pub struct BookmarkStore {
    bookmarks: Vec<Bookmark>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bookmark for `url` unless one already exists. The stored
    /// title is truncated to [`BOOKMARK_TITLE_MAX_CHARS`] characters.
    pub fn add(&mut self, title: &str, url: impl Into<String>) -> BookmarkAddOutcome {
        let url = url.into();
        if self.contains_url(&url) {
            return BookmarkAddOutcome::DuplicateUrl;
        }
        self.bookmarks.push(Bookmark {
            title: truncate_with_ellipsis(title, BOOKMARK_TITLE_MAX_CHARS),
            url,
        });
        BookmarkAddOutcome::Added
    }

    /// Remove by list position. Out-of-range is a silent no-op.
    pub fn remove(&mut self, index: usize) -> Option<Bookmark> {
        if index >= self.bookmarks.len() {
            return None;
        }
        Some(self.bookmarks.remove(index))
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.bookmarks.iter().any(|bookmark| bookmark.url == url)
    }

    pub fn get(&self, index: usize) -> Option<&Bookmark> {
        self.bookmarks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.bookmarks.iter()
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}
