use keyboard_types::{Key, Modifiers, NamedKey};
use tabshell::VERSION;
use tabshell::app::ShellIntent;
use tabshell::desktop::toolbar::tab_strip_entries;
use tabshell::prefs::DEFAULT_HOMEPAGE;
use tabshell::test_utils::{ctrl_char, key_down, settled_shell};
use tabshell::window::{ContentView, ViewId};

#[test]
fn scenarios_binary_smoke_runs() {
    assert!(!VERSION.is_empty());
}

#[test]
fn back_to_home_boundary_scenario() {
    let mut shell = settled_shell(DEFAULT_HOMEPAGE);
    shell.view().stage_title("https://a.example/", "Site A");
    shell.view().stage_title("https://b.example/", "Site B");
    let tab = shell.app.tabs.active_id();

    shell.submit_location("https://a.example/");
    shell.run_until_idle(32);
    shell.submit_location("https://b.example/");
    shell.run_until_idle(32);

    assert_eq!(shell.app.tabs.active().url, "https://b.example/");
    assert_eq!(shell.app.tabs.active().title, "Site B");
    assert_eq!(
        shell.app.history.back_entries(tab),
        &[DEFAULT_HOMEPAGE, "https://a.example/"]
    );

    shell.app.apply_intents([ShellIntent::GoBack]);
    shell.run_until_idle(32);
    assert_eq!(shell.app.tabs.active().url, "https://a.example/");
    assert_eq!(shell.app.tabs.active().title, "Site A");
    assert!(shell.toolbar.can_go_back);
    assert!(shell.toolbar.can_go_forward);

    shell.app.apply_intents([ShellIntent::GoBack]);
    shell.run_until_idle(32);
    assert_eq!(shell.app.tabs.active().url, DEFAULT_HOMEPAGE);
    assert_eq!(shell.toolbar.location, "");
    assert!(!shell.toolbar.can_go_back);
    assert!(shell.toolbar.can_go_forward);

    // Back is refused on the home page even though entries remain queued
    // behind it.
    shell.app.apply_intents([ShellIntent::GoBack]);
    shell.run_until_idle(32);
    assert_eq!(shell.app.tabs.active().url, DEFAULT_HOMEPAGE);
    assert_eq!(
        shell.app.history.forward_entries(tab),
        &["https://b.example/", "https://a.example/"]
    );

    shell.app.apply_intents([ShellIntent::GoForward]);
    shell.run_until_idle(32);
    assert_eq!(shell.app.tabs.active().url, "https://a.example/");
    assert_eq!(shell.app.tabs.active().title, "Site A");
}

#[test]
fn keyboard_tab_management_scenario() {
    let mut shell = settled_shell(DEFAULT_HOMEPAGE);
    shell.view().stage_title("https://docs.example/", "Docs");

    shell.handle_key_events(&[ctrl_char("t")], false);
    shell.run_until_idle(32);
    assert_eq!(shell.app.tabs.len(), 2);
    shell.submit_location("https://docs.example/");
    shell.run_until_idle(32);

    let entries = tab_strip_entries(&shell.app);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].label, "www.google...");
    assert!(!entries[0].active);
    assert_eq!(entries[1].label, "Docs");
    assert!(entries[1].active);

    // Ctrl+Shift+Tab cycles back to the first tab; its content is shown
    // again.
    let shift_cycle = key_down(Key::Named(NamedKey::Tab), Modifiers::CONTROL | Modifiers::SHIFT);
    shell.handle_key_events(&[shift_cycle], false);
    shell.run_until_idle(32);
    assert_eq!(shell.app.tabs.active_id(), shell.app.tabs.tab_id_at(0).unwrap());
    assert_eq!(shell.toolbar.location, "");

    // Ctrl+2 jumps straight to the docs tab; ctrl+W closes it.
    shell.handle_key_events(&[ctrl_char("2")], false);
    shell.run_until_idle(32);
    let docs_tab = shell.app.tabs.active_id();
    assert_eq!(shell.app.tabs.active().url, "https://docs.example/");

    shell.handle_key_events(&[ctrl_char("w")], false);
    shell.run_until_idle(32);
    assert_eq!(shell.app.tabs.len(), 1);
    assert_eq!(shell.app.tabs.active().url, DEFAULT_HOMEPAGE);
    assert!(!shell.app.history.is_registered(docs_tab));

    // While the address field owns the keyboard the same keys do nothing.
    shell.handle_key_events(&[ctrl_char("t")], true);
    assert_eq!(shell.app.tabs.len(), 1);
}

#[test]
fn close_last_tab_replacement_scenario() {
    let mut shell = settled_shell(DEFAULT_HOMEPAGE);
    shell.view().stage_title("https://a.example/", "Site A");
    shell.submit_location("https://a.example/");
    shell.run_until_idle(32);
    let original = shell.app.tabs.active_id();

    shell.handle_key_events(&[ctrl_char("w")], false);
    shell.run_until_idle(32);

    let replacement = shell.app.tabs.active_id();
    assert_ne!(replacement, original);
    assert_eq!(shell.app.tabs.len(), 1);
    assert_eq!(shell.app.tabs.active().url, "");
    assert_eq!(shell.toolbar.location, "");
    assert_eq!(tab_strip_entries(&shell.app)[0].label, "New Tab");
    assert!(!shell.app.history.is_registered(original));
    assert!(shell.app.history.back_entries(replacement).is_empty());

    // The blank replacement navigates like any other tab.
    shell.submit_location("rust history api");
    shell.run_until_idle(32);
    assert_eq!(
        shell.app.tabs.active().url,
        "https://www.google.com/search?q=rust+history+api"
    );
    assert_eq!(shell.app.history.back_entries(replacement), &[""]);
}

#[test]
fn reload_blank_then_restore_scenario() {
    let mut shell = settled_shell(DEFAULT_HOMEPAGE);
    shell.view().stage_title("https://news.example/", "News");
    shell.submit_location("https://news.example/");
    shell.run_until_idle(32);
    let tab = shell.app.tabs.active_id();

    shell.app.apply_intents([ShellIntent::RequestReload]);
    // Clear phase: the url is blanked until the reload delay elapses.
    assert_eq!(shell.app.tabs.active().url, "");
    assert!(shell.app.has_pending_reload(tab));

    shell.run_until_idle(32);
    assert_eq!(shell.app.tabs.active().url, "https://news.example/");
    assert_eq!(shell.app.tabs.active().title, "News");
    assert!(!shell.app.has_pending_reload(tab));
    // A reload is not a navigation: the back stack is untouched.
    assert_eq!(shell.app.history.back_entries(tab), &[DEFAULT_HOMEPAGE]);
}

#[test]
fn stale_and_duplicate_view_events_scenario() {
    let mut shell = settled_shell(DEFAULT_HOMEPAGE);
    let tab = shell.app.tabs.active_id();

    // An event from a view the binding does not route is dropped.
    shell.window().notify_navigated(ViewId::from(99), "https://rogue.example/");
    shell.run_until_idle(32);
    assert_eq!(shell.app.tabs.active().url, DEFAULT_HOMEPAGE);
    assert!(shell.app.history.back_entries(tab).is_empty());

    // Duplicate delivery of one navigation produces one back entry.
    let bound_view = shell.view().id();
    shell.window().notify_navigated(bound_view, "https://a.example/");
    shell.window().notify_navigated(bound_view, "https://a.example/");
    shell.run_until_idle(32);
    assert_eq!(shell.app.tabs.active().url, "https://a.example/");
    assert_eq!(shell.app.history.back_entries(tab), &[DEFAULT_HOMEPAGE]);
}

#[test]
fn bookmark_round_trip_scenario() {
    let mut shell = settled_shell(DEFAULT_HOMEPAGE);
    shell.view().stage_title("https://blog.example/post", "An Unreasonably Long Article Title");
    shell.submit_location("https://blog.example/post");
    shell.run_until_idle(32);

    shell.app.apply_intents([ShellIntent::AddBookmarkForActiveTab]);
    shell.run_until_idle(32);
    assert_eq!(shell.app.bookmarks.len(), 1);
    assert!(shell.app.bookmarks.contains_url("https://blog.example/post"));
    let stored = shell.app.bookmarks.get(0).unwrap();
    assert_eq!(stored.title, "An Unreasonably Long Arti...");
    // A successful add is silent.
    assert!(shell.take_notices().is_empty());

    // Bookmarking the same url again warns instead of duplicating.
    shell.app.apply_intents([ShellIntent::AddBookmarkForActiveTab]);
    shell.run_until_idle(32);
    assert_eq!(shell.app.bookmarks.len(), 1);
    let notices = shell.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "You have already bookmarked this page");

    // Opening the bookmark from another page navigates the active tab.
    shell.app.apply_intents([ShellIntent::GoBack]);
    shell.run_until_idle(32);
    assert_eq!(shell.app.tabs.active().url, DEFAULT_HOMEPAGE);

    shell.app.apply_intents([ShellIntent::OpenBookmark { index: 0 }]);
    shell.run_until_idle(32);
    assert_eq!(shell.app.tabs.active().url, "https://blog.example/post");
    assert_eq!(shell.app.tabs.active().title, "An Unreasonably Long Article Title");
}

#[test]
fn color_history_cap_and_erase_scenario() {
    let mut shell = settled_shell(DEFAULT_HOMEPAGE);
    for hex in ["#FF5733", "#33FF57", "#3357FF", "#F0F0F0", "#101010"] {
        shell.app.apply_intents([ShellIntent::SaveColor {
            hex: hex.to_string(),
        }]);
    }
    shell.run_until_idle(32);

    let colors: Vec<&str> = shell.app.colors.iter().collect();
    assert_eq!(colors, vec!["#101010", "#F0F0F0", "#3357FF", "#33FF57"]);
    let notices = shell.take_notices();
    assert_eq!(notices.len(), 5);
    assert!(notices.iter().all(|notice| notice.message == "Color saved!"));

    assert!(shell.app.colors.shows_erase_control());
    shell.app.apply_intents([ShellIntent::EraseColorHistory]);
    assert!(shell.app.colors.is_empty());
    assert!(!shell.app.colors.shows_erase_control());
}
