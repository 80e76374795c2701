//! Integration tests for TUI rendering
//!
//! Uses ratatui's `TestBackend` to verify rendering without a real terminal.

#![expect(clippy::unwrap_used, reason = "integration test assertions")]

use std::sync::Arc;
use std::time::Duration;

use crate::common::{BlockingLister, FakeRepo};
use gotocommit::clipboard::NoClipboard;
use gotocommit::config::UnresolvedPolicy;
use gotocommit::{Config, DialogEvent, GoToCommitDialog, RefEntry, RefKind, Source};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn create_test_repo() -> FakeRepo {
    FakeRepo::new(
        vec![
            RefEntry::new(RefKind::Tag, "v1.0", "1111111111aaaa"),
            RefEntry::new(RefKind::Tag, "v2.0", "2222222222bbbb"),
        ],
        vec![RefEntry::new(RefKind::LocalBranch, "main", "3333333333cccc")],
    )
}

fn open_loaded(repo: FakeRepo) -> GoToCommitDialog {
    open_loaded_with(repo, &Config::default())
}

fn open_loaded_with(repo: FakeRepo, config: &Config) -> GoToCommitDialog {
    let repo = Arc::new(repo);
    let mut dialog = GoToCommitDialog::open(repo.clone(), repo, &NoClipboard, config);
    dialog.wait_for_loads(Duration::from_secs(5));
    dialog
}

fn render_to_string(dialog: &GoToCommitDialog, config: &Config) -> String {
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| gotocommit::tui::render(frame, dialog, config))
        .unwrap();

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn test_render_initial_dialog() {
    let dialog = open_loaded(create_test_repo());
    let screen = render_to_string(&dialog, &Config::default());

    assert!(screen.contains("Go to commit"));
    assert!(screen.contains("(nothing selected)"));
    assert!(screen.contains("Revision syntax:"));
    // The lists are only expanded for the focused selector
    assert!(!screen.contains("v2.0"));
}

#[test]
fn test_render_loading_placeholder() {
    let (lister, release, _finished) = BlockingLister::new(Vec::new());
    let dialog = GoToCommitDialog::open(
        Arc::new(lister),
        Arc::new(FakeRepo::default()),
        &NoClipboard,
        &Config::default(),
    );

    let screen = render_to_string(&dialog, &Config::default());
    assert!(screen.contains("Loading..."));
    let _ = release.send(());
}

#[test]
fn test_render_focused_tag_list() {
    let mut dialog = open_loaded(create_test_repo());
    dialog.handle(DialogEvent::Focus(Source::TagSelector));

    let screen = render_to_string(&dialog, &Config::default());
    assert!(screen.contains("v1.0"));
    assert!(screen.contains("v2.0"));
    assert!(screen.contains("1111111111"));
    assert!(!screen.contains("1111111111aaaa"));
}

#[test]
fn test_render_filtered_list_without_matches() {
    let mut dialog = open_loaded(create_test_repo());
    dialog.handle(DialogEvent::Focus(Source::BranchSelector));
    dialog.handle(DialogEvent::Input('x'));

    let screen = render_to_string(&dialog, &Config::default());
    assert!(screen.contains("No matching branches"));
}

#[test]
fn test_render_candidate_and_match_marker() {
    let mut dialog = open_loaded(create_test_repo());
    dialog.handle(DialogEvent::Focus(Source::TagSelector));
    for c in "v2.0".chars() {
        dialog.handle(DialogEvent::Input(c));
    }

    let screen = render_to_string(&dialog, &Config::default());
    assert!(screen.contains("2222222222bbbb"));
    assert!(screen.contains('✓'));
}

#[test]
fn test_render_confirm_error() {
    let config = Config {
        on_unresolved: UnresolvedPolicy::Reprompt,
        ..Config::default()
    };
    let mut dialog = open_loaded_with(create_test_repo(), &config);
    dialog.handle(DialogEvent::Focus(Source::BranchSelector));
    dialog.handle(DialogEvent::Confirm);

    let screen = render_to_string(&dialog, &Config::default());
    assert!(screen.contains("No branch selected"));
}

#[test]
fn test_render_scroll_indicator() {
    let tags = (0..12)
        .map(|i| RefEntry::new(RefKind::Tag, format!("t{i:02}"), format!("{i:040}")))
        .collect();
    let mut dialog = open_loaded(FakeRepo::new(tags, Vec::new()));
    dialog.handle(DialogEvent::Focus(Source::TagSelector));

    let config = Config {
        max_visible_entries: 4,
        ..Config::default()
    };
    let screen = render_to_string(&dialog, &config);
    assert!(screen.contains("t03"));
    assert!(!screen.contains("t04"));
    assert!(screen.contains("↓8 more below"));
}
