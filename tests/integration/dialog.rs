//! Dialog session scenarios
//!
//! Drives `GoToCommitDialog` through `DialogEvent`s against in-memory refs and
//! against a real repository.

use std::sync::Arc;
use std::time::Duration;

use crate::common::{BlockingLister, FakeRepo, TestFixture};
use gotocommit::clipboard::{ClipboardSource, NoClipboard};
use gotocommit::config::UnresolvedPolicy;
use gotocommit::{
    Config, DialogEvent, DialogOutcome, GitRepository, GoToCommitDialog, RefEntry, RefKind,
    Source,
};
use pretty_assertions::assert_eq;

const WAIT: Duration = Duration::from_secs(5);

struct FixedClipboard(&'static str);

impl ClipboardSource for FixedClipboard {
    fn read_text(&self) -> Option<String> {
        Some(self.0.to_string())
    }
}

fn tags() -> Vec<RefEntry> {
    vec![
        RefEntry::new(RefKind::Tag, "v1.0", "sha1"),
        RefEntry::new(RefKind::Tag, "v2.0", "sha2"),
    ]
}

fn branches() -> Vec<RefEntry> {
    vec![
        RefEntry::new(RefKind::LocalBranch, "main", "sha-main"),
        RefEntry::new(RefKind::LocalBranch, "dev", "sha-dev"),
    ]
}

fn reprompt() -> Config {
    Config {
        on_unresolved: UnresolvedPolicy::Reprompt,
        ..Config::default()
    }
}

fn open(repo: FakeRepo) -> GoToCommitDialog {
    open_with(repo, &Config::default())
}

fn open_with(repo: FakeRepo, config: &Config) -> GoToCommitDialog {
    let repo = Arc::new(repo);
    let mut dialog = GoToCommitDialog::open(repo.clone(), repo, &NoClipboard, config);
    dialog.wait_for_loads(WAIT);
    dialog
}

fn type_text(dialog: &mut GoToCommitDialog, text: &str) {
    for c in text.chars() {
        assert_eq!(dialog.handle(DialogEvent::Input(c)), None);
    }
}

#[test]
fn test_typed_expression_resolves() {
    let repo = FakeRepo::new(tags(), branches()).with_revision("abc123", "abc123-full");
    let mut dialog = open(repo);

    type_text(&mut dialog, "abc123");
    assert_eq!(dialog.candidate(), "abc123");
    assert_eq!(
        dialog.handle(DialogEvent::Confirm),
        Some(DialogOutcome::Selected("abc123-full".to_string()))
    );
    assert!(dialog.is_closed());
}

#[test]
fn test_typed_expression_that_does_not_resolve_reprompts() {
    let mut dialog = open_with(FakeRepo::new(tags(), branches()), &reprompt());

    type_text(&mut dialog, "abc123");
    assert_eq!(dialog.handle(DialogEvent::Confirm), None);
    assert!(!dialog.is_closed());
    assert!(dialog.error().is_some());
}

#[test]
fn test_typing_tag_name_selects_tag() {
    let mut dialog = open(FakeRepo::new(tags(), branches()).resolving_ref_ids());

    dialog.handle(DialogEvent::Focus(Source::TagSelector));
    type_text(&mut dialog, "v2.0");

    assert_eq!(
        dialog.selector().selected_tag(),
        Some(&RefEntry::new(RefKind::Tag, "v2.0", "sha2"))
    );
    assert_eq!(dialog.candidate(), "sha2");
    assert_eq!(
        dialog.handle(DialogEvent::Confirm),
        Some(DialogOutcome::Selected("sha2".to_string()))
    );
}

#[test]
fn test_partial_tag_name_selects_nothing() {
    let mut dialog = open(FakeRepo::new(tags(), branches()));

    dialog.handle(DialogEvent::Focus(Source::TagSelector));
    type_text(&mut dialog, "v2.");
    assert_eq!(dialog.selector().selected_tag(), None);
    assert_eq!(dialog.candidate(), "");
}

#[test]
fn test_branch_selector_without_choice_fails_to_confirm() {
    let mut dialog = open_with(
        FakeRepo::new(tags(), branches()).resolving_ref_ids(),
        &reprompt(),
    );
    type_text(&mut dialog, "abc");

    dialog.handle(DialogEvent::Focus(Source::BranchSelector));
    assert_eq!(dialog.candidate(), "");
    assert_eq!(dialog.handle(DialogEvent::Confirm), None);
    assert_eq!(dialog.error(), Some("No branch selected"));
}

#[test]
fn test_candidate_never_comes_from_unfocused_source() {
    let mut dialog = open(FakeRepo::new(tags(), branches()));

    type_text(&mut dialog, "HEAD~1");
    dialog.handle(DialogEvent::Focus(Source::TagSelector));
    type_text(&mut dialog, "v1.0");
    dialog.handle(DialogEvent::Focus(Source::BranchSelector));
    type_text(&mut dialog, "dev");
    assert_eq!(dialog.candidate(), "sha-dev");

    dialog.handle(DialogEvent::Focus(Source::TagSelector));
    assert_eq!(dialog.candidate(), "sha1");

    dialog.handle(DialogEvent::Focus(Source::ExpressionField));
    assert_eq!(dialog.candidate(), "HEAD~1");
}

#[test]
fn test_committing_highlighted_entry_confirms() {
    let mut dialog = open(FakeRepo::new(tags(), branches()).resolving_ref_ids());

    dialog.handle(DialogEvent::Focus(Source::BranchSelector));
    dialog.handle(DialogEvent::HighlightNext);
    dialog.handle(DialogEvent::HighlightNext);

    let outcome = dialog.handle(DialogEvent::CommitHighlighted);
    assert_eq!(outcome, Some(DialogOutcome::Selected("sha-dev".to_string())));
    assert_eq!(dialog.branches().text(), "dev");
}

#[test]
fn test_commit_without_highlight_is_ignored() {
    let mut dialog = open(FakeRepo::new(tags(), branches()).resolving_ref_ids());

    dialog.handle(DialogEvent::Focus(Source::TagSelector));
    assert_eq!(dialog.handle(DialogEvent::CommitHighlighted), None);
    assert!(!dialog.is_closed());
}

#[test]
fn test_cancel() {
    let mut dialog = open(FakeRepo::new(tags(), branches()));
    let outcome = dialog.handle(DialogEvent::Cancel);
    assert_eq!(outcome.map(DialogOutcome::into_parts), Some((false, None)));
    assert!(dialog.is_closed());
}

#[test]
fn test_text_typed_before_load_matches_once_loaded() {
    let (lister, release, _finished) = BlockingLister::new(tags());
    let resolver = Arc::new(FakeRepo::default());
    let mut dialog =
        GoToCommitDialog::open(Arc::new(lister), resolver, &NoClipboard, &Config::default());

    dialog.handle(DialogEvent::Focus(Source::TagSelector));
    type_text(&mut dialog, "v1.0");
    assert!(dialog.tags().is_loading());
    assert_eq!(dialog.candidate(), "");

    let _ = release.send(());
    dialog.wait_for_loads(WAIT);
    assert!(!dialog.tags().is_loading());
    assert_eq!(dialog.candidate(), "sha1");
}

#[test]
fn test_close_during_pending_load_discards_result() {
    let (lister, release, finished) = BlockingLister::new(tags());
    let resolver = Arc::new(FakeRepo::default());
    let mut dialog =
        GoToCommitDialog::open(Arc::new(lister), resolver, &NoClipboard, &Config::default());
    dialog.handle(DialogEvent::Focus(Source::TagSelector));
    type_text(&mut dialog, "v2.0");

    dialog.close();
    let _ = release.send(());
    let _ = finished.recv_timeout(WAIT);

    assert!(!dialog.poll_loaders());
    dialog.wait_for_loads(WAIT);
    assert!(dialog.tags().is_loading());
    assert_eq!(dialog.selector().selected_tag(), None);
    assert_eq!(dialog.candidate(), "");
}

#[test]
fn test_failed_tag_load_leaves_other_paths_working() {
    let repo = FakeRepo {
        fail_tags: true,
        ..FakeRepo::new(tags(), branches()).resolving_ref_ids()
    };
    let mut dialog = open(repo);

    assert_eq!(dialog.tags().entries().map(<[RefEntry]>::len), Some(0));
    assert!(dialog.tags().load_error().is_some());

    dialog.handle(DialogEvent::Focus(Source::BranchSelector));
    type_text(&mut dialog, "main");
    assert_eq!(
        dialog.handle(DialogEvent::Confirm),
        Some(DialogOutcome::Selected("sha-main".to_string()))
    );
}

#[test]
fn test_clipboard_prefill_is_replaced_by_typing() {
    let repo = Arc::new(FakeRepo::default().with_revision("HEAD~3", "sha-h3"));
    let mut dialog = GoToCommitDialog::open(
        repo.clone(),
        repo,
        &FixedClipboard(" HEAD~3\n"),
        &Config::default(),
    );

    assert_eq!(dialog.expression(), "HEAD~3");
    assert!(dialog.expression_selected());
    assert_eq!(dialog.candidate(), "HEAD~3");

    dialog.handle(DialogEvent::Input('x'));
    assert_eq!(dialog.expression(), "x");
    assert!(!dialog.expression_selected());
}

#[test]
fn test_clipboard_prefill_skips_unresolvable_text() {
    let repo = Arc::new(FakeRepo::default());
    let dialog = GoToCommitDialog::open(
        repo.clone(),
        repo,
        &FixedClipboard("not a revision"),
        &Config::default(),
    );
    assert_eq!(dialog.expression(), "");
}

#[test]
fn test_clipboard_prefill_can_be_disabled() {
    let repo = Arc::new(FakeRepo::default().with_revision("HEAD", "sha-head"));
    let config = Config {
        prefill_from_clipboard: false,
        ..Config::default()
    };
    let dialog = GoToCommitDialog::open(repo.clone(), repo, &FixedClipboard("HEAD"), &config);
    assert_eq!(dialog.expression(), "");
}

#[test]
fn test_unresolved_confirm_closes_without_revision() {
    let mut dialog = open(FakeRepo::new(tags(), branches()));
    type_text(&mut dialog, "nope");

    let outcome = dialog.handle(DialogEvent::Confirm);
    assert_eq!(
        outcome,
        Some(DialogOutcome::Unresolved {
            candidate: "nope".to_string()
        })
    );
    assert!(dialog.is_closed());
    assert_eq!(outcome.map(DialogOutcome::into_parts), Some((true, None)));
}

#[test]
fn test_empty_tag_selection_closes_without_revision() {
    let mut dialog = open(FakeRepo::new(tags(), branches()));
    dialog.handle(DialogEvent::Focus(Source::TagSelector));

    let outcome = dialog.handle(DialogEvent::Confirm);
    assert_eq!(
        outcome,
        Some(DialogOutcome::Unresolved {
            candidate: String::new()
        })
    );
}

#[test]
fn test_real_repository_session() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let repo = Arc::new(GitRepository::discover(&fixture.repo_path)?);
    let mut dialog = GoToCommitDialog::open(repo.clone(), repo, &NoClipboard, &Config::default());
    dialog.wait_for_loads(WAIT);

    let tag_names: Vec<_> = dialog
        .tags()
        .entries()
        .unwrap_or_default()
        .iter()
        .map(|t| t.name.clone())
        .collect();
    assert_eq!(tag_names, vec!["v2.0".to_string(), "v1.0".to_string()]);

    dialog.handle(DialogEvent::Focus(Source::TagSelector));
    type_text(&mut dialog, "v2.0");
    assert_eq!(dialog.candidate(), fixture.second.to_string());

    dialog.handle(DialogEvent::Focus(Source::ExpressionField));
    type_text(&mut dialog, "HEAD~2");
    assert_eq!(
        dialog.handle(DialogEvent::Confirm),
        Some(DialogOutcome::Selected(fixture.first.to_string()))
    );
    Ok(())
}

#[test]
fn test_real_repository_branch_commit() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    let repo = Arc::new(GitRepository::discover(&fixture.repo_path)?);
    let mut dialog = GoToCommitDialog::open(repo.clone(), repo, &NoClipboard, &Config::default());
    dialog.wait_for_loads(WAIT);

    dialog.handle(DialogEvent::Focus(Source::BranchSelector));
    type_text(&mut dialog, "master");
    dialog.handle(DialogEvent::HighlightNext);
    // "master" and "origin/master" both contain the text; the local branch sorts first
    let outcome = dialog.handle(DialogEvent::CommitHighlighted);
    assert_eq!(outcome, Some(DialogOutcome::Selected(fixture.third.to_string())));
    Ok(())
}
