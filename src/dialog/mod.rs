//! The "go to commit" dialog session
//!
//! [`GoToCommitDialog`] owns everything that lives for one opening of the
//! dialog: the [`RevisionSelector`], the text of the three inputs, and the two
//! background loaders for the tag and branch lists. It is driven entirely by
//! [`DialogEvent`] messages plus periodic [`GoToCommitDialog::poll_loaders`]
//! calls, all on the thread that owns it.

mod combo;
mod event;

pub use combo::RefCombo;
pub use event::DialogEvent;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::clipboard::{ClipboardSource, prefill_expression};
use crate::config::{Config, UnresolvedPolicy};
use crate::error::Error;
use crate::git::{RefEntry, RefLister, RevisionResolver};
use crate::loader::{LoadState, Loader};
use crate::selector::{self, RevisionSelector, Source};

/// How a dialog session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Confirmed, and the candidate resolved to this commit id
    Selected(String),
    /// Confirmed, but the candidate did not resolve
    Unresolved {
        /// The candidate that failed to resolve
        candidate: String,
    },
    /// Cancelled by the user
    Cancelled,
}

impl DialogOutcome {
    /// `(confirmed, resolved id)`: the dialog's outward result
    #[must_use]
    pub fn into_parts(self) -> (bool, Option<String>) {
        match self {
            Self::Selected(id) => (true, Some(id)),
            Self::Unresolved { .. } => (true, None),
            Self::Cancelled => (false, None),
        }
    }

    /// The resolved commit id, if any
    #[must_use]
    pub fn revision(&self) -> Option<&str> {
        match self {
            Self::Selected(id) => Some(id),
            Self::Unresolved { .. } | Self::Cancelled => None,
        }
    }
}

/// One open "go to commit" dialog
pub struct GoToCommitDialog {
    selector: RevisionSelector,
    focus: Source,
    expression: String,
    replace_expression_on_input: bool,
    tags: RefCombo,
    branches: RefCombo,
    tag_loader: Option<Loader<Vec<RefEntry>>>,
    branch_loader: Option<Loader<Vec<RefEntry>>>,
    resolver: Arc<dyn RevisionResolver>,
    on_unresolved: UnresolvedPolicy,
    show_remote_branches: bool,
    error: Option<String>,
    closed: bool,
}

impl std::fmt::Debug for GoToCommitDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoToCommitDialog")
            .field("focus", &self.focus)
            .field("candidate", &self.selector.candidate())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl GoToCommitDialog {
    /// Open a dialog session
    ///
    /// Starts loading tags and branches in the background and, if enabled,
    /// pre-fills the expression field from the clipboard.
    pub fn open(
        lister: Arc<dyn RefLister>,
        resolver: Arc<dyn RevisionResolver>,
        clipboard: &dyn ClipboardSource,
        config: &Config,
    ) -> Self {
        let tag_lister = Arc::clone(&lister);
        let tag_loader = Loader::spawn("tags", move || tag_lister.list_tags());
        let branch_loader = Loader::spawn("branches", move || lister.list_branches());

        let mut dialog = Self {
            selector: RevisionSelector::new(),
            focus: Source::ExpressionField,
            expression: String::new(),
            replace_expression_on_input: false,
            tags: RefCombo::new(),
            branches: RefCombo::new(),
            tag_loader: Some(tag_loader),
            branch_loader: Some(branch_loader),
            resolver,
            on_unresolved: config.on_unresolved,
            show_remote_branches: config.show_remote_branches,
            error: None,
            closed: false,
        };
        dialog.selector.on_focus(Source::ExpressionField);

        if config.prefill_from_clipboard
            && let Some(text) = prefill_expression(clipboard, dialog.resolver.as_ref())
        {
            dialog.set_expression(text);
            dialog.replace_expression_on_input = true;
        }

        debug!("Dialog opened");
        dialog
    }

    /// The input that currently has focus
    #[must_use]
    pub const fn focus(&self) -> Source {
        self.focus
    }

    /// Text of the expression field
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Whether the expression field is "selected": typing replaces it
    #[must_use]
    pub const fn expression_selected(&self) -> bool {
        self.replace_expression_on_input
    }

    /// The tag selector
    #[must_use]
    pub const fn tags(&self) -> &RefCombo {
        &self.tags
    }

    /// The branch selector
    #[must_use]
    pub const fn branches(&self) -> &RefCombo {
        &self.branches
    }

    /// The selector for `source`, if it is a list
    #[must_use]
    pub const fn combo(&self, source: Source) -> Option<&RefCombo> {
        match source {
            Source::ExpressionField => None,
            Source::TagSelector => Some(&self.tags),
            Source::BranchSelector => Some(&self.branches),
        }
    }

    /// The revision that confirming would try to resolve
    #[must_use]
    pub fn candidate(&self) -> &str {
        self.selector.candidate()
    }

    /// Selection state
    #[must_use]
    pub const fn selector(&self) -> &RevisionSelector {
        &self.selector
    }

    /// Inline error from the last failed confirm
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the session is over
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether either list is still loading
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.tag_loader.is_some() || self.branch_loader.is_some()
    }

    /// Apply one event; returns the outcome if the dialog closed
    pub fn handle(&mut self, event: DialogEvent) -> Option<DialogOutcome> {
        if self.closed {
            return None;
        }

        match event {
            DialogEvent::Focus(source) => self.set_focus(source),
            DialogEvent::FocusNext => self.set_focus(self.focus.next()),
            DialogEvent::FocusPrev => self.set_focus(self.focus.prev()),
            DialogEvent::Input(c) => self.input(c),
            DialogEvent::Backspace => self.backspace(),
            DialogEvent::ClearField => self.clear_field(),
            DialogEvent::HighlightNext => {
                if let Some(combo) = self.focused_combo_mut() {
                    combo.highlight_next();
                }
            }
            DialogEvent::HighlightPrev => {
                if let Some(combo) = self.focused_combo_mut() {
                    combo.highlight_prev();
                }
            }
            DialogEvent::CommitHighlighted => return self.commit_highlighted(),
            DialogEvent::Confirm => return self.confirm(),
            DialogEvent::Cancel => {
                debug!("Dialog cancelled");
                self.close();
                return Some(DialogOutcome::Cancelled);
            }
        }
        None
    }

    /// Resolve the current candidate and close on success
    ///
    /// Every confirm trigger (button, Enter, committing a list entry) ends up
    /// here. On failure the configured [`UnresolvedPolicy`] decides between
    /// staying open with an inline error and closing without a revision.
    pub fn confirm(&mut self) -> Option<DialogOutcome> {
        if self.closed {
            return None;
        }

        let candidate = self.selector.confirm();
        match selector::resolve(self.resolver.as_ref(), &candidate) {
            Ok(id) => {
                info!(candidate = %candidate, id = %id, "Revision selected");
                self.close();
                Some(DialogOutcome::Selected(id))
            }
            Err(e) => match self.on_unresolved {
                UnresolvedPolicy::Reprompt => {
                    debug!(error = %e, "Confirm rejected");
                    self.error = Some(if candidate.is_empty() {
                        format!("No {} selected", self.describe_focus())
                    } else {
                        e.to_string()
                    });
                    None
                }
                UnresolvedPolicy::Close => {
                    debug!(error = %e, "Closing without a revision");
                    self.close();
                    Some(DialogOutcome::Unresolved { candidate })
                }
            },
        }
    }

    /// Apply any finished background loads
    ///
    /// Returns whether anything changed. After [`GoToCommitDialog::close`]
    /// this never mutates state.
    pub fn poll_loaders(&mut self) -> bool {
        if self.closed {
            return false;
        }

        let mut changed = false;
        if let Some(state) = self.tag_loader.as_mut().map(Loader::try_take) {
            changed |= self.apply_load(Source::TagSelector, state);
        }
        if let Some(state) = self.branch_loader.as_mut().map(Loader::try_take) {
            changed |= self.apply_load(Source::BranchSelector, state);
        }
        changed
    }

    /// Block until both loads finish (or `timeout` passes for each), then apply them
    pub fn wait_for_loads(&mut self, timeout: Duration) {
        if self.closed {
            return;
        }
        if let Some(state) = self.tag_loader.as_mut().map(|l| l.wait(timeout)) {
            self.apply_load(Source::TagSelector, state);
        }
        if let Some(state) = self.branch_loader.as_mut().map(|l| l.wait(timeout)) {
            self.apply_load(Source::BranchSelector, state);
        }
    }

    /// End the session, detaching any loads still in flight
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        for loader in [self.tag_loader.take(), self.branch_loader.take()]
            .into_iter()
            .flatten()
        {
            loader.dispose();
            debug!(error = %Error::DisposedDuringLoad { what: loader.what() }, "Load abandoned");
        }
        debug!("Dialog closed");
    }

    fn describe_focus(&self) -> &'static str {
        match self.focus {
            Source::ExpressionField => "revision",
            Source::TagSelector => "tag",
            Source::BranchSelector => "branch",
        }
    }

    fn set_focus(&mut self, source: Source) {
        self.focus = source;
        self.error = None;
        self.selector.on_focus(source);
    }

    fn focused_combo_mut(&mut self) -> Option<&mut RefCombo> {
        match self.focus {
            Source::ExpressionField => None,
            Source::TagSelector => Some(&mut self.tags),
            Source::BranchSelector => Some(&mut self.branches),
        }
    }

    fn set_expression(&mut self, text: String) {
        self.expression = text;
        self.replace_expression_on_input = false;
        self.selector.on_text_changed(&self.expression);
    }

    fn input(&mut self, c: char) {
        self.error = None;
        if self.focus == Source::ExpressionField {
            let mut text = if self.replace_expression_on_input {
                String::new()
            } else {
                std::mem::take(&mut self.expression)
            };
            text.push(c);
            self.set_expression(text);
        } else if let Some(combo) = self.focused_combo_mut() {
            combo.push_char(c);
            self.rematch(self.focus);
        }
    }

    fn backspace(&mut self) {
        self.error = None;
        if self.focus == Source::ExpressionField {
            let mut text = if self.replace_expression_on_input {
                String::new()
            } else {
                std::mem::take(&mut self.expression)
            };
            text.pop();
            self.set_expression(text);
        } else if let Some(combo) = self.focused_combo_mut() {
            combo.backspace();
            self.rematch(self.focus);
        }
    }

    fn clear_field(&mut self) {
        self.error = None;
        if self.focus == Source::ExpressionField {
            self.set_expression(String::new());
        } else if let Some(combo) = self.focused_combo_mut() {
            combo.set_text(String::new());
            self.rematch(self.focus);
        }
    }

    fn commit_highlighted(&mut self) -> Option<DialogOutcome> {
        let source = self.focus;
        let entry = self
            .combo(source)
            .and_then(RefCombo::highlighted_entry)
            .cloned()?;

        debug!(?source, name = %entry.name, "List entry committed");
        if let Some(combo) = self.focused_combo_mut() {
            combo.set_text(entry.name.clone());
        }
        match source {
            Source::TagSelector => self.selector.on_tag_list_updated(Some(entry)),
            Source::BranchSelector => self.selector.on_branch_list_updated(Some(entry)),
            Source::ExpressionField => {}
        }
        self.confirm()
    }

    /// Re-run the exact display-name match for a selector against its loaded list
    fn rematch(&mut self, source: Source) {
        let Some(combo) = self.combo(source) else {
            return;
        };
        // Matching waits for the list; the text is re-matched once it loads
        if combo.is_loading() {
            return;
        }
        let matched = combo.exact_match();

        match source {
            Source::TagSelector => self.selector.on_tag_list_updated(matched),
            Source::BranchSelector => self.selector.on_branch_list_updated(matched),
            Source::ExpressionField => {}
        }
    }

    fn apply_load(&mut self, source: Source, state: LoadState<Vec<RefEntry>>) -> bool {
        let changed = match state {
            LoadState::Pending => return false,
            LoadState::Ready(mut entries) => {
                if source == Source::BranchSelector && !self.show_remote_branches {
                    entries.retain(|entry| !entry.is_remote());
                }
                debug!(?source, count = entries.len(), "List loaded");
                if let Some(combo) = self.combo_mut(source) {
                    combo.load(entries);
                }
                self.rematch(source);
                true
            }
            LoadState::Failed(e) => {
                warn!(?source, error = %e, "List load failed, showing it empty");
                if let Some(combo) = self.combo_mut(source) {
                    combo.fail(e.to_string());
                }
                self.rematch(source);
                true
            }
            LoadState::Consumed | LoadState::Disposed => false,
        };

        match source {
            Source::TagSelector => self.tag_loader = None,
            Source::BranchSelector => self.branch_loader = None,
            Source::ExpressionField => {}
        }
        changed
    }

    const fn combo_mut(&mut self, source: Source) -> Option<&mut RefCombo> {
        match source {
            Source::ExpressionField => None,
            Source::TagSelector => Some(&mut self.tags),
            Source::BranchSelector => Some(&mut self.branches),
        }
    }
}
