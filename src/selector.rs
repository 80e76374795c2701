//! Revision selection state
//!
//! Three inputs can supply the revision to go to: a free-text expression, a
//! tag and a branch. Whichever of them held focus last wins outright; the
//! candidate is never a blend of two inputs.

use tracing::debug;

use crate::error::Error;
use crate::git::{RefEntry, RevisionResolver};

/// The input that last held focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Source {
    /// Free-text revision expression
    #[default]
    ExpressionField,
    /// Tag combo box
    TagSelector,
    /// Branch combo box
    BranchSelector,
}

impl Source {
    /// All sources in tab order
    pub const ALL: [Self; 3] = [Self::ExpressionField, Self::TagSelector, Self::BranchSelector];

    /// Next source in tab order, wrapping around
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::ExpressionField => Self::TagSelector,
            Self::TagSelector => Self::BranchSelector,
            Self::BranchSelector => Self::ExpressionField,
        }
    }

    /// Previous source in tab order, wrapping around
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::ExpressionField => Self::BranchSelector,
            Self::TagSelector => Self::ExpressionField,
            Self::BranchSelector => Self::TagSelector,
        }
    }

    /// Field label shown in the dialog
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExpressionField => "Commit expression",
            Self::TagSelector => "Tag",
            Self::BranchSelector => "Branch",
        }
    }
}

/// Tracks the focused input and the revision it currently selects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionSelector {
    last_focused: Source,
    candidate: String,
    expression_text: String,
    selected_tag: Option<RefEntry>,
    selected_branch: Option<RefEntry>,
}

impl RevisionSelector {
    /// Fresh state: expression field focused, nothing selected
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The input that last gained focus
    #[must_use]
    pub const fn last_focused(&self) -> Source {
        self.last_focused
    }

    /// The revision string that confirming would hand out
    #[must_use]
    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    /// Raw (untrimmed) text of the expression field
    #[must_use]
    pub fn expression_text(&self) -> &str {
        &self.expression_text
    }

    /// Tag currently matched by the tag selector
    #[must_use]
    pub const fn selected_tag(&self) -> Option<&RefEntry> {
        self.selected_tag.as_ref()
    }

    /// Branch currently matched by the branch selector
    #[must_use]
    pub const fn selected_branch(&self) -> Option<&RefEntry> {
        self.selected_branch.as_ref()
    }

    /// An input gained focus
    pub fn on_focus(&mut self, source: Source) {
        if self.last_focused != source {
            debug!(?source, "Focus changed");
        }
        self.last_focused = source;
        self.recompute();
    }

    /// The expression field's text changed
    pub fn on_text_changed(&mut self, text: &str) {
        text.clone_into(&mut self.expression_text);
        if self.last_focused == Source::ExpressionField {
            self.recompute();
        }
    }

    /// The tag selector's text matched `entry` (or nothing)
    pub fn on_tag_list_updated(&mut self, entry: Option<RefEntry>) {
        self.selected_tag = entry;
        if self.last_focused == Source::TagSelector {
            self.recompute();
        }
    }

    /// The branch selector's text matched `entry` (or nothing)
    pub fn on_branch_list_updated(&mut self, entry: Option<RefEntry>) {
        self.selected_branch = entry;
        if self.last_focused == Source::BranchSelector {
            self.recompute();
        }
    }

    /// The candidate to resolve, handed out verbatim
    #[must_use]
    pub fn confirm(&self) -> String {
        self.candidate.clone()
    }

    fn recompute(&mut self) {
        self.candidate = match self.last_focused {
            Source::ExpressionField => self.expression_text.trim().to_string(),
            Source::TagSelector => self
                .selected_tag
                .as_ref()
                .map_or_else(String::new, |tag| tag.commit_id.clone()),
            Source::BranchSelector => self
                .selected_branch
                .as_ref()
                .map_or_else(String::new, |branch| branch.commit_id.clone()),
        };
    }
}

/// Resolve `expression` to a canonical commit id through `resolver`
///
/// Empty (or all-whitespace) expressions fail without consulting the resolver.
/// Whatever non-empty id the resolver reports is returned unchanged.
///
/// # Errors
///
/// Returns [`Error::RevisionNotFound`] if the expression does not name a commit
pub fn resolve(resolver: &dyn RevisionResolver, expression: &str) -> Result<String, Error> {
    if expression.trim().is_empty() {
        return Err(Error::not_found(expression));
    }

    match resolver.rev_parse(expression) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(Error::not_found(expression)),
    }
}

/// Find the entry whose display name equals `text` exactly
///
/// No trimming, case folding or prefix matching.
#[must_use]
pub fn match_by_display_name(entries: &[RefEntry], text: &str) -> Option<RefEntry> {
    entries.iter().find(|entry| entry.name == text).cloned()
}
