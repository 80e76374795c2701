//! Revision expression resolution

use git2::Repository;
use tracing::debug;

/// Resolve a revision expression to the full id of the commit it names
///
/// Accepts anything `git rev-parse` does: full or abbreviated hashes, ref
/// names, and relative forms such as `HEAD~2` or `main^2`. Tags are peeled to
/// their commit. Returns `None` for empty input, unknown or ambiguous names,
/// and objects that are not commits.
#[must_use]
pub fn resolve_commit(repo: &Repository, expression: &str) -> Option<String> {
    if expression.is_empty() {
        return None;
    }

    let object = match repo.revparse_single(expression) {
        Ok(object) => object,
        Err(e) => {
            debug!(expression, error = %e, "Revision did not parse");
            return None;
        }
    };

    match object.peel_to_commit() {
        Ok(commit) => Some(commit.id().to_string()),
        Err(e) => {
            debug!(expression, error = %e, "Revision does not name a commit");
            None
        }
    }
}
