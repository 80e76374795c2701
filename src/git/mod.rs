//! Git access for the revision picker
//!
//! The picker only needs two capabilities from a repository: listing the refs
//! a user can pick from, and resolving an arbitrary revision expression to a
//! commit. Both are traits so the dialog can be driven by fakes in tests.

mod refs;
mod revparse;

pub use refs::Manager as RefManager;
pub use revparse::resolve_commit;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use git2::Repository;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What kind of ref an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    /// `refs/tags/*`
    Tag,
    /// `refs/heads/*`
    LocalBranch,
    /// `refs/remotes/*`
    RemoteBranch,
}

/// A named pointer to a commit, as shown in the tag and branch selectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefEntry {
    /// Display name, unique within its list (e.g. "v1.0", "main", "origin/main")
    pub name: String,
    /// Full commit id the ref peels to
    pub commit_id: String,
    /// Full reference name (e.g. "refs/tags/v1.0")
    pub full_name: String,
    /// Tag, local branch or remote branch
    pub kind: RefKind,
    /// Committer time of the target commit
    pub commit_time: Option<DateTime<Utc>>,
}

impl RefEntry {
    /// Create an entry with only a display name and commit id
    ///
    /// The full name is derived from the kind; no commit time is recorded.
    #[must_use]
    pub fn new(kind: RefKind, name: impl Into<String>, commit_id: impl Into<String>) -> Self {
        let name = name.into();
        let full_name = match kind {
            RefKind::Tag => format!("refs/tags/{name}"),
            RefKind::LocalBranch => format!("refs/heads/{name}"),
            RefKind::RemoteBranch => format!("refs/remotes/{name}"),
        };
        Self {
            name,
            commit_id: commit_id.into(),
            full_name,
            kind,
            commit_time: None,
        }
    }

    /// Abbreviated commit id for display
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.commit_id.get(..10).unwrap_or(&self.commit_id)
    }

    /// Whether this is a remote-tracking branch
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self.kind, RefKind::RemoteBranch)
    }
}

/// Lists the refs a user can choose from
pub trait RefLister: Send + Sync {
    /// All tags, newest target commit first
    ///
    /// # Errors
    ///
    /// Returns an error if the tag refs cannot be read
    fn list_tags(&self) -> Result<Vec<RefEntry>>;

    /// All local branches followed by remote-tracking branches
    ///
    /// # Errors
    ///
    /// Returns an error if the branch refs cannot be read
    fn list_branches(&self) -> Result<Vec<RefEntry>>;
}

/// Maps revision expressions to canonical commit ids
///
/// This is the single source of truth for whether an expression is valid.
pub trait RevisionResolver: Send + Sync {
    /// Resolve `expression` to a full commit id, or `None` if it names no commit
    fn rev_parse(&self, expression: &str) -> Option<String>;
}

/// Open a git repository at (or above) the given path
///
/// # Errors
///
/// Returns an error if the path is not inside a git repository
pub fn open_repository(path: &Path) -> Result<Repository> {
    Repository::discover(path)
        .map_err(crate::Error::from)
        .with_context(|| format!("Failed to open git repository at {}", path.display()))
}

/// A repository addressed by path
///
/// Every call opens its own `git2::Repository`, so a single value can be
/// shared between the dialog thread and the background loaders.
#[derive(Debug, Clone)]
pub struct GitRepository {
    root: PathBuf,
}

impl GitRepository {
    /// Discover the repository containing `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not inside a git repository
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = open_repository(path)?;
        let root = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        Ok(Self { root })
    }

    /// Working directory (or git dir, for bare repositories)
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn open(&self) -> Result<Repository> {
        open_repository(&self.root)
    }
}

impl RefLister for GitRepository {
    fn list_tags(&self) -> Result<Vec<RefEntry>> {
        let repo = self.open()?;
        RefManager::new(&repo).tags()
    }

    fn list_branches(&self) -> Result<Vec<RefEntry>> {
        let repo = self.open()?;
        RefManager::new(&repo).branches()
    }
}

impl RevisionResolver for GitRepository {
    fn rev_parse(&self, expression: &str) -> Option<String> {
        let repo = self.open().ok()?;
        resolve_commit(&repo, expression)
    }
}
