//! Tag and branch listing for the selectors

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use git2::{BranchType, Reference, Repository};
use tracing::debug;

use super::{RefEntry, RefKind};

/// Lists tags and branches of a repository as [`RefEntry`] values
pub struct Manager<'a> {
    repo: &'a Repository,
}

impl std::fmt::Debug for Manager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager").finish_non_exhaustive()
    }
}

impl<'a> Manager<'a> {
    /// Create a new ref manager for the given repository
    #[must_use]
    pub const fn new(repo: &'a Repository) -> Self {
        Self { repo }
    }

    /// List all tags that point (directly or through an annotated tag) at a commit
    ///
    /// Sorted by commit date, newest first; ties are ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag refs cannot be listed
    pub fn tags(&self) -> Result<Vec<RefEntry>> {
        let references = self
            .repo
            .references_glob("refs/tags/*")
            .context("Failed to list tags")?;

        let mut tags = Vec::new();
        for reference in references {
            let reference = reference.context("Failed to read tag")?;
            let Some(full_name) = reference.name() else {
                continue;
            };
            let name = full_name.trim_start_matches("refs/tags/").to_string();
            let full_name = full_name.to_string();
            if let Some(entry) = Self::entry_for(&reference, RefKind::Tag, name, full_name) {
                tags.push(entry);
            }
        }

        tags.sort_by(|a, b| {
            b.commit_time
                .cmp(&a.commit_time)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(tags)
    }

    /// List local branches followed by remote-tracking branches
    ///
    /// Each group is sorted by name. Symbolic `<remote>/HEAD` refs are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the branches cannot be listed
    pub fn branches(&self) -> Result<Vec<RefEntry>> {
        let mut local = self.branches_of(BranchType::Local)?;
        let remote = self.branches_of(BranchType::Remote)?;
        local.extend(remote);
        Ok(local)
    }

    fn branches_of(&self, branch_type: BranchType) -> Result<Vec<RefEntry>> {
        let (kind, prefix) = match branch_type {
            BranchType::Local => (RefKind::LocalBranch, "refs/heads/"),
            BranchType::Remote => (RefKind::RemoteBranch, "refs/remotes/"),
        };

        let branches = self
            .repo
            .branches(Some(branch_type))
            .context("Failed to list branches")?;

        let mut entries = Vec::new();
        for branch_result in branches {
            let (branch, _) = branch_result.context("Failed to read branch")?;
            let Some(name) = branch.name().context("Branch name is not valid UTF-8")? else {
                continue;
            };
            if kind == RefKind::RemoteBranch && name.ends_with("/HEAD") {
                continue;
            }
            let name = name.to_string();
            let full_name = format!("{prefix}{name}");
            if let Some(entry) = Self::entry_for(branch.get(), kind, name, full_name) {
                entries.push(entry);
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn entry_for(
        reference: &Reference<'_>,
        kind: RefKind,
        name: String,
        full_name: String,
    ) -> Option<RefEntry> {
        let commit = match reference.peel_to_commit() {
            Ok(commit) => commit,
            Err(e) => {
                debug!(reference = %full_name, error = %e, "Skipping ref that does not point at a commit");
                return None;
            }
        };

        Some(RefEntry {
            name,
            commit_id: commit.id().to_string(),
            full_name,
            kind,
            commit_time: DateTime::<Utc>::from_timestamp(commit.time().seconds(), 0),
        })
    }
}
