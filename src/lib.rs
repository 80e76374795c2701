//! gotocommit - pick a commit by revision expression, tag, or branch
//!
//! A small modal picker: type anything `git rev-parse` understands, or choose
//! a tag or branch, and get back the full id of the commit it names.

pub mod clipboard;
pub mod config;
pub mod dialog;
pub mod error;
pub mod git;
pub mod loader;
pub mod paths;
pub mod selector;
pub mod tui;

pub use config::Config;
pub use dialog::{DialogEvent, DialogOutcome, GoToCommitDialog};
pub use error::Error;
pub use git::{GitRepository, RefEntry, RefKind, RefLister, RevisionResolver};
pub use selector::{RevisionSelector, Source};
