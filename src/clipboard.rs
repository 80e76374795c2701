//! Clipboard access for pre-filling the expression field

use tracing::debug;

use crate::git::RevisionResolver;

/// Something that can hand out the current clipboard text
pub trait ClipboardSource {
    /// Current clipboard text, or `None` if unavailable or not text
    fn read_text(&self) -> Option<String>;
}

/// The desktop clipboard, via `arboard`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardSource for SystemClipboard {
    fn read_text(&self) -> Option<String> {
        let text = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text());
        match text {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(error = %e, "Clipboard unavailable");
                None
            }
        }
    }
}

/// A clipboard that is always empty
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl ClipboardSource for NoClipboard {
    fn read_text(&self) -> Option<String> {
        None
    }
}

/// Clipboard text to pre-fill the expression field with, if it names a commit
///
/// The text is trimmed first. Anything that is empty or fails to resolve is
/// ignored silently.
#[must_use]
pub fn prefill_expression(
    clipboard: &dyn ClipboardSource,
    resolver: &dyn RevisionResolver,
) -> Option<String> {
    let text = clipboard.read_text()?;
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if resolver.rev_parse(text).is_some_and(|id| !id.is_empty()) {
        debug!(expression = text, "Pre-filling expression from clipboard");
        Some(text.to_string())
    } else {
        None
    }
}
