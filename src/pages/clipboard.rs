/// Clipboard collaborator and toast notifications for "copy to clipboard".
///
/// A failed write never propagates: it becomes a failure toast.
use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    WriteFailed(#[from] std::io::Error),
}

/// Trait for clipboard implementations.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard backed by any writer (stdout for the CLI).
pub struct WriterClipboard<W: Write + Send> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriterClipboard<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> Result<W, ClipboardError> {
        self.inner
            .into_inner()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

impl<W: Write + Send> Clipboard for WriterClipboard<W> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut writer = self
            .inner
            .lock()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        writer.write_all(text.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Failure,
}

/// Transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub duration_ms: u64,
}

/// Write `text` to the clipboard and report the outcome as a toast.
pub fn copy_to_clipboard(clipboard: &dyn Clipboard, text: &str, duration_ms: u64) -> Toast {
    match clipboard.write_text(text) {
        Ok(()) => {
            debug!(bytes = text.len(), "Copied to clipboard");
            Toast {
                kind: ToastKind::Success,
                message: "Copied to clipboard".to_string(),
                duration_ms,
            }
        }
        Err(e) => {
            warn!("Clipboard copy failed: {e}");
            Toast {
                kind: ToastKind::Failure,
                message: "Failed to copy to clipboard".to_string(),
                duration_ms,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("permission denied".to_string()))
        }
    }

    #[test]
    fn test_copy_success() {
        let clipboard = WriterClipboard::new(Vec::new());
        let toast = copy_to_clipboard(&clipboard, "99214 - Office visit", 3000);
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.duration_ms, 3000);

        let written = clipboard.into_inner().unwrap();
        assert_eq!(String::from_utf8(written).unwrap(), "99214 - Office visit\n");
    }

    #[test]
    fn test_copy_failure_is_a_toast() {
        let toast = copy_to_clipboard(&BrokenClipboard, "text", 1500);
        assert_eq!(toast.kind, ToastKind::Failure);
        assert_eq!(toast.message, "Failed to copy to clipboard");
    }
}
