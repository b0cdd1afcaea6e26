//! Clipboard access for the share action
//!
//! The system clipboard comes from `arboard`; a fresh handle is opened for
//! every copy so nothing is held between shares.

use anyhow::{Context, Result};

/// Somewhere a shared link can be written
pub trait Clipboard {
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard
///
/// Fails on headless Linux (no display server) or when access is denied.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
        clipboard
            .set_text(text)
            .context("Failed to set clipboard text")?;
        Ok(())
    }
}

/// In-memory clipboard for hosts without a display and for tests
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
