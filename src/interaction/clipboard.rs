//! Clipboard export. The platform clipboard is opened lazily and kept
//! alive, since X11 selections vanish with their owner.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context};
use bevy::prelude::*;

use crate::app::shell::PendingTasks;

pub trait ClipboardSink: Send + Sync + 'static {
    fn set_text(&self, text: &str) -> anyhow::Result<()>;
}

#[derive(Default)]
pub struct SystemClipboard {
    inner: Mutex<Option<arboard::Clipboard>>,
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> anyhow::Result<()> {
        let mut guard = self.inner.lock().map_err(|_| anyhow!("clipboard lock poisoned"))?;
        if guard.is_none() {
            *guard = Some(arboard::Clipboard::new().context("clipboard unavailable")?);
        }
        let clipboard = guard.as_mut().ok_or_else(|| anyhow!("clipboard unavailable"))?;
        clipboard.set_text(text.to_owned()).context("clipboard write failed")
    }
}

/// Records every write; for headless runs.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.writes().pop()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&self, text: &str) -> anyhow::Result<()> {
        self.writes.lock().map_err(|_| anyhow!("clipboard lock poisoned"))?.push(text.to_owned());
        Ok(())
    }
}

#[derive(Resource, Clone)]
pub struct Clipboard(pub Arc<dyn ClipboardSink>);

impl Default for Clipboard {
    fn default() -> Self {
        Self(Arc::new(SystemClipboard::default()))
    }
}

impl Clipboard {
    pub fn memory() -> (Self, Arc<MemoryClipboard>) {
        let sink = Arc::new(MemoryClipboard::default());
        (Self(sink.clone()), sink)
    }
}

/// Queue `text` for the clipboard. Failures are logged and otherwise ignored.
pub fn export(pending: &mut PendingTasks, clipboard: &Clipboard, text: String) {
    let sink = clipboard.0.clone();
    pending.submit(move || match sink.set_text(&text) {
        Ok(()) => info!(target: "clipboard", "copied '{text}'"),
        Err(e) => warn!(target: "clipboard", "copy of '{text}' failed: {e:#}"),
    });
}
