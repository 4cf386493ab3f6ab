//! Clipboard for color text: system clipboard through arboard, with an
//! in-process fallback when no display server is reachable.

use std::sync::{Arc, Mutex};

/// Held for the whole session; on X11 the owner must stay alive to serve
/// paste requests from other programs.
static SYSTEM_CLIPBOARD: Mutex<Option<arboard::Clipboard>> = Mutex::new(None);

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    /// Shared by every clone, so tabs see each other's copies.
    internal: Arc<Mutex<String>>,
    /// Skip the system clipboard entirely (tests, headless sessions).
    internal_only: bool,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn internal_only() -> Self {
        Self {
            internal_only: true,
            ..Self::default()
        }
    }

    pub fn copy(&mut self, text: &str) {
        self.set_internal(text);
        if self.internal_only {
            return;
        }

        with_system(|clipboard| {
            if let Err(e) = clipboard.set_text(text) {
                tracing::warn!("clipboard copy failed: {}", e);
            }
        });
    }

    /// System clipboard first, then whatever was copied in-process.
    pub fn paste(&mut self) -> Option<String> {
        if !self.internal_only {
            let text = with_system(|clipboard| match clipboard.get_text() {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!("clipboard paste failed: {}", e);
                    None
                }
            })
            .flatten();

            if let Some(text) = text.filter(|t| !t.is_empty()) {
                self.set_internal(&text);
                return Some(text);
            }
        }

        let internal = self.internal.lock().ok()?;
        (!internal.is_empty()).then(|| internal.clone())
    }

    fn set_internal(&self, text: &str) {
        if let Ok(mut internal) = self.internal.lock() {
            *internal = text.to_string();
        }
    }
}

fn with_system<T>(f: impl FnOnce(&mut arboard::Clipboard) -> T) -> Option<T> {
    let mut guard = SYSTEM_CLIPBOARD.lock().ok()?;
    if guard.is_none() {
        match arboard::Clipboard::new() {
            Ok(cb) => *guard = Some(cb),
            Err(e) => {
                tracing::debug!("system clipboard unavailable: {}", e);
                return None;
            }
        }
    }
    guard.as_mut().map(f)
}
