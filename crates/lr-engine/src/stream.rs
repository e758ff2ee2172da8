//! Stream ingestion.
//!
//! A [`StreamSession`] accepts changes one at a time from a watcher, emits
//! per-file events as they arrive and seals with [`StreamSession::complete`],
//! which emits the session's aggregate or override decision.
//!
//! # Once mode
//!
//! With [`StreamOptions::once`] the first change is emitted as usual. Any
//! further change crosses the multi-file threshold: its per-file event is
//! suppressed and `complete()` emits one terminal `browser:reload`. Events
//! sent before the threshold are not retracted, so a once session emits at
//! most two events.

use std::sync::Arc;

use crate::classify::{ChangedFile, Classification, Classifier, FileChange};
use crate::event::ReloadEvent;
use crate::reducer;
use crate::sink::EventSink;

/// Options for opening a stream session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamOptions {
    /// Resolve multi-file sessions with a single full reload.
    pub once: bool,
    /// Glob patterns a path must match to be ingested (empty: accept all).
    pub matches: Vec<String>,
}

impl StreamOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable once mode.
    #[must_use]
    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Only ingest paths matching `pattern` (may be given several times).
    #[must_use]
    pub fn with_match(mut self, pattern: impl Into<String>) -> Self {
        self.matches.push(pattern.into());
        self
    }
}

/// Lifecycle state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting changes.
    Open,
    /// Completed; further changes are ignored.
    Sealed,
}

/// A single streaming ingestion, from open to completion.
///
/// Sessions are independent: nothing is shared between them except the sink.
/// Dropping an open session does not finalize it.
pub struct StreamSession {
    sink: Arc<dyn EventSink>,
    classifier: Arc<Classifier>,
    once: bool,
    patterns: Vec<glob::Pattern>,
    state: SessionState,
    items: Vec<ChangedFile>,
    injected: Vec<String>,
    reload_emitted: bool,
    override_pending: bool,
}

impl StreamSession {
    pub(crate) fn new(
        sink: Arc<dyn EventSink>,
        classifier: Arc<Classifier>,
        options: StreamOptions,
    ) -> Self {
        let patterns = options
            .matches
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!(pattern = %p, error = %e, "Ignoring invalid match pattern");
                    None
                }
            })
            .collect();

        Self {
            sink,
            classifier,
            once: options.once,
            patterns,
            state: SessionState::Open,
            items: Vec::new(),
            injected: Vec::new(),
            reload_emitted: false,
            override_pending: false,
        }
    }

    /// Ingest one change.
    ///
    /// Emits the change's own event before returning, unless the change is
    /// malformed, filtered out, suppressed by once mode, or the session is
    /// sealed. None of these are errors.
    pub fn push(&mut self, change: impl Into<FileChange>) {
        let change = change.into();

        if self.state == SessionState::Sealed {
            tracing::debug!(path = %change.path.display(), "Ignoring change pushed after completion");
            return;
        }

        let Some(file) = self.classifier.resolve(&change) else {
            tracing::debug!(path = %change.path.display(), "Ignoring malformed change");
            return;
        };

        if !self.matches(file.path()) {
            tracing::trace!(path = %file.path(), "Change does not match stream patterns");
            return;
        }

        if self.once && !self.items.is_empty() {
            self.override_pending = true;
            tracing::debug!(path = %file.path(), "Once threshold crossed, deferring to reload");
        } else {
            self.emit_for(&file);
        }

        self.items.push(file);
    }

    fn emit_for(&mut self, file: &ChangedFile) {
        match file.classification() {
            Classification::Injectable => {
                self.injected.push(file.path().to_owned());
                self.sink
                    .emit(ReloadEvent::file_changed(file.path(), false, file.namespace()));
            }
            Classification::ReloadRequired => {
                self.reload_emitted = true;
                self.sink.emit(ReloadEvent::BrowserReload);
            }
        }
    }

    /// Seal the session and emit its terminal decision.
    ///
    /// Idempotent: only the first call emits anything.
    pub fn complete(&mut self) {
        if self.state == SessionState::Sealed {
            return;
        }
        self.state = SessionState::Sealed;

        tracing::debug!(
            items = self.items.len(),
            injected = self.injected.len(),
            once = self.once,
            "Stream session completed"
        );

        if self.override_pending {
            self.sink.emit(ReloadEvent::BrowserReload);
            return;
        }

        if self.reload_emitted {
            return;
        }

        if let Some(event) = reducer::aggregate(&self.injected) {
            self.sink.emit(event);
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Accepted changes, in arrival order.
    #[must_use]
    pub fn items(&self) -> &[ChangedFile] {
        &self.items
    }

    #[must_use]
    pub fn is_once(&self) -> bool {
        self.once
    }

    fn matches(&self, path: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(path))
    }
}

impl std::fmt::Debug for StreamSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamSession")
            .field("once", &self.once)
            .field("state", &self.state)
            .field("items", &self.items)
            .field("injected", &self.injected)
            .field("reload_emitted", &self.reload_emitted)
            .field("override_pending", &self.override_pending)
            .finish_non_exhaustive()
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        if self.state == SessionState::Open && !self.items.is_empty() {
            tracing::debug!(
                items = self.items.len(),
                "Stream session dropped without completion"
            );
        }
    }
}
