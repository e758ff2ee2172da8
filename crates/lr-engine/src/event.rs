//! Outbound events consumed by the transport layer.
//!
//! Events serialize as `{"event": "<name>", "payload": {...}}` so a transport
//! can forward them to connected clients without further translation.

use serde::Serialize;

/// Event name for a full page reload.
pub const BROWSER_RELOAD: &str = "browser:reload";
/// Event name for a single injectable file change.
pub const FILE_CHANGED: &str = "file:changed";
/// Event name for the aggregate of a completed stream session.
pub const STREAM_CHANGED: &str = "stream:changed";

/// Payload of a `file:changed` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileChanged {
    /// Changed file path, as supplied by the caller.
    pub path: String,
    /// Whether the host should log this change.
    ///
    /// `true` for direct calls, `false` for watcher streams.
    pub log: bool,
    /// Namespace of the clients that should apply the change.
    pub namespace: String,
}

/// Payload of a `stream:changed` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StreamChanged {
    /// Injected paths of the session, in arrival order.
    pub changed: Vec<String>,
}

/// Event emitted to an [`EventSink`](crate::EventSink).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "payload")]
pub enum ReloadEvent {
    /// Reload every page in every namespace.
    #[serde(rename = "browser:reload")]
    BrowserReload,
    /// Inject one changed file in place.
    #[serde(rename = "file:changed")]
    FileChanged(FileChanged),
    /// A stream session injected several files.
    #[serde(rename = "stream:changed")]
    StreamChanged(StreamChanged),
}

impl ReloadEvent {
    /// Create a `file:changed` event.
    #[must_use]
    pub fn file_changed(path: impl Into<String>, log: bool, namespace: impl Into<String>) -> Self {
        Self::FileChanged(FileChanged {
            path: path.into(),
            log,
            namespace: namespace.into(),
        })
    }

    /// Create a `stream:changed` event.
    #[must_use]
    pub fn stream_changed(changed: Vec<String>) -> Self {
        Self::StreamChanged(StreamChanged { changed })
    }

    /// Wire name of the event (e.g., `"file:changed"`).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BrowserReload => BROWSER_RELOAD,
            Self::FileChanged(_) => FILE_CHANGED,
            Self::StreamChanged(_) => STREAM_CHANGED,
        }
    }

    /// Returns `true` for `browser:reload`.
    #[must_use]
    pub fn is_reload(&self) -> bool {
        matches!(self, Self::BrowserReload)
    }
}
