//! Reload decision engine for LR live reload.
//!
//! Turns changed-file notifications into browser-facing events: a full page
//! reload, or an in-place injection (e.g., stylesheet swap) that keeps the
//! page state.
//!
//! # Architecture
//!
//! ```text
//! caller / watcher
//!      │
//!      ├─► Reloader::reload(path | paths | all) ─┐
//!      │                                         ├─► Classifier ─► reduce ─► EventSink
//!      └─► StreamSession::push / complete ───────┘
//! ```
//!
//! - [`Classifier`] decides from the extension alone whether a file is
//!   injectable; unknown types need a reload.
//! - [`reduce`] collapses a batch: one file that needs a reload turns the
//!   whole batch into a single `browser:reload`.
//! - [`StreamSession`] emits per file as changes arrive and decides the
//!   aggregate (or once-mode override) on [`StreamSession::complete`].
//! - [`EventSink`] is the only output. Transport to browsers is the host's
//!   business.
//!
//! # Events
//!
//! | Name             | Payload                         |
//! |------------------|---------------------------------|
//! | `browser:reload` | none                            |
//! | `file:changed`   | `{ path, log, namespace }`      |
//! | `stream:changed` | `{ changed: [path, ...] }`      |
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lr_engine::{EventSink, MemorySink, ReloadEvent, Reloader, StreamOptions};
//!
//! let sink = Arc::new(MemorySink::new());
//! let reloader = Reloader::new(Arc::clone(&sink) as Arc<dyn EventSink>);
//!
//! reloader.reload(vec!["css/core.css", "index.html"]);
//! assert_eq!(sink.take(), vec![ReloadEvent::BrowserReload]);
//!
//! let mut stream = reloader.stream(StreamOptions::new());
//! stream.push("styles.css");
//! stream.push("styles2.css");
//! stream.complete();
//! assert_eq!(sink.len(), 3);
//! ```

mod classify;
mod event;
mod reducer;
mod reloader;
mod sink;
mod stream;

pub use classify::{
    ChangedFile, Classification, Classifier, DEFAULT_INJECT_FILE_TYPES, DEFAULT_NAMESPACE,
    FileChange,
};
pub use event::{
    BROWSER_RELOAD, FILE_CHANGED, FileChanged, ReloadEvent, STREAM_CHANGED, StreamChanged,
};
pub use reducer::{AGGREGATE_THRESHOLD, aggregate, reduce};
pub use reloader::{ReloadTarget, Reloader};
pub use sink::{EventSink, MemorySink};
pub use stream::{SessionState, StreamOptions, StreamSession};
