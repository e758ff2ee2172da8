//! One-shot entry point.
//!
//! [`Reloader::reload`] accepts nothing, a path, a list of paths or stream
//! options, mirroring how a host exposes reloading to user code.

use std::sync::Arc;

use crate::classify::{Classifier, FileChange};
use crate::event::ReloadEvent;
use crate::reducer;
use crate::sink::EventSink;
use crate::stream::{StreamOptions, StreamSession};

/// What a one-shot [`Reloader::reload`] call targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReloadTarget {
    /// Reload every page.
    All,
    /// A single changed file.
    Path(FileChange),
    /// A batch of changed files, decided together.
    Paths(Vec<FileChange>),
    /// Open a stream session instead of emitting.
    Stream(StreamOptions),
}

impl From<&str> for ReloadTarget {
    fn from(path: &str) -> Self {
        Self::Path(path.into())
    }
}

impl From<String> for ReloadTarget {
    fn from(path: String) -> Self {
        Self::Path(path.into())
    }
}

impl From<FileChange> for ReloadTarget {
    fn from(change: FileChange) -> Self {
        Self::Path(change)
    }
}

impl<T: Into<FileChange>> From<Vec<T>> for ReloadTarget {
    fn from(paths: Vec<T>) -> Self {
        Self::Paths(paths.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FileChange> + Clone> From<&[T]> for ReloadTarget {
    fn from(paths: &[T]) -> Self {
        Self::Paths(paths.iter().cloned().map(Into::into).collect())
    }
}

impl From<StreamOptions> for ReloadTarget {
    fn from(options: StreamOptions) -> Self {
        Self::Stream(options)
    }
}

/// Reload decision engine bound to an event sink.
#[derive(Clone)]
pub struct Reloader {
    sink: Arc<dyn EventSink>,
    classifier: Arc<Classifier>,
}

impl Reloader {
    /// Create a reloader with the default classifier.
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            sink,
            classifier: Arc::new(Classifier::default()),
        }
    }

    /// Replace the classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Dispatch a one-shot call.
    ///
    /// Returns a fresh session for [`ReloadTarget::Stream`], otherwise emits
    /// synchronously and returns `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use lr_engine::{EventSink, MemorySink, ReloadTarget, Reloader, StreamOptions};
    ///
    /// let sink = Arc::new(MemorySink::new());
    /// let reloader = Reloader::new(Arc::clone(&sink) as Arc<dyn EventSink>);
    ///
    /// reloader.reload(ReloadTarget::All);
    /// reloader.reload("css/core.css");
    ///
    /// let mut session = reloader.reload(StreamOptions::new()).unwrap();
    /// session.push("styles.css");
    /// session.complete();
    ///
    /// assert_eq!(sink.len(), 3);
    /// ```
    pub fn reload(&self, target: impl Into<ReloadTarget>) -> Option<StreamSession> {
        match target.into() {
            ReloadTarget::All => self.reload_all(),
            ReloadTarget::Path(change) => self.reload_path(change),
            ReloadTarget::Paths(changes) => self.reload_paths(changes),
            ReloadTarget::Stream(options) => return Some(self.stream(options)),
        }
        None
    }

    /// Emit a single `browser:reload`.
    pub fn reload_all(&self) {
        tracing::debug!("Full reload requested");
        self.sink.emit(ReloadEvent::BrowserReload);
    }

    /// Decide for one changed file. Malformed paths emit nothing.
    pub fn reload_path(&self, change: impl Into<FileChange>) {
        self.reload_paths([change]);
    }

    /// Decide for a batch of changed files, with `log: true`.
    ///
    /// Malformed entries are skipped; an empty batch emits nothing.
    pub fn reload_paths<I>(&self, changes: I)
    where
        I: IntoIterator,
        I::Item: Into<FileChange>,
    {
        let batch: Vec<_> = changes
            .into_iter()
            .filter_map(|change| {
                let change = change.into();
                let resolved = self.classifier.resolve(&change);
                if resolved.is_none() {
                    tracing::debug!(path = %change.path.display(), "Ignoring malformed change");
                }
                resolved
            })
            .collect();

        for event in reducer::reduce(&batch, true) {
            self.sink.emit(event);
        }
    }

    /// Open a new, independent stream session.
    #[must_use]
    pub fn stream(&self, options: StreamOptions) -> StreamSession {
        StreamSession::new(Arc::clone(&self.sink), Arc::clone(&self.classifier), options)
    }
}

impl std::fmt::Debug for Reloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reloader")
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use pretty_assertions::assert_eq;

    fn reloader() -> (Arc<MemorySink>, Reloader) {
        let sink = Arc::new(MemorySink::new());
        let reloader = Reloader::new(Arc::clone(&sink) as Arc<dyn EventSink>);
        (sink, reloader)
    }

    #[test]
    fn test_reload_without_target() {
        let (sink, reloader) = reloader();

        let session = reloader.reload(ReloadTarget::All);

        assert!(session.is_none());
        assert_eq!(sink.events(), vec![ReloadEvent::BrowserReload]);
    }

    #[test]
    fn test_reload_single_injectable_path() {
        let (sink, reloader) = reloader();

        reloader.reload("css/core.css");

        assert_eq!(
            sink.events(),
            vec![ReloadEvent::file_changed("css/core.css", true, "core")]
        );
    }

    #[test]
    fn test_reload_single_reload_path() {
        let (sink, reloader) = reloader();

        reloader.reload("index.html");

        assert_eq!(sink.events(), vec![ReloadEvent::BrowserReload]);
    }

    #[test]
    fn test_reload_array_with_reload_file_emits_once() {
        let (sink, reloader) = reloader();

        reloader.reload(vec!["css/core.css", "index.html"]);

        assert_eq!(sink.events(), vec![ReloadEvent::BrowserReload]);
    }

    #[test]
    fn test_reload_array_reload_file_first() {
        let (sink, reloader) = reloader();

        reloader.reload(vec!["index.html", "css/core.css"]);

        assert_eq!(sink.events(), vec![ReloadEvent::BrowserReload]);
    }

    #[test]
    fn test_reload_array_all_injectable() {
        let (sink, reloader) = reloader();

        reloader.reload(vec!["css/core.css", "ie.css"]);

        assert_eq!(
            sink.events(),
            vec![
                ReloadEvent::file_changed("css/core.css", true, "core"),
                ReloadEvent::file_changed("ie.css", true, "core"),
            ]
        );
    }

    #[test]
    fn test_reload_array_has_no_aggregate() {
        let (sink, reloader) = reloader();

        reloader.reload(vec!["a.css", "b.css", "c.css"]);

        assert!(
            sink.events()
                .iter()
                .all(|e| matches!(e, ReloadEvent::FileChanged(_)))
        );
    }

    #[test]
    fn test_reload_slice_target() {
        let (sink, reloader) = reloader();
        let paths = ["a.css".to_owned(), "b.css".to_owned()];

        reloader.reload(&paths[..]);

        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_reload_empty_array_emits_nothing() {
        let (sink, reloader) = reloader();

        reloader.reload(Vec::<String>::new());

        assert!(sink.is_empty());
    }

    #[test]
    fn test_reload_empty_path_emits_nothing() {
        let (sink, reloader) = reloader();

        reloader.reload("");

        assert!(sink.is_empty());
    }

    #[test]
    fn test_reload_array_skips_malformed_entries() {
        let (sink, reloader) = reloader();

        reloader.reload(vec!["", "a.css"]);

        assert_eq!(
            sink.events(),
            vec![ReloadEvent::file_changed("a.css", true, "core")]
        );
    }

    #[test]
    fn test_reload_stream_options_returns_session_without_emitting() {
        let (sink, reloader) = reloader();

        let session = reloader.reload(StreamOptions::new());

        assert!(session.is_some());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_stream_session_via_reload() {
        let (sink, reloader) = reloader();

        let mut stream = reloader.reload(StreamOptions::new()).unwrap();
        stream.push("styles.css");
        stream.push("styles2.css");
        stream.complete();

        assert_eq!(
            sink.events(),
            vec![
                ReloadEvent::file_changed("styles.css", false, "core"),
                ReloadEvent::file_changed("styles2.css", false, "core"),
                ReloadEvent::stream_changed(vec![
                    "styles.css".to_owned(),
                    "styles2.css".to_owned()
                ]),
            ]
        );
    }

    #[test]
    fn test_stream_once_via_reload() {
        let (sink, reloader) = reloader();

        let mut stream = reloader.reload(StreamOptions::new().once(true)).unwrap();
        stream.push("styles.css");
        stream.push("styles2.css");
        stream.push("styles3.css");
        stream.complete();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(events.contains(&ReloadEvent::BrowserReload));
    }

    #[test]
    fn test_reload_then_stream_are_independent() {
        let (sink, reloader) = reloader();

        reloader.reload(ReloadTarget::All);
        let mut stream = reloader.stream(StreamOptions::new());
        stream.push("styles.css");
        stream.complete();

        assert_eq!(
            sink.events(),
            vec![
                ReloadEvent::BrowserReload,
                ReloadEvent::file_changed("styles.css", false, "core"),
            ]
        );
    }

    #[test]
    fn test_stream_then_reload_are_independent() {
        let (sink, reloader) = reloader();

        let mut stream = reloader.stream(StreamOptions::new());
        stream.push("a.css");
        stream.push("b.css");
        stream.complete();
        sink.take();

        reloader.reload("c.css");

        assert_eq!(
            sink.events(),
            vec![ReloadEvent::file_changed("c.css", true, "core")]
        );
    }

    #[test]
    fn test_custom_classifier() {
        let sink = Arc::new(MemorySink::new());
        let reloader = Reloader::new(Arc::clone(&sink) as Arc<dyn EventSink>)
            .with_classifier(Classifier::new(["scss"]).with_namespace("theme"));

        reloader.reload(vec!["main.scss"]);
        reloader.reload("main.css");

        assert_eq!(
            sink.events(),
            vec![
                ReloadEvent::file_changed("main.scss", true, "theme"),
                ReloadEvent::BrowserReload,
            ]
        );
    }
}
