//! Event sinks.
//!
//! The engine writes every decision to an [`EventSink`] and never reads back.
//! Delivery guarantees belong to the sink owner.

use std::sync::{Mutex, PoisonError, mpsc};

use crate::event::ReloadEvent;

/// One-way channel for reload events.
///
/// Implemented for closures, [`mpsc::Sender`], [`MemorySink`] and, with the
/// `broadcast` feature, `tokio::sync::broadcast::Sender`.
pub trait EventSink: Send + Sync {
    /// Emit an event. Fire-and-forget.
    fn emit(&self, event: ReloadEvent);
}

impl<F> EventSink for F
where
    F: Fn(ReloadEvent) + Send + Sync,
{
    fn emit(&self, event: ReloadEvent) {
        self(event);
    }
}

impl EventSink for mpsc::Sender<ReloadEvent> {
    fn emit(&self, event: ReloadEvent) {
        // A dropped receiver means nobody is listening anymore
        let _ = self.send(event);
    }
}

#[cfg(feature = "broadcast")]
impl EventSink for tokio::sync::broadcast::Sender<ReloadEvent> {
    fn emit(&self, event: ReloadEvent) {
        // Err only when there are no subscribers
        let _ = self.send(event);
    }
}

/// In-memory sink that records events in emission order.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lr_engine::{MemorySink, ReloadEvent, Reloader};
///
/// let sink = Arc::new(MemorySink::new());
/// let reloader = Reloader::new(Arc::clone(&sink) as Arc<dyn lr_engine::EventSink>);
///
/// reloader.reload_all();
///
/// assert_eq!(sink.events(), vec![ReloadEvent::BrowserReload]);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ReloadEvent>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<ReloadEvent> {
        self.lock().clone()
    }

    /// Remove and return all recorded events.
    pub fn take(&self) -> Vec<ReloadEvent> {
        std::mem::take(&mut *self.lock())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ReloadEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: ReloadEvent) {
        self.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();

        sink.emit(ReloadEvent::file_changed("a.css", false, "core"));
        sink.emit(ReloadEvent::BrowserReload);

        assert_eq!(
            sink.events(),
            vec![
                ReloadEvent::file_changed("a.css", false, "core"),
                ReloadEvent::BrowserReload,
            ]
        );
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_memory_sink_take_clears() {
        let sink = MemorySink::new();
        sink.emit(ReloadEvent::BrowserReload);

        let taken = sink.take();

        assert_eq!(taken, vec![ReloadEvent::BrowserReload]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let sink = move |_event: ReloadEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        };

        sink.emit(ReloadEvent::BrowserReload);
        sink.emit(ReloadEvent::BrowserReload);

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_mpsc_sink() {
        let (tx, rx) = mpsc::channel();

        tx.emit(ReloadEvent::BrowserReload);
        drop(tx);

        let received: Vec<_> = rx.iter().collect();
        assert_eq!(received, vec![ReloadEvent::BrowserReload]);
    }

    #[test]
    fn test_mpsc_sink_without_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);

        tx.emit(ReloadEvent::BrowserReload); // Should not panic
    }

    #[cfg(feature = "broadcast")]
    #[test]
    fn test_broadcast_sink_fans_out() {
        let (tx, mut rx1) = tokio::sync::broadcast::channel(16);
        let mut rx2 = tx.subscribe();

        tx.emit(ReloadEvent::BrowserReload);

        assert_eq!(rx1.try_recv().unwrap(), ReloadEvent::BrowserReload);
        assert_eq!(rx2.try_recv().unwrap(), ReloadEvent::BrowserReload);
    }

    #[test]
    fn test_memory_sink_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemorySink>();
    }
}
