//! Batch reduction.
//!
//! Collapses a batch of classified files into the fewest client-visible
//! events. A single file that needs a reload dominates the whole batch.

use crate::classify::ChangedFile;
use crate::event::ReloadEvent;

/// Minimum number of injected files for a `stream:changed` aggregate.
pub const AGGREGATE_THRESHOLD: usize = 2;

/// Reduce a batch to its ordered outbound events.
///
/// - empty batch: no events
/// - any file needs a reload: exactly one `browser:reload`
/// - otherwise: one `file:changed` per file, in input order
///
/// `log` is copied into every `file:changed` payload.
#[must_use]
pub fn reduce(batch: &[ChangedFile], log: bool) -> Vec<ReloadEvent> {
    if batch.iter().any(|file| !file.is_injectable()) {
        tracing::debug!(files = batch.len(), "Batch requires full reload");
        return vec![ReloadEvent::BrowserReload];
    }

    batch
        .iter()
        .map(|file| ReloadEvent::file_changed(file.path(), log, file.namespace()))
        .collect()
}

/// Aggregate event for the injected paths of a completed stream session.
///
/// Returns `None` below [`AGGREGATE_THRESHOLD`]: a lone file's own
/// `file:changed` already describes the change.
#[must_use]
pub fn aggregate(injected: &[String]) -> Option<ReloadEvent> {
    (injected.len() >= AGGREGATE_THRESHOLD).then(|| ReloadEvent::stream_changed(injected.to_vec()))
}
