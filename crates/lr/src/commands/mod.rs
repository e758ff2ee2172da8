//! CLI command implementations.

pub(crate) mod classify;
pub(crate) mod reload;
pub(crate) mod stream;

use std::sync::Arc;

use lr_config::Config;
use lr_engine::{Classifier, EventSink, Reloader};

pub(crate) use classify::ClassifyArgs;
pub(crate) use reload::ReloadArgs;
pub(crate) use stream::StreamArgs;

/// Build a classifier from the `[reload]` section.
fn classifier_from_config(config: &Config) -> Classifier {
    Classifier::new(&config.reload.inject_file_types)
        .with_namespace(config.reload.namespace.as_str())
}

/// Build a reloader writing to `sink`.
fn reloader_from_config(config: &Config, sink: Arc<dyn EventSink>) -> Reloader {
    Reloader::new(sink).with_classifier(classifier_from_config(config))
}
