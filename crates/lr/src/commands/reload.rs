//! `lr reload` command implementation.

use std::path::Path;
use std::sync::Arc;

use clap::Args;
use lr_config::{CliSettings, Config};
use lr_engine::{FileChange, ReloadTarget};

use super::reloader_from_config;
use crate::error::CliError;
use crate::output::JsonLinesSink;

/// Arguments for the reload command.
#[derive(Args)]
pub(crate) struct ReloadArgs {
    /// Changed file paths. Without paths, the whole page is reloaded.
    paths: Vec<String>,

    /// Namespace for the changes (overrides config).
    #[arg(short, long)]
    namespace: Option<String>,

    /// Force a full reload even for injectable files.
    #[arg(long)]
    force: bool,
}

impl ReloadArgs {
    /// Execute the reload command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails to load.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            namespace: self.namespace,
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let reloader = reloader_from_config(&config, Arc::new(JsonLinesSink::new()));
        reloader.reload(target(self.paths, self.force));

        Ok(())
    }
}

/// Map positional paths to a one-shot target.
fn target(paths: Vec<String>, force: bool) -> ReloadTarget {
    if paths.is_empty() {
        return ReloadTarget::All;
    }

    let changes: Vec<FileChange> = paths
        .into_iter()
        .map(|path| {
            let change = FileChange::new(path);
            if force { change.force_reload() } else { change }
        })
        .collect();

    match <[FileChange; 1]>::try_from(changes) {
        Ok([change]) => ReloadTarget::Path(change),
        Err(changes) => ReloadTarget::Paths(changes),
    }
}
