//! `lr stream` command implementation.

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use clap::Args;
use lr_config::{CliSettings, Config};
use lr_engine::{FileChange, StreamOptions, StreamSession};

use super::reloader_from_config;
use crate::error::CliError;
use crate::output::{JsonLinesSink, Output};

/// Arguments for the stream command.
#[derive(Args)]
pub(crate) struct StreamArgs {
    /// Resolve sessions with more than one change by a single full reload.
    #[arg(long)]
    once: bool,

    /// Only ingest paths matching this glob (repeatable, overrides config).
    #[arg(short = 'm', long = "match")]
    matches: Vec<String>,

    /// Namespace for the changes (overrides config).
    #[arg(short, long)]
    namespace: Option<String>,
}

impl StreamArgs {
    /// Execute the stream command.
    ///
    /// Reads stdin until EOF, then completes the session.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails to load or stdin cannot be read.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            namespace: self.namespace,
            once: self.once.then_some(true),
            matches: (!self.matches.is_empty()).then_some(self.matches),
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let reloader = reloader_from_config(&config, Arc::new(JsonLinesSink::new()));
        let options = StreamOptions {
            once: config.stream.once,
            matches: config.stream.matches.clone(),
        };
        let mut session = reloader.stream(options);

        let result = ingest(&mut session, std::io::stdin().lock());
        // Seal even on read errors so accepted changes still get a decision
        session.complete();
        result?;

        output.info(&format!(
            "Stream session completed: {} change(s)",
            session.items().len()
        ));

        Ok(())
    }
}

/// Push one path per non-blank line into the session.
///
/// Lines are read as raw bytes so a path that is not valid UTF-8 is handed to
/// the session (which ignores it) instead of ending the read loop.
fn ingest(session: &mut StreamSession, input: impl BufRead) -> Result<(), CliError> {
    for line in input.split(b'\n') {
        let line = line?;
        let bytes = line.trim_ascii();
        if bytes.is_empty() {
            continue;
        }
        if let Some(change) = line_to_change(bytes) {
            session.push(change);
        }
    }
    Ok(())
}

#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn line_to_change(bytes: &[u8]) -> Option<FileChange> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    Some(FileChange::new(Path::new(OsStr::from_bytes(bytes))))
}

#[cfg(not(unix))]
fn line_to_change(bytes: &[u8]) -> Option<FileChange> {
    match std::str::from_utf8(bytes) {
        Ok(path) => Some(FileChange::from(path)),
        Err(e) => {
            tracing::debug!(error = %e, "Skipping path that is not valid UTF-8");
            None
        }
    }
}
