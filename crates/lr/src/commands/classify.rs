//! `lr classify` command implementation.

use std::path::Path;

use clap::Args;
use lr_config::{CliSettings, Config};
use lr_engine::{Classification, Classifier, FileChange};

use super::classifier_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the classify command.
#[derive(Args)]
pub(crate) struct ClassifyArgs {
    /// Paths to classify.
    #[arg(required = true)]
    paths: Vec<String>,

    /// Namespace for the paths (overrides config).
    #[arg(short, long)]
    namespace: Option<String>,
}

impl ClassifyArgs {
    /// Execute the classify command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails to load.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            namespace: self.namespace,
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let classifier = classifier_from_config(&config);

        for path in &self.paths {
            output.data(&describe(&classifier, path));
        }

        Ok(())
    }
}

/// Tab-separated `path, classification, namespace` line.
fn describe(classifier: &Classifier, path: &str) -> String {
    let Some(file) = classifier.resolve(&FileChange::from(path)) else {
        return format!("{path}\tinvalid\t-");
    };

    let kind = match file.classification() {
        Classification::Injectable => "inject",
        Classification::ReloadRequired => "reload",
    };
    format!("{}\t{kind}\t{}", file.path(), file.namespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_describe() {
        let classifier = Classifier::default();

        assert_eq!(describe(&classifier, "a.css"), "a.css\tinject\tcore");
        assert_eq!(describe(&classifier, "index.html"), "index.html\treload\tcore");
        assert_eq!(describe(&classifier, ""), "\tinvalid\t-");
    }
}
