//! Path classification.
//!
//! Decides from a file's extension alone whether a change can be injected into
//! a running page or needs a full reload. Classification never touches the
//! filesystem and never fails: unknown types need a reload.

use std::path::{Path, PathBuf};

/// Namespace used when the caller does not supply one.
pub const DEFAULT_NAMESPACE: &str = "core";

/// File extensions that can be hot-swapped without navigation.
pub const DEFAULT_INJECT_FILE_TYPES: &[&str] =
    &["css", "png", "jpg", "jpeg", "svg", "gif", "webp", "map"];

/// How a changed file reaches the browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Applied in place (e.g., stylesheet swap).
    Injectable,
    /// Only visible after a full page reload.
    ReloadRequired,
}

/// A change descriptor as supplied by a caller or watcher.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileChange {
    /// Path of the changed file.
    pub path: PathBuf,
    /// Explicit namespace; `None` uses the classifier default.
    pub namespace: Option<String>,
    /// Force a full reload regardless of file type.
    pub force_reload: bool,
}

impl FileChange {
    /// Create a change descriptor for a path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            namespace: None,
            force_reload: false,
        }
    }

    /// Scope the change to an explicit namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Mark the change as requiring a full reload.
    #[must_use]
    pub fn force_reload(mut self) -> Self {
        self.force_reload = true;
        self
    }
}

impl From<&str> for FileChange {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for FileChange {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<&String> for FileChange {
    fn from(path: &String) -> Self {
        Self::new(path.as_str())
    }
}

impl From<PathBuf> for FileChange {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for FileChange {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

/// A classified change. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangedFile {
    path: String,
    namespace: String,
    classification: Classification,
}

impl ChangedFile {
    /// Path of the changed file.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Namespace the change is scoped to.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn classification(&self) -> Classification {
        self.classification
    }

    #[must_use]
    pub fn is_injectable(&self) -> bool {
        self.classification == Classification::Injectable
    }
}

/// Classifies changed paths by extension.
#[derive(Clone, Debug)]
pub struct Classifier {
    inject_file_types: Vec<String>,
    namespace: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_INJECT_FILE_TYPES.iter().copied())
    }
}

impl Classifier {
    /// Create a classifier that injects the given extensions.
    ///
    /// Extensions are matched case-insensitively; a leading `.` is ignored
    /// and empty entries are dropped.
    #[must_use]
    pub fn new<I, S>(inject_file_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let inject_file_types = inject_file_types
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        Self {
            inject_file_types,
            namespace: DEFAULT_NAMESPACE.to_owned(),
        }
    }

    /// Set the namespace used when a change carries none.
    ///
    /// An empty namespace keeps the current one.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        if !namespace.is_empty() {
            self.namespace = namespace;
        }
        self
    }

    /// Default namespace for changes without an override.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Extensions treated as injectable.
    #[must_use]
    pub fn inject_file_types(&self) -> &[String] {
        &self.inject_file_types
    }

    /// Classify a path. Total: every string has a classification.
    #[must_use]
    pub fn classify(&self, path: &str) -> Classification {
        match file_extension(path) {
            Some(ext) if self.is_injectable_extension(ext) => Classification::Injectable,
            _ => Classification::ReloadRequired,
        }
    }

    /// Resolve a change descriptor into a classified file.
    ///
    /// Returns `None` for malformed input: an empty path or a path that is
    /// not valid UTF-8.
    #[must_use]
    pub fn resolve(&self, change: &FileChange) -> Option<ChangedFile> {
        let path = change.path.to_str()?;
        if path.is_empty() {
            return None;
        }

        let classification = if change.force_reload {
            Classification::ReloadRequired
        } else {
            self.classify(path)
        };

        let namespace = change
            .namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .unwrap_or(&self.namespace)
            .to_owned();

        Some(ChangedFile {
            path: path.to_owned(),
            namespace,
            classification,
        })
    }

    fn is_injectable_extension(&self, ext: &str) -> bool {
        self.inject_file_types
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    }
}

/// Extract the extension of a path, ignoring `?query` and `#fragment` suffixes.
fn file_extension(path: &str) -> Option<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    Path::new(&path[..end]).extension()?.to_str()
}
