//! Snapshot configuration.

/// Directories pruned from every snapshot by default.
pub const DEFAULT_EXCLUDE_DIRS: [&str; 4] = ["node_modules", ".git", "dist", ".next"];

/// File names skipped in every snapshot by default.
pub const DEFAULT_EXCLUDE_FILES: [&str; 1] = [".DS_Store"];

/// Default name of the report file; the report never includes itself.
pub const DEFAULT_OUTPUT_NAME: &str = "files_with_code.txt";

/// Options controlling which entries a snapshot includes.
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
    /// Directory names pruned from the walk, wherever they appear.
    pub exclude_dirs: Vec<String>,
    /// File names skipped, wherever they appear.
    pub exclude_files: Vec<String>,
    /// Name of the report file, excluded so the report cannot embed itself.
    pub output_name: String,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            exclude_files: DEFAULT_EXCLUDE_FILES.iter().map(|s| s.to_string()).collect(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

impl SnapshotOptions {
    /// Create options with the default exclusion lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory name to the exclusion list.
    pub fn with_exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.exclude_dirs.push(name.into());
        self
    }

    /// Add a file name to the exclusion list.
    pub fn with_exclude_file(mut self, name: impl Into<String>) -> Self {
        self.exclude_files.push(name.into());
        self
    }

    /// Set the report file name.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    /// Whether a directory with this name is pruned.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }

    /// Whether a file with this name is skipped.
    pub fn is_excluded_file(&self, name: &str) -> bool {
        name == self.output_name || self.exclude_files.iter().any(|f| f == name)
    }
}
