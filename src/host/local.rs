// Local filesystem workspace

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::{glob_matches, Workspace};
use crate::config::Config;
use crate::error::{GeneratorError, Result};

/// A workspace rooted at a directory on disk.
///
/// The tree is walked once, on the first lookup; later lookups reuse the listing.
pub struct LocalWorkspace {
    root: PathBuf,
    config: Config,
    files: OnceCell<Vec<PathBuf>>,
}

impl LocalWorkspace {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
            files: OnceCell::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Workspace-relative paths of every scannable file
    async fn file_index(&self) -> Result<&Vec<PathBuf>> {
        self.files
            .get_or_try_init(|| async {
                let root = self.root.clone();
                let config = self.config.clone();
                tokio::task::spawn_blocking(move || scan_files(&root, &config))
                    .await
                    .map_err(|e| GeneratorError::FileNotFound(format!("workspace scan failed: {}", e)))
            })
            .await
    }
}

fn scan_files(root: &Path, config: &Config) -> Vec<PathBuf> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Scanning {}", root.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut files = Vec::new();
    let walker = WalkDir::new(root).sort_by_file_name().into_iter().filter_entry(|entry| {
        let Ok(relative) = entry.path().strip_prefix(root) else {
            return true;
        };
        if relative.as_os_str().is_empty() {
            return true;
        }
        let mut relative = relative.to_string_lossy().replace('\\', "/");
        if entry.file_type().is_dir() {
            relative.push('/');
        }
        config.should_scan_file(&relative)
    });

    for entry in walker.filter_map(|e| e.ok()) {
        if entry.file_type().is_file() {
            if let Ok(relative) = entry.path().strip_prefix(root) {
                files.push(relative.to_path_buf());
            }
        }
    }

    spinner.finish_and_clear();
    info!("Scanned {} files under {}", files.len(), root.display());
    files
}

impl Workspace for LocalWorkspace {
    async fn find_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let matches: Vec<PathBuf> = self
            .file_index()
            .await?
            .iter()
            .filter(|relative| glob_matches(pattern, &relative.to_string_lossy()))
            .map(|relative| self.root.join(relative))
            .collect();

        debug!("{} -> {} match(es)", pattern, matches.len());
        Ok(matches)
    }

    async fn read_text(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() != ErrorKind::NotFound {
                warn!("Failed to read {}: {}", path.display(), e);
            }
            GeneratorError::FileNotFound(path.display().to_string())
        })
    }

    async fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        let write_failure = |source| GeneratorError::WriteFailure {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_failure)?;
        }
        tokio::fs::write(path, text).await.map_err(write_failure)
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}
