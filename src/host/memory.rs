// In-memory host doubles for tests

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::{glob_matches, Prompter, Workspace};
use crate::error::{GeneratorError, Result};

/// Files kept in a map keyed by workspace-relative path
#[derive(Default)]
pub struct MemoryWorkspace {
    files: Mutex<BTreeMap<PathBuf, String>>,
    fail_writes: bool,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.lock().insert(path.into(), content.to_string());
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().get(path.as_ref()).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.lock().len()
    }
}

impl Workspace for MemoryWorkspace {
    async fn find_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        Ok(self
            .files
            .lock()
            .keys()
            .filter(|p| glob_matches(pattern, &p.to_string_lossy()))
            .cloned()
            .collect())
    }

    async fn read_text(&self, path: &Path) -> Result<String> {
        self.get(path)
            .ok_or_else(|| GeneratorError::FileNotFound(path.display().to_string()))
    }

    async fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        if self.fail_writes {
            return Err(GeneratorError::WriteFailure {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only workspace"),
            });
        }
        self.files.lock().insert(path.to_path_buf(), text.to_string());
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }
}

/// Answers prompts from a queue; an exhausted queue behaves like a dismissed prompt
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Option<String>>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[Option<&str>]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.map(str::to_string)).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    async fn choose(&mut self, options: &[&str], placeholder: &str) -> Option<String> {
        self.asked.push(placeholder.to_string());
        let answer = self.answers.pop_front().flatten()?;
        options.iter().find(|o| **o == answer).map(|o| o.to_string())
    }

    async fn input(&mut self, placeholder: &str) -> Option<String> {
        self.asked.push(placeholder.to_string());
        self.answers.pop_front().flatten()
    }
}
