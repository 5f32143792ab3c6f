// Host capabilities: prompts and workspace file access
//
// The generator never touches the terminal or the filesystem directly. It is
// handed an InvocationContext plus a Prompter and a Workspace, so every stage
// can be driven from tests.

pub mod local;
pub mod terminal;

#[cfg(test)]
pub mod memory;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use local::LocalWorkspace;
pub use terminal::TerminalPrompter;

/// The editor state a single invocation starts from
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    /// Selected text containing the method signature
    pub selection: Option<String>,
    /// Source file the selection came from
    pub current_file: Option<PathBuf>,
    pub workspace_root: Option<PathBuf>,
}

/// Interactive questions. `None` means the user dismissed the prompt.
#[allow(async_fn_in_trait)]
pub trait Prompter {
    async fn choose(&mut self, options: &[&str], placeholder: &str) -> Option<String>;
    async fn input(&mut self, placeholder: &str) -> Option<String>;
}

/// File access scoped to the open workspace
#[allow(async_fn_in_trait)]
pub trait Workspace {
    /// Files matching `pattern`, in a stable order
    async fn find_files(&self, pattern: &str) -> Result<Vec<PathBuf>>;
    async fn read_text(&self, path: &Path) -> Result<String>;
    async fn write_text(&self, path: &Path, text: &str) -> Result<()>;
    async fn exists(&self, path: &Path) -> bool;
}

/// Match a workspace-relative path against `**/<name>` or an exact relative path
pub fn glob_matches(pattern: &str, relative_path: &str) -> bool {
    let path = relative_path.replace('\\', "/");
    let path = path.trim_start_matches("./");

    match pattern.strip_prefix("**/") {
        Some(tail) => path == tail || path.ends_with(&format!("/{}", tail)),
        None => path == pattern,
    }
}
