use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{render_write, CommandRunner, Invocation, WriteMode};
use crate::error::{PublishError, Result};

/// Mock runner for testing without spawning processes.
///
/// Queries are answered from responses registered by rendered command text;
/// an unregistered query fails like a command exiting non-zero. Files live in
/// an in-memory tree. Every call is recorded.
pub struct MockRunner {
    mode: WriteMode,
    responses: HashMap<String, String>,
    failures: HashMap<String, String>,
    files: Mutex<BTreeMap<PathBuf, String>>,
    log: Mutex<Vec<String>>,
    applied: Mutex<Vec<String>>,
}

impl MockRunner {
    pub fn new(mode: WriteMode) -> Self {
        MockRunner {
            mode,
            responses: HashMap::new(),
            failures: HashMap::new(),
            files: Mutex::new(BTreeMap::new()),
            log: Mutex::new(Vec::new()),
            applied: Mutex::new(Vec::new()),
        }
    }

    /// Register the output of a command, keyed by its rendered text.
    pub fn respond(&mut self, command: impl Into<String>, output: impl Into<String>) {
        self.responses.insert(command.into(), output.into());
    }

    /// Make a command fail with the given detail.
    pub fn fail(&mut self, command: impl Into<String>, detail: impl Into<String>) {
        self.failures.insert(command.into(), detail.into());
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        if let Ok(files) = self.files.get_mut() {
            files.insert(path.into(), contents.into());
        }
    }

    /// Script the tag graph around one tag: the tag exists, points at `commit`,
    /// and `commit` carries `tags_on_commit`.
    pub fn with_tag_graph(&mut self, anchor: &str, commit: &str, tags_on_commit: &[&str]) {
        self.respond(format!("git tag --list {}", anchor), anchor);
        self.respond(format!("git rev-list -n 1 {}", anchor), commit);
        self.respond(
            format!("git tag --points-at {}", commit),
            tags_on_commit.join("\n"),
        );
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .ok()
            .and_then(|files| files.get(path.as_ref()).cloned())
    }

    /// Every command and file write, rendered, in call order.
    pub fn log(&self) -> Vec<String> {
        self.log.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Mutations (commands and writes) that were rendered or applied.
    pub fn mutations(&self) -> Vec<String> {
        self.applied.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn record(&self, line: &str) {
        if let Ok(mut log) = self.log.lock() {
            log.push(line.to_string());
        }
    }

    fn record_mutation(&self, line: &str) {
        if let Ok(mut applied) = self.applied.lock() {
            applied.push(line.to_string());
        }
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new(WriteMode::Apply)
    }
}

impl CommandRunner for MockRunner {
    fn mode(&self) -> WriteMode {
        self.mode
    }

    fn run(&self, invocation: &Invocation) -> Result<String> {
        let rendered = invocation.to_string();
        self.record(&rendered);

        if let Some(detail) = self.failures.get(&rendered) {
            return Err(PublishError::command_failure(rendered, detail.clone()));
        }

        if invocation.is_mutation() {
            self.record_mutation(&rendered);
            if self.mode.is_simulated() {
                return Ok(String::new());
            }
            return Ok(self.responses.get(&rendered).cloned().unwrap_or_default());
        }

        self.responses
            .get(&rendered)
            .cloned()
            .ok_or_else(|| PublishError::command_failure(rendered, "no scripted response"))
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        self.file(path).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
            .into()
        })
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let files = self
            .files
            .lock()
            .map(|files| {
                files
                    .keys()
                    .filter(|path| path.parent() == Some(dir))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        if files.is_empty() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", dir.display()),
            )
            .into());
        }
        Ok(files)
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        let rendered = render_write(path);
        self.record(&rendered);
        self.record_mutation(&rendered);

        if !self.mode.is_simulated() {
            if let Ok(mut files) = self.files.lock() {
                files.insert(path.to_path_buf(), contents.to_string());
            }
        }
        Ok(())
    }
}
