use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::{render_write, CommandRunner, Invocation, WriteMode};
use crate::config::RunOptions;
use crate::error::{PublishError, Result};

/// Runs commands as real child processes inside a working tree.
pub struct SystemRunner {
    work_dir: PathBuf,
    options: RunOptions,
    rendered: RefCell<Vec<String>>,
}

impl SystemRunner {
    pub fn new(work_dir: impl Into<PathBuf>, options: RunOptions) -> Self {
        SystemRunner {
            work_dir: work_dir.into(),
            options,
            rendered: RefCell::new(Vec::new()),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    /// Mutations rendered so far in simulation mode, in order.
    pub fn rendered(&self) -> Vec<String> {
        self.rendered.borrow().clone()
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        }
    }

    fn simulate(&self, line: String) {
        println!("{}", line);
        self.rendered.borrow_mut().push(line);
    }
}

impl CommandRunner for SystemRunner {
    fn mode(&self) -> WriteMode {
        self.options.write_mode
    }

    fn run(&self, invocation: &Invocation) -> Result<String> {
        let rendered = invocation.to_string();

        if invocation.is_mutation() && self.mode().is_simulated() {
            self.simulate(rendered);
            return Ok(String::new());
        }

        debug!(command = %rendered, dir = %self.work_dir.display(), "running command");

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&self.work_dir)
            .output()
            .map_err(|e| {
                debug!(command = %rendered, error = %e, "failed to spawn command");
                PublishError::command_failure(&rendered, e.to_string())
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            debug!(
                command = %rendered,
                status = ?output.status.code(),
                stdout = %stdout,
                stderr = %stderr,
                "command failed"
            );
            // git reports some refusals (e.g. "nothing to commit") on stdout
            let detail = if !stderr.is_empty() {
                stderr
            } else if !stdout.is_empty() {
                stdout
            } else {
                format!("exited with {}", output.status)
            };
            return Err(PublishError::command_failure(rendered, detail));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(self.resolve(path))?)
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(self.resolve(dir))? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(dir.join(entry.file_name()));
            }
        }
        files.sort();
        Ok(files)
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        if self.mode().is_simulated() {
            self.simulate(render_write(path));
            return Ok(());
        }

        debug!(path = %path.display(), "writing file");
        fs::write(self.resolve(path), contents)?;
        Ok(())
    }
}
