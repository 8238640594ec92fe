//! External command execution
//!
//! Every interaction with version control and the documentation tool goes
//! through the [CommandRunner] trait. Commands are described as [Invocation]
//! values tagged as read-only queries or mutations; the runner's [WriteMode]
//! decides whether mutations touch real state.
//!
//! The two modes are deliberately mixed: under [WriteMode::Simulate], queries
//! still run against the real repository, so validation sees true tag state
//! while every commit, tag, push and file write is only rendered.
//!
//! - [system::SystemRunner]: spawns real processes
//! - [mock::MockRunner]: scripted responses for tests

pub mod mock;
pub mod system;

pub use mock::MockRunner;
pub use system::SystemRunner;

use std::fmt;
use std::path::Path;

use crate::error::Result;

/// Whether mutating commands are applied or only rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Apply,
    /// Print mutations instead of running them; queries still execute.
    Simulate,
}

impl WriteMode {
    pub fn is_simulated(self) -> bool {
        self == WriteMode::Simulate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationKind {
    /// Reads repository state; always executed.
    Query,
    /// Changes commits, tags, refs or files.
    Mutation,
}

/// One external command with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub kind: InvocationKind,
}

impl Invocation {
    pub fn query<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(program, args, InvocationKind::Query)
    }

    pub fn mutation<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(program, args, InvocationKind::Mutation)
    }

    /// A `git` query.
    pub fn git_query<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::query("git", args)
    }

    /// A mutating `git` command.
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::mutation("git", args)
    }

    fn build<I, S>(program: &str, args: I, kind: InvocationKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            kind,
        }
    }

    pub fn is_mutation(&self) -> bool {
        self.kind == InvocationKind::Mutation
    }
}

fn render_arg(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"') {
        format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

/// Literal command text, with arguments containing whitespace double-quoted.
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_arg(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", render_arg(arg))?;
        }
        Ok(())
    }
}

/// Rendering of a simulated file write.
pub fn render_write(path: &Path) -> String {
    format!("write {}", render_arg(&path.display().to_string()))
}

/// Executes commands and file writes on behalf of the release workflow.
///
/// Implementations must honor [WriteMode]: in simulation, mutations and file
/// writes are rendered (printed) and report success with empty output, without
/// changing any state.
///
/// An `Ok` empty string means the command ran and printed nothing. A command
/// that cannot be spawned or exits non-zero is a
/// [crate::error::PublishError::CommandFailure].
pub trait CommandRunner {
    fn mode(&self) -> WriteMode;

    /// Run a command and return its trimmed standard output.
    fn run(&self, invocation: &Invocation) -> Result<String>;

    /// Read a file from the working tree. Reads always hit real state.
    fn read_file(&self, path: &Path) -> Result<String>;

    /// List the regular files directly inside `dir`, sorted by name.
    fn list_files(&self, dir: &Path) -> Result<Vec<std::path::PathBuf>>;

    /// Replace a file's contents in the working tree.
    fn write_file(&self, path: &Path, contents: &str) -> Result<()>;
}
