//! The release mutation sequence
//!
//! Once validation has passed, a release is a fixed, ordered list of steps:
//!
//! 1. Re-pin the action in workflow files, commit
//! 2. Snapshot the documentation, commit
//! 3. Bump the manifest version, commit
//! 4. Create the minor tag
//! 5. Force-move the major tag
//! 6. Force-move the sentinel tag (only on the sentinel's line)
//! 7. Push the branch and every touched tag in one command
//!
//! The sequence is not atomic. A failing step stops the run and leaves the
//! commits and tags of earlier steps in place. The file rewrites can be repeated
//! safely (an unchanged tree still yields an empty commit), tag creation cannot:
//! inspect the repository before retrying.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::Config;
use crate::docs::DocsSnapshot;
use crate::domain::{Branch, ReleaseTarget, Version};
use crate::error::{PublishError, Result};
use crate::rewrite;
use crate::runner::{CommandRunner, Invocation, WriteMode};
use crate::ui;

/// One step of the release sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStep {
    PinWorkflows,
    SnapshotDocs,
    BumpManifest,
    CreateMinorTag,
    MoveMajorTag,
    MoveSentinelTag,
    Push,
}

impl ReleaseStep {
    pub const ALL: [ReleaseStep; 7] = [
        ReleaseStep::PinWorkflows,
        ReleaseStep::SnapshotDocs,
        ReleaseStep::BumpManifest,
        ReleaseStep::CreateMinorTag,
        ReleaseStep::MoveMajorTag,
        ReleaseStep::MoveSentinelTag,
        ReleaseStep::Push,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReleaseStep::PinWorkflows => "Update action version in workflows",
            ReleaseStep::SnapshotDocs => "Add documentation version",
            ReleaseStep::BumpManifest => "Update manifest version",
            ReleaseStep::CreateMinorTag => "Create minor tag",
            ReleaseStep::MoveMajorTag => "Move major tag",
            ReleaseStep::MoveSentinelTag => "Move sentinel tag",
            ReleaseStep::Push => "Push",
        }
    }
}

/// What a release did (or, in simulation, would have done)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    pub version: String,
    pub branch: String,
    pub minor_tag: String,
    pub major_tag: String,
    /// Set when the sentinel tag was moved.
    pub sentinel_tag: Option<String>,
    pub pushed_refs: Vec<String>,
    pub rewritten_files: Vec<PathBuf>,
    pub mode: WriteMode,
}

/// Commit messages for the three release commits.
pub fn commit_message(step: ReleaseStep, version: &Version) -> Option<String> {
    let raw = version.raw();
    match step {
        ReleaseStep::PinWorkflows => Some(format!("chore(version): bump action version to {}", raw)),
        ReleaseStep::SnapshotDocs => Some(format!("chore(docs): add version {}", raw)),
        ReleaseStep::BumpManifest => Some(format!(
            "chore(version): bump package.json version to {}",
            raw
        )),
        _ => None,
    }
}

/// Applies a validated release to the working tree and remote.
pub struct ReleaseOrchestrator<'a, R: CommandRunner> {
    runner: &'a R,
    config: &'a Config,
}

impl<'a, R: CommandRunner> ReleaseOrchestrator<'a, R> {
    pub fn new(runner: &'a R, config: &'a Config) -> Self {
        ReleaseOrchestrator { runner, config }
    }

    /// Run every step in order. Stops at the first failure.
    pub fn publish(
        &self,
        version: &Version,
        target: &ReleaseTarget,
        branch: &Branch,
    ) -> Result<ReleaseReport> {
        let mut report = ReleaseReport {
            version: version.raw().to_string(),
            branch: branch.name.clone(),
            minor_tag: version.tag_name(),
            major_tag: target.target_major_label.clone(),
            sentinel_tag: None,
            pushed_refs: Vec::new(),
            rewritten_files: Vec::new(),
            mode: self.runner.mode(),
        };

        for step in ReleaseStep::ALL {
            if step == ReleaseStep::MoveSentinelTag && !target.is_latest_branch {
                debug!("sentinel tag stays in place on {}", branch.name);
                continue;
            }

            ui::display_status(step.label());
            self.apply(step, version, target, branch, &mut report)
                .map_err(|e| PublishError::step(step.label(), e))?;
        }

        info!(version = %report.version, tag = %report.minor_tag, "release published");
        Ok(report)
    }

    fn apply(
        &self,
        step: ReleaseStep,
        version: &Version,
        target: &ReleaseTarget,
        branch: &Branch,
        report: &mut ReleaseReport,
    ) -> Result<()> {
        match step {
            ReleaseStep::PinWorkflows => {
                let written = rewrite::rewrite_workflows(
                    self.runner,
                    &self.config.workflows.dir,
                    &self.config.workflows.action,
                    &version.tag_name(),
                )?;
                report.rewritten_files.extend(written);
                self.commit(step, version)
            }
            ReleaseStep::SnapshotDocs => {
                DocsSnapshot::new(&self.config.docs).snapshot(self.runner, version.raw())?;
                self.commit(step, version)
            }
            ReleaseStep::BumpManifest => {
                let path = &self.config.manifest.path;
                if rewrite::rewrite_manifest(self.runner, path, &version.number())? {
                    report.rewritten_files.push(path.clone());
                }
                self.commit(step, version)
            }
            ReleaseStep::CreateMinorTag => {
                self.git(["tag".to_string(), version.tag_name()])
            }
            ReleaseStep::MoveMajorTag => self.git([
                "tag".to_string(),
                "-f".to_string(),
                target.target_major_label.clone(),
            ]),
            ReleaseStep::MoveSentinelTag => {
                self.git([
                    "tag".to_string(),
                    "-f".to_string(),
                    self.config.sentinel_tag.clone(),
                ])?;
                report.sentinel_tag = Some(self.config.sentinel_tag.clone());
                Ok(())
            }
            ReleaseStep::Push => {
                let refs = push_refs(version, target, branch, &self.config.sentinel_tag);
                let args = ["push".to_string(), self.config.remote.clone()]
                    .into_iter()
                    .chain(refs.iter().cloned());
                self.git(args)?;
                report.pushed_refs = refs;
                Ok(())
            }
        }
    }

    /// Always records a commit, even when the step left nothing staged.
    fn commit(&self, step: ReleaseStep, version: &Version) -> Result<()> {
        let message = commit_message(step, version).unwrap_or_default();
        self.git(["add", "."])?;
        self.git([
            "commit".to_string(),
            "--allow-empty".to_string(),
            "-m".to_string(),
            message,
        ])
    }

    fn git<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runner.run(&Invocation::git(args)).map(|_| ())
    }
}

/// Branch, minor tag, major tag and, on the sentinel's line, the sentinel.
pub fn push_refs(
    version: &Version,
    target: &ReleaseTarget,
    branch: &Branch,
    sentinel_tag: &str,
) -> Vec<String> {
    let mut refs = vec![
        branch.name.clone(),
        version.tag_name(),
        target.target_major_label.clone(),
    ];
    if target.is_latest_branch {
        refs.push(sentinel_tag.to_string());
    }
    refs
}
