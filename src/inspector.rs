//! Read-only inspection of the tag graph.
//!
//! Resolves which major line a release extends and validates the proposed
//! version against it. Only [InvocationKind::Query](crate::runner::InvocationKind)
//! commands are issued, so inspection behaves the same in every write mode.

use tracing::debug;

use crate::domain::tag::{is_major_tag, major_number};
use crate::domain::{Branch, ReleaseTarget, TagRef, Version};
use crate::error::{PublishError, Result};
use crate::runner::{CommandRunner, Invocation};

/// Name of the branch currently checked out.
pub fn current_branch<R: CommandRunner>(runner: &R) -> Result<String> {
    runner.run(&Invocation::git_query(["rev-parse", "--abbrev-ref", "HEAD"]))
}

/// Queries tags through a [CommandRunner].
pub struct TagGraphInspector<'a, R: CommandRunner> {
    runner: &'a R,
    sentinel_tag: &'a str,
}

impl<'a, R: CommandRunner> TagGraphInspector<'a, R> {
    pub fn new(runner: &'a R, sentinel_tag: &'a str) -> Self {
        TagGraphInspector {
            runner,
            sentinel_tag,
        }
    }

    /// Resolve the release target for `branch` and check `version` against it.
    ///
    /// Fails with a version consistency error if the major component differs from
    /// the target major tag, or if the version does not move past the newest
    /// minor tag on that line.
    pub fn resolve_target(&self, branch: &Branch, version: &Version) -> Result<ReleaseTarget> {
        let target = self.inspect(branch)?;
        check_major(version, &target.target_major_label)?;
        if let Some(latest) = &target.latest_minor_tag {
            check_monotonic(version, latest)?;
        }
        Ok(target)
    }

    /// Locate the target line without validating any version.
    pub fn inspect(&self, branch: &Branch) -> Result<ReleaseTarget> {
        let (anchor_name, is_latest_branch) = match branch.release_label() {
            Some(label) => {
                if major_number(label).is_none() {
                    return Err(PublishError::version_consistency(format!(
                        "Release branch '{}' does not name a major tag like v2",
                        branch.name
                    )));
                }
                (label, false)
            }
            None if branch.follows_sentinel() => (self.sentinel_tag, true),
            None => {
                return Err(PublishError::branch_policy(format!(
                    "Branch '{}' cannot be published",
                    branch.name
                )))
            }
        };

        let anchor = self.find_tag(anchor_name)?;
        let tags = self.tags_at(&anchor.commit_hash)?;
        debug!(anchor = %anchor.name, commit = %anchor.commit_hash, ?tags, "inspected tag graph");

        let target_major_label = if is_latest_branch {
            tags.iter()
                .find(|tag| is_major_tag(tag))
                .cloned()
                .ok_or_else(|| {
                    PublishError::tag_resolution(format!(
                        "No major tag (vN) points at the commit tagged '{}' ({})",
                        anchor.name, anchor.commit_hash
                    ))
                })?
        } else {
            anchor.name.clone()
        };

        let line_major = major_number(&target_major_label);
        let latest_minor_tag = tags
            .iter()
            .filter_map(|tag| Version::from_tag(tag))
            .filter(|v| Some(v.major()) == line_major)
            .max_by_key(|v| (v.minor(), v.patch()));

        Ok(ReleaseTarget {
            target_major_label,
            is_latest_branch,
            latest_minor_tag,
            anchor,
        })
    }

    /// Resolve an existing tag to the commit it points at.
    fn find_tag(&self, name: &str) -> Result<TagRef> {
        let listed = self
            .runner
            .run(&Invocation::git_query(["tag", "--list", name]))?;
        if !listed.lines().any(|line| line.trim() == name) {
            return Err(PublishError::tag_resolution(format!(
                "Tag '{}' does not exist; the release line must be created manually first",
                name
            )));
        }

        let commit = self
            .runner
            .run(&Invocation::git_query(["rev-list", "-n", "1", name]))?;
        if commit.is_empty() {
            return Err(PublishError::tag_resolution(format!(
                "Tag '{}' does not point at a commit",
                name
            )));
        }

        Ok(TagRef::new(name, commit))
    }

    fn tags_at(&self, commit: &str) -> Result<Vec<String>> {
        let output = self
            .runner
            .run(&Invocation::git_query(["tag", "--points-at", commit]))?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// The proposed major must equal the target major tag's number.
pub fn check_major(version: &Version, target_major_label: &str) -> Result<()> {
    let target = major_number(target_major_label).ok_or_else(|| {
        PublishError::version_consistency(format!(
            "Target major '{}' is not a major tag like v2",
            target_major_label
        ))
    })?;

    if version.major() != target {
        return Err(PublishError::version_consistency(format!(
            "The new version should have the same major version as the latest tag ({}), got {}",
            target_major_label,
            version.number()
        )));
    }
    Ok(())
}

/// The proposed version must move past the current head of the line.
pub fn check_monotonic(version: &Version, latest: &Version) -> Result<()> {
    if !version.supersedes(latest) {
        return Err(PublishError::version_consistency(format!(
            "The new version should be greater than the latest tag ({}), got {}",
            latest.tag_name(),
            version.number()
        )));
    }
    Ok(())
}
