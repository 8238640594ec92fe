//! Main workflow orchestration logic
//!
//! Wires validation and the mutation sequence together so the binary only has
//! to parse arguments and map the outcome to an exit code.

use tracing::debug;

use crate::config::Config;
use crate::domain::{Branch, ReleaseTarget, Version};
use crate::error::Result;
use crate::inspector::{self, TagGraphInspector};
use crate::orchestrator::{ReleaseOrchestrator, ReleaseReport};
use crate::resolver;
use crate::runner::CommandRunner;

/// A release that passed every check and has not mutated anything yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRelease {
    pub version: Version,
    pub branch: Branch,
    pub target: ReleaseTarget,
}

/// Validate a proposed release against the checked-out branch and tag state.
///
/// Only read-only queries are issued, so calling this repeatedly without
/// mutations in between yields the same result.
pub fn validate_release<R: CommandRunner>(
    runner: &R,
    config: &Config,
    raw_version: Option<&str>,
) -> Result<ValidatedRelease> {
    let branch_name = inspector::current_branch(runner)?;
    debug!(branch = %branch_name, "resolved current branch");

    let (version, branch) = resolver::resolve(&branch_name, raw_version, &config.branches)?;
    let target =
        TagGraphInspector::new(runner, &config.sentinel_tag).resolve_target(&branch, &version)?;
    debug!(?target, "resolved release target");

    Ok(ValidatedRelease {
        version,
        branch,
        target,
    })
}

/// Validate, then run the full release sequence.
pub fn run_publish_workflow<R: CommandRunner>(
    runner: &R,
    config: &Config,
    raw_version: Option<&str>,
) -> Result<ReleaseReport> {
    let release = validate_release(runner, config, raw_version)?;
    ReleaseOrchestrator::new(runner, config).publish(
        &release.version,
        &release.target,
        &release.branch,
    )
}
