//! Turns the raw CLI input into validated domain values.

use crate::config::BranchesConfig;
use crate::domain::{Branch, BranchKind, Version};
use crate::error::{PublishError, Result};

/// Validate the branch against policy, then extract the proposed version.
///
/// Pure: no commands are run and nothing is read from disk.
pub fn resolve(
    branch_name: &str,
    raw_version: Option<&str>,
    policy: &BranchesConfig,
) -> Result<(Version, Branch)> {
    let branch = Branch::classify(branch_name, policy);
    if branch.kind == BranchKind::Rejected {
        return Err(PublishError::branch_policy(format!(
            "You can only publish from {} or {}* branches (current: '{}')",
            policy.main, policy.release_prefix, branch_name
        )));
    }

    let raw = raw_version
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| {
            PublishError::argument("The new version should be set as the first argument")
        })?;
    let version = Version::extract(raw)?;

    Ok((version, branch))
}
