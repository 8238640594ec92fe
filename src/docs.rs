//! The documentation site is an external tool. All this crate knows is the
//! command that snapshots the current docs under a version label.

use crate::config::DocsConfig;
use crate::error::{PublishError, Result};
use crate::runner::{CommandRunner, Invocation};

/// Opaque "add a documentation snapshot for this version" collaborator
pub struct DocsSnapshot<'a> {
    command: &'a [String],
}

impl<'a> DocsSnapshot<'a> {
    pub fn new(config: &'a DocsConfig) -> Self {
        DocsSnapshot {
            command: &config.command,
        }
    }

    /// The command for `version`, which is passed as the final argument.
    pub fn invocation(&self, version: &str) -> Result<Invocation> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| PublishError::config("docs.command must not be empty"))?;

        let args = args.iter().cloned().chain(std::iter::once(version.to_string()));
        Ok(Invocation::mutation(program, args))
    }

    /// Mutates the local file tree (in apply mode).
    pub fn snapshot<R: CommandRunner>(&self, runner: &R, version: &str) -> Result<String> {
        runner.run(&self.invocation(version)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{MockRunner, WriteMode};

    #[test]
    fn test_default_invocation() {
        let config = DocsConfig::default();
        let inv = DocsSnapshot::new(&config).invocation("v1.2.3").unwrap();
        assert_eq!(inv.to_string(), "npm run docusaurus docs:version v1.2.3");
        assert!(inv.is_mutation());
    }

    #[test]
    fn test_custom_command() {
        let config = DocsConfig {
            command: vec!["./scripts/snapshot-docs".to_string()],
        };
        let inv = DocsSnapshot::new(&config).invocation("2.0.0").unwrap();
        assert_eq!(inv.to_string(), "./scripts/snapshot-docs 2.0.0");
    }

    #[test]
    fn test_empty_command() {
        let config = DocsConfig { command: vec![] };
        assert!(DocsSnapshot::new(&config).invocation("1.0.0").is_err());
    }

    #[test]
    fn test_snapshot_is_simulated() {
        let config = DocsConfig::default();
        let runner = MockRunner::new(WriteMode::Simulate);
        let out = DocsSnapshot::new(&config).snapshot(&runner, "1.0.0").unwrap();
        assert_eq!(out, "");
        assert_eq!(
            runner.mutations(),
            vec!["npm run docusaurus docs:version 1.0.0".to_string()]
        );
    }
}
