use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PublishError, Result};
use crate::runner::WriteMode;

/// Name of the configuration file looked up in the working tree.
pub const CONFIG_FILE_NAME: &str = "publish.toml";

/// Represents the complete configuration for release-publish.
///
/// Every field has a default, so an empty file (or no file at all) describes the
/// stock pipeline repository layout.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_sentinel_tag")]
    pub sentinel_tag: String,

    #[serde(default)]
    pub branches: BranchesConfig,

    #[serde(default)]
    pub workflows: WorkflowsConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub docs: DocsConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_sentinel_tag() -> String {
    "latest".to_string()
}

/// Branches a release may be cut from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchesConfig {
    #[serde(default = "default_main_branch")]
    pub main: String,

    #[serde(default = "default_release_prefix")]
    pub release_prefix: String,

    #[serde(default = "default_allowed_branches")]
    pub allowed: Vec<String>,
}

fn default_main_branch() -> String {
    "main".to_string()
}

fn default_release_prefix() -> String {
    "release/".to_string()
}

fn default_allowed_branches() -> Vec<String> {
    vec!["feature/docusaurus".to_string()]
}

impl Default for BranchesConfig {
    fn default() -> Self {
        BranchesConfig {
            main: default_main_branch(),
            release_prefix: default_release_prefix(),
            allowed: default_allowed_branches(),
        }
    }
}

/// Workflow files whose pinned action reference follows each release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WorkflowsConfig {
    #[serde(default = "default_workflows_dir")]
    pub dir: PathBuf,

    /// `<org>/<repo>` of the action consumers pin with `uses:`
    #[serde(default = "default_action")]
    pub action: String,
}

fn default_workflows_dir() -> PathBuf {
    PathBuf::from(".github/workflows")
}

fn default_action() -> String {
    "infinum/js-pipeline".to_string()
}

impl Default for WorkflowsConfig {
    fn default() -> Self {
        WorkflowsConfig {
            dir: default_workflows_dir(),
            action: default_action(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_path")]
    pub path: PathBuf,
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("package.json")
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            path: default_manifest_path(),
        }
    }
}

/// The documentation snapshot command. The version is appended as the last argument.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DocsConfig {
    #[serde(default = "default_docs_command")]
    pub command: Vec<String>,
}

fn default_docs_command() -> Vec<String> {
    ["npm", "run", "docusaurus", "docs:version"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for DocsConfig {
    fn default() -> Self {
        DocsConfig {
            command: default_docs_command(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            sentinel_tag: default_sentinel_tag(),
            branches: BranchesConfig::default(),
            workflows: WorkflowsConfig::default(),
            manifest: ManifestConfig::default(),
            docs: DocsConfig::default(),
        }
    }
}

impl Config {
    fn validate(self) -> Result<Self> {
        if self.docs.command.is_empty() {
            return Err(PublishError::config("docs.command must not be empty"));
        }
        if self.sentinel_tag.trim().is_empty() {
            return Err(PublishError::config("sentinel_tag must not be empty"));
        }
        if self.branches.release_prefix.is_empty() {
            return Err(PublishError::config(
                "branches.release_prefix must not be empty",
            ));
        }
        Ok(self)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `publish.toml` in the working tree
/// 3. `.publish.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&Path>, work_dir: &Path) -> Result<Config> {
    let local = work_dir.join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_path.exists() {
            fs::read_to_string(user_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| PublishError::config(e.to_string()))?;
    config.validate()
}

/// Immutable per-run switches, resolved once at startup and handed to the
/// runner and orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Emit diagnostics for failed commands and full error chains.
    pub debug: bool,
    pub write_mode: WriteMode,
}

pub const DEBUG_ENV: &str = "DEBUG";
pub const DRY_RUN_ENV: &str = "DRY_RUN";

impl RunOptions {
    pub fn new(debug: bool, write_mode: WriteMode) -> Self {
        RunOptions { debug, write_mode }
    }

    /// Reads `DEBUG` and `DRY_RUN` from the environment.
    pub fn from_env() -> Self {
        let write_mode = if env_flag(DRY_RUN_ENV) {
            WriteMode::Simulate
        } else {
            WriteMode::Apply
        };
        RunOptions::new(env_flag(DEBUG_ENV), write_mode)
    }

    /// Command-line switches can only turn modes on.
    pub fn with_flags(mut self, debug: bool, dry_run: bool) -> Self {
        self.debug |= debug;
        if dry_run {
            self.write_mode = WriteMode::Simulate;
        }
        self
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
