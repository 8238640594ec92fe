use crate::config::BranchesConfig;

/// How a branch relates to the release policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchKind {
    /// The default branch; releases continue the line the sentinel tag points at.
    Main,
    /// `release/<major label>`, e.g. `release/v2`.
    Release(String),
    /// An explicitly allow-listed branch, treated like main.
    Allowed(String),
    Rejected,
}

/// Represents the git branch a release is cut from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub kind: BranchKind,
}

impl Branch {
    /// Classify a branch name against the configured policy.
    pub fn classify(name: impl Into<String>, policy: &BranchesConfig) -> Self {
        let name = name.into();

        let kind = if name == policy.main {
            BranchKind::Main
        } else if let Some(label) = name.strip_prefix(policy.release_prefix.as_str()) {
            BranchKind::Release(label.to_string())
        } else if policy.allowed.iter().any(|allowed| *allowed == name) {
            BranchKind::Allowed(name.clone())
        } else {
            BranchKind::Rejected
        };

        Branch { name, kind }
    }

    /// Main and allow-listed branches publish on the line the sentinel tag marks.
    pub fn follows_sentinel(&self) -> bool {
        matches!(self.kind, BranchKind::Main | BranchKind::Allowed(_))
    }

    /// The major label embedded in a release branch name.
    pub fn release_label(&self) -> Option<&str> {
        match &self.kind {
            BranchKind::Release(label) => Some(label.as_str()),
            _ => None,
        }
    }
}
