use regex::Regex;
use std::sync::OnceLock;

use super::version::Version;

/// A tag and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    pub commit_hash: String,
}

impl TagRef {
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        TagRef {
            name: name.into(),
            commit_hash: commit_hash.into(),
        }
    }
}

fn major_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^v(\d+)$").expect("valid major tag regex"))
}

/// Numeric value of a bare major label (`v3` -> 3).
pub fn major_number(label: &str) -> Option<u64> {
    major_pattern()
        .captures(label)
        .and_then(|captures| captures[1].parse().ok())
}

/// Whether `tag` is a bare major tag such as `v3`.
pub fn is_major_tag(tag: &str) -> bool {
    major_number(tag).is_some()
}

/// Where a release lands, resolved from the branch and the tags in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTarget {
    /// Major tag that will be force-moved, e.g. `v2`.
    pub target_major_label: String,
    /// Releasing on the line the sentinel tag marks; the sentinel moves too.
    pub is_latest_branch: bool,
    /// Current head of the line, if any minor release exists.
    pub latest_minor_tag: Option<Version>,
    /// The tag whose commit was inspected.
    pub anchor: TagRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_number() {
        assert_eq!(major_number("v3"), Some(3));
        assert_eq!(major_number("v12"), Some(12));
        assert_eq!(major_number("3"), None);
        assert_eq!(major_number("v3.1.0"), None);
        assert_eq!(major_number("latest"), None);
        assert_eq!(major_number("vnext"), None);
    }

    #[test]
    fn test_is_major_tag() {
        assert!(is_major_tag("v1"));
        assert!(!is_major_tag("v1.0.0"));
    }
}
