use regex::{Captures, Regex};
use std::fmt;
use std::sync::OnceLock;

use crate::error::{PublishError, Result};

/// Semantic version proposed for a release.
///
/// Only built by the resolver (from the CLI argument) or the inspector (from an
/// existing tag name). `raw` keeps the exact matched text, including an optional
/// leading `v`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    raw: String,
}

fn embedded_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"v?(\d+)\.(\d+)\.(\d+)").expect("valid version regex"))
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^v(\d+)\.(\d+)\.(\d+)$").expect("valid tag regex"))
}

impl Version {
    /// Extracts the first `v?<int>.<int>.<int>` occurring anywhere in `input`.
    pub(crate) fn extract(input: &str) -> Result<Self> {
        let captures = embedded_pattern().captures(input).ok_or_else(|| {
            PublishError::argument(format!(
                "'{}' does not contain a version like 1.2.3 or v1.2.3",
                input
            ))
        })?;
        Self::from_captures(&captures)
    }

    /// Parses a full minor tag name such as `v2.4.1`. Anything else is `None`.
    pub(crate) fn from_tag(tag: &str) -> Option<Self> {
        let captures = tag_pattern().captures(tag)?;
        Self::from_captures(&captures).ok()
    }

    fn from_captures(captures: &Captures<'_>) -> Result<Self> {
        let raw = captures[0].to_string();
        let component = |index: usize| {
            captures[index].parse::<u64>().map_err(|_| {
                PublishError::argument(format!("version component out of range in '{}'", raw))
            })
        };

        Ok(Version {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            raw: raw.clone(),
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// The text exactly as it was matched.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `<major>.<minor>.<patch>` without prefix.
    pub fn number(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// The immutable minor tag name for this version, `v<major>.<minor>.<patch>`.
    pub fn tag_name(&self) -> String {
        format!("v{}", self.number())
    }

    /// Whether this version may follow `previous` on the same major line.
    ///
    /// Minor is compared first; patch only breaks a tie. A higher minor with a
    /// lower patch is accepted.
    pub fn supersedes(&self, previous: &Version) -> bool {
        self.minor > previous.minor || (self.minor == previous.minor && self.patch > previous.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain() {
        let v = Version::extract("1.2.3").unwrap();
        assert_eq!((v.major(), v.minor(), v.patch()), (1, 2, 3));
        assert_eq!(v.raw(), "1.2.3");
    }

    #[test]
    fn test_extract_prefixed_keeps_raw() {
        let v = Version::extract("v3.2.0").unwrap();
        assert_eq!(v.raw(), "v3.2.0");
        assert_eq!(v.number(), "3.2.0");
        assert_eq!(v.tag_name(), "v3.2.0");
    }

    #[test]
    fn test_extract_embedded_first_match() {
        let v = Version::extract("release-v10.20.30-and-4.5.6").unwrap();
        assert_eq!((v.major(), v.minor(), v.patch()), (10, 20, 30));
        assert_eq!(v.raw(), "v10.20.30");
    }

    #[test]
    fn test_extract_leading_zeros() {
        let v = Version::extract("01.002.3").unwrap();
        assert_eq!((v.major(), v.minor(), v.patch()), (1, 2, 3));
        assert_eq!(v.tag_name(), "v1.2.3");
    }

    #[test]
    fn test_extract_missing() {
        for input in ["", "1.2", "v1", "latest", "a.b.c"] {
            assert!(
                matches!(Version::extract(input), Err(PublishError::Argument(_))),
                "expected argument error for '{}'",
                input
            );
        }
    }

    #[test]
    fn test_extract_overflow() {
        let result = Version::extract("1.99999999999999999999999.0");
        assert!(matches!(result, Err(PublishError::Argument(_))));
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(Version::from_tag("v2.4.1").unwrap().number(), "2.4.1");
        assert!(Version::from_tag("2.4.1").is_none());
        assert!(Version::from_tag("v2").is_none());
        assert!(Version::from_tag("v2.4.1-rc.1").is_none());
        assert!(Version::from_tag("latest").is_none());
    }

    #[test]
    fn test_supersedes_table() {
        let old = Version::from_tag("v1.2.3").unwrap();
        let cases = [
            ("1.3.0", true),
            ("1.2.4", true),
            ("1.2.3", false),
            ("1.2.2", false),
            ("1.1.9", false),
        ];
        for (proposed, expected) in cases {
            let new = Version::extract(proposed).unwrap();
            assert_eq!(new.supersedes(&old), expected, "proposed {}", proposed);
        }
    }

    #[test]
    fn test_display_is_raw() {
        assert_eq!(Version::extract("v1.0.0").unwrap().to_string(), "v1.0.0");
    }
}
