//! Domain types - pure values independent of command execution

pub mod branch;
pub mod tag;
pub mod version;

pub use branch::{Branch, BranchKind};
pub use tag::{ReleaseTarget, TagRef};
pub use version::Version;
