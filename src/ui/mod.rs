//! User-facing output.
//!
//! Diagnostics go through `tracing`; this module is for what the user is meant
//! to read.

pub mod formatter;

pub use formatter::{
    display_detail, display_error, display_release_summary, display_simulation_notice,
    display_status, display_success, format_release_summary,
};
