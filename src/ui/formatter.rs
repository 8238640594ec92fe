//! Pure formatting functions for UI output.
//!
//! Builders return plain strings so they can be tested; the `display_*`
//! functions add color and print.

use console::style;

use crate::orchestrator::ReleaseReport;
use crate::runner::WriteMode;

/// Format and print an error message in red on stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", style(message).red());
}

/// Raw diagnostic detail, shown in debug mode.
pub fn display_detail(detail: &str) {
    eprintln!("{}", style(detail).dim());
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Banner printed before a simulated release.
pub fn display_simulation_notice() {
    println!(
        "{} {}",
        style("DRY RUN:").yellow().bold(),
        "mutating commands are printed, not executed"
    );
}

/// Lines summarizing a finished release.
pub fn format_release_summary(report: &ReleaseReport) -> Vec<String> {
    let mut lines = vec![
        format!("Version:  {}", report.version),
        format!("Branch:   {}", report.branch),
        format!("New tag:  {}", report.minor_tag),
        format!("Moved:    {}", moved_tags(report)),
        format!("Pushed:   {}", report.pushed_refs.join(" ")),
    ];

    if !report.rewritten_files.is_empty() {
        let files: Vec<String> = report
            .rewritten_files
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        lines.push(format!("Rewrote:  {}", files.join(", ")));
    }

    lines
}

fn moved_tags(report: &ReleaseReport) -> String {
    match &report.sentinel_tag {
        Some(sentinel) => format!("{}, {}", report.major_tag, sentinel),
        None => report.major_tag.clone(),
    }
}

/// Print the release summary.
pub fn display_release_summary(report: &ReleaseReport) {
    let heading = match report.mode {
        WriteMode::Apply => format!("Published {}", report.minor_tag),
        WriteMode::Simulate => format!("Simulated release of {}", report.minor_tag),
    };
    println!();
    display_success(&style(heading).bold().to_string());
    for line in format_release_summary(report) {
        println!("  {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(sentinel: Option<&str>) -> ReleaseReport {
        ReleaseReport {
            version: "v3.2.0".to_string(),
            branch: "main".to_string(),
            minor_tag: "v3.2.0".to_string(),
            major_tag: "v3".to_string(),
            sentinel_tag: sentinel.map(str::to_string),
            pushed_refs: vec![
                "main".to_string(),
                "v3.2.0".to_string(),
                "v3".to_string(),
                "latest".to_string(),
            ],
            rewritten_files: vec![PathBuf::from("package.json")],
            mode: WriteMode::Apply,
        }
    }

    #[test]
    fn test_summary_lines() {
        let lines = format_release_summary(&report(Some("latest")));
        assert_eq!(lines[2], "New tag:  v3.2.0");
        assert_eq!(lines[3], "Moved:    v3, latest");
        assert_eq!(lines[4], "Pushed:   main v3.2.0 v3 latest");
        assert_eq!(lines[5], "Rewrote:  package.json");
    }

    #[test]
    fn test_summary_without_rewrites() {
        let mut r = report(None);
        r.rewritten_files.clear();
        let lines = format_release_summary(&r);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[3], "Moved:    v3");
    }

    #[test]
    fn test_display_functions() {
        // Visual verification - output goes to stdout/stderr
        display_error("test error");
        display_success("test success");
        display_status("test status");
    }
}
