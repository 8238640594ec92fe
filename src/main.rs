use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use release_publish::cli::orchestration;
use release_publish::config::{self, RunOptions};
use release_publish::orchestrator::ReleaseReport;
use release_publish::runner::SystemRunner;
use release_publish::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-publish",
    version,
    about = "Cut a new release: bump pinned versions, snapshot docs, tag and push"
)]
struct Args {
    /// Version to release, e.g. 2.5.0 or v2.5.0
    #[arg(id = "release_version", value_name = "VERSION")]
    version: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short = 'C', long = "dir", default_value = ".", help = "Repository working tree")]
    dir: PathBuf,

    #[arg(long, help = "Print mutating commands instead of running them (also DRY_RUN=true)")]
    dry_run: bool,

    #[arg(long, help = "Show diagnostics for failed commands (also DEBUG=true)")]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let options = RunOptions::from_env().with_flags(args.debug, args.dry_run);
    init_tracing(options);

    match run(&args, options) {
        Ok(report) => {
            ui::display_release_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            if options.debug {
                ui::display_detail(&format!("{:?}", e));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, options: RunOptions) -> Result<ReleaseReport> {
    let config = config::load_config(args.config.as_deref(), &args.dir)
        .context("Failed to load configuration")?;

    if options.write_mode.is_simulated() {
        ui::display_simulation_notice();
    }

    let runner = SystemRunner::new(&args.dir, options);
    let report =
        orchestration::run_publish_workflow(&runner, &config, args.version.as_deref())?;
    Ok(report)
}

fn init_tracing(options: RunOptions) {
    let level = if options.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
