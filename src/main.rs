mod cli;
mod config;
mod error;
mod monitor;
mod parser;
mod report;
mod ui;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::MonitorConfig;
use monitor::JobTracker;
use report::Report;
use ui::Palette;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    // Level comes from --verbose only; the environment is not consulted.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(if cli.verbose {
            "jobwatch=debug"
        } else {
            "jobwatch=info"
        }))
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(err) = run(cli) {
        ui::print_error(&err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = MonitorConfig::load(cli.config.as_deref())?.with_overrides(
        cli.warning_threshold,
        cli.error_threshold,
        cli.output,
    );
    let thresholds = config.thresholds()?;

    // The whole log is consumed before anything is printed or written.
    let mut tracker = JobTracker::new();
    let reader = parser::open_log(&cli.log_path)?;
    tracker.ingest_all(parser::records(reader, &cli.log_path))?;

    // Rendering and the file write happen before any console output, so a
    // failed write leaves no partial report behind.
    let report = Report::build(&tracker, thresholds);
    let console_text = report.render(cli.format, &Palette::terminal())?;
    report::write_report(
        &config.output_path,
        &report.render(cli.format, &Palette::plain())?,
    )?;

    ui::print_report(&console_text);
    ui::print_saved(&config.output_path, cli.format);

    Ok(())
}
