//! Terminal output: report printing and coloured status labels.
//!
//! Colours come from the `console` crate and are dropped automatically
//! when stdout is not a terminal. Files always get [`Palette::plain`].

use std::path::Path;

use console::Style;

use crate::cli::ReportFormat;
use crate::monitor::Classification;

/// Styles applied to status labels when rendering a report.
pub struct Palette {
    ok: Style,
    warning: Style,
    error: Style,
    incomplete: Style,
}

impl Palette {
    /// Green/yellow/red labels for the console.
    pub fn terminal() -> Self {
        Self {
            ok: Style::new().green().bold(),
            warning: Style::new().yellow().bold(),
            error: Style::new().red().bold(),
            incomplete: Style::new().yellow(),
        }
    }

    /// No styling at all.
    pub fn plain() -> Self {
        Self {
            ok: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            incomplete: Style::new(),
        }
    }

    pub fn classification(&self, class: Classification) -> String {
        let style = match class {
            Classification::Ok => &self.ok,
            Classification::Warning => &self.warning,
            Classification::Error => &self.error,
        };
        style.apply_to(class).to_string()
    }

    pub fn incomplete(&self) -> String {
        self.incomplete.apply_to("INCOMPLETE").to_string()
    }
}

pub fn print_report(content: &str) {
    print!("{content}");
}

/// Confirms the report file. With JSON output the confirmation goes to
/// stderr so stdout stays a single JSON document.
pub fn print_saved(path: &Path, format: ReportFormat) {
    let line = saved_message(path);
    match format {
        ReportFormat::Text => println!("{line}"),
        ReportFormat::Json => eprintln!("{line}"),
    }
}

fn saved_message(path: &Path) -> String {
    format!("Report saved to {}", path.display())
}

/// Prints a fatal error and its cause chain to stderr.
pub fn print_error(err: &anyhow::Error) {
    let red = Style::new().red().bold().for_stderr();
    eprintln!("{} {err:#}", red.apply_to("Error:"));
}
