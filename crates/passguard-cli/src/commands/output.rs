//! Shared output formatting for check results.

use anyhow::Result;
use passguard_core::{ValidationDiagnostic, ValidationReport};

use crate::OutputFormat;

/// Print a report in the specified format.
pub fn print(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &ValidationReport) {
    for error in &report.errors {
        let diagnostic = miette::Report::new(ValidationDiagnostic::from(error));
        println!("{diagnostic:?}");
        println!("  = weight: {}", error.weight);
        println!();
    }

    for rule in &report.rules_failed {
        println!("\x1b[33mwarning\x1b[0m: {rule} could not be evaluated and was skipped");
    }

    let summary_color = if report.is_valid() {
        "\x1b[32m"
    } else {
        "\x1b[31m"
    };

    println!(
        "{}Found {} violation(s) in {} rule(s)\x1b[0m",
        summary_color,
        report.errors.len(),
        report.rules_checked
    );
}

fn print_json(report: &ValidationReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &ValidationReport) {
    for error in &report.errors {
        println!(
            "{}: [{}] {} (weight {})",
            error.rule, error.code, error.message, error.weight
        );
    }
}
