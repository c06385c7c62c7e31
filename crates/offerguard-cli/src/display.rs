//! Vertical card display for analysis verdicts.
//!
//! Lays out a [`ResultScreen`] the way the result page groups it: headline,
//! document information, company information, warnings, actions.

use std::io::{self, Write};

use offerguard_core::ResultScreen;
use offerguard_core::report::{ReportAction, Verdict, VerdictReport};

const BAR_WIDTH: usize = 20;

// ── Public API ──

/// Print a result screen as a card on stdout.
pub fn print_result_card(screen: &ResultScreen) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result_card(&mut out, screen)?;
    out.flush()?;
    Ok(())
}

pub fn write_result_card(out: &mut impl Write, screen: &ResultScreen) -> io::Result<()> {
    match screen {
        ResultScreen::Report(report) => write_report(out, report),
        ResultScreen::NoResults(view) => {
            writeln!(out, "=== {} ===", view.message)?;
            writeln!(out)?;
            write_actions(out, &[view.action])
        }
    }
}

// ── Section rendering ──

fn write_report(out: &mut impl Write, report: &VerdictReport) -> io::Result<()> {
    let marker = match report.headline.verdict {
        Verdict::Legitimate => "[OK]",
        Verdict::Suspicious => "[!!]",
    };
    writeln!(out, "=== {} {} ===", marker, report.headline.title)?;
    writeln!(out, "Confidence Score: {}", report.headline.confidence)?;
    writeln!(out)?;

    writeln!(out, "Document Information")?;
    writeln!(out, "  {:<20} {}", "Document Type", report.document_type)?;
    writeln!(
        out,
        "  {:<20} {} {}",
        "Legitimacy Score",
        bar(report.legitimacy.value),
        report.legitimacy.text
    )?;
    writeln!(out)?;

    writeln!(out, "Company Information")?;
    writeln!(out, "  {:<20} {}", "Company Name", report.company.name)?;
    writeln!(
        out,
        "  {:<20} {} ({})",
        "Domain",
        report.company.domain,
        report.company.badge.label()
    )?;
    writeln!(out)?;

    if let Some(warnings) = &report.warnings {
        writeln!(out, "Warnings ({})", warnings.len())?;
        for warning in warnings {
            writeln!(out, "  ! {warning}")?;
        }
        writeln!(out)?;
    }

    write_actions(out, &report.actions)?;
    writeln!(out, "Result ID: {}", report.result_id)
}

fn write_actions(out: &mut impl Write, actions: &[ReportAction]) -> io::Result<()> {
    let labels: Vec<String> = actions.iter().map(|a| format!("[{}]", a.label())).collect();
    writeln!(out, "{}", labels.join("  "))
}

// ── Helpers ──

/// Proportional bar for a 0-100 value.
fn bar(value: f64) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
