use anyhow::Result;
use colored::*;
use datapackage_core::{CheckStatus, DetailRow, ValidationReport};

pub fn print_validation_report(report: &ValidationReport, format: &str) -> Result<()> {
    match format {
        "json" => print_json_report(report)?,
        _ => print_text_report(report),
    }
    Ok(())
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    println!("\n{}", "Checks:".bold());
    for outcome in &report.outcomes {
        let location = outcome.location();
        match outcome.status {
            CheckStatus::Passed => {
                println!("  {} {} {}", "✓".green(), outcome.check, location.dimmed())
            }
            CheckStatus::Failed => println!(
                "  {} {} {}: {}",
                "✗".red(),
                outcome.check,
                location,
                outcome.message.red()
            ),
            CheckStatus::Error => println!(
                "  {} {} {}: {}",
                "!".yellow().bold(),
                outcome.check,
                location,
                outcome.message.yellow()
            ),
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Checks passed:  {}", report.count(CheckStatus::Passed));
    println!("  Checks failed:  {}", report.count(CheckStatus::Failed));
    println!("  Checks errored: {}", report.count(CheckStatus::Error));
    println!(
        "  Rows validated: {} in {} tables ({} ms)",
        report.stats.rows_validated, report.stats.tables_loaded, report.stats.duration_ms
    );

    let details = report.detail_rows();
    if !details.is_empty() {
        println!("\n{}", "Details:".bold());
        for line in detail_table(&details) {
            println!("  {}", line);
        }
    }
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Formats detail rows as left-aligned columns under a header line.
fn detail_table(rows: &[DetailRow]) -> Vec<String> {
    let mut widths = DetailRow::HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: [&str; 6]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(DetailRow::HEADERS)];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(rows.iter().map(|row| format_line(row.cells())));
    lines
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detail_table_aligns_columns() {
        let rows = vec![DetailRow {
            check: "is_unique".to_string(),
            table: "borehole".to_string(),
            column: "id".to_string(),
            row: "2".to_string(),
            value: "1".to_string(),
            message: "Duplicate values".to_string(),
        }];

        let lines = detail_table(&rows);

        assert_eq!(
            lines,
            vec![
                "check      table     column  row  value  message",
                "---------  --------  ------  ---  -----  ----------------",
                "is_unique  borehole  id      2    1      Duplicate values",
            ]
        );
    }
}
