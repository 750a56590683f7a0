use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::RunReport;

/// Render the end-of-run submission summary.
pub fn render(report: &RunReport, root_project: &str, verbose: bool, quiet: bool) -> Result<()> {
    let total = report.outcomes.len();
    let submitted = report.succeeded();
    let failed = report.failed();

    if quiet {
        println!(
            "Targets: {}  Ok: {}  Failed: {}  Packages: {}",
            total,
            submitted.to_string().green(),
            failed.to_string().red(),
            report.total_packages(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "gradle-submitr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Root project: {}\n", root_project);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Targets processed  : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  Ok              : {:>4}", "✓".green(), submitted)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Failed          : {:>4}", "✗".red(), failed)
    );
    println!(
        " │  {:<48} │",
        format!("Packages submitted : {}", report.total_packages())
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    render_table(report);

    if verbose {
        for outcome in report.outcomes.iter().filter(|o| !o.packages.is_empty()) {
            println!(
                "\n {} {} ({} packages):",
                "→".cyan(),
                outcome.project,
                outcome.packages.len()
            );
            for package in &outcome.packages {
                println!("    {}  {}", package.name, package.version);
            }
        }
        println!();
    }

    Ok(())
}

fn render_table(report: &RunReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Project").add_attribute(Attribute::Bold),
            Cell::new("Module").add_attribute(Attribute::Bold),
            Cell::new("Packages").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Detail").add_attribute(Attribute::Bold),
        ]);

    for outcome in &report.outcomes {
        let (status, status_color) = if outcome.success {
            ("✓ ok", Color::Green)
        } else {
            ("✗ failed", Color::Red)
        };

        table.add_row(vec![
            Cell::new(&outcome.project),
            Cell::new(outcome.module.as_deref().unwrap_or("(root)")),
            Cell::new(outcome.packages.len()).set_alignment(CellAlignment::Right),
            Cell::new(status)
                .fg(status_color)
                .set_alignment(CellAlignment::Center),
            Cell::new(&outcome.detail),
        ]);
    }

    println!("{}", table);
}
