//! Terminal output helpers shared by the commands
use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

use crate::bio::{MatureSequence, Precursor};
use crate::query::QueryOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Create a spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .map(|s| s.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), format!("Warning: {}", message).yellow());
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{} {}", "▶".cyan(), title.bold());
    println!("{}", "─".repeat(60).dimmed());
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Green))
            .collect::<Vec<_>>(),
    );
    table
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::DarkGrey)
    }
}

/// A record that can be listed as one table row
pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<Cell>;
}

impl TableRow for Precursor {
    fn headers() -> &'static [&'static str] {
        &["Accession", "Name", "Organism", "Loci", "Length", "High conf."]
    }

    fn cells(&self) -> Vec<Cell> {
        let loci = self
            .placements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        vec![
            Cell::new(&self.id),
            Cell::new(&self.name),
            Cell::new(&self.organism),
            Cell::new(if loci.is_empty() { "-".to_string() } else { loci }),
            Cell::new(self.len()),
            flag_cell(self.high_confidence),
        ]
    }
}

impl TableRow for MatureSequence {
    fn headers() -> &'static [&'static str] {
        &["Accession", "Name", "Arm", "Precursors", "Sequence", "High conf."]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::new(&self.id),
            Cell::new(&self.name),
            Cell::new(self.arm),
            Cell::new(self.precursor_ids().join(", ")),
            Cell::new(&self.sequence),
            flag_cell(self.high_confidence),
        ]
    }
}

pub fn print_records<T: TableRow>(records: &[&T]) {
    let mut table = new_table(T::headers());
    for record in records {
        table.add_row(record.cells());
    }
    println!("{}", table);
}

pub fn print_key_values(title: &str, rows: Vec<(&str, String)>) {
    let mut table = new_table(&[title, ""]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value).fg(Color::Green)]);
    }
    println!("{}", table);
}

/// Print a resolver outcome, one table per bucket when it is partitioned
pub fn print_outcome<T: TableRow + Serialize>(outcome: &QueryOutcome<&T>, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(outcome);
    }
    match outcome {
        QueryOutcome::Unified(records) => {
            if records.is_empty() {
                println!("{}", "No records matched.".dimmed());
            } else {
                print_records(records);
                println!("{} {}", "✓".green().bold(), format!("{} records", records.len()));
            }
        }
        QueryOutcome::Partitioned(buckets) => {
            print_warning("criteria contradict each other; showing each category separately");
            for (category, records) in buckets {
                print_section(&format!("{} ({})", category, records.len()));
                if !records.is_empty() {
                    print_records(records);
                }
            }
        }
    }
    Ok(())
}
