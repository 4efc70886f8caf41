//! Result rendering: ASCII tables on stdout, or a JSON envelope.

use serde_json::json;

use crate::cli::OutputFormat;
use crate::commands::CommandResult;
use crate::error::CliError;

/// One renderable table: header row plus string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            title: None,
            headers,
            rows: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }
}

/// A block of printed output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Table(Table),
    Text(String),
}

pub fn render(result: &CommandResult, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            for (index, section) in result.sections.iter().enumerate() {
                if index > 0 {
                    println!();
                }
                match section {
                    Section::Table(table) => print!("{}", format_table(table)),
                    Section::Text(text) => println!("{text}"),
                }
            }
            Ok(())
        }
        OutputFormat::Json => {
            let envelope = json!({
                "meta": {
                    "request_id": result.request_id,
                    "latency_ms": result.latency_ms,
                    "warnings": result.warnings,
                },
                "data": result.data,
            });
            let rendered = if pretty {
                serde_json::to_string_pretty(&envelope)?
            } else {
                serde_json::to_string(&envelope)?
            };
            println!("{rendered}");
            Ok(())
        }
    }
}

fn format_table(table: &Table) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(String::len).collect();
    for row in &table.rows {
        for (index, cell) in row.iter().enumerate() {
            if index < widths.len() && cell.len() > widths[index] {
                widths[index] = cell.len();
            }
        }
    }

    let mut out = String::new();
    if let Some(title) = &table.title {
        out.push_str(title);
        out.push('\n');
    }

    out.push_str(&format_row(&table.headers, &widths));
    let separators: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&format_row(&separators, &widths));
    for row in &table.rows {
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (index, width) in widths.iter().copied().enumerate() {
        if index > 0 {
            line.push_str("  ");
        }
        let cell = cells.get(index).map(String::as_str).unwrap_or("");
        line.push_str(&format!("{cell:<width$}"));
    }
    // Trailing pad on the last column is noise.
    let trimmed = line.trim_end().to_owned();
    format!("{trimmed}\n")
}
