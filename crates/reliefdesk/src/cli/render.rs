//! Text rendering of table views for the terminal.

use crate::error::Result;
use crate::model::TableView;

use super::OutputFormat;

/// Render `view` in the requested format.
///
/// Null cells render as empty text in the plain and table formats and as
/// JSON `null` otherwise. An empty view renders as `No <table> to display`
/// except in JSON, which gives an empty array.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_view(view: &TableView, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&view.to_json())?);
    }
    if view.is_empty() {
        return Ok(format!("No {} to display", view.table));
    }
    Ok(match format {
        OutputFormat::Table => render_table(view),
        OutputFormat::Plain | OutputFormat::Json => render_plain(view),
    })
}

fn cell(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

fn render_plain(view: &TableView) -> String {
    let mut lines = Vec::with_capacity(view.rows.len() + 1);
    lines.push(view.columns.join(", "));
    for row in &view.rows {
        let cells: Vec<&str> = row.iter().map(|c| cell(c.as_ref())).collect();
        lines.push(cells.join(", "));
    }
    lines.join("\n")
}

fn render_table(view: &TableView) -> String {
    let mut widths: Vec<usize> = view.columns.iter().map(|c| c.chars().count()).collect();
    for row in &view.rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell(value.as_ref()).chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(view.rows.len() + 2);
    out.push(line(view.columns.to_vec()));
    out.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &view.rows {
        out.push(line(row.iter().map(|c| cell(c.as_ref())).collect()));
    }
    out.join("\n")
}
