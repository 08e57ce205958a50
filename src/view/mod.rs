//! Render surface for the command line: a layout snapshot as plain text
//! or JSON.

use crate::layout::LayoutSnapshot;
use std::io::Write;

/// Output format for the rendered layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per column with its item ids.
    #[default]
    Text,
    /// The full snapshot, pretty-printed.
    Json,
}

/// One header line, then one line per column.
///
/// No trailing newline.
pub fn render_text(snapshot: &LayoutSnapshot) -> String {
    let mut lines = Vec::with_capacity(snapshot.columns.len() + 1);
    lines.push(format!(
        "{} columns x {:.1}px, {} items",
        snapshot.column_count, snapshot.column_width, snapshot.item_count
    ));

    for column in &snapshot.columns {
        let ids: String = column
            .items
            .iter()
            .map(|item| format!(" {}", item.id))
            .collect();
        lines.push(format!(
            "col {}  x={:.1}  h={:.1}  |{}",
            column.index, column.x, column.height, ids
        ));
    }

    lines.join("\n")
}

/// Pretty JSON of the whole snapshot.
pub fn render_json(snapshot: &LayoutSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

/// Renders `snapshot` to `out` in `format`, newline-terminated.
pub fn write_layout(
    out: &mut impl Write,
    snapshot: &LayoutSnapshot,
    format: OutputFormat,
) -> std::io::Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(snapshot),
        OutputFormat::Json => render_json(snapshot).map_err(std::io::Error::other)?,
    };
    writeln!(out, "{rendered}")
}
