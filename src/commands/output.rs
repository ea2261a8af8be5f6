//! Plain-text rendering of query results.

use crate::storage::gateway::{value_to_string, Table};

/// Widest a rendered column gets before values are truncated.
const MAX_COLUMN_WIDTH: usize = 32;

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Render a table with a header row, a dashed rule and left-aligned columns.
pub fn render_table(table: &Table) -> String {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| truncate(&value_to_string(v), MAX_COLUMN_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(name.chars().count().min(MAX_COLUMN_WIDTH)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |values: Vec<String>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(format_row(
        table
            .columns
            .iter()
            .map(|c| truncate(c, MAX_COLUMN_WIDTH))
            .collect(),
    ));
    lines.push(format_row(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in cells {
        lines.push(format_row(row));
    }
    lines.join("\n")
}

/// Print a titled table, or a note when it has no rows.
pub fn print_table(title: &str, table: &Table) {
    println!("{}", title);
    if table.is_empty() {
        println!("(no rows)");
    } else {
        println!("{}", render_table(table));
    }
    println!();
}
