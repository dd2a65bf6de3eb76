//! Plain-text table used to preview the rows on the terminal.

use crate::model::{COLUMNS, OutputRow};

const SEPARATOR: &str = "  ";

/// Renders at most `limit` rows under the column header. When rows are left
/// out a final line says how many.
pub fn render_table(rows: &[OutputRow], limit: usize) -> String {
    let shown = &rows[..rows.len().min(limit)];
    let cells: Vec<Vec<String>> = shown
        .iter()
        .map(|row| row.cells().iter().map(ToString::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|header| header.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_line(&mut output, COLUMNS.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut output, rule.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut output, row.iter().map(String::as_str), &widths);
    }

    let hidden = rows.len() - shown.len();
    if hidden > 0 {
        output.push_str(&format!("... {hidden} more rows\n"));
    }
    output
}

fn push_line<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let padding = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect();
    output.push_str(line.join(SEPARATOR).trim_end());
    output.push('\n');
}
