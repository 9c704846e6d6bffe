//! Box-drawn text preview of a table

use crate::model::Table;

/// Render up to `limit` output lines of `table` as a bordered grid.
///
/// Lines are laid out the way the writer emits them; the header, if any,
/// goes above a separator rule.
pub fn render_preview(table: &Table, limit: usize) -> String {
    let width = table
        .row_count()
        .max(table.header().map_or(0, <[String]>::len));
    if width == 0 {
        return String::new();
    }

    let lines: Vec<Vec<&str>> = (0..table.longest_row_length().min(limit))
        .map(|position| {
            (0..width)
                .map(|row| table.cell_or_empty(row, position))
                .collect()
        })
        .collect();
    let header: Option<Vec<&str>> = table.header().map(|h| {
        (0..width)
            .map(|i| h.get(i).map(String::as_str).unwrap_or(""))
            .collect()
    });

    let mut col_widths = vec![0usize; width];
    for line in header.iter().chain(lines.iter()) {
        for (i, cell) in line.iter().enumerate() {
            col_widths[i] = col_widths[i].max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_rule(&mut output, &col_widths, ('┌', '┬', '┐'));
    if let Some(header) = &header {
        push_cells(&mut output, header, &col_widths);
        push_rule(&mut output, &col_widths, ('├', '┼', '┤'));
    }
    for line in &lines {
        push_cells(&mut output, line, &col_widths);
    }
    push_rule(&mut output, &col_widths, ('└', '┴', '┘'));

    let hidden = table.longest_row_length().saturating_sub(limit);
    if hidden > 0 {
        output.push_str(&format!("… {} more line(s)\n", hidden));
    }
    output
}

fn push_rule(output: &mut String, col_widths: &[usize], (left, mid, right): (char, char, char)) {
    output.push(left);
    for (i, width) in col_widths.iter().enumerate() {
        output.push_str(&"─".repeat(*width + 2));
        if i < col_widths.len() - 1 {
            output.push(mid);
        }
    }
    output.push(right);
    output.push('\n');
}

fn push_cells(output: &mut String, cells: &[&str], col_widths: &[usize]) {
    output.push('│');
    for (cell, width) in cells.iter().zip(col_widths) {
        output.push_str(&format!(" {:width$} │", cell, width = width));
    }
    output.push('\n');
}
