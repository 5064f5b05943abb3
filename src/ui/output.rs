//! Table display for the terminal

use crate::aggregation::{ResultTable, TableRow};
use crate::core::constants::columns;

/// Placeholder for cells that are undefined for a row
const EMPTY_CELL: &str = "-";

fn cells(row: &TableRow, precision: usize) -> Vec<String> {
    let number = |value: Option<f64>| match value {
        Some(value) => format!("{value:.precision$}"),
        None => EMPTY_CELL.to_string(),
    };

    vec![
        row.method.clone(),
        number(row.compress_mean),
        number(row.compress_std),
        number(row.inflate_mean),
        number(row.inflate_std),
        number(row.ratio),
        number(row.total_mean),
        number(row.total_std),
    ]
}

/// Render the table as aligned text: method column left-aligned, numbers
/// right-aligned, one line per row in table order.
pub fn format_table(table: &ResultTable, precision: usize) -> String {
    let header: Vec<String> = columns::ALL.iter().map(|c| c.to_string()).collect();
    let body: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| cells(row, precision))
        .collect();

    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for line in &body {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |line: &[String]| {
        line.iter()
            .zip(&widths)
            .enumerate()
            .map(|(index, (cell, width))| {
                if index == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&render(&header[..]));
    out.push('\n');
    for line in &body {
        out.push_str(&render(&line[..]));
        out.push('\n');
    }
    out
}

/// Print the table to stdout
pub fn display_table(table: &ResultTable, precision: usize) {
    print!("{}", format_table(table, precision));
}
