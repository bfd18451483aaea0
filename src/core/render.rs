use std::fmt::Write as _;

use crate::core::grid::{COLUMNS, Grid, ROWS, WEEKDAYS};

const LABEL_WIDTH: usize = 13;
const CELL_WIDTH: usize = 11;
const CONTINUATION: &str = "''";
const CONFLICT_MARK: char = '!';

/// Header for row `row`, e.g. "8:30 - 9:30".
pub fn row_label(row: usize) -> String {
    format!("{}:30 - {}:30", 8 + row, 9 + row)
}

fn fit(text: &str) -> String {
    let text: String = text.chars().take(CELL_WIDTH).collect();
    format!("{:<width$}", text, width = CELL_WIDTH)
}

fn cell_text(grid: &Grid<'_>, row: usize, column: usize) -> String {
    if let Some(block) = grid.cell(row, column) {
        if block.conflict {
            return format!("{}{}", CONFLICT_MARK, block.label());
        }
        return block.label().to_string();
    }
    if grid.block_at(row, column).is_some() {
        return CONTINUATION.to_string();
    }
    String::new()
}

/// Plain-text rendering of the weekly grid.
pub fn render(grid: &Grid<'_>) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:<width$}", "", width = LABEL_WIDTH);
    for day in WEEKDAYS {
        let _ = write!(out, "|{}", fit(day));
    }
    out.push('\n');

    let column_rule = format!("+{}", "-".repeat(CELL_WIDTH));
    let rule = format!("{}{}", "-".repeat(LABEL_WIDTH), column_rule.repeat(COLUMNS));
    out.push_str(&rule);
    out.push('\n');

    for row in 0..ROWS {
        let _ = write!(out, "{:<width$}", row_label(row), width = LABEL_WIDTH);
        for column in 0..COLUMNS {
            let _ = write!(out, "|{}", fit(&cell_text(grid, row, column)));
        }
        out.push('\n');
    }

    if let Some((row, column)) = grid.conflict() {
        let _ = writeln!(
            out,
            "\n{} Overlapping courses at {} {}",
            CONFLICT_MARK,
            WEEKDAYS[column],
            row_label(row)
        );
    }

    out
}

/// Grid plus a color legend, one line per placed section.
pub fn render_chart(grid: &Grid<'_>) -> String {
    let mut out = render(grid);
    let mut seen: Vec<&str> = Vec::new();

    out.push('\n');
    for (_, _, block) in grid.blocks() {
        if seen.contains(&block.section.crn.as_str()) {
            continue;
        }
        seen.push(&block.section.crn);
        let _ = writeln!(
            out,
            "{}  {:<10} {}  {}",
            block.display_color().hex(),
            block.section.crn,
            block.label(),
            block.section.course_name
        );
    }
    out
}
