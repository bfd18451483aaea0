//! Weekly schedule grid.
//!
//! The grid has one column per weekday (Monday..Friday) and ten one-hour
//! rows starting at 08:30, so it covers 08:30 to 18:30. A meeting occupies
//! the rows from its start time up to, but excluding, its end time, drawn as
//! one merged block anchored at its starting row.
//!
//! # Overlap
//! Only a block's anchor cell counts as occupied. When a meeting starts in
//! an occupied anchor cell, the existing block is flagged as a conflict and
//! the whole pass stops: later meetings and later sections are not placed.

use chrono::{NaiveTime, Timelike};

use crate::core::palette::ColorAssignment;
use crate::core::selection::SelectionSet;
use crate::model::color::{CONFLICT_COLOR, Color};
use crate::model::course_section::CourseSection;
use crate::model::department::Department;

pub const ROWS: usize = 10;
pub const COLUMNS: usize = 5;

pub const WEEKDAYS: [&str; COLUMNS] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// 08:30, the start of row 0, in minutes after midnight.
const FIRST_SLOT_MINUTES: i64 = 8 * 60 + 30;
const SLOT_MINUTES: i64 = 60;

/// Minutes after midnight for an "HH:MM" string.
pub fn parse_minutes(time: &str) -> Option<i64> {
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()?;
    Some(i64::from(time.hour()) * 60 + i64::from(time.minute()))
}

fn minutes_to_row(minutes: i64) -> Option<usize> {
    let row = (minutes - FIRST_SLOT_MINUTES).div_euclid(SLOT_MINUTES);
    usize::try_from(row).ok().filter(|row| *row < ROWS)
}

/// Row in which a meeting starting at `time` begins.
pub fn time_to_row(time: &str) -> Option<usize> {
    minutes_to_row(parse_minutes(time)?)
}

/// Last row covered by a meeting ending at `time` (the end is exclusive).
pub fn end_time_to_row(time: &str) -> Option<usize> {
    minutes_to_row(parse_minutes(time)? - 1)
}

pub fn day_to_column(day: &str) -> Option<usize> {
    WEEKDAYS.iter().position(|weekday| *weekday == day)
}

/// Where one day/time pair lands on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
}

impl Placement {
    /// Resolves a (day name, "HH:MM/HH:MM") pair. `None` means the pair
    /// cannot be drawn and is skipped.
    pub fn resolve(day: &str, time_range: &str) -> Option<Placement> {
        let (start, end) = time_range.split_once('/')?;
        if end.contains('/') {
            return None;
        }
        let row = time_to_row(start)?;
        let end_row = end_time_to_row(end)?;
        let column = day_to_column(day)?;
        if end_row < row {
            return None;
        }
        Some(Placement {
            row,
            column,
            row_span: end_row - row + 1,
        })
    }
}

/// A section drawn on the grid, anchored at its starting cell.
#[derive(Debug, Clone)]
pub struct Block<'a> {
    pub section: &'a CourseSection,
    pub color: Color,
    pub row_span: usize,
    pub conflict: bool,
}

impl Block<'_> {
    pub fn display_color(&self) -> Color {
        if self.conflict { CONFLICT_COLOR } else { self.color }
    }

    pub fn label(&self) -> &str {
        &self.section.course_code
    }
}

#[derive(Debug, Clone)]
pub struct Grid<'a> {
    cells: [[Option<Block<'a>>; COLUMNS]; ROWS],
    halted_at: Option<(usize, usize)>,
}

impl<'a> Grid<'a> {
    pub fn empty() -> Self {
        Grid {
            cells: std::array::from_fn(|_| std::array::from_fn(|_| None)),
            halted_at: None,
        }
    }

    /// Block anchored exactly at `(row, column)`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Block<'a>> {
        self.cells.get(row)?.get(column)?.as_ref()
    }

    /// Block anchored at or spanning over `(row, column)`. When spans
    /// overlap, the nearest anchor above wins.
    pub fn block_at(&self, row: usize, column: usize) -> Option<&Block<'a>> {
        if row >= ROWS || column >= COLUMNS {
            return None;
        }
        (0..=row).rev().find_map(|anchor| {
            self.cells[anchor][column]
                .as_ref()
                .filter(|block| anchor + block.row_span > row)
        })
    }

    /// Course details for whatever is drawn at `(row, column)`.
    pub fn details(&self, row: usize, column: usize) -> Option<String> {
        self.block_at(row, column).map(|block| block.section.details())
    }

    /// Anchor cell of the conflict that stopped placement, if one occurred.
    pub fn conflict(&self) -> Option<(usize, usize)> {
        self.halted_at
    }

    /// All placed blocks with their anchor positions, row-major.
    pub fn blocks(&self) -> impl Iterator<Item = (usize, usize, &Block<'a>)> {
        self.cells.iter().enumerate().flat_map(|(row, columns)| {
            columns
                .iter()
                .enumerate()
                .filter_map(move |(column, cell)| cell.as_ref().map(|block| (row, column, block)))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.blocks().next().is_none()
    }

    /// Places one block, or flags the anchor as a conflict if it is taken.
    /// Returns false when placement must stop.
    fn place(&mut self, placement: Placement, section: &'a CourseSection, color: Color) -> bool {
        let cell = &mut self.cells[placement.row][placement.column];
        if let Some(existing) = cell {
            existing.conflict = true;
            self.halted_at = Some((placement.row, placement.column));
            return false;
        }
        *cell = Some(Block {
            section,
            color,
            row_span: placement.row_span,
            conflict: false,
        });
        true
    }
}

impl Default for Grid<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Rebuilds the grid from scratch for the selected sections of `dataset`.
///
/// Sections are visited in dataset order. Each selected CRN gets a color
/// from `colors` before its meetings are placed; that is the only side
/// effect.
pub fn compute_grid<'a>(
    dataset: &'a Department,
    selection: &SelectionSet,
    colors: &mut ColorAssignment,
) -> Grid<'a> {
    let mut grid = Grid::empty();

    for section in dataset.sections.iter().filter(|s| selection.contains(&s.crn)) {
        let color = colors.color_for(&section.crn);

        for (day, time_range) in section.meetings() {
            let Some(placement) = Placement::resolve(day, time_range) else {
                log::debug!(
                    "CRN {}: skipping unplaceable meeting {} {}",
                    section.crn,
                    day,
                    time_range
                );
                continue;
            };

            if !grid.place(placement, section, color) {
                log::info!(
                    "CRN {} overlaps at {} row {}, stopping placement",
                    section.crn,
                    WEEKDAYS[placement.column],
                    placement.row
                );
                return grid;
            }
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_half_past_hours() {
        assert_eq!(time_to_row("08:30"), Some(0));
        assert_eq!(time_to_row("09:29"), Some(0));
        assert_eq!(time_to_row("09:30"), Some(1));
        assert_eq!(time_to_row("17:30"), Some(9));
        assert_eq!(time_to_row("18:30"), None);
        assert_eq!(time_to_row("08:29"), None);
        assert_eq!(time_to_row("07:45"), None);
    }

    #[test]
    fn end_times_are_exclusive() {
        assert_eq!(end_time_to_row("09:30"), Some(0));
        assert_eq!(end_time_to_row("09:29"), Some(0));
        assert_eq!(end_time_to_row("18:30"), Some(9));
        assert_eq!(end_time_to_row("18:31"), None);
    }

    #[test]
    fn malformed_times_do_not_parse() {
        assert_eq!(parse_minutes("abc"), None);
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("25:00"), None);
        assert_eq!(parse_minutes("10:30"), Some(630));
    }

    #[test]
    fn days_match_exactly() {
        assert_eq!(day_to_column("Monday"), Some(0));
        assert_eq!(day_to_column("Friday"), Some(4));
        assert_eq!(day_to_column("monday"), None);
        assert_eq!(day_to_column("Saturday"), None);
    }

    #[test]
    fn resolve_rejects_bad_ranges() {
        assert_eq!(Placement::resolve("Monday", "08:30"), None);
        assert_eq!(Placement::resolve("Monday", "08:30/09:30/10:30"), None);
        assert_eq!(Placement::resolve("Monday", "11:30/09:30"), None);
        assert_eq!(Placement::resolve("Sunday", "08:30/09:30"), None);
        assert_eq!(
            Placement::resolve("Wednesday", "13:30/16:29"),
            Some(Placement { row: 5, column: 2, row_span: 3 })
        );
    }

    #[test]
    fn block_at_resolves_spanned_rows() {
        let section = CourseSection {
            crn: "1".into(),
            course_code: "EHB 211".into(),
            ..Default::default()
        };
        let mut grid = Grid::empty();
        let placement = Placement { row: 2, column: 1, row_span: 3 };
        assert!(grid.place(placement, &section, PASTEL_COLOR));
        assert!(grid.cell(3, 1).is_none());
        assert_eq!(grid.block_at(4, 1).map(|b| b.label()), Some("EHB 211"));
        assert!(grid.block_at(5, 1).is_none());
        assert!(grid.block_at(1, 1).is_none());
        assert!(grid.block_at(ROWS, 1).is_none());
    }

    #[test]
    fn taken_anchor_flags_conflict() {
        let a = CourseSection { crn: "1".into(), ..Default::default() };
        let b = CourseSection { crn: "2".into(), ..Default::default() };
        let mut grid = Grid::empty();
        let placement = Placement { row: 0, column: 0, row_span: 1 };
        assert!(grid.place(placement, &a, PASTEL_COLOR));
        assert!(!grid.place(placement, &b, PASTEL_COLOR));
        let block = grid.cell(0, 0).unwrap();
        assert_eq!(block.section.crn, "1");
        assert!(block.conflict);
        assert_eq!(block.display_color(), CONFLICT_COLOR);
        assert_eq!(grid.conflict(), Some((0, 0)));
    }

    const PASTEL_COLOR: Color = Color::rgb(186, 225, 255);
}
