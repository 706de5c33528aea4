use super::Window;
use crate::model::{Cell, Grid, Shade};
use chrono::{DateTime, Datelike, FixedOffset};
use console::Style;
use std::io::{self, Write};

const EMPTY_CELL: &str = "  - ";
const LABEL_PAD: &str = "     ";
const MONTH_INDENT: &str = "         ";

/// Text of a cell, four columns wide up to 99 and never narrower than the value.
pub fn cell_text(count: u32) -> String {
    match count {
        0 => EMPTY_CELL.to_string(),
        1..=9 => format!("  {count} "),
        10..=99 => format!(" {count} "),
        _ => format!("{count} "),
    }
}

fn cell_style(cell: &Cell) -> Style {
    if cell.today {
        return Style::new().bold().white().on_magenta();
    }
    match cell.shade {
        Shade::Empty => Style::new().black(),
        Shade::Light => Style::new().bold().black().on_white(),
        Shade::Medium => Style::new().bold().black().on_yellow(),
        Shade::Dark => Style::new().bold().black().on_green(),
    }
}

pub fn format_cell(cell: &Cell, colors: bool) -> String {
    cell_style(cell)
        .force_styling(colors)
        .apply_to(cell_text(cell.count))
        .to_string()
}

/// Row label for grid row `row`; only Monday, Wednesday and Friday rows are named.
pub fn day_label(row: usize) -> &'static str {
    match row {
        5 => " Fri ",
        3 => " Wed ",
        1 => " Mon ",
        _ => LABEL_PAD,
    }
}

pub struct Renderer {
    weeks: usize,
    today_row: Option<usize>,
    week_starts: Vec<DateTime<FixedOffset>>,
    colors: bool,
}

impl Renderer {
    pub fn new(window: &Window, colors: bool) -> Self {
        Self {
            weeks: window.weeks() as usize,
            today_row: (window.today_offset() as usize).checked_sub(1),
            week_starts: window.week_starts(),
            colors,
        }
    }

    pub fn render<W: Write>(&self, grid: &Grid, out: &mut W) -> io::Result<()> {
        self.write_months(out)?;

        for row in (0..7).rev() {
            write!(out, "{}", day_label(row))?;
            for week in (0..=self.weeks + 1).rev() {
                let today = week == 0 && self.today_row == Some(row);
                let cell = Cell::new(grid.count(week, row), today);
                write!(out, "{}", format_cell(&cell, self.colors))?;
            }
            writeln!(out)?;
        }

        Ok(())
    }

    /// One label slot per week; a month name marks the week its month begins.
    fn write_months<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{MONTH_INDENT}")?;
        let mut month = self.week_starts.first().map(|w| w.month());
        for week in &self.week_starts {
            if Some(week.month()) != month {
                write!(out, "{} ", week.format("%b"))?;
                month = Some(week.month());
            } else {
                write!(out, "    ")?;
            }
        }
        writeln!(out)
    }
}
