use chrono::NaiveDate;
use std::fmt::Write;

use super::layout::{Geometry, Point};
use super::surface::Surface;
use super::theme::Theme;
use crate::calendar::{CalendarState, DayCell, WEEKDAY_NAMES};
use crate::ctrl::{Button, HoverSet};

pub const HINT: &str = "Navigate by clicking buttons, or with arrow keys or SPACE";

/// Immutable presentation settings for a frame.
#[derive(Debug, Clone, Copy)]
pub struct Style<'a> {
    pub theme: &'a Theme,
    pub geometry: &'a Geometry,
}

fn centered_x(geometry: &Geometry, len: usize) -> i32 {
    ((geometry.width() - len as i32) / 2).max(0)
}

fn draw_button<S: Surface + ?Sized>(surface: &mut S, button: &Button, hovered: bool, style: Style) {
    let theme = style.theme;
    let fill = if hovered {
        theme.button_hover
    } else {
        theme.button
    };

    surface.fill_rounded_rect(button.region, fill);
    surface.stroke_rounded_rect(button.region, theme.border);
    surface.text(
        button.region.center_text(button.label.chars().count()),
        button.label,
        theme.button_text,
    );
}

fn draw_day<S: Surface + ?Sized>(surface: &mut S, cell: &DayCell, row: usize, col: usize, style: Style) {
    let theme = style.theme;
    let region = style.geometry.cell(row, col);

    if cell.is_today {
        surface.fill_rounded_rect(region.inset(1, 0), theme.today_highlight);
    }

    let color = match (cell.is_weekend, cell.in_month) {
        (_, false) => theme.inactive_day,
        (true, true) => theme.weekend,
        (false, true) => theme.normal_day,
    };

    let label = cell.day_num.to_string();
    surface.text(region.center_text(label.len()), &label, color);
}

/// Draws one complete frame. The sequence of commands depends only on the
/// arguments.
pub fn draw_frame<S: Surface + ?Sized>(
    surface: &mut S,
    state: &CalendarState,
    today: NaiveDate,
    buttons: &[Button],
    hovered: &HoverSet,
    style: Style,
) {
    let theme = style.theme;
    let geometry = style.geometry;

    surface.clear(theme.background);

    let title = state.title();
    surface.text(
        Point::new(centered_x(geometry, title.len()), geometry.title_row()),
        &title,
        theme.text,
    );

    for button in buttons {
        draw_button(surface, button, hovered.is_hovered(button), style);
    }

    surface.text(
        Point::new(centered_x(geometry, HINT.len()), geometry.hint_row()),
        HINT,
        theme.hint,
    );

    let container = geometry.container();
    surface.fill_rounded_rect(container, theme.calendar_background);
    surface.stroke_rounded_rect(container, theme.border);

    for (col, name) in WEEKDAY_NAMES.iter().enumerate() {
        let region = geometry.weekday_header(col);
        let color = if col == 0 || col == WEEKDAY_NAMES.len() - 1 {
            theme.weekend
        } else {
            theme.text
        };
        surface.fill_rounded_rect(region, theme.header_background);
        surface.text(region.center_text(name.len()), name, color);
    }

    let grid = state.compute_grid(today);
    for (row, cells) in grid.rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            draw_day(surface, cell, row, col, style);
        }
    }
}

/// Plain-text rendition of the month for non-interactive output. Days of
/// adjacent months are left blank and today is marked with `*`.
pub fn month_text(state: &CalendarState, today: NaiveDate) -> String {
    let mut out = String::new();
    let width = WEEKDAY_NAMES.len() * 4;
    let title = state.title();

    let _ = writeln!(out, "{:^width$}", title, width = width);
    for name in WEEKDAY_NAMES.iter() {
        let _ = write!(out, "{:>4}", name);
    }
    out.push('\n');

    for row in state.compute_grid(today).rows() {
        if row.iter().all(|cell| !cell.in_month) {
            continue;
        }
        for cell in row {
            if !cell.in_month {
                out.push_str("    ");
            } else {
                let mark = if cell.is_today { '*' } else { ' ' };
                let _ = write!(out, " {}{:>2}", mark, cell.day_num);
            }
        }
        out.push('\n');
    }

    out
}
