use chrono::{Datelike, Month, NaiveDate};
use num_traits::FromPrimitive;
use std::fmt;

use crate::cmds::Cmd;

pub const MIN_YEAR: i32 = 1970;
pub const MAX_YEAR: i32 = 9999;

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;
pub const GRID_CELLS: usize = COLUMNS * ROWS;

/// Sunday-first weekday labels, one per grid column.
pub const WEEKDAY_NAMES: [&str; COLUMNS] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn first_of_month(month: &Month, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
        .expect("displayed month must stay within the clamped year range")
}

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    let next = if *month == Month::December {
        first_of_month(&Month::January, year + 1)
    } else {
        first_of_month(&month.succ(), year)
    };

    next.signed_duration_since(first_of_month(month, year))
        .num_days() as u32
}

/// The year/month pair currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayedMonth {
    month: Month,
    year: i32,
}

impl DisplayedMonth {
    pub fn new(month: Month, year: i32) -> Self {
        DisplayedMonth { month, year }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn num_days(&self) -> u32 {
        days_of_month(&self.month, self.year)
    }

    /// Month preceding this one, without clamping.
    pub fn prev(&self) -> Self {
        DisplayedMonth {
            month: self.month.pred(),
            year: if self.month == Month::January {
                self.year - 1
            } else {
                self.year
            },
        }
    }

    /// Month following this one, without clamping.
    pub fn next(&self) -> Self {
        DisplayedMonth {
            month: self.month.succ(),
            year: if self.month == Month::December {
                self.year + 1
            } else {
                self.year
            },
        }
    }

    /// Weekday of the first day, 0 = Sunday.
    pub fn first_weekday(&self) -> usize {
        first_of_month(&self.month, self.year)
            .weekday()
            .num_days_from_sunday() as usize
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month.number_from_month()
    }
}

impl<T: Datelike> From<T> for DisplayedMonth {
    fn from(d: T) -> Self {
        DisplayedMonth {
            month: Month::from_u32(d.month()).unwrap_or(Month::January),
            year: d.year(),
        }
    }
}

impl fmt::Display for DisplayedMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month.name(), self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day_num: u32,
    pub in_month: bool,
    pub is_today: bool,
    pub is_weekend: bool,
}

/// 6x7 Sunday-first cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<DayCell>,
}

impl Grid {
    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(COLUMNS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    displayed: DisplayedMonth,
}

impl CalendarState {
    pub fn new(displayed: DisplayedMonth) -> Self {
        let mut state = CalendarState { displayed };
        state.clamp_year();
        state
    }

    pub fn from_today(today: NaiveDate) -> Self {
        Self::new(today.into())
    }

    pub fn displayed(&self) -> DisplayedMonth {
        self.displayed
    }

    pub fn title(&self) -> String {
        self.displayed.to_string()
    }

    pub fn go_to_previous_month(&mut self) {
        self.displayed = self.displayed.prev();
        self.clamp_year();
    }

    pub fn go_to_next_month(&mut self) {
        self.displayed = self.displayed.next();
        self.clamp_year();
    }

    pub fn go_to_previous_year(&mut self) {
        self.displayed.year -= 1;
        self.clamp_year();
    }

    pub fn go_to_next_year(&mut self) {
        self.displayed.year += 1;
        self.clamp_year();
    }

    pub fn go_to_year(&mut self, year: i32) {
        self.displayed.year = year;
        self.clamp_year();
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.displayed = today.into();
        self.clamp_year();
    }

    /// Leaving the supported range snaps to its first or last month.
    pub fn clamp_year(&mut self) {
        if self.displayed.year < MIN_YEAR {
            log::debug!("year {} below range, snapping", self.displayed.year);
            self.displayed = DisplayedMonth::new(Month::January, MIN_YEAR);
        } else if self.displayed.year > MAX_YEAR {
            log::debug!("year {} above range, snapping", self.displayed.year);
            self.displayed = DisplayedMonth::new(Month::December, MAX_YEAR);
        }
    }

    pub fn apply(&mut self, cmd: Cmd, today: NaiveDate) {
        match cmd {
            Cmd::PrevMonth => self.go_to_previous_month(),
            Cmd::NextMonth => self.go_to_next_month(),
            Cmd::PrevYear => self.go_to_previous_year(),
            Cmd::NextYear => self.go_to_next_year(),
            Cmd::Today => self.go_to_today(today),
            Cmd::Exit => {}
        }
    }

    pub fn compute_grid(&self, today: NaiveDate) -> Grid {
        let offset = self.displayed.first_weekday();
        let num_days = self.displayed.num_days() as usize;
        let prev_num_days = self.displayed.prev().num_days() as usize;
        let shows_today = self.displayed.contains(&today);

        let cells = (0..GRID_CELLS)
            .map(|idx| {
                let (day_num, in_month) = if idx < offset {
                    (prev_num_days - (offset - idx - 1), false)
                } else if idx < offset + num_days {
                    (idx - offset + 1, true)
                } else {
                    (idx - offset - num_days + 1, false)
                };
                let col = idx % COLUMNS;

                DayCell {
                    day_num: day_num as u32,
                    in_month,
                    is_today: in_month && shows_today && today.day() as usize == day_num,
                    is_weekend: col == 0 || col == COLUMNS - 1,
                }
            })
            .collect();

        Grid { cells }
    }
}
