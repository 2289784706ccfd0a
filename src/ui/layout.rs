use serde::Deserialize;

use crate::calendar::{COLUMNS, ROWS};
use crate::error::{Error, ErrorKind, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Region {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Region shrunk by `dx` columns and `dy` rows on every side.
    pub fn inset(&self, dx: i32, dy: i32) -> Region {
        Region::new(
            self.x + dx,
            self.y + dy,
            (self.width - 2 * dx).max(0),
            (self.height - 2 * dy).max(0),
        )
    }

    /// Position at which `len` columns of text are centered in this region.
    pub fn center_text(&self, len: usize) -> Point {
        Point::new(
            self.x + ((self.width - len as i32) / 2).max(0),
            self.y + self.height / 2,
        )
    }
}

/// Sizes in terminal cells. Everything else is derived from these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub cell_width: i32,
    pub cell_height: i32,
    pub button_width: i32,
    pub button_height: i32,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            cell_width: 8,
            cell_height: 3,
            button_width: 12,
            button_height: 3,
        }
    }
}

impl Geometry {
    const MARGIN: i32 = 1;
    const TITLE_ROW: i32 = 1;
    const BUTTON_ROW: i32 = 3;

    /// Upper bound for every configured size.
    pub const MAX_SIZE: i32 = 64;

    /// Sizes must be positive, at most `MAX_SIZE`, and the three buttons must
    /// fit side by side above the grid. Derived regions rely on this.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
            ("button_width", self.button_width),
            ("button_height", self.button_height),
        ];

        for (name, value) in sizes.iter() {
            if *value < 1 || *value > Self::MAX_SIZE {
                return Err(Error::new(
                    ErrorKind::ConfigParse,
                    &format!("{} must be between 1 and {}", name, Self::MAX_SIZE),
                ));
            }
        }

        if 3 * self.button_width > self.grid_width() {
            return Err(Error::new(
                ErrorKind::ConfigParse,
                "three buttons must fit in the width of the grid",
            ));
        }

        Ok(())
    }

    pub fn grid_width(&self) -> i32 {
        self.cell_width * COLUMNS as i32
    }

    fn grid_left(&self) -> i32 {
        Self::MARGIN + 1
    }

    pub fn width(&self) -> i32 {
        self.grid_width() + 2 * (Self::MARGIN + 1)
    }

    pub fn height(&self) -> i32 {
        let container = self.container();
        container.y + container.height + Self::MARGIN
    }

    pub fn title_row(&self) -> i32 {
        Self::TITLE_ROW
    }

    pub fn hint_row(&self) -> i32 {
        Self::BUTTON_ROW + self.button_height
    }

    fn button_at(&self, x: i32) -> Region {
        Region::new(x, Self::BUTTON_ROW, self.button_width, self.button_height)
    }

    pub fn prev_button(&self) -> Region {
        self.button_at(self.grid_left())
    }

    pub fn today_button(&self) -> Region {
        self.button_at(self.grid_left() + (self.grid_width() - self.button_width) / 2)
    }

    pub fn next_button(&self) -> Region {
        self.button_at(self.grid_left() + self.grid_width() - self.button_width)
    }

    /// Bordered box holding the weekday header and the day cells.
    pub fn container(&self) -> Region {
        Region::new(
            Self::MARGIN,
            self.hint_row() + 1,
            self.grid_width() + 2,
            2 + 1 + self.cell_height * ROWS as i32,
        )
    }

    pub fn weekday_header(&self, col: usize) -> Region {
        Region::new(
            self.grid_left() + col as i32 * self.cell_width,
            self.container().y + 1,
            self.cell_width,
            1,
        )
    }

    pub fn cell(&self, row: usize, col: usize) -> Region {
        Region::new(
            self.grid_left() + col as i32 * self.cell_width,
            self.container().y + 2 + row as i32 * self.cell_height,
            self.cell_width,
            self.cell_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_contains_is_half_open() {
        let r = Region::new(2, 3, 12, 3);
        assert!(r.contains(Point::new(2, 3)));
        assert!(r.contains(Point::new(13, 5)));
        assert!(!r.contains(Point::new(14, 5)));
        assert!(!r.contains(Point::new(2, 6)));
        assert!(!r.contains(Point::new(1, 4)));
    }

    #[test]
    fn buttons_do_not_overlap() {
        let g = Geometry::default();
        let (prev, today, next) = (g.prev_button(), g.today_button(), g.next_button());
        assert!(prev.x + prev.width <= today.x);
        assert!(today.x + today.width <= next.x);
        assert_eq!(next.x + next.width, g.container().x + g.container().width - 1);
    }

    #[test]
    fn cells_fit_inside_container() {
        let g = Geometry::default();
        let container = g.container();
        let last = g.cell(ROWS - 1, COLUMNS - 1);
        assert_eq!(last.x + last.width, container.x + container.width - 1);
        assert_eq!(last.y + last.height, container.y + container.height - 1);
        assert_eq!(g.weekday_header(0).y + 1, g.cell(0, 0).y);
        assert!(g.height() > container.y + container.height - 1);
    }

    #[test]
    fn center_text() {
        let r = Region::new(10, 3, 12, 3);
        assert_eq!(r.center_text(4), Point::new(14, 4));
        assert_eq!(r.center_text(20), Point::new(10, 4));
    }

    #[test]
    fn geometry_bounds() {
        assert!(Geometry::default().validate().is_ok());

        let with = |cell_width, button_width| Geometry {
            cell_width,
            button_width,
            ..Geometry::default()
        };
        assert!(with(0, 12).validate().is_err());
        assert!(with(-4, 12).validate().is_err());
        assert!(with(400_000_000, 12).validate().is_err());
        assert!(with(Geometry::MAX_SIZE, Geometry::MAX_SIZE).validate().is_ok());
        // 3 * 12 > 7 * 4
        assert!(with(4, 12).validate().is_err());
    }
}
