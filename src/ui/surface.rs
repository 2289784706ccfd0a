use unsegen::base::{ColIndex, Cursor, RowIndex, StyleModifier, Window};

use super::layout::{Point, Region};
use super::theme::Rgb;

/// Drawing primitives the renderer needs. Coordinates are terminal cells.
pub trait Surface {
    fn clear(&mut self, color: Rgb);
    fn fill_rounded_rect(&mut self, region: Region, color: Rgb);
    fn stroke_rounded_rect(&mut self, region: Region, color: Rgb);
    fn text(&mut self, at: Point, text: &str, color: Rgb);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Clear(Rgb),
    FillRoundedRect { region: Region, color: Rgb },
    StrokeRoundedRect { region: Region, color: Rgb },
    Text { at: Point, text: String, color: Rgb },
}

/// Records draw commands instead of painting them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DrawList(pub Vec<DrawCommand>);

impl DrawList {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.0
    }

    pub fn texts(&self) -> impl Iterator<Item = (&Point, &str, &Rgb)> {
        self.0.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { at, text, color } => Some((at, text.as_str(), color)),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn clear(&mut self, color: Rgb) {
        self.0.push(DrawCommand::Clear(color));
    }

    fn fill_rounded_rect(&mut self, region: Region, color: Rgb) {
        self.0.push(DrawCommand::FillRoundedRect { region, color });
    }

    fn stroke_rounded_rect(&mut self, region: Region, color: Rgb) {
        self.0.push(DrawCommand::StrokeRoundedRect { region, color });
    }

    fn text(&mut self, at: Point, text: &str, color: Rgb) {
        self.0.push(DrawCommand::Text {
            at,
            text: text.to_owned(),
            color,
        });
    }
}

/// Paints into an unsegen window. Cell backgrounds are remembered so that
/// text and borders keep the fill beneath them.
pub struct TermSurface<'w> {
    window: Window<'w>,
    width: i32,
    height: i32,
    backgrounds: Vec<Option<Rgb>>,
}

impl<'w> TermSurface<'w> {
    const TOP_LEFT: char = '╭';
    const TOP_RIGHT: char = '╮';
    const BOTTOM_LEFT: char = '╰';
    const BOTTOM_RIGHT: char = '╯';
    const HORIZONTAL: char = '─';
    const VERTICAL: char = '│';

    pub fn new(window: Window<'w>) -> Self {
        let width = window.get_width().raw_value() as i32;
        let height = window.get_height().raw_value() as i32;

        TermSurface {
            window,
            width,
            height,
            backgrounds: vec![None; (width.max(0) * height.max(0)) as usize],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    fn put(&mut self, x: i32, y: i32, c: char, fg: Option<Rgb>) {
        let idx = match self.index(x, y) {
            Some(idx) => idx,
            None => return,
        };

        let mut style = StyleModifier::new();
        if let Some(fg) = fg {
            style = style.fg_color(fg.into());
        }
        if let Some(bg) = self.backgrounds[idx] {
            style = style.bg_color(bg.into());
        }

        let mut cursor = Cursor::new(&mut self.window).style_modifier(style);
        cursor.move_to(ColIndex::new(x), RowIndex::new(y));
        cursor.write(&c.to_string());
    }

    fn paint(&mut self, region: Region, color: Rgb) {
        for y in region.y..region.y + region.height {
            for x in region.x..region.x + region.width {
                if let Some(idx) = self.index(x, y) {
                    self.backgrounds[idx] = Some(color);
                    self.put(x, y, ' ', None);
                }
            }
        }
    }
}

impl Surface for TermSurface<'_> {
    fn clear(&mut self, color: Rgb) {
        let all = Region::new(0, 0, self.width, self.height);
        self.paint(all, color);
    }

    // Terminal cells cannot round a filled area, only its outline.
    fn fill_rounded_rect(&mut self, region: Region, color: Rgb) {
        self.paint(region, color);
    }

    fn stroke_rounded_rect(&mut self, region: Region, color: Rgb) {
        if region.width <= 0 || region.height <= 0 {
            return;
        }

        let (left, top) = (region.x, region.y);
        let right = region.x + region.width - 1;
        let bottom = region.y + region.height - 1;

        if region.width < 2 || region.height < 2 {
            for y in top..=bottom {
                for x in left..=right {
                    self.put(x, y, Self::HORIZONTAL, Some(color));
                }
            }
            return;
        }

        for x in left + 1..right {
            self.put(x, top, Self::HORIZONTAL, Some(color));
            self.put(x, bottom, Self::HORIZONTAL, Some(color));
        }
        for y in top + 1..bottom {
            self.put(left, y, Self::VERTICAL, Some(color));
            self.put(right, y, Self::VERTICAL, Some(color));
        }
        self.put(left, top, Self::TOP_LEFT, Some(color));
        self.put(right, top, Self::TOP_RIGHT, Some(color));
        self.put(left, bottom, Self::BOTTOM_LEFT, Some(color));
        self.put(right, bottom, Self::BOTTOM_RIGHT, Some(color));
    }

    fn text(&mut self, at: Point, text: &str, color: Rgb) {
        for (i, c) in text.chars().enumerate() {
            self.put(at.x + i as i32, at.y, c, Some(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_commands_in_order() {
        let mut list = DrawList::default();
        list.clear(Rgb(1, 2, 3));
        list.fill_rounded_rect(Region::new(1, 1, 4, 2), Rgb(4, 5, 6));
        list.stroke_rounded_rect(Region::new(1, 1, 4, 2), Rgb(7, 8, 9));
        list.text(Point::new(2, 1), "hi", Rgb(10, 11, 12));

        assert_eq!(
            list.commands(),
            &[
                DrawCommand::Clear(Rgb(1, 2, 3)),
                DrawCommand::FillRoundedRect {
                    region: Region::new(1, 1, 4, 2),
                    color: Rgb(4, 5, 6),
                },
                DrawCommand::StrokeRoundedRect {
                    region: Region::new(1, 1, 4, 2),
                    color: Rgb(7, 8, 9),
                },
                DrawCommand::Text {
                    at: Point::new(2, 1),
                    text: "hi".to_owned(),
                    color: Rgb(10, 11, 12),
                },
            ]
        );
        assert_eq!(
            list.texts().collect::<Vec<_>>(),
            vec![(&Point::new(2, 1), "hi", &Rgb(10, 11, 12))]
        );
    }
}
