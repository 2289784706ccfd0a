use serde::Deserialize;
use unsegen::base::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb {
            r: c.0,
            g: c.1,
            b: c.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub background: Rgb,
    pub calendar_background: Rgb,
    pub header_background: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub hint: Rgb,
    pub weekend: Rgb,
    pub normal_day: Rgb,
    pub inactive_day: Rgb,
    pub today_highlight: Rgb,
    pub button: Rgb,
    pub button_hover: Rgb,
    pub button_text: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Rgb(20, 20, 30),
            calendar_background: Rgb(40, 40, 60),
            header_background: Rgb(30, 30, 50),
            border: Rgb(20, 20, 40),
            text: Rgb(220, 220, 240),
            hint: Rgb(150, 150, 180),
            weekend: Rgb(255, 100, 100),
            normal_day: Rgb(180, 200, 220),
            inactive_day: Rgb(100, 100, 140),
            today_highlight: Rgb(80, 100, 150),
            button: Rgb(70, 70, 100),
            button_hover: Rgb(90, 90, 130),
            button_text: Rgb(200, 220, 255),
        }
    }
}
