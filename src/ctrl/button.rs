use std::collections::HashSet;

use crate::cmds::Cmd;
use crate::ui::layout::{Geometry, Point, Region};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub region: Region,
    pub cmd: Cmd,
}

impl Button {
    pub fn new(label: &'static str, region: Region, cmd: Cmd) -> Self {
        Button { label, region, cmd }
    }

    /// The Previous, Today and Next buttons, left to right.
    pub fn navigation(geometry: &Geometry) -> [Button; 3] {
        [
            Button::new("Previous", geometry.prev_button(), Cmd::PrevMonth),
            Button::new("Today", geometry.today_button(), Cmd::Today),
            Button::new("Next", geometry.next_button(), Cmd::NextMonth),
        ]
    }
}

/// Buttons currently under the pointer, keyed by the command they trigger.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HoverSet(HashSet<Cmd>);

impl HoverSet {
    pub fn at(buttons: &[Button], pos: Point) -> Self {
        HoverSet(
            buttons
                .iter()
                .filter(|b| b.region.contains(pos))
                .map(|b| b.cmd)
                .collect(),
        )
    }

    pub fn is_hovered(&self, button: &Button) -> bool {
        self.0.contains(&button.cmd)
    }
}
