use chrono::NaiveDate;
use termion::event::Key;

use super::button::{Button, HoverSet};
use crate::calendar::CalendarState;
use crate::cmds::Cmd;
use crate::config::KeyMap;
use crate::events::InputEvent;
use crate::ui::layout::{Geometry, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct InteractionController<'a> {
    key_map: &'a KeyMap,
    buttons: [Button; 3],
    hovered: HoverSet,
}

impl<'a> InteractionController<'a> {
    pub fn new(key_map: &'a KeyMap, geometry: &Geometry) -> InteractionController<'a> {
        InteractionController {
            key_map,
            buttons: Button::navigation(geometry),
            hovered: HoverSet::default(),
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn hovered(&self) -> &HoverSet {
        &self.hovered
    }

    pub fn on_pointer_move(&mut self, pos: Point) {
        self.hovered = HoverSet::at(&self.buttons, pos);
    }

    pub fn on_pointer_click(
        &mut self,
        pos: Point,
        state: &mut CalendarState,
        today: NaiveDate,
    ) -> Option<Cmd> {
        let cmd = self
            .buttons
            .iter()
            .find(|b| b.region.contains(pos))
            .map(|b| b.cmd)?;

        log::debug!("button '{}' clicked at {:?}", cmd, pos);
        state.apply(cmd, today);
        Some(cmd)
    }

    pub fn on_key_down(&mut self, key: Key, state: &mut CalendarState, today: NaiveDate) -> Flow {
        match self.key_map.get(&key) {
            Some(Cmd::Exit) => self.on_quit(),
            Some(&cmd) => {
                state.apply(cmd, today);
                Flow::Continue
            }
            None => {
                log::trace!("no binding for {:?}", key);
                Flow::Continue
            }
        }
    }

    pub fn on_quit(&self) -> Flow {
        Flow::Quit
    }

    pub fn handle(&mut self, event: InputEvent, state: &mut CalendarState, today: NaiveDate) -> Flow {
        match event {
            InputEvent::Quit => self.on_quit(),
            InputEvent::PointerMove(pos) => {
                self.on_pointer_move(pos);
                Flow::Continue
            }
            InputEvent::PointerDown(pos) => {
                self.on_pointer_move(pos);
                self.on_pointer_click(pos, state, today);
                Flow::Continue
            }
            InputEvent::KeyDown(key) => self.on_key_down(key, state, today),
        }
    }
}
