use chrono::NaiveDate;
use unsegen::widget::builtin::PromptLine;

use crate::calendar::CalendarState;
use crate::clock::Clock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
}

pub struct Context {
    pub mode: Mode,
    pub state: CalendarState,
    pub command_line: PromptLine,
    pub last_error_message: Option<String>,
    pub quit: bool,
    clock: Box<dyn Clock>,
    today: NaiveDate,
}

impl Context {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        let today = clock.today();
        Context {
            mode: Mode::Normal,
            state: CalendarState::from_today(today),
            command_line: PromptLine::with_prompt(":".to_owned()),
            last_error_message: None,
            quit: false,
            clock,
            today,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Re-reads the clock so that "today" follows midnight.
    pub fn update(&mut self) {
        let today = self.clock.today();
        if today != self.today {
            log::info!("date changed to {}", today);
            self.today = today;
        }
    }

    pub fn input_sink_mut(&mut self) -> &mut PromptLine {
        &mut self.command_line
    }
}
