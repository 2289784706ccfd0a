use crate::clock::Clock;
use crate::config::Config;
use crate::ctrl::{Flow, InteractionController};
use crate::events::{Dispatcher, Event, InputEvent};

use super::command::CommandParser;
use super::render::{draw_frame, Style};
use super::surface::TermSurface;
use super::{Context, Mode};

use unsegen::base::{Color, Cursor, StyleModifier, Terminal, Window};
use unsegen::input::{EditBehavior, Input, Key, ScrollBehavior};
use unsegen::widget::*;

const HELP: &str = "':' jump to a year  'q' quit";

/// The header, buttons and month grid.
pub struct CalendarScreen<'w> {
    context: &'w Context,
    controller: &'w InteractionController<'w>,
    config: &'w Config,
}

impl Widget for CalendarScreen<'_> {
    fn space_demand(&self) -> Demand2D {
        let geometry = &self.config.geometry;
        Demand2D {
            width: ColDemand::exact(geometry.width().max(0) as usize),
            height: RowDemand::exact(geometry.height().max(0) as usize),
        }
    }

    fn draw(&self, window: Window, _hints: RenderingHints) {
        let mut surface = TermSurface::new(window);
        draw_frame(
            &mut surface,
            &self.context.state,
            self.context.today(),
            self.controller.buttons(),
            self.controller.hovered(),
            Style {
                theme: &self.config.theme,
                geometry: &self.config.geometry,
            },
        );
    }
}

struct MessageLine<'w> {
    text: &'w str,
    style: StyleModifier,
}

impl<'w> MessageLine<'w> {
    fn new(text: &'w str) -> Self {
        MessageLine {
            text,
            style: StyleModifier::new(),
        }
    }

    fn style(mut self, style: StyleModifier) -> Self {
        self.style = style;
        self
    }
}

impl Widget for MessageLine<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(self.text.chars().count()),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window).style_modifier(self.style);
        cursor.write(self.text);
    }
}

pub struct App<'a> {
    config: &'a Config,
    context: Context,
    controller: InteractionController<'a>,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, clock: Box<dyn Clock>) -> App<'a> {
        App {
            config,
            context: Context::new(clock),
            controller: InteractionController::new(&config.key_map, &config.geometry),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let mut layout = HLayout::new().widget(MessageLine::new(" "));

        if self.context.mode == Mode::Command {
            layout = layout.widget(self.context.command_line.as_widget());
        }

        if let Some(msg) = &self.context.last_error_message {
            layout = layout.widget(
                MessageLine::new(msg).style(StyleModifier::new().fg_color(Color::LightRed)),
            );
        } else if self.context.mode == Mode::Normal {
            layout = layout.widget(MessageLine::new(HELP));
        }

        layout
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        VLayout::new()
            .widget(CalendarScreen {
                context: &self.context,
                controller: &self.controller,
                config: self.config,
            })
            .widget(self.bottom_bar())
    }

    fn handle_input(&mut self, input: Input) {
        if input.matches(Key::Ctrl('c')) {
            self.context.quit = true;
            return;
        }

        match self.context.mode {
            Mode::Normal => {
                if input.matches(Key::Char(':')) {
                    self.context.mode = Mode::Command;
                    self.context.last_error_message = None;
                } else if let Some(event) = InputEvent::from_input(&input) {
                    let today = self.context.today();
                    if self.controller.handle(event, &mut self.context.state, today) == Flow::Quit
                    {
                        self.context.quit = true;
                    }
                }
            }
            Mode::Command => {
                if input.matches(Key::Esc) {
                    self.context.mode = Mode::Normal;
                    self.context.last_error_message = None;
                    return;
                }

                input
                    .chain(CommandParser::new(&mut self.context))
                    .chain(
                        EditBehavior::new(self.context.input_sink_mut())
                            .delete_forwards_on(Key::Delete)
                            .delete_backwards_on(Key::Backspace)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .chain(
                        ScrollBehavior::new(self.context.input_sink_mut())
                            .backwards_on(Key::Up)
                            .forwards_on(Key::Down),
                    )
                    .finish();
            }
        }
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Update => self.context.update(),
            Event::Input(input) => self.handle_input(input),
        }
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        while !self.context.quit {
            // Block for one event, then apply everything queued behind it
            let first = match dispatcher.next() {
                Ok(event) => event,
                Err(_) => break,
            };

            for event in std::iter::once(first).chain(dispatcher.drain()) {
                self.handle(event);
                if self.context.quit {
                    break;
                }
            }

            if self.context.quit {
                break;
            }

            // Draw
            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();
        }

        log::info!("leaving at {}", self.context.state.displayed());
        Ok(())
    }
}
