use crate::config;
use std::io;
use std::sync::mpsc;
use std::thread;

use termion::event::{Event as TermEvent, Key, MouseButton, MouseEvent};
use unsegen::input::Input;

use crate::ui::layout::Point;
use config::Config;

pub enum Event {
    Input(Input),
    Update,
}

/// Input as the interaction controller understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    PointerMove(Point),
    PointerDown(Point),
    KeyDown(Key),
}

impl InputEvent {
    // termion reports 1-based mouse coordinates
    fn pointer(x: u16, y: u16) -> Point {
        Point::new(x as i32 - 1, y as i32 - 1)
    }

    /// termion leaves SGR reports of motion without a held button
    /// (`ESC [ < 35 ; x ; y M`) unparsed.
    fn motion(bytes: &[u8]) -> Option<Point> {
        let body = bytes.strip_prefix(b"\x1b[<")?.strip_suffix(b"M")?;
        let body = std::str::from_utf8(body).ok()?;

        let mut fields = body.split(';').map(|f| f.parse::<u16>().ok());
        let (cb, x, y) = (fields.next()??, fields.next()??, fields.next()??);
        if fields.next().is_some() {
            return None;
        }

        // motion flag with the "no button" code; modifier bits may be set
        if cb & 32 != 0 && cb & 64 == 0 && cb & 3 == 3 {
            Some(Self::pointer(x, y))
        } else {
            None
        }
    }

    pub fn from_term_event(event: &TermEvent) -> Option<InputEvent> {
        match event {
            TermEvent::Key(Key::Ctrl('c')) => Some(InputEvent::Quit),
            TermEvent::Key(key) => Some(InputEvent::KeyDown(*key)),
            TermEvent::Mouse(MouseEvent::Press(MouseButton::Left, x, y)) => {
                Some(InputEvent::PointerDown(Self::pointer(*x, *y)))
            }
            TermEvent::Mouse(MouseEvent::Press(_, x, y))
            | TermEvent::Mouse(MouseEvent::Hold(x, y))
            | TermEvent::Mouse(MouseEvent::Release(x, y)) => {
                Some(InputEvent::PointerMove(Self::pointer(*x, *y)))
            }
            TermEvent::Unsupported(bytes) => {
                Self::motion(bytes).map(InputEvent::PointerMove)
            }
        }
    }

    pub fn from_input(input: &Input) -> Option<InputEvent> {
        Self::from_term_event(&input.event)
    }
}

pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    _input_handle: thread::JoinHandle<()>,
    _update_handle: thread::JoinHandle<()>,
}

impl Dispatcher {
    pub fn from_config(config: &Config) -> Dispatcher {
        let tick_rate = config.tick_rate;
        let (tx, rx) = mpsc::channel();
        let input_handle = {
            let tx = tx.clone();
            thread::spawn(move || {
                let stdin = io::stdin();
                let stdin = stdin.lock();
                for evt in Input::read_all(stdin) {
                    match evt {
                        Ok(input) => {
                            if tx.send(Event::Input(input)).is_err() {
                                return;
                            }
                        }
                        Err(e) => log::debug!("unreadable input: {}", e),
                    }
                }
            })
        };
        let update_handle = thread::spawn(move || loop {
            if tx.send(Event::Update).is_err() {
                return;
            }
            thread::sleep(tick_rate);
        });
        Dispatcher {
            rx,
            _input_handle: input_handle,
            _update_handle: update_handle,
        }
    }

    /// Blocks until the next event arrives.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }

    /// Takes everything already queued without blocking.
    pub fn drain(&self) -> impl Iterator<Item = Event> + '_ {
        self.rx.try_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_events_become_zero_based_pointer_events() {
        assert_eq!(
            InputEvent::from_term_event(&TermEvent::Mouse(MouseEvent::Press(
                MouseButton::Left,
                5,
                4
            ))),
            Some(InputEvent::PointerDown(Point::new(4, 3)))
        );
        assert_eq!(
            InputEvent::from_term_event(&TermEvent::Mouse(MouseEvent::Press(
                MouseButton::WheelUp,
                1,
                1
            ))),
            Some(InputEvent::PointerMove(Point::new(0, 0)))
        );
        assert_eq!(
            InputEvent::from_term_event(&TermEvent::Mouse(MouseEvent::Release(10, 2))),
            Some(InputEvent::PointerMove(Point::new(9, 1)))
        );
        assert_eq!(
            InputEvent::from_term_event(&TermEvent::Mouse(MouseEvent::Hold(3, 3))),
            Some(InputEvent::PointerMove(Point::new(2, 2)))
        );
    }

    #[test]
    fn bare_motion_reports_move_the_pointer() {
        let report = |s: &str| InputEvent::from_term_event(&TermEvent::Unsupported(s.into()));

        assert_eq!(
            report("\x1b[<35;3;5M"),
            Some(InputEvent::PointerMove(Point::new(2, 4)))
        );
        // with shift held
        assert_eq!(
            report("\x1b[<39;47;5M"),
            Some(InputEvent::PointerMove(Point::new(46, 4)))
        );
        // button 0 held, termion reports these itself
        assert_eq!(report("\x1b[<32;3;5M"), None);
        assert_eq!(report("\x1b[<35;3M"), None);
        assert_eq!(report("\x1b[<35;3;5;1M"), None);
        assert_eq!(report("\x1b[<35;3;5m"), None);
        assert_eq!(report("\x1b[Z"), None);
    }

    #[test]
    fn keys() {
        assert_eq!(
            InputEvent::from_term_event(&TermEvent::Key(Key::Ctrl('c'))),
            Some(InputEvent::Quit)
        );
        assert_eq!(
            InputEvent::from_term_event(&TermEvent::Key(Key::Left)),
            Some(InputEvent::KeyDown(Key::Left))
        );
        assert_eq!(
            InputEvent::from_term_event(&TermEvent::Unsupported(vec![27])),
            None
        );
    }
}
