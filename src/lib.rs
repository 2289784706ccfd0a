pub mod calendar;
pub mod clock;
pub mod cmds;
pub mod config;
pub mod ctrl;
pub mod error;
pub mod events;
pub mod ui;

pub use error::{Error, ErrorKind, Result};
