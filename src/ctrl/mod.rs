pub mod button;
pub mod control;

pub use button::{Button, HoverSet};
pub use control::{Flow, InteractionController};
