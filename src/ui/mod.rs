pub mod app;
pub mod command;
pub mod context;
pub mod layout;
pub mod render;
pub mod surface;
pub mod theme;

pub use app::App;
pub use context::{Context, Mode};
