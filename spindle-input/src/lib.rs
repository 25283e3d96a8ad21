//! Modal keyboard input handling for Spindle

mod commands;
mod modal;

pub use commands::Command;
pub use modal::{InputHandler, Mode};
