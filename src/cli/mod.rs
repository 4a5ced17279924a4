pub mod args;
pub mod commands;
pub mod input;
pub mod menu;
pub mod prompt;

pub use args::*;
pub use commands::*;
pub use prompt::*;
