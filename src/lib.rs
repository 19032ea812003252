pub mod error;
pub mod flags;
pub mod shell;

pub mod command;
pub mod jobs;
pub mod path;
pub mod process;
pub mod prompt;
