use std::fmt;

pub mod executor;
pub mod signal;

#[derive(Debug)]
pub enum ProcessError {
    // The OS could not create a new process at all. The one condition the
    // shell treats as fatal.
    Spawn(std::io::Error),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Spawn(e) => write!(f, "process creation failed: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {}
