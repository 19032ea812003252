use std::io;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use super::ProcessError;
use crate::flags::Flags;

#[derive(Clone)]
pub struct ProcessExecutor {
    quiet_mode: bool,
}

impl ProcessExecutor {
    pub fn new(flags: &Flags) -> Self {
        ProcessExecutor {
            quiet_mode: flags.is_set("quiet"),
        }
    }

    /// Spawn the resolved program and block until that child, specifically,
    /// changes state. Exits of unrelated background children are left for
    /// the job-table sweep.
    pub fn run_foreground(&self, program: &Path, args: &[String]) -> Result<(), ProcessError> {
        if let Some(mut child) = self.spawn(program, args)? {
            let _ = child.wait();
        }
        Ok(())
    }

    /// Spawn without waiting; the caller owns the handle from here.
    pub fn run_background(
        &self,
        program: &Path,
        args: &[String],
    ) -> Result<Option<Child>, ProcessError> {
        self.spawn(program, args)
    }

    // Ok(None) means the program itself could not be executed (it vanished
    // after resolution, or lacks the exec bit): that command's failure, not
    // the shell's. Everything else spawn reports means the OS could not give
    // us a process, which nothing here can recover from.
    fn spawn(&self, program: &Path, args: &[String]) -> Result<Option<Child>, ProcessError> {
        let spawned = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn();

        match spawned {
            Ok(child) => Ok(Some(child)),
            Err(e) if is_image_failure(&e) => {
                if !self.quiet_mode {
                    eprintln!("{}: {}", program.display(), e);
                }
                Ok(None)
            }
            Err(e) => Err(ProcessError::Spawn(e)),
        }
    }
}

fn is_image_failure(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    )
}
