use std::env;

use crate::command::{clip_line, is_blank, Command};
use crate::error::ShellError;
use crate::jobs::FULL_TABLE_ADVISORY;
use crate::path::SearchPath;

#[derive(Debug, PartialEq)]
pub(crate) enum LoopAction {
    Continue,
    Exit,
}

pub(crate) trait Dispatch {
    fn dispatch(&mut self, line: &str) -> Result<LoopAction, ShellError>;
}

impl Dispatch for super::Shell {
    fn dispatch(&mut self, line: &str) -> Result<LoopAction, ShellError> {
        if is_blank(line) {
            return Ok(LoopAction::Continue);
        }

        let command = Command::parse(clip_line(line));
        let program = command.program().to_string();

        match program.as_str() {
            "exit" | "Exit" => Ok(LoopAction::Exit),
            "jobs" | "Jobs" => {
                self.list_jobs(&command);
                Ok(LoopAction::Continue)
            }
            // Without an id the word is no built-in; path lookup gets it.
            "kill" | "Kill" if command.len() > 1 => {
                self.kill_job(&command);
                Ok(LoopAction::Continue)
            }
            "r" if command.len() == 1 => {
                self.clear_screen();
                Ok(LoopAction::Continue)
            }
            "cd" => {
                self.change_directory(&command);
                Ok(LoopAction::Continue)
            }
            _ => self.run_external(command),
        }
    }
}

impl super::Shell {
    fn list_jobs(&self, command: &Command) {
        let verbose = command.args().get(1).map(String::as_str) == Some("-l");
        for job in self.jobs.jobs() {
            println!("{}", job.describe(verbose));
        }
    }

    fn kill_job(&mut self, command: &Command) {
        // atoi shape: a non-numeric id selects the never-assigned id 0.
        let id = command.args()[1].parse().unwrap_or(0);
        if let Err(e) = self.jobs.remove(id) {
            println!("{}", e);
        }
    }

    /// A target that cannot be entered is ignored without comment.
    fn change_directory(&self, command: &Command) {
        match command.args().get(1) {
            Some(target) => {
                let _ = env::set_current_dir(target);
            }
            None => {
                if let Some(home) = dirs::home_dir() {
                    let _ = env::set_current_dir(home);
                }
            }
        }
    }

    fn run_external(&mut self, mut command: Command) -> Result<LoopAction, ShellError> {
        let mut background = command.take_background();

        if background && self.jobs.is_full() {
            println!("{}", FULL_TABLE_ADVISORY);
            background = false;
        }

        // A lone `&` leaves nothing to run once the marker is stripped.
        if command.is_empty() {
            return Ok(LoopAction::Continue);
        }

        let program = match SearchPath::from_env().resolve(command.program()) {
            Ok(program) => program,
            Err(e) => {
                eprintln!("{}", e);
                return Ok(LoopAction::Continue);
            }
        };
        let args = &command.args()[1..];

        if background {
            if let Some(child) = self.executor.run_background(&program, args)? {
                // Room was secured by the downgrade check above.
                if let Ok(job) = self.jobs.add(child, &command.joined_name()) {
                    println!("[{}]  {}", job.id(), job.pid());
                }
            }
        } else {
            self.executor.run_foreground(&program, args)?;
        }

        Ok(LoopAction::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Flags;
    use crate::jobs::MAX_JOBS;
    use crate::shell::Shell;

    fn quiet_shell() -> Shell {
        let mut flags = Flags::new();
        flags.parse(&["-q".to_string()]).expect("flags");
        Shell::new(flags).expect("shell")
    }

    #[test]
    fn blank_lines_do_nothing() {
        let mut shell = quiet_shell();
        assert_eq!(shell.dispatch(" \t ").expect("dispatch"), LoopAction::Continue);
        assert!(shell.jobs.is_empty());
    }

    #[test]
    fn exit_is_recognized_in_both_casings() {
        let mut shell = quiet_shell();
        assert_eq!(shell.dispatch("exit").expect("dispatch"), LoopAction::Exit);
        assert_eq!(shell.dispatch("Exit").expect("dispatch"), LoopAction::Exit);
    }

    #[test]
    fn unknown_command_is_reported_not_fatal() {
        let mut shell = quiet_shell();
        let action = shell.dispatch("venule_no_such_tool").expect("dispatch");
        assert_eq!(action, LoopAction::Continue);
    }

    #[test]
    fn lone_background_marker_is_skipped() {
        let mut shell = quiet_shell();
        assert_eq!(shell.dispatch("&").expect("dispatch"), LoopAction::Continue);
        assert!(shell.jobs.is_empty());
    }

    #[test]
    fn clear_alias_takes_no_arguments() {
        let mut shell = quiet_shell();
        assert_eq!(shell.dispatch("r").expect("dispatch"), LoopAction::Continue);
        // With arguments the word goes through path lookup like anything else.
        assert_eq!(
            shell.dispatch("r venule_extra_arg").expect("dispatch"),
            LoopAction::Continue
        );
    }

    #[test]
    fn kill_with_unknown_id_is_advisory_only() {
        let mut shell = quiet_shell();
        assert_eq!(shell.dispatch("kill 99").expect("dispatch"), LoopAction::Continue);
        assert_eq!(
            shell.dispatch("Kill nonsense").expect("dispatch"),
            LoopAction::Continue
        );
    }

    #[test]
    fn cd_to_missing_directory_is_silent() {
        let mut shell = quiet_shell();
        let before = env::current_dir().expect("cwd");
        assert_eq!(
            shell.dispatch("cd /venule/no/such/dir").expect("dispatch"),
            LoopAction::Continue
        );
        assert_eq!(env::current_dir().expect("cwd"), before);
    }

    #[test]
    fn jobs_listing_handles_an_empty_table() {
        let mut shell = quiet_shell();
        assert_eq!(shell.dispatch("jobs").expect("dispatch"), LoopAction::Continue);
        assert_eq!(shell.dispatch("jobs -l").expect("dispatch"), LoopAction::Continue);
    }

    #[test]
    fn background_marker_tracks_a_job() {
        let mut shell = quiet_shell();
        shell.dispatch("sleep 100 &").expect("dispatch");
        assert_eq!(shell.jobs.len(), 1);
        assert_eq!(shell.jobs.jobs()[0].name(), "sleep 100");
        shell.jobs.kill_all();
    }

    #[test]
    fn background_request_downgrades_when_full() {
        let mut shell = quiet_shell();
        for _ in 0..MAX_JOBS {
            shell.dispatch("sleep 100 &").expect("dispatch");
        }
        assert!(shell.jobs.is_full());

        // Runs in the foreground instead; `true` exits on its own.
        shell.dispatch("true &").expect("dispatch");
        assert_eq!(shell.jobs.len(), MAX_JOBS);
        shell.jobs.kill_all();
    }

    #[test]
    fn killing_a_tracked_job_renumbers_the_rest() {
        let mut shell = quiet_shell();
        shell.dispatch("sleep 100 &").expect("dispatch");
        shell.dispatch("sleep 101 &").expect("dispatch");
        shell.dispatch("kill 1").expect("dispatch");
        assert_eq!(shell.jobs.len(), 1);
        assert_eq!(shell.jobs.jobs()[0].id(), 1);
        assert_eq!(shell.jobs.jobs()[0].name(), "sleep 101");
        shell.jobs.kill_all();
    }

    #[test]
    fn foreground_wait_does_not_steal_background_exits() {
        let mut shell = quiet_shell();
        shell.dispatch("true &").expect("dispatch");
        assert_eq!(shell.jobs.len(), 1);

        // The wait targets the foreground child alone, so the finished
        // background job stays in the table for the sweep to collect.
        shell.dispatch("sleep 0.2").expect("dispatch");

        let mut reaped = shell.jobs.reap_exited();
        for _ in 0..100 {
            if !reaped.is_empty() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
            reaped.extend(shell.jobs.reap_exited());
        }
        assert_eq!(reaped.len(), 1);
        assert_eq!(reaped[0].name(), "true");
        assert!(shell.jobs.is_empty());
    }
}
