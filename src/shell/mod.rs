use std::env;

use rustyline::DefaultEditor;

mod dispatch;

use crate::{
    error::ShellError,
    flags::Flags,
    jobs::JobTable,
    process::{executor::ProcessExecutor, signal},
    prompt::PromptRenderer,
};

use dispatch::{Dispatch, LoopAction};

pub struct Shell {
    pub(crate) editor: DefaultEditor,
    pub(crate) jobs: JobTable,
    pub(crate) executor: ProcessExecutor,
    pub(crate) prompt: PromptRenderer,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let editor = DefaultEditor::new()?;
        let executor = ProcessExecutor::new(&flags);

        Ok(Shell {
            editor,
            jobs: JobTable::new(),
            executor,
            prompt: PromptRenderer::new(),
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        self.clear_screen();
        if let Some(home) = dirs::home_dir() {
            let _ = env::set_current_dir(home);
        }

        loop {
            self.announce_finished_jobs();

            // Re-armed every pass; a command may have replaced the disposition.
            signal::ignore_interrupts();

            let prompt = self.prompt.render();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        if !self.flags.is_set("quiet") {
                            eprintln!("Warning: Couldn't add to history: {}", e);
                        }
                    }

                    match self.dispatch(&line)? {
                        LoopAction::Continue => {}
                        LoopAction::Exit => {
                            self.clear_screen();
                            self.jobs.kill_all();
                            return Ok(());
                        }
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    if !self.flags.is_set("quiet") {
                        println!("CTRL-C");
                    }
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    if !self.flags.is_set("quiet") {
                        println!("CTRL-D");
                    }
                    self.jobs.kill_all();
                    return Ok(());
                }
                Err(e) => {
                    if !self.flags.is_set("quiet") {
                        eprintln!("Error: {}", e);
                    }
                    continue;
                }
            }
        }
    }

    /// Report background jobs that finished since the last prompt.
    fn announce_finished_jobs(&mut self) {
        for job in self.jobs.reap_exited() {
            println!("[{}] + done {}", job.id(), job.name());
        }
    }

    fn clear_screen(&self) {
        if self.flags.is_set("quiet") {
            return;
        }
        let _ = std::process::Command::new("clear").status();
    }
}
