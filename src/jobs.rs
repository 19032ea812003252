use std::fmt;
use std::process::Child;

/// Most background jobs tracked at once; requests past this run in the
/// foreground instead.
pub const MAX_JOBS: usize = 10;

/// Byte budget for a job's reconstructed command line.
pub const MAX_JOB_NAME: usize = 64;

/// Advisory printed when a background request is downgraded to foreground.
pub const FULL_TABLE_ADVISORY: &str =
    "Max number of background jobs attained. Job running in foreground...";

#[derive(Debug)]
pub enum JobError {
    TableFull,
    NoSuchJob(usize),
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobError::TableFull => write!(f, "{}", FULL_TABLE_ADVISORY),
            JobError::NoSuchJob(_) => write!(f, "Job ID not found. Enter a valid Job ID."),
        }
    }
}

impl std::error::Error for JobError {}

// Names longer than the budget are cut at a character boundary.
fn clip_name(name: &str) -> &str {
    let mut cap = MAX_JOB_NAME;
    if name.len() <= cap {
        return name;
    }
    while !name.is_char_boundary(cap) {
        cap -= 1;
    }
    &name[..cap]
}

/// One tracked background process. The owned [`Child`] handle is the only
/// route the table signals or reaps through.
#[derive(Debug)]
pub struct Job {
    id: usize,
    pid: u32,
    name: String,
    child: Child,
}

impl Job {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// One listing line; `verbose` adds the pid column.
    pub fn describe(&self, verbose: bool) -> String {
        if verbose {
            format!("[{}]\t{}\t{}", self.id, self.pid, self.name)
        } else {
            format!("[{}]\t{}", self.id, self.name)
        }
    }
}

/// Registry of in-flight background jobs.
///
/// Ids are dense and contiguous from 1 for everything currently tracked;
/// removing a job renumbers the jobs after it to close the gap.
#[derive(Debug, Default)]
pub struct JobTable {
    jobs: Vec<Job>,
}

impl JobTable {
    pub fn new() -> Self {
        JobTable { jobs: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.jobs.len() >= MAX_JOBS
    }

    /// All tracked jobs in table order (ascending id).
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Track a freshly spawned child under the next id.
    pub fn add(&mut self, child: Child, name: &str) -> Result<&Job, JobError> {
        if self.is_full() {
            return Err(JobError::TableFull);
        }
        let id = self.jobs.len() + 1;
        let pid = child.id();
        self.jobs.push(Job {
            id,
            pid,
            name: clip_name(name).to_string(),
            child,
        });
        Ok(&self.jobs[id - 1])
    }

    /// Kill the job with the given id and drop it from the table,
    /// renumbering every job after it.
    ///
    /// Signaling is fire-and-forget: a process that already exited on its
    /// own is not an error. The dead child is reaped here since the sweep
    /// only ever sees tracked entries.
    pub fn remove(&mut self, id: usize) -> Result<(), JobError> {
        let index = self
            .jobs
            .iter()
            .position(|job| job.id == id)
            .ok_or(JobError::NoSuchJob(id))?;
        let mut job = self.jobs.remove(index);
        let _ = job.child.kill();
        let _ = job.child.wait();
        for following in &mut self.jobs[index..] {
            following.id -= 1;
        }
        Ok(())
    }

    /// Non-blocking sweep collecting every job whose process has exited.
    ///
    /// Exited jobs are removed and returned (the caller prints the
    /// completion notices); survivors are renumbered exactly as
    /// [`JobTable::remove`] does.
    pub fn reap_exited(&mut self) -> Vec<Job> {
        let mut reaped = Vec::new();
        let mut index = 0;
        while index < self.jobs.len() {
            match self.jobs[index].child.try_wait() {
                Ok(Some(_status)) => {
                    reaped.push(self.jobs.remove(index));
                    for following in &mut self.jobs[index..] {
                        following.id -= 1;
                    }
                }
                // Still running, or the poll failed; either way it stays
                // tracked and the next sweep retries.
                Ok(None) | Err(_) => index += 1,
            }
        }
        reaped
    }

    /// Kill everything still tracked. Shutdown-only, so no renumbering.
    pub fn kill_all(&mut self) {
        for job in &mut self.jobs {
            let _ = job.child.kill();
            let _ = job.child.wait();
        }
        self.jobs.clear();
    }
}
