use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Most entries a search path will keep; extra segments are dropped.
pub const MAX_PATHS: usize = 8;

#[derive(Debug, PartialEq)]
pub enum ResolveError {
    // Absolute name that does not exist on disk.
    DirectoryNotFound(String),
    // Bare name with no match in any search directory.
    CommandNotFound(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::DirectoryNotFound(name) => write!(f, "{}: directory not found", name),
            ResolveError::CommandNotFound(name) => write!(f, "{}: command not found", name),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Ordered list of directories to probe for bare command names.
///
/// Rebuilt from `PATH` on every prompt, so edits made by a running command
/// take effect on the next line. First matching directory wins.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    dirs: Vec<String>,
}

impl SearchPath {
    pub fn parse(raw: &str) -> Self {
        let dirs = raw
            .split(':')
            .filter(|segment| !segment.is_empty())
            .take(MAX_PATHS)
            .map(str::to_string)
            .collect();
        SearchPath { dirs }
    }

    /// An absent `PATH` is legal: bare names simply never resolve.
    pub fn from_env() -> Self {
        match env::var("PATH") {
            Ok(raw) => Self::parse(&raw),
            Err(_) => SearchPath::default(),
        }
    }

    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Map a command name to an absolute path.
    ///
    /// Names starting with `/` are checked directly and returned verbatim;
    /// the search directories are never consulted for them. Anything else is
    /// probed as `dir/name` in order. Probes are read-only existence checks;
    /// diagnostics are the caller's job.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, ResolveError> {
        if name.starts_with('/') {
            let path = Path::new(name);
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(ResolveError::DirectoryNotFound(name.to_string()));
        }

        for dir in &self.dirs {
            let candidate = Path::new(dir).join(name);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
        Err(ResolveError::CommandNotFound(name.to_string()))
    }
}
