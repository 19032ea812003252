/// Most tokens a single command line will keep; the rest are dropped.
pub const MAX_ARGS: usize = 64;

/// Line-read bound in bytes, counting the notional trailing newline.
pub const MAX_LINE_LEN: usize = 80;

/// Blank lines are skipped before parsing; the parser never sees one.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Clamp a raw input line to the usable byte budget, never splitting a
/// character. Overflow is dropped, not carried into the next read.
pub fn clip_line(line: &str) -> &str {
    let mut cap = MAX_LINE_LEN - 1;
    if line.len() <= cap {
        return line;
    }
    while !line.is_char_boundary(cap) {
        cap -= 1;
    }
    &line[..cap]
}

/// A tokenized command line. The first token is the program or built-in
/// name; the vector's length is the argument count.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    args: Vec<String>,
}

impl Command {
    /// Tokenize on whitespace runs, keeping order, stopping at [`MAX_ARGS`].
    /// Runs of separators never produce empty tokens.
    pub fn parse(line: &str) -> Self {
        let args = line
            .split_whitespace()
            .take(MAX_ARGS)
            .map(str::to_string)
            .collect();
        Command { args }
    }

    pub fn program(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Strip a trailing `&` token, reporting whether one was present.
    ///
    /// The marker is the only control token this shell recognizes, and only
    /// in final position; a `&` anywhere else is an ordinary argument.
    pub fn take_background(&mut self) -> bool {
        if self.args.last().map(String::as_str) == Some("&") {
            self.args.pop();
            return true;
        }
        false
    }

    /// Space-joined reconstruction of the command line, used for job names.
    pub fn joined_name(&self) -> String {
        self.args.join(" ")
    }
}
