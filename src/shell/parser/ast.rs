use std::os::fd::{AsRawFd, OwnedFd, RawFd};

/// Upper bound on the argument vector, including the slot exec reserves for its terminator.
pub const MAX_ARGS: usize = 128;

/// Where a launched command reads its standard input from.
///
/// A redirected file is owned here; dropping the value closes the descriptor, so it
/// lives exactly as long as the command that requested it.
#[derive(Debug, Default)]
pub enum InputSource {
    #[default]
    Inherit,
    File(OwnedFd),
}

impl InputSource {
    pub fn is_redirected(&self) -> bool {
        matches!(self, InputSource::File(_))
    }
}

/// One command line after redirect scanning and tokenization.
#[derive(Debug, Default)]
pub struct CommandInfo {
    tokens: Vec<String>,
    input: InputSource,
}

impl CommandInfo {
    pub fn new(mut tokens: Vec<String>, input: InputSource) -> Self {
        tokens.truncate(MAX_ARGS - 1);
        Self { tokens, input }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// The command name, `None` for a blank line.
    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Everything after the command name.
    pub fn arguments(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    pub fn input(&self) -> &InputSource {
        &self.input
    }

    pub fn fd_in(&self) -> RawFd {
        match &self.input {
            InputSource::Inherit => libc::STDIN_FILENO,
            InputSource::File(fd) => fd.as_raw_fd(),
        }
    }

    // Output redirection is not wired up; children always inherit stdout.
    pub fn fd_out(&self) -> RawFd {
        libc::STDOUT_FILENO
    }
}
