use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use nix::unistd::{getuid, User};

/// The slice of process state the builtins are allowed to read and change.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;

    /// Home directory from the user database for the invoking user.
    fn user_home(&self) -> Option<PathBuf>;

    fn change_dir(&mut self, path: &Path) -> io::Result<()>;

    fn pid(&self) -> u32;
}

/// The real process environment.
#[derive(Debug, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn user_home(&self) -> Option<PathBuf> {
        match User::from_uid(getuid()) {
            Ok(user) => user.map(|user| user.dir),
            Err(e) => {
                log::warn!("无法读取用户记录: {}", e);
                None
            }
        }
    }

    fn change_dir(&mut self, path: &Path) -> io::Result<()> {
        env::set_current_dir(path)
    }

    fn pid(&self) -> u32 {
        process::id()
    }
}

#[cfg(test)]
pub use mock::MockEnvironment;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_pid_matches_process() {
        assert_eq!(SystemEnvironment.pid(), process::id());
    }

    #[test]
    fn test_system_reads_path() {
        assert_eq!(SystemEnvironment.var("PATH"), env::var("PATH").ok());
    }
}
