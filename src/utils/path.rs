use std::borrow::Cow;
use std::env;
use std::io;
use std::path::PathBuf;

use log::debug;

pub fn basename(path: &str) -> Cow<'_, str> {
    let mut pieces = path.rsplit('/');
    match pieces.next() {
        Some(p) if !p.is_empty() => p.into(),
        _ => path.into(),
    }
}

/// Absolute, symlink-free path of the running interpreter.
pub fn shell_path() -> io::Result<PathBuf> {
    env::current_exe()?.canonicalize()
}

/// Points `SHELL` at this interpreter so launched programs can find it.
pub fn export_shell() -> io::Result<PathBuf> {
    let path = shell_path()?;
    debug!("设置 SHELL={}", path.display());
    env::set_var("SHELL", &path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename() {
        assert_eq!(basename("/usr/local/bin/sish"), "sish");
        assert_eq!(basename("./sish"), "sish");
        assert_eq!(basename("sish"), "sish");
        assert_eq!(basename("/"), "/");
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_shell_path_is_absolute() {
        let path = shell_path().unwrap();
        assert!(path.is_absolute());
        assert!(path.exists());
    }
}
