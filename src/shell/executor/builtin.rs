use std::io::Write;
use std::path::PathBuf;

use log::{debug, warn};

use super::environment::Environment;

/// What the command loop should do after a builtin ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Status(i32),
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Echo,
    Exit,
}

impl Builtin {
    /// Matches the whole command name; `cdx` or `echoes` are not builtins.
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "cd" => Some(Builtin::Cd),
            "echo" => Some(Builtin::Echo),
            "exit" => Some(Builtin::Exit),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Cd => "cd",
            Builtin::Echo => "echo",
            Builtin::Exit => "exit",
        }
    }

    /// Runs the builtin in-process. `status` is the previous command's exit status.
    pub fn run(
        self,
        args: &[String],
        status: i32,
        env: &mut dyn Environment,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Outcome {
        debug!("执行内建命令: {} {:?}", self.name(), args);
        match self {
            Builtin::Cd => Outcome::Status(change_dir(args, env, err)),
            Builtin::Echo => Outcome::Status(echo_line(args, status, env, out)),
            Builtin::Exit => Outcome::Exit,
        }
    }
}

fn home_dir(env: &dyn Environment) -> Option<PathBuf> {
    env.var("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(|| env.user_home())
}

fn change_dir(args: &[String], env: &mut dyn Environment, err: &mut dyn Write) -> i32 {
    let target = match args {
        [] => match home_dir(env) {
            Some(home) => home,
            None => {
                let _ = writeln!(err, "cd: HOME not set and no home directory for this user");
                return 1;
            }
        },
        [path] => PathBuf::from(path),
        _ => {
            let _ = writeln!(err, "cd: too many arguments");
            return 1;
        }
    };

    match env.change_dir(&target) {
        Ok(()) => {
            debug!("切换目录: {}", target.display());
            0
        }
        Err(e) => {
            let _ = writeln!(err, "cd: {}: {}", target.display(), e);
            1
        }
    }
}

// Words are joined with one space each; `$?` and `$$` are the only expansions.
fn echo_line(args: &[String], status: i32, env: &dyn Environment, out: &mut dyn Write) -> i32 {
    let words: Vec<String> = args
        .iter()
        .map(|arg| match arg.as_str() {
            "$?" => status.to_string(),
            "$$" => env.pid().to_string(),
            _ => arg.clone(),
        })
        .collect();

    if let Err(e) = writeln!(out, "{}", words.join(" ")) {
        warn!("echo 输出失败: {}", e);
    }
    0
}
