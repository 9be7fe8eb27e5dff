use std::ffi::{CString, NulError};
use std::io::Write;
use std::os::fd::RawFd;
use std::{iter, ptr};

use libc::c_char;
use log::{debug, error};
use nix::errno::Errno;
use nix::fcntl::{fcntl, FcntlArg, FdFlag};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{close, dup2, fork, ForkResult, Pid};

use crate::shell::parser::CommandInfo;
use crate::shell::signals;

/// Status for a command that could not be started or waited for.
pub const RESERVED_FAILURE: i32 = 127;

/// Runs an external command in a child process and blocks until it finishes.
///
/// The executable is looked up through `PATH`. Every failure is folded into the
/// returned status; nothing escapes to the caller.
pub fn launch(info: &CommandInfo, err: &mut dyn Write) -> i32 {
    let Some(program) = info.program() else {
        return 0;
    };

    let argv = match to_argv(info.tokens()) {
        Ok(argv) => argv,
        Err(e) => {
            let _ = writeln!(err, "sish: {}: {}", program, e);
            return RESERVED_FAILURE;
        }
    };
    // Everything the child touches is built before forking; it must not allocate.
    let exec_argv = exec_pointers(&argv);
    let not_found = format!("{}: command not found\n", program);
    let redirect = info.input().is_redirected().then(|| info.fd_in());

    debug!("执行外部命令: {:?} (stdin: {}, stdout: {})", argv, info.fd_in(), info.fd_out());
    match unsafe { fork() } {
        Ok(ForkResult::Child) => exec_child(&exec_argv, redirect, &not_found),
        Ok(ForkResult::Parent { child }) => {
            debug!("子进程已创建: {}", child);
            wait_child(child, err)
        }
        Err(e) => {
            error!("fork 失败: {}", e);
            let _ = writeln!(err, "sish: fork: {}", e);
            RESERVED_FAILURE
        }
    }
}

fn to_argv(tokens: &[String]) -> Result<Vec<CString>, NulError> {
    tokens.iter().map(|token| CString::new(token.as_bytes())).collect()
}

/// Null-terminated pointer array for `execvp`, borrowing from `argv`.
fn exec_pointers(argv: &[CString]) -> Vec<*const c_char> {
    argv.iter()
        .map(|arg| arg.as_ptr())
        .chain(iter::once(ptr::null()))
        .collect()
}

/// Makes `fd` the standard input. When the file already landed on descriptor 0 it
/// only loses its close-on-exec flag.
fn redirect_stdin(fd: RawFd) -> nix::Result<()> {
    if fd == libc::STDIN_FILENO {
        fcntl(fd, FcntlArg::F_SETFD(FdFlag::empty()))?;
        return Ok(());
    }
    dup2(fd, libc::STDIN_FILENO)?;
    close(fd)
}

fn exec_child(argv: &[*const c_char], redirect: Option<RawFd>, not_found: &str) -> ! {
    signals::restore_original_actions();

    if let Some(fd) = redirect {
        if redirect_stdin(fd).is_err() {
            unsafe { libc::_exit(RESERVED_FAILURE) }
        }
    }

    if let Some(&file) = argv.first().filter(|file| !file.is_null()) {
        unsafe { libc::execvp(file, argv.as_ptr()) };
    }

    unsafe {
        libc::write(
            libc::STDERR_FILENO,
            not_found.as_ptr().cast(),
            not_found.len(),
        );
        libc::_exit(RESERVED_FAILURE)
    }
}

fn wait_child(child: Pid, err: &mut dyn Write) -> i32 {
    loop {
        match waitpid(child, None) {
            Ok(ws) => {
                if let Some(status) = exit_status(ws) {
                    debug!("子进程结束: {:?} -> {}", ws, status);
                    return status;
                }
            }
            Err(Errno::EINTR) => continue,
            Err(e) => {
                error!("waitpid 失败: {}", e);
                let _ = writeln!(err, "sish: wait: {}", e);
                return RESERVED_FAILURE;
            }
        }
    }
}

/// Plain exit code for a finished child; `None` while it is still around.
///
/// A child killed by a signal reports `128 + signal`.
pub fn exit_status(ws: WaitStatus) -> Option<i32> {
    match ws {
        WaitStatus::Exited(_, code) => Some(code & 0xff),
        WaitStatus::Signaled(_, sig, _) => Some(128 + sig as i32),
        _ => None,
    }
}
