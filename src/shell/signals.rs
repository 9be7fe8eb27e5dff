use log::debug;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use once_cell::sync::OnceCell;

static ORIGINAL_ACTIONS: OnceCell<Vec<SigAction>> = OnceCell::new();

const JOB_CONTROL_SIGNALS: [Signal; 3] = [Signal::SIGINT, Signal::SIGQUIT, Signal::SIGTSTP];

/// Makes the interpreter ignore Ctrl-C, Ctrl-\ and Ctrl-Z, remembering the actions it
/// started with. Ignored signals are discarded, so nothing is left pending for later.
pub fn ignore_job_control() -> nix::Result<()> {
    let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());

    let mut previous = Vec::with_capacity(JOB_CONTROL_SIGNALS.len());
    for sig in JOB_CONTROL_SIGNALS {
        previous.push(unsafe { sigaction(sig, &ignore) }?);
    }
    if ORIGINAL_ACTIONS.set(previous).is_ok() {
        debug!("已忽略信号: {:?}", JOB_CONTROL_SIGNALS);
    }
    Ok(())
}

/// Puts back the actions saved by [`ignore_job_control`]. Called in every child before
/// exec, since ignored dispositions survive exec; a no-op if nothing was changed.
pub fn restore_original_actions() {
    if let Some(actions) = ORIGINAL_ACTIONS.get() {
        for (sig, action) in JOB_CONTROL_SIGNALS.iter().zip(actions) {
            let _ = unsafe { sigaction(*sig, action) };
        }
    }
}
