//! Process-group helpers for the extraction subprocess.
//!
//! The extractor starts the bundle as the leader of a new process group, so
//! helpers it forks can be stopped together with it.

use tracing::debug;

/// Send SIGKILL to every process in the group led by `pid`.
#[cfg(unix)]
pub fn kill_process_group(pid: u32) {
    use nix::errno::Errno;
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;
    use tracing::warn;

    let Ok(raw) = i32::try_from(pid) else {
        warn!("PID {} out of range, not signalling its group", pid);
        return;
    };

    // Negative PID addresses the process group.
    match kill(Pid::from_raw(-raw), Signal::SIGKILL) {
        Ok(()) => debug!("Sent SIGKILL to process group {}", pid),
        Err(Errno::ESRCH) => debug!("Process group {} already gone", pid),
        Err(e) => warn!("Failed to kill process group {}: {}", pid, e),
    }
}

#[cfg(not(unix))]
pub fn kill_process_group(pid: u32) {
    debug!("Process groups unsupported, only PID {} is killed", pid);
}
