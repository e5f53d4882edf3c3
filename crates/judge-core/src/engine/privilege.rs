//! Post-fork, pre-exec privilege drop for the execution child.
//!
//! Unix only: the execution child is handed off to an unprivileged uid/gid
//! before it execs the compiled binary, via `CommandExt::pre_exec`. Resource
//! limits are applied best-effort in the same hook; a `setrlimit` failure is
//! not fatal, wall-clock timeout remains the authoritative backstop.

use std::process::Command;

/// 512 MiB, a generous but bounded address-space ceiling for the sandboxed
/// binary.
#[cfg(unix)]
const ADDRESS_SPACE_LIMIT: libc::rlim_t = 512 * 1024 * 1024;

#[cfg(unix)]
pub fn drop_privileges(command: &mut Command, uid: u32) {
    use std::os::unix::process::CommandExt;

    unsafe {
        command.pre_exec(move || {
            if libc::setgid(uid) != 0 {
                return Err(std::io::Error::last_os_error());
            }
            if libc::setuid(uid) != 0 {
                return Err(std::io::Error::last_os_error());
            }

            let limit = libc::rlimit {
                rlim_cur: ADDRESS_SPACE_LIMIT,
                rlim_max: ADDRESS_SPACE_LIMIT,
            };
            // best-effort: ignore failure, wall-clock timeout is authoritative
            libc::setrlimit(libc::RLIMIT_AS, &limit);

            Ok(())
        });
    }
}

#[cfg(not(unix))]
pub fn drop_privileges(_command: &mut Command, _uid: u32) {}
