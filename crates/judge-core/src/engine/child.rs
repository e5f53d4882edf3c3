//! Shared child-process spawn/timeout/capture plumbing used by both the
//! compile and execute stages.
//!
//! `std::process::Child` has no built-in timed wait, so the deadline is
//! enforced by polling `try_wait` from the calling thread while stdout and
//! stderr are drained concurrently on dedicated threads (avoiding the classic
//! pipe-buffer deadlock a single-threaded `wait` + `read_to_end` would hit).
//! Spawning and driving are split into two functions so callers can
//! distinguish a spawn failure from a wait failure.

use std::io::{self, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// The outcome of driving a child process to completion or to its deadline.
pub struct ChildOutcome {
    pub status: Option<ExitStatus>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub timed_out: bool,
}

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Configures `command`'s stdio and spawns it.
pub fn spawn(mut command: Command, with_stdin: bool) -> io::Result<Child> {
    command
        .stdin(if with_stdin { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    command.spawn()
}

/// Writes `stdin` (if any) and drives `child` to completion or to `timeout`,
/// capturing stdout/stderr throughout. On timeout the child is killed and
/// `timed_out` is set; the child is always killed (best-effort, a no-op if
/// already reaped) before returning.
pub fn drive(mut child: Child, stdin: Option<&str>, timeout: Duration) -> io::Result<ChildOutcome> {
    if let Some(data) = stdin {
        if let Some(mut pipe) = child.stdin.take() {
            // the child may exit before reading everything; a broken pipe
            // here is not itself a spawn/wait failure.
            let _ = pipe.write_all(data.as_bytes());
        }
    }

    let stdout_handle = child.stdout.take().map(spawn_reader);
    let stderr_handle = child.stderr.take().map(spawn_reader);

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break Some(status);
        }
        if Instant::now() >= deadline {
            break None;
        }
        std::thread::sleep(POLL_INTERVAL);
    };

    let timed_out = status.is_none();
    if timed_out {
        let _ = child.kill();
        let _ = child.wait();
    } else {
        let _ = child.kill();
    }

    let stdout = join_reader(stdout_handle);
    let stderr = join_reader(stderr_handle);

    Ok(ChildOutcome {
        status,
        stdout,
        stderr,
        timed_out,
    })
}

fn spawn_reader<R>(mut pipe: R) -> std::thread::JoinHandle<Vec<u8>>
where
    R: Read + Send + 'static,
{
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn join_reader(handle: Option<std::thread::JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}
