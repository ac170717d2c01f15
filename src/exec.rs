//! Subprocess execution helpers.

use anyhow::{Context, Result, bail};
use std::io::Read as _;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

/// Run a command with a hard wall-clock timeout, killing it on expiry.
///
/// Stdout and stdin stay inherited so the child can interact with the
/// terminal (ssh-keygen prompts for a passphrase); stderr is captured for
/// diagnostics. The child's exit status is polled every 50ms.
///
/// # Errors
///
/// Returns an error if the command cannot be spawned or does not exit within
/// `timeout`. A non-zero exit is reported through [`ExecResult`], not as an
/// error, so callers can attach the captured stderr to their own diagnostics.
pub fn run_with_timeout(program: &str, args: &[&str], timeout: Duration) -> Result<ExecResult> {
    let mut child = Command::new(program)
        .args(args)
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to execute: {program}"))?;

    // Drain stderr on a separate thread so a chatty child cannot fill the
    // pipe buffer and block before we observe its exit.
    let mut stderr_pipe = child.stderr.take();
    let reader = std::thread::spawn(move || {
        let mut buf = String::new();
        if let Some(ref mut pipe) = stderr_pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child
            .try_wait()
            .with_context(|| format!("waiting for {program}"))?
        {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            bail!(
                "{program} did not finish within {}s and was killed",
                timeout.as_secs()
            );
        }
        std::thread::sleep(Duration::from_millis(50));
    };

    let stderr = reader.join().unwrap_or_default();
    Ok(ExecResult {
        stdout: String::new(),
        stderr,
        success: status.success(),
        code: status.code(),
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn run_with_timeout_success() {
        #[cfg(windows)]
        let result = run_with_timeout("cmd", &["/C", "exit", "0"], Duration::from_secs(5)).unwrap();
        #[cfg(not(windows))]
        let result = run_with_timeout("true", &[], Duration::from_secs(5)).unwrap();
        assert!(result.success);
    }

    #[test]
    fn run_with_timeout_nonzero_exit_is_not_an_error() {
        #[cfg(windows)]
        let result = run_with_timeout("cmd", &["/C", "exit", "1"], Duration::from_secs(5)).unwrap();
        #[cfg(not(windows))]
        let result = run_with_timeout("false", &[], Duration::from_secs(5)).unwrap();
        assert!(!result.success, "non-zero exit should set success=false");
    }

    #[test]
    #[cfg(not(windows))]
    fn run_with_timeout_kills_hung_process() {
        let start = Instant::now();
        let result = run_with_timeout("sleep", &["30"], Duration::from_millis(200));
        assert!(result.is_err(), "timeout should produce an error");
        assert!(
            start.elapsed() < Duration::from_secs(5),
            "hung child should be killed promptly"
        );
    }

    #[test]
    fn run_with_timeout_missing_program() {
        let result = run_with_timeout(
            "this-program-does-not-exist-12345",
            &[],
            Duration::from_secs(1),
        );
        assert!(result.is_err());
    }
}
