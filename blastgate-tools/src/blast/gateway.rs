//! Bounded execution of BLAST subprocesses

use super::command::{BlastCommand, OutputTarget};
use crate::traits::SearchRunner;
use async_trait::async_trait;
use blastgate_core::{BlastgateError, BlastgateResult};
use std::io;
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};
use tokio::process::Command;

/// Default wall-clock bound for a single search
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs BLAST commands as subprocesses with a wall-clock limit
///
/// Each command runs in its own process group so that a timeout kills
/// everything the tool started, not just the direct child.
#[derive(Debug, Clone)]
pub struct BlastGateway {
    timeout: Duration,
}

impl Default for BlastGateway {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl BlastGateway {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the command and return its report
    pub async fn execute(&self, command: &BlastCommand) -> BlastgateResult<String> {
        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        cmd.process_group(0);

        tracing::debug!("Running: {}", command);
        let started = Instant::now();

        let child = cmd.spawn().map_err(|e| spawn_error(command, e))?;
        let pid = child.id();

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| {
                BlastgateError::ToolLaunchFailed(format!(
                    "failed waiting for {}: {}",
                    command.program().display(),
                    e
                ))
            })?,
            Err(_) => {
                if let Some(pid) = pid {
                    kill_process_group(pid);
                }
                tracing::warn!(
                    "{} exceeded the {}s limit and was killed",
                    command.program().display(),
                    self.timeout.as_secs()
                );
                return Err(BlastgateError::ToolTimeout);
            }
        };

        tracing::debug!(
            "{} finished in {:.2}s with {}",
            command.program().display(),
            started.elapsed().as_secs_f64(),
            output.status
        );

        self.collect_report(command, output).await
    }

    async fn collect_report(&self, command: &BlastCommand, output: Output) -> BlastgateResult<String> {
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(
                "{} exited with {}: {}",
                command.program().display(),
                output.status,
                stderr
            );
            return Err(BlastgateError::ToolExecutionFailed(stderr));
        }

        match command.output() {
            OutputTarget::Stdout => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            OutputTarget::File(path) => Ok(tokio::fs::read_to_string(path).await?),
        }
    }
}

#[async_trait]
impl SearchRunner for BlastGateway {
    async fn run(&self, command: &BlastCommand) -> BlastgateResult<String> {
        self.execute(command).await
    }
}

fn spawn_error(command: &BlastCommand, error: io::Error) -> BlastgateError {
    match error.kind() {
        io::ErrorKind::NotFound => {
            tracing::error!("{} not found", command.program().display());
            BlastgateError::ToolUnavailable
        }
        _ => {
            tracing::error!("Failed to launch {}: {}", command.program().display(), error);
            BlastgateError::ToolLaunchFailed(format!(
                "{}: {}",
                command.program().display(),
                error
            ))
        }
    }
}

#[cfg(unix)]
fn kill_process_group(pid: u32) {
    // The group id equals the child's pid because of process_group(0)
    let result = unsafe { libc::killpg(pid as libc::pid_t, libc::SIGKILL) };
    if result != 0 {
        let err = io::Error::last_os_error();
        if err.raw_os_error() != Some(libc::ESRCH) {
            tracing::warn!("Failed to kill process group {}: {}", pid, err);
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn shell(script: &str) -> BlastCommand {
        BlastCommand::new(
            "/bin/sh",
            vec!["-c".to_string(), script.to_string()],
            OutputTarget::Stdout,
        )
    }

    #[tokio::test]
    async fn test_stdout_returned_verbatim() {
        let gateway = BlastGateway::default();
        let report = gateway
            .execute(&shell("printf '<html>\\n  hits\\n</html>\\n'"))
            .await
            .unwrap();
        assert_eq!(report, "<html>\n  hits\n</html>\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_reports_trimmed_stderr() {
        let gateway = BlastGateway::default();
        let err = gateway
            .execute(&shell("echo '  BLAST Database error: No alias found  ' >&2; exit 2"))
            .await
            .unwrap_err();

        match err {
            BlastgateError::ToolExecutionFailed(stderr) => {
                assert_eq!(stderr, "BLAST Database error: No alias found")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_executable_is_unavailable() {
        let gateway = BlastGateway::default();
        let command = BlastCommand::new(
            "/nonexistent/bin/blastn",
            Vec::new(),
            OutputTarget::Stdout,
        );
        let err = gateway.execute(&command).await.unwrap_err();
        assert!(matches!(err, BlastgateError::ToolUnavailable));
    }

    #[tokio::test]
    async fn test_non_executable_file_is_launch_failure() {
        let dir = TempDir::new().unwrap();
        let program = dir.path().join("blastn");
        std::fs::write(&program, "not a program").unwrap();

        let gateway = BlastGateway::default();
        let command = BlastCommand::new(program, Vec::new(), OutputTarget::Stdout);
        let err = gateway.execute(&command).await.unwrap_err();
        assert!(matches!(err, BlastgateError::ToolLaunchFailed(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let gateway = BlastGateway::new(Duration::from_millis(200));
        let started = Instant::now();
        let err = gateway.execute(&shell("sleep 10")).await.unwrap_err();

        assert!(matches!(err, BlastgateError::ToolTimeout));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_file_output_target() {
        let dir = TempDir::new().unwrap();
        let report = dir.path().join("report.html");
        let command = BlastCommand::new(
            "/bin/sh",
            vec![
                "-c".to_string(),
                "printf '<html>file</html>' > \"$0\"; echo ignored".to_string(),
                report.to_string_lossy().into_owned(),
            ],
            OutputTarget::File(report.clone()),
        );

        let result = BlastGateway::default().execute(&command).await.unwrap();
        assert_eq!(result, "<html>file</html>");
    }

    #[tokio::test]
    async fn test_runner_trait_delegates() {
        let runner: Box<dyn SearchRunner> = Box::new(BlastGateway::default());
        assert_eq!(runner.run(&shell("printf ok")).await.unwrap(), "ok");
        assert_eq!(runner.name(), "blast");
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_timeout_kills_process_group() {
        let dir = TempDir::new().unwrap();
        let pid_file: PathBuf = dir.path().join("pid");
        let script = format!("sleep 30 & echo $! > {}; wait", pid_file.display());

        let gateway = BlastGateway::new(Duration::from_millis(500));
        let err = gateway.execute(&shell(&script)).await.unwrap_err();
        assert!(matches!(err, BlastgateError::ToolTimeout));

        let pid = std::fs::read_to_string(&pid_file).unwrap().trim().to_string();
        let stat = PathBuf::from("/proc").join(&pid).join("stat");

        // Killed children may linger as zombies until reaped
        let mut gone = false;
        for _ in 0..50 {
            match std::fs::read_to_string(&stat) {
                Err(_) => gone = true,
                Ok(s) => gone = s.contains(") Z"),
            }
            if gone {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(gone, "background sleep {} survived the timeout", pid);
    }
}
