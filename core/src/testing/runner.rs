use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    process::Command,
};

use super::result::ProcessOutput;

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("Executable '{}' not found or not runnable: {source}", .path.to_string_lossy())]
    ExecutableNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to communicate with subprocess: {0}")]
    Communication(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    /// Terminated by a signal other than our own kill.
    Signaled,
    /// Killed by the runner after the time limit elapsed.
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct Execution {
    pub termination: Termination,
    pub output: ProcessOutput,
    pub execution_time: Duration,
}

#[derive(Debug, Clone)]
pub struct TestRunner {
    executable: PathBuf,
    work_dir: PathBuf,
    execution_time_limit: Duration,
}

impl TestRunner {
    pub const DEFAULT_EXEC_TIME_LIMIT: Duration = Duration::from_secs(6);

    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            work_dir: PathBuf::from("."),
            execution_time_limit: Self::DEFAULT_EXEC_TIME_LIMIT,
        }
    }

    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn execution_time_limit(mut self, limit: Duration) -> Self {
        self.execution_time_limit = limit;
        self
    }

    pub fn get_executable(&self) -> &Path {
        &self.executable
    }

    pub fn get_work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn get_exec_time_limit(&self) -> Duration {
        self.execution_time_limit
    }

    /// Checks that `path` names an existing file and returns its absolute path.
    /// On Windows a missing `.exe` suffix is appended when that file exists.
    pub fn resolve_executable(path: impl AsRef<Path>) -> Result<PathBuf, ExecError> {
        let path = path.as_ref();
        let not_found = |source| ExecError::ExecutableNotFound {
            path: path.to_owned(),
            source,
        };

        let mut candidate = path.to_owned();
        if cfg!(windows) && !Self::has_exe_suffix(path) {
            let mut with_exe = OsString::from(path.as_os_str());
            with_exe.push(".exe");
            let with_exe = PathBuf::from(with_exe);
            if with_exe.is_file() {
                candidate = with_exe;
            }
        }

        if !candidate.is_file() {
            return Err(not_found(io::Error::new(
                io::ErrorKind::NotFound,
                "no such file",
            )));
        }
        // Symlinks are kept as is: multi-call binaries dispatch on argv[0].
        if candidate.is_absolute() {
            return Ok(candidate);
        }
        std::env::current_dir()
            .map(|cwd| cwd.join(candidate))
            .map_err(not_found)
    }

    fn has_exe_suffix(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.eq_ignore_ascii_case("exe"))
            .unwrap_or(false)
    }

    /// Runs the executable once with `input` on stdin.
    ///
    /// The stdin write, both output drains and the exit wait run concurrently under one
    /// deadline, so a candidate that ignores or floods its pipes cannot stall the runner.
    /// On timeout the process is killed and reaped before returning.
    ///
    /// On unix the program leads its own process group, and the whole group is killed
    /// once the run is over, so anything it forked does not outlive the test.
    pub async fn execute(&self, input: &str) -> Result<Execution, ExecError> {
        let mut cmd = Command::new(&self.executable);
        cmd.current_dir(&self.work_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);

        let mut proc = cmd.spawn().map_err(|e| ExecError::ExecutableNotFound {
            path: self.executable.clone(),
            source: e,
        })?;
        let pid = proc.id();
        log::debug!(
            "Spawned {} (pid={:?})",
            self.executable.to_string_lossy(),
            pid
        );

        let mut stdin = proc.stdin.take().ok_or_else(|| pipe_error("stdin"))?;
        let mut stdout = proc.stdout.take().ok_or_else(|| pipe_error("stdout"))?;
        let mut stderr = proc.stderr.take().ok_or_else(|| pipe_error("stderr"))?;

        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();

        let start_at = tokio::time::Instant::now();
        let res = {
            let fut_stdin = async move {
                let res = stdin.write_all(input.as_bytes()).await;
                drop(stdin); // NOTE: EOF must reach the child
                match res {
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                    res => res,
                }
            };
            let fut_stdout = stdout.read_to_end(&mut stdout_buf);
            let fut_stderr = stderr.read_to_end(&mut stderr_buf);
            let fut_exit_status = proc.wait();

            tokio::time::timeout(self.execution_time_limit, async {
                tokio::try_join!(fut_stdin, fut_stdout, fut_stderr, fut_exit_status)
            })
            .await
        };
        let execution_time = tokio::time::Instant::now().duration_since(start_at);

        let (termination, status) = match res {
            Err(_) => {
                kill_process_group(pid);
                proc.kill()
                    .await
                    .unwrap_or_else(|e| log::warn!("Failed to kill TLE process: {:#}", e));
                (Termination::TimedOut, None)
            }

            // kill_on_drop takes care of the child
            Ok(Err(e)) => {
                kill_process_group(pid);
                return Err(ExecError::Communication(e));
            }

            Ok(Ok((_, _, _, exit_status))) => {
                // background jobs that closed their pipes may still be around
                kill_process_group(pid);
                match exit_status.code() {
                    Some(code) => (Termination::Exited(code), Some(code)),
                    None => (Termination::Signaled, None),
                }
            }
        };

        Ok(Execution {
            termination,
            output: ProcessOutput {
                status,
                stdout: String::from_utf8_lossy(&stdout_buf).into(),
                stderr: String::from_utf8_lossy(&stderr_buf).into(),
            },
            execution_time,
        })
    }
}

/// Sends SIGKILL to the process group led by `pgid`. An already empty group is fine.
#[cfg(unix)]
fn kill_process_group(pgid: Option<u32>) {
    use nix::{
        errno::Errno,
        sys::signal::{killpg, Signal},
        unistd::Pid,
    };

    let Some(pgid) = pgid else { return };
    match killpg(Pid::from_raw(pgid as i32), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(e) => log::warn!("Failed to kill process group {}: {}", pgid, e),
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pgid: Option<u32>) {}

fn pipe_error(name: &str) -> ExecError {
    ExecError::Communication(io::Error::new(
        io::ErrorKind::Other,
        format!("Failed to open {}", name),
    ))
}
