// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//! run()
//!   |
//!   v
//! build_command()   args, cwd, env, stdio, kill_on_drop
//!   |
//!   v
//! spawn() --> wait_with_output()
//!   |
//!   v
//! forward / keep streams
//!   |
//!   v
//! validate exit_code (skip if ALLOW_FAILURE)
//!   |
//!   v
//! ProcessOutput { exit_code, stdout, stderr }
//! ```

use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};
use crate::error::{GuardResult, ProcessError};
use crate::logging::redact_url;

impl ProcessBuilder {
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Full command line for logging, with URL credentials masked.
    pub(crate) fn command_line(&self) -> String {
        use std::fmt::Write as _;
        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice().iter().map(|a| redact_url(a)) {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::SpawnFailed` if the child cannot be started or
    /// its output cannot be collected, and `ProcessError::NonZeroExit` if it
    /// exits unsuccessfully without `ALLOW_FAILURE`.
    pub async fn run(self) -> GuardResult<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();
        let child = command.spawn().map_err(|source| ProcessError::SpawnFailed {
            command: cmd_line.clone(),
            source,
        })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let raw = child
            .wait_with_output()
            .await
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        let stdout = Self::collect(&name, "stdout", self.stdout_stream(), &raw.stdout);
        let stderr = Self::collect(&name, "stderr", self.stderr_stream(), &raw.stderr);
        let output = ProcessOutput::new(raw.status.code().unwrap_or(-1), stdout, stderr);

        if !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE) && !output.success() {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(ProcessError::NonZeroExit {
                command: name,
                code: output.exit_code(),
                stdout: output.stdout().to_string(),
                stderr: output.stderr().trim().to_string(),
            }
            .into());
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());
        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }
        command.envs(self.env_vars());
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        command.kill_on_drop(true);
        command
    }

    /// Applies the stream flags to raw bytes read from a pipe.
    fn collect(name: &str, stream: &str, flags: StreamFlags, bytes: &[u8]) -> String {
        let text = String::from_utf8_lossy(bytes);
        if flags.contains(StreamFlags::FORWARD_TO_LOG) {
            for line in text.lines().filter(|l| !l.trim().is_empty()) {
                debug!(process = %name, stream, "{line}");
            }
        }
        if flags.contains(StreamFlags::KEEP_IN_STRING) {
            text.into_owned()
        } else {
            String::new()
        }
    }
}
