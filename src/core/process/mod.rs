// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env() .capture_output()
//!   .run()
//!       --> tokio::process::Command (kill_on_drop)
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod runner;

pub use builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};
