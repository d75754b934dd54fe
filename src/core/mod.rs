// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process spawning and environment access.
//!
//! ```text
//!          core
//!           |
//!     +-----+------+
//!     |            |
//!     v            v
//!    env        process
//!     |            |
//!  Credentials  Builder
//!  .env file    Output
//! ```

pub mod env;
pub mod process;
