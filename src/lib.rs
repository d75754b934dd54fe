// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |         mirror / validate / install
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  JSON policy, TOML/env    |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!              hooks        mirror    menu
//!           constraint    registry,  chooser
//!             engine     repo/branch,
//!                |        pusher, sync
//!                |           |
//!                v           v
//!               git         net
//!            VcsRunner    reqwest
//!           GitTransport  JSON API
//!
//!   +-----------------------------------------+
//!   |  core   process, env (credentials)      |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod hooks;
pub mod logging;
pub mod menu;
pub mod mirror;
pub mod net;
