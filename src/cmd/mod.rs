// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   install, mirror, validate
//! ```
//!
//! Handlers print the user-facing messages; the core modules only log.

pub mod install;
pub mod mirror;
pub mod validate;

#[cfg(test)]
mod tests;
