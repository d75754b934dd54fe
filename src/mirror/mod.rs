// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cross-platform repository mirroring.
//!
//! # Architecture
//!
//! ```text
//!                      SyncManager::mirror(job)
//!                 /            |             \
//!        RepoManager      CodePusher    BranchSynchronizer
//!   get/create/create_or   (git bare     get/create/sync
//!        _update            clone)              |
//!                 \            |               /
//!                  \      GitTransport        /
//!                   \                        /
//!                    ClientRegistry (read-only)
//!                            |
//!                     PlatformClient
//!        GitHub | GitLab | Bitbucket | Azure   (net::ApiClient)
//! ```
//!
//! # Example
//!
//! ```ignore
//! let registry = ClientRegistry::from_config(&mirroring, &EnvCredentials::new(), &settings.api);
//! let pusher = CodePusher::new(Arc::new(ShellGit::new()), credentials);
//! let job = MirrorJob::builder()
//!     .source_platform(Platform::GitHub)
//!     .target_platform(Platform::GitLab)
//!     .source_repo("repo-a")
//!     .target_repo("repo-a-mirror")
//!     .source_owner("myorg")
//!     .target_owner("myorg")
//!     .sync_branches(true)
//!     .build();
//! SyncManager::new(registry, pusher).mirror(&job).await?;
//! ```

pub mod branch;
pub mod client;
pub mod platform;
pub mod providers;
pub mod pusher;
pub mod registry;
pub mod repo;
pub mod sync;
pub mod types;
pub mod workflow;


pub use branch::{BranchFailure, BranchSynchronizer, SyncReport};
pub use client::PlatformClient;
pub use platform::Platform;
pub use pusher::{CodePusher, PushOutcome, PushReport, PushWarning};
pub use registry::{ClientRegistry, SkippedPlatform};
pub use repo::RepoManager;
pub use sync::{MirrorReport, SyncManager};
pub use types::{BranchDescriptor, MirrorJob, RepoDescriptor, resolve_owner};
pub use workflow::generate_workflow;
