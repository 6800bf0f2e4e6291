// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Qbitel First-Stage Boot Loader
//!
//! Locates, validates, authenticates and stages the partitions of a boot
//! image, then hands control to the next-stage image:
//!
//! - **Header**: boot header and partition header table parsing
//! - **Verify**: root key → secondary key → partition signature chain
//! - **Load**: per-partition policy, staging, decryption and placement
//! - **Recovery**: multi-boot fallback and next-image search
//! - **Boot Log**: reported status codes
//! - **Boot**: the top-level flow and handoff

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod header;
pub mod verify;
pub mod hooks;
pub mod load;
pub mod recovery;
pub mod boot_log;
pub mod boot;
pub mod handoff;

pub use header::{locate_partition_table, probe_image, PartitionHeader, PartitionTable};
pub use verify::{authenticate, authenticate_staged, AuthError, Certificate};
pub use hooks::{BootHooks, HookPoint, NoHooks};
pub use load::{classify, BootError, HandoffAddress, LoadError, Loader, LoaderState, PartitionFlags};
pub use recovery::{FallbackAction, FallbackController};
pub use boot_log::{BootLog, BootLogEntry, BootStage};
pub use boot::{Board, BootOutcome, Fsbl};
