// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Qbitel First-Stage Boot Loader Common Library
//!
//! Status codes, the ring-buffer logger, loader configuration and the
//! on-media layout constants shared by every FSBL crate.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting of status codes
//!
//! No heap allocations are performed - all buffers use fixed-size arrays or
//! heapless collections.

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod errors;
pub mod config;
pub mod log;
pub mod constants;

pub use errors::{Error, Result};
pub use config::{BootMode, LoaderConfig};
pub use log::{LogBuffer, LogLevel};
