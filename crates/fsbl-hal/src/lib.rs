// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Hardware Abstraction Layer for the Qbitel First-Stage Boot Loader
//!
//! The loader reaches hardware only through the traits in [`traits`]:
//!
//! - **Boot medium**: byte-range reads from flash, SD or eMMC
//! - **System memory**: bounds-checked views of physical DDR
//! - **Fabric engine**: bitstream download and decrypt-only transfers
//! - **Watchdog**, **persistent boot registers**, **reset**
//! - **Diagnostic channel**: status codes to the UART
//!
//! Register-level implementations for the Zynq-7000 processing system live
//! in [`zynq7000`] behind the `zynq7000` feature. Host builds implement the
//! traits with in-memory doubles.

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod traits;
pub mod error;

#[cfg(feature = "zynq7000")]
pub mod zynq7000;

pub use traits::*;
pub use error::{FabricFault, FabricStage, HalError, HalResult};

/// Platform identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Zynq-7000 (dual Cortex-A9 with programmable logic)
    Zynq7000,
    /// Host build or simulation
    Unknown,
}

impl Platform {
    /// Get the current platform
    #[must_use]
    pub const fn current() -> Self {
        cfg_if::cfg_if! {
            if #[cfg(feature = "zynq7000")] {
                Self::Zynq7000
            } else {
                Self::Unknown
            }
        }
    }

    /// Check if the platform has a programmable-logic fabric
    #[must_use]
    pub const fn has_fabric(&self) -> bool {
        matches!(self, Self::Zynq7000)
    }

    /// Base of the memory-mapped boot flash window
    #[must_use]
    pub const fn linear_flash_base(&self) -> u32 {
        match self {
            Self::Zynq7000 => 0xFC00_0000,
            Self::Unknown => 0x0000_0000,
        }
    }
}
