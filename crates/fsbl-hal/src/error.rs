// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! HAL error types

use core::fmt;

/// HAL error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Peripheral not initialized
    NotInitialized,
    /// Address or length outside the device or memory window
    OutOfBounds,
    /// Medium read failed
    ReadFailed,
    /// Operation timed out
    Timeout,
    /// DMA error
    DmaError,
    /// Invalid parameter
    InvalidParameter,
    /// Operation not supported on this medium
    NotSupported,
}

impl HalError {
    /// Get error code
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::NotInitialized => 0x0801,
            Self::OutOfBounds => 0x0802,
            Self::ReadFailed => 0x0803,
            Self::Timeout => 0x0804,
            Self::DmaError => 0x0805,
            Self::InvalidParameter => 0x0806,
            Self::NotSupported => 0x0807,
        }
    }

    /// Get error description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NotInitialized => "not initialized",
            Self::OutOfBounds => "address out of bounds",
            Self::ReadFailed => "medium read failed",
            Self::Timeout => "timeout",
            Self::DmaError => "DMA error",
            Self::InvalidParameter => "invalid parameter",
            Self::NotSupported => "not supported",
        }
    }
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[0x{:04X}] {}", self.code(), self.description())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for HalError {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "[0x{:04X}] {}", self.code(), self.description());
    }
}

impl From<HalError> for fsbl_common::Error {
    fn from(e: HalError) -> Self {
        match e {
            HalError::NotInitialized
            | HalError::OutOfBounds
            | HalError::ReadFailed
            | HalError::Timeout
            | HalError::InvalidParameter => Self::PartitionMoveFailed,
            HalError::DmaError => Self::DmaTransferFailed,
            HalError::NotSupported => Self::IllegalBootMode,
        }
    }
}

/// HAL Result type
pub type HalResult<T> = Result<T, HalError>;

/// Step of a fabric-engine transfer that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FabricStage {
    /// Engine bring-up or fabric clear
    Init,
    /// DMA into or out of the engine
    Dma,
    /// Bitstream download (done signal never raised)
    Download,
    /// Decrypt-only transfer
    Decrypt,
}

impl FabricStage {
    /// Step name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Dma => "dma",
            Self::Download => "download",
            Self::Decrypt => "decrypt",
        }
    }
}

/// Fabric engine failure with the raw interrupt-status bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FabricFault {
    /// Failing step
    pub stage: FabricStage,
    /// Error bits from the engine status register
    pub status: u32,
}

impl FabricFault {
    /// Create a fault
    #[must_use]
    pub const fn new(stage: FabricStage, status: u32) -> Self {
        Self { stage, status }
    }

    /// Drop `tolerated` status bits. Returns `None` if nothing is left.
    #[must_use]
    pub const fn without(self, tolerated: u32) -> Option<Self> {
        let status = self.status & !tolerated;
        if status == 0 {
            None
        } else {
            Some(Self {
                stage: self.stage,
                status,
            })
        }
    }
}

impl fmt::Display for FabricFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fabric {} fault, status 0x{:08X}", self.stage.as_str(), self.status)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FabricFault {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "fabric {} fault, status 0x{:08X}", self.stage.as_str(), self.status);
    }
}

impl From<FabricFault> for fsbl_common::Error {
    fn from(fault: FabricFault) -> Self {
        match fault.stage {
            FabricStage::Init => Self::FabricInitFailed,
            FabricStage::Dma => Self::DmaTransferFailed,
            FabricStage::Download => Self::BitstreamDownloadFailed,
            FabricStage::Decrypt => Self::DecryptionFailed,
        }
    }
}
