// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Boot status codes
//!
//! Every failure of a boot attempt is reduced to one of these codes before it
//! is written to the diagnostic channel. The numeric values are part of the
//! board bring-up contract (they show up on the UART and in the reboot status
//! register) and must not be renumbered.

use core::fmt;

/// Result type alias for loader operations
pub type Result<T> = core::result::Result<T, Error>;

/// Status code written after a successful handoff
pub const SUCCESSFUL_HANDOFF: u32 = 0x0000_0001;

/// Unified loader error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    // =========================================================================
    // Boot flow errors (0xA0xx)
    // =========================================================================
    /// Boot mode has no loader support
    IllegalBootMode,
    /// Control came back from the handed-off image
    IllegalReturn,
    /// Fabric configuration engine could not be initialised
    FabricInitFailed,
    /// Decrypt-only transfer reported an error
    DecryptionFailed,
    /// Fabric bitstream download failed
    BitstreamDownloadFailed,
    /// DMA transfer into or out of the fabric engine failed
    DmaTransferFailed,
    /// Boot header or table pointer lies outside the medium
    InvalidFlashAddress,
    /// Copy from the boot medium failed
    PartitionMoveFailed,
    /// Signature chain did not verify
    AuthenticationFailed,
    /// Boot header or partition header is corrupt
    InvalidHeader,
    /// Partition header table could not be read
    HeaderInfoUnavailable,
    /// Load address outside the usable memory range
    InvalidLoadAddress,
    /// Partition digest does not match the stored checksum
    PartitionChecksumFailed,
    /// Image requires signature support that is disabled on this build
    RsaSupportDisabled,
    /// Partition table holds nothing for the loader to load
    NoUsablePartition,
    /// Digest or RSA known-answer test failed at start-up
    CryptoSelfTestFailed,

    // =========================================================================
    // Hook errors (0xB0xx)
    // =========================================================================
    /// Board hook run before a bitstream download failed
    BeforeBitstreamHookFailed,
    /// Board hook run after a bitstream download failed
    AfterBitstreamHookFailed,
    /// Board hook run before handoff failed
    BeforeHandoffHookFailed,
    /// Board fallback hook failed
    FallbackHookFailed,
}

impl Error {
    /// Numeric status code
    ///
    /// - 0xA0xx: boot flow errors
    /// - 0xB0xx: board hook errors
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::IllegalBootMode => 0xA000,
            Self::IllegalReturn => 0xA001,
            Self::FabricInitFailed => 0xA002,
            Self::DecryptionFailed => 0xA003,
            Self::BitstreamDownloadFailed => 0xA004,
            Self::DmaTransferFailed => 0xA005,
            Self::InvalidFlashAddress => 0xA006,
            Self::PartitionMoveFailed => 0xA00B,
            Self::AuthenticationFailed => 0xA00C,
            Self::InvalidHeader => 0xA00D,
            Self::HeaderInfoUnavailable => 0xA00E,
            Self::InvalidLoadAddress => 0xA00F,
            Self::PartitionChecksumFailed => 0xA010,
            Self::RsaSupportDisabled => 0xA011,
            Self::NoUsablePartition => 0xA012,
            Self::CryptoSelfTestFailed => 0xA013,

            Self::BeforeBitstreamHookFailed => 0xB001,
            Self::AfterBitstreamHookFailed => 0xB002,
            Self::BeforeHandoffHookFailed => 0xB003,
            Self::FallbackHookFailed => 0xB004,
        }
    }

    /// Look an error up by its status code
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            0xA000 => Self::IllegalBootMode,
            0xA001 => Self::IllegalReturn,
            0xA002 => Self::FabricInitFailed,
            0xA003 => Self::DecryptionFailed,
            0xA004 => Self::BitstreamDownloadFailed,
            0xA005 => Self::DmaTransferFailed,
            0xA006 => Self::InvalidFlashAddress,
            0xA00B => Self::PartitionMoveFailed,
            0xA00C => Self::AuthenticationFailed,
            0xA00D => Self::InvalidHeader,
            0xA00E => Self::HeaderInfoUnavailable,
            0xA00F => Self::InvalidLoadAddress,
            0xA010 => Self::PartitionChecksumFailed,
            0xA011 => Self::RsaSupportDisabled,
            0xA012 => Self::NoUsablePartition,
            0xA013 => Self::CryptoSelfTestFailed,
            0xB001 => Self::BeforeBitstreamHookFailed,
            0xB002 => Self::AfterBitstreamHookFailed,
            0xB003 => Self::BeforeHandoffHookFailed,
            0xB004 => Self::FallbackHookFailed,
            _ => return None,
        })
    }

    /// Check if this error means the image failed an integrity or
    /// authenticity check (as opposed to an I/O or configuration fault)
    #[must_use]
    pub const fn is_security_error(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed
                | Self::PartitionChecksumFailed
                | Self::DecryptionFailed
                | Self::RsaSupportDisabled
                | Self::InvalidHeader
                | Self::CryptoSelfTestFailed
        )
    }

    /// Check if this error came from a board hook
    #[must_use]
    pub const fn is_hook_error(&self) -> bool {
        self.code() & 0xFF00 == 0xB000
    }

    /// Get a short description of the error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::IllegalBootMode => "illegal boot mode",
            Self::IllegalReturn => "illegal return from handoff",
            Self::FabricInitFailed => "fabric engine init failed",
            Self::DecryptionFailed => "decryption failed",
            Self::BitstreamDownloadFailed => "bitstream download failed",
            Self::DmaTransferFailed => "DMA transfer failed",
            Self::InvalidFlashAddress => "invalid flash address",
            Self::PartitionMoveFailed => "partition move failed",
            Self::AuthenticationFailed => "authentication failed",
            Self::InvalidHeader => "invalid header",
            Self::HeaderInfoUnavailable => "header info unavailable",
            Self::InvalidLoadAddress => "invalid load address",
            Self::PartitionChecksumFailed => "partition checksum mismatch",
            Self::RsaSupportDisabled => "RSA support not enabled",
            Self::NoUsablePartition => "no usable partition",
            Self::CryptoSelfTestFailed => "crypto self-test failed",
            Self::BeforeBitstreamHookFailed => "before-bitstream hook failed",
            Self::AfterBitstreamHookFailed => "after-bitstream hook failed",
            Self::BeforeHandoffHookFailed => "before-handoff hook failed",
            Self::FallbackHookFailed => "fallback hook failed",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[0x{:04X}] {}", self.code(), self.description())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "[0x{:04X}] {}", self.code(), self.description());
    }
}
