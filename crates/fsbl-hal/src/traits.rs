// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! HAL trait definitions
//!
//! Every collaborator call is synchronous. None of these traits may be
//! re-entered from an interrupt.

use bitflags::bitflags;
use fsbl_common::BootMode;

use crate::error::{FabricFault, HalResult};

/// Boot medium (QSPI, NOR, NAND, SD, eMMC)
///
/// Offsets are byte offsets from the start of the device, not CPU
/// addresses.
pub trait BootMedium {
    /// Boot mode this medium was selected for
    fn boot_mode(&self) -> BootMode;

    /// Device size in bytes
    fn device_size(&self) -> u32;

    /// Copy `buf.len()` bytes starting at `offset` into `buf`
    ///
    /// # Errors
    ///
    /// Returns `HalError::OutOfBounds` if the range leaves the device, or a
    /// medium-specific read error.
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> HalResult<()>;

    /// Read one little-endian word
    ///
    /// # Errors
    ///
    /// As [`BootMedium::read`].
    fn read_u32(&mut self, offset: u32) -> HalResult<u32> {
        let mut word = [0u8; 4];
        self.read(offset, &mut word)?;
        Ok(u32::from_le_bytes(word))
    }
}

/// Physical memory the loader may write partitions into
pub trait SystemMemory {
    /// Borrow `len` bytes at physical address `addr`
    ///
    /// # Errors
    ///
    /// Returns `HalError::OutOfBounds` if the range is not backed.
    fn slice(&self, addr: u32, len: usize) -> HalResult<&[u8]>;

    /// Mutably borrow `len` bytes at physical address `addr`
    ///
    /// # Errors
    ///
    /// Returns `HalError::OutOfBounds` if the range is not backed.
    fn slice_mut(&mut self, addr: u32, len: usize) -> HalResult<&mut [u8]>;
}

/// Fabric configuration engine (processor configuration access port)
pub trait FabricInterface {
    /// Bring the engine up and clear the fabric
    ///
    /// # Errors
    ///
    /// Returns a fault with stage `Init`.
    fn init(&mut self) -> Result<(), FabricFault>;

    /// Download a bitstream into the fabric
    ///
    /// # Errors
    ///
    /// Returns a fault carrying the engine status bits.
    fn configure(&mut self, bitstream: &[u8], encrypted: bool) -> Result<(), FabricFault>;

    /// Decrypt `buf` in place through the engine's decrypt-only path. The
    /// first `data_len` bytes of `buf` hold the plaintext afterwards.
    ///
    /// # Errors
    ///
    /// Returns a fault with stage `Decrypt` or `Dma`. Callers mask the
    /// status bits that decrypt-only transfers raise spuriously.
    fn decrypt_in_place(&mut self, buf: &mut [u8], data_len: usize) -> Result<(), FabricFault>;

    /// Whether the fabric reports a completed configuration
    fn is_configured(&self) -> bool;
}

/// Watchdog timer
pub trait WatchdogInterface {
    /// Restart the countdown
    fn feed(&mut self);

    /// Stop the watchdog ahead of a handoff
    fn stop(&mut self);

    /// Whether the last reset was caused by this watchdog
    fn caused_last_reset(&self) -> bool;
}

bitflags! {
    /// Loader marks in the reboot-status register
    ///
    /// The register survives a processing-system reset, so the boot ROM and
    /// the next loader run can see how the previous attempt ended.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RebootStatus: u32 {
        /// Loader entered and has not yet handed off
        const LOADER_RUNNING = 0x0200_0000;
        /// Loader gave up on the current image
        const LOADER_FAILED = 0x0100_0000;
        /// Both loader marks
        const LOADER_MARKS = Self::LOADER_RUNNING.bits() | Self::LOADER_FAILED.bits();
    }
}

/// Registers that persist across a processing-system reset
pub trait BootRegisters {
    /// Multi-boot counter consumed by the boot ROM
    fn multiboot(&self) -> u32;

    /// Write the multi-boot counter
    fn set_multiboot(&mut self, value: u32);

    /// Reboot status register
    fn reboot_status(&self) -> RebootStatus;

    /// Write the reboot status register. Bits outside the loader marks are
    /// preserved by implementations.
    fn set_reboot_status(&mut self, status: RebootStatus);

    /// Set the running mark
    fn mark_loader_running(&mut self) {
        let status = self.reboot_status() | RebootStatus::LOADER_RUNNING;
        self.set_reboot_status(status);
    }

    /// Set the failed mark
    fn mark_loader_failed(&mut self) {
        let status = self.reboot_status() | RebootStatus::LOADER_FAILED;
        self.set_reboot_status(status);
    }

    /// Clear both loader marks
    fn clear_loader_marks(&mut self) {
        let status = self.reboot_status() - RebootStatus::LOADER_MARKS;
        self.set_reboot_status(status);
    }
}

/// Processing-system reset
pub trait ResetInterface {
    /// Reset the processing system. The boot ROM runs again afterwards.
    fn reset_processing_system(&mut self) -> !;
}

/// Channel for boot status codes (UART on the reference board)
pub trait DiagnosticChannel {
    /// Emit a status code and wait until it has left the transmitter
    fn emit_status(&mut self, code: u32);
}
