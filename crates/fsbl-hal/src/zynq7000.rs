// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Zynq-7000 register-level drivers
//!
//! Only what the loader touches: linear QSPI reads, DDR, the system
//! watchdog, the device-configuration (PCAP) engine, SLCR reset and the
//! reboot-status/multi-boot registers, and UART1 for status output.
//!
//! The caches are off while the loader runs, so DMA buffers need no
//! maintenance.

use core::ptr;

use fsbl_common::constants::FABRIC_STATUS_HMAC_ERROR;
use fsbl_common::config::AddressRange;
use fsbl_common::BootMode;

use crate::error::{FabricFault, FabricStage, HalError, HalResult};
use crate::traits::{
    BootMedium, BootRegisters, DiagnosticChannel, FabricInterface, RebootStatus, ResetInterface,
    SystemMemory, WatchdogInterface,
};

// ============================================================================
// Register map
// ============================================================================

/// Linear QSPI window
pub const QSPI_LINEAR_BASE: u32 = 0xFC00_0000;
/// Linear QSPI window size (single 16 MiB device)
pub const QSPI_LINEAR_SIZE: u32 = 0x0100_0000;
/// Parallel NOR window
pub const NOR_BASE: u32 = 0xE200_0000;
/// Parallel NOR window size
pub const NOR_SIZE: u32 = 0x0200_0000;

const SLCR_BASE: u32 = 0xF800_0000;
const SLCR_UNLOCK: u32 = SLCR_BASE + 0x008;
const SLCR_UNLOCK_KEY: u32 = 0x0000_DF0D;
const PS_RST_CTRL: u32 = SLCR_BASE + 0x200;
const PS_RST_MASK: u32 = 0x1;
const RESET_REASON: u32 = SLCR_BASE + 0x250;
const RESET_REASON_SWDT: u32 = 0x1;
const REBOOT_STATUS: u32 = SLCR_BASE + 0x258;
const BOOT_MODE_REG: u32 = SLCR_BASE + 0x25C;
const BOOT_MODES_MASK: u32 = 0x7;

const SWDT_BASE: u32 = 0xF800_5000;
const SWDT_MODE: u32 = SWDT_BASE + 0x000;
const SWDT_RESTART: u32 = SWDT_BASE + 0x008;
const SWDT_RESTART_KEY: u32 = 0x0000_1999;
const SWDT_MODE_ZKEY: u32 = 0x00AB_C000;
const SWDT_MODE_ENABLE: u32 = 0x1;

const DEVCFG_BASE: u32 = 0xF800_7000;
const DEVCFG_CTRL: u32 = DEVCFG_BASE + 0x000;
const DEVCFG_INT_STS: u32 = DEVCFG_BASE + 0x00C;
const DEVCFG_STATUS: u32 = DEVCFG_BASE + 0x014;
const DEVCFG_DMA_SRC_ADDR: u32 = DEVCFG_BASE + 0x018;
const DEVCFG_DMA_DST_ADDR: u32 = DEVCFG_BASE + 0x01C;
const DEVCFG_DMA_SRC_LEN: u32 = DEVCFG_BASE + 0x020;
const DEVCFG_DMA_DST_LEN: u32 = DEVCFG_BASE + 0x024;
const DEVCFG_MULTIBOOT: u32 = DEVCFG_BASE + 0x02C;

const CTRL_PCFG_PROG_B: u32 = 1 << 30;
const CTRL_PCAP_PR: u32 = 1 << 27;
const CTRL_PCAP_MODE: u32 = 1 << 26;

const STATUS_PCFG_INIT: u32 = 1 << 4;

const IXR_DMA_DONE: u32 = 1 << 13;
const IXR_D_P_DONE: u32 = 1 << 12;
const IXR_PCFG_DONE: u32 = 1 << 2;
const IXR_ERROR_MASK: u32 = 0x00F0_F860 | FABRIC_STATUS_HMAC_ERROR;

/// Destination address that routes a DMA transfer into the fabric
const PCAP_FABRIC_DEST: u32 = 0xFFFF_FFFF;
/// Low address bit marking the last transfer of a sequence
const PCAP_LAST_TRANSFER: u32 = 0x1;

const UART1_BASE: u32 = 0xE000_1000;
const UART_SR: u32 = UART1_BASE + 0x2C;
const UART_FIFO: u32 = UART1_BASE + 0x30;
const UART_SR_TXFULL: u32 = 1 << 4;
const UART_SR_TXEMPTY: u32 = 1 << 3;

const POLL_LIMIT: u32 = 0x00FF_FFFF;

#[inline]
fn read_reg(addr: u32) -> u32 {
    // SAFETY: `addr` is one of the fixed peripheral registers above.
    unsafe { ptr::read_volatile(addr as *const u32) }
}

#[inline]
fn write_reg(addr: u32, value: u32) {
    // SAFETY: `addr` is one of the fixed peripheral registers above.
    unsafe { ptr::write_volatile(addr as *mut u32, value) }
}

fn poll(addr: u32, mask: u32) -> Result<u32, u32> {
    for _ in 0..POLL_LIMIT {
        let value = read_reg(addr);
        if value & mask == mask {
            return Ok(value);
        }
    }
    Err(read_reg(addr))
}

/// Unlock the SLCR for writes
pub fn slcr_unlock() {
    write_reg(SLCR_UNLOCK, SLCR_UNLOCK_KEY);
}

/// Latched boot mode, `None` for strapping the loader does not support
#[must_use]
pub fn boot_mode() -> Option<BootMode> {
    BootMode::from_u8((read_reg(BOOT_MODE_REG) & BOOT_MODES_MASK) as u8)
}

// ============================================================================
// Boot medium
// ============================================================================

/// Memory-mapped (linear) QSPI or NOR flash
pub struct LinearFlash {
    base: u32,
    size: u32,
    mode: BootMode,
}

impl LinearFlash {
    /// Create a linear flash window
    #[must_use]
    pub const fn new(base: u32, size: u32, mode: BootMode) -> Self {
        Self { base, size, mode }
    }
}

impl BootMedium for LinearFlash {
    fn boot_mode(&self) -> BootMode {
        self.mode
    }

    fn device_size(&self) -> u32 {
        self.size
    }

    fn read(&mut self, offset: u32, buf: &mut [u8]) -> HalResult<()> {
        let len = u32::try_from(buf.len()).map_err(|_| HalError::OutOfBounds)?;
        let end = offset.checked_add(len).ok_or(HalError::OutOfBounds)?;
        if end > self.size {
            return Err(HalError::OutOfBounds);
        }
        let src = (self.base + offset) as *const u8;
        for (i, byte) in buf.iter_mut().enumerate() {
            // SAFETY: the range was checked against the flash window.
            *byte = unsafe { ptr::read_volatile(src.add(i)) };
        }
        Ok(())
    }
}

// ============================================================================
// DDR
// ============================================================================

/// Physical DDR, identity mapped
pub struct PhysicalMemory {
    range: AddressRange,
}

impl PhysicalMemory {
    /// Create a view over `range`
    #[must_use]
    pub const fn new(range: AddressRange) -> Self {
        Self { range }
    }

    fn check(&self, addr: u32, len: usize) -> HalResult<()> {
        let len = u32::try_from(len).map_err(|_| HalError::OutOfBounds)?;
        if self.range.contains_span(addr, len) {
            Ok(())
        } else {
            Err(HalError::OutOfBounds)
        }
    }
}

impl SystemMemory for PhysicalMemory {
    fn slice(&self, addr: u32, len: usize) -> HalResult<&[u8]> {
        self.check(addr, len)?;
        // SAFETY: DDR is identity mapped and the span lies inside it.
        Ok(unsafe { core::slice::from_raw_parts(addr as *const u8, len) })
    }

    fn slice_mut(&mut self, addr: u32, len: usize) -> HalResult<&mut [u8]> {
        self.check(addr, len)?;
        // SAFETY: as above; `&mut self` keeps the view exclusive.
        Ok(unsafe { core::slice::from_raw_parts_mut(addr as *mut u8, len) })
    }
}

// ============================================================================
// System watchdog
// ============================================================================

/// System watchdog timer
pub struct SystemWatchdog {
    running: bool,
}

impl SystemWatchdog {
    /// Attach to the watchdog as configured by the boot ROM
    #[must_use]
    pub fn new() -> Self {
        Self {
            running: read_reg(SWDT_MODE) & SWDT_MODE_ENABLE != 0,
        }
    }
}

impl Default for SystemWatchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchdogInterface for SystemWatchdog {
    fn feed(&mut self) {
        if self.running {
            write_reg(SWDT_RESTART, SWDT_RESTART_KEY);
        }
    }

    fn stop(&mut self) {
        let mode = read_reg(SWDT_MODE) & 0x0000_0FFF & !SWDT_MODE_ENABLE;
        write_reg(SWDT_MODE, SWDT_MODE_ZKEY | mode);
        self.running = false;
    }

    fn caused_last_reset(&self) -> bool {
        read_reg(RESET_REASON) & RESET_REASON_SWDT != 0
    }
}

// ============================================================================
// Persistent registers and reset
// ============================================================================

/// Multi-boot and reboot-status registers
pub struct PersistentRegisters;

impl BootRegisters for PersistentRegisters {
    fn multiboot(&self) -> u32 {
        read_reg(DEVCFG_MULTIBOOT)
    }

    fn set_multiboot(&mut self, value: u32) {
        write_reg(DEVCFG_MULTIBOOT, value);
    }

    fn reboot_status(&self) -> RebootStatus {
        RebootStatus::from_bits_retain(read_reg(REBOOT_STATUS))
    }

    fn set_reboot_status(&mut self, status: RebootStatus) {
        write_reg(REBOOT_STATUS, status.bits());
    }
}

/// Processing-system software reset through the SLCR
pub struct SlcrReset;

impl ResetInterface for SlcrReset {
    fn reset_processing_system(&mut self) -> ! {
        slcr_unlock();
        write_reg(PS_RST_CTRL, PS_RST_MASK);
        loop {
            core::hint::spin_loop();
        }
    }
}

// ============================================================================
// PCAP
// ============================================================================

/// Device-configuration engine driven through the PCAP DMA
pub struct Pcap {
    ready: bool,
}

impl Pcap {
    /// Create an uninitialised engine handle
    #[must_use]
    pub const fn new() -> Self {
        Self { ready: false }
    }

    fn transfer(
        &mut self,
        src: u32,
        dst: u32,
        src_words: u32,
        dst_words: u32,
        stage: FabricStage,
    ) -> Result<u32, FabricFault> {
        if !self.ready {
            return Err(FabricFault::new(FabricStage::Init, 0));
        }
        write_reg(DEVCFG_INT_STS, 0xFFFF_FFFF);
        write_reg(DEVCFG_DMA_SRC_ADDR, src);
        write_reg(DEVCFG_DMA_DST_ADDR, dst);
        write_reg(DEVCFG_DMA_SRC_LEN, src_words);
        write_reg(DEVCFG_DMA_DST_LEN, dst_words);

        let status = poll(DEVCFG_INT_STS, IXR_DMA_DONE)
            .map_err(|sts| FabricFault::new(FabricStage::Dma, sts & IXR_ERROR_MASK))?;
        let errors = status & IXR_ERROR_MASK;
        if errors != 0 {
            return Err(FabricFault::new(stage, errors));
        }
        Ok(status)
    }
}

impl Default for Pcap {
    fn default() -> Self {
        Self::new()
    }
}

impl FabricInterface for Pcap {
    fn init(&mut self) -> Result<(), FabricFault> {
        let ctrl = read_reg(DEVCFG_CTRL) | CTRL_PCAP_PR | CTRL_PCAP_MODE;
        write_reg(DEVCFG_CTRL, ctrl | CTRL_PCFG_PROG_B);
        write_reg(DEVCFG_CTRL, ctrl & !CTRL_PCFG_PROG_B);
        write_reg(DEVCFG_CTRL, ctrl | CTRL_PCFG_PROG_B);
        poll(DEVCFG_STATUS, STATUS_PCFG_INIT)
            .map_err(|sts| FabricFault::new(FabricStage::Init, sts))?;
        write_reg(DEVCFG_INT_STS, 0xFFFF_FFFF);
        self.ready = true;
        Ok(())
    }

    fn configure(&mut self, bitstream: &[u8], _encrypted: bool) -> Result<(), FabricFault> {
        let words = (bitstream.len() / 4) as u32;
        let src = bitstream.as_ptr() as u32 | PCAP_LAST_TRANSFER;
        self.transfer(src, PCAP_FABRIC_DEST, words, 0, FabricStage::Download)?;
        poll(DEVCFG_INT_STS, IXR_PCFG_DONE)
            .map_err(|sts| FabricFault::new(FabricStage::Download, sts & IXR_ERROR_MASK))?;
        Ok(())
    }

    fn decrypt_in_place(&mut self, buf: &mut [u8], data_len: usize) -> Result<(), FabricFault> {
        let addr = buf.as_mut_ptr() as u32 | PCAP_LAST_TRANSFER;
        let src_words = (buf.len() / 4) as u32;
        let dst_words = (data_len / 4) as u32;
        let status = self.transfer(addr, addr, src_words, dst_words, FabricStage::Decrypt)?;
        if status & IXR_D_P_DONE == 0 {
            return Err(FabricFault::new(FabricStage::Decrypt, status));
        }
        Ok(())
    }

    fn is_configured(&self) -> bool {
        read_reg(DEVCFG_INT_STS) & IXR_PCFG_DONE != 0
    }
}

// ============================================================================
// UART status output
// ============================================================================

/// UART1 status output
pub struct UartStatus;

impl UartStatus {
    fn put(byte: u8) {
        while read_reg(UART_SR) & UART_SR_TXFULL != 0 {}
        write_reg(UART_FIFO, u32::from(byte));
    }
}

impl core::fmt::Write for UartStatus {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for b in s.bytes() {
            Self::put(b);
        }
        Ok(())
    }
}

impl DiagnosticChannel for UartStatus {
    fn emit_status(&mut self, code: u32) {
        let _ = core::fmt::Write::write_fmt(self, format_args!("FSBL Status = 0x{code:04X}\r\n"));
        while read_reg(UART_SR) & UART_SR_TXEMPTY == 0 {}
    }
}
