// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Qbitel First-Stage Boot Loader Entry Point
//!
//! Runs from on-chip memory after the boot ROM has copied the loader in.
//!
//! # Boot Flow
//!
//! 1. Unlock the SLCR and read the boot-mode straps
//! 2. Bind the boot medium for the strapped mode
//! 3. Load the image the multi-boot counter selects, falling back to the
//!    next valid image on failure
//! 4. Jump to the loaded image, or park for JTAG, or reset

#![no_std]
#![no_main]

use core::fmt::Write;

use fsbl_common::errors::Error;
use fsbl_common::{BootMode, LoaderConfig};
use fsbl_crypto::kat::{KAT_EXPONENT, KAT_MODULUS};
use fsbl_crypto::{RsaPublicKey, U2048};
use fsbl_hal::zynq7000::{
    self, LinearFlash, Pcap, PersistentRegisters, PhysicalMemory, SlcrReset, SystemWatchdog,
    UartStatus, NOR_BASE, NOR_SIZE, QSPI_LINEAR_SIZE,
};
use fsbl_hal::{DiagnosticChannel, Platform, ResetInterface};
use fsbl_loader::handoff::{jtag_exit, jump};
use fsbl_loader::{Board, BootError, BootOutcome, FallbackAction, Fsbl, NoHooks};

/// Root key for development boards. Production boards read the key hash
/// from eFUSE instead.
fn root_key() -> Option<RsaPublicKey> {
    RsaPublicKey::from_modulus(&U2048::from_le_bytes(&KAT_MODULUS), KAT_EXPONENT).ok()
}

fn medium_for(mode: BootMode) -> Option<LinearFlash> {
    match mode {
        BootMode::Qspi => Some(LinearFlash::new(
            Platform::current().linear_flash_base(),
            QSPI_LINEAR_SIZE,
            mode,
        )),
        BootMode::Nor => Some(LinearFlash::new(NOR_BASE, NOR_SIZE, mode)),
        _ => None,
    }
}

/// Loader entry point
#[no_mangle]
pub extern "C" fn main() -> ! {
    zynq7000::slcr_unlock();

    let config = LoaderConfig::DEFAULT;
    let mode = zynq7000::boot_mode();
    if mode == Some(BootMode::Jtag) {
        jtag_exit();
    }
    let Some(medium) = mode.and_then(medium_for) else {
        UartStatus.emit_status(Error::IllegalBootMode.code());
        SlcrReset.reset_processing_system();
    };

    let board = Board {
        medium,
        memory: PhysicalMemory::new(config.ddr),
        fabric: Pcap::new(),
        watchdog: SystemWatchdog::new(),
        registers: PersistentRegisters,
        diagnostic: UartStatus,
    };
    let mut fsbl = Fsbl::new(board, NoHooks, config, root_key());

    let mut outcome = fsbl.start();
    loop {
        let _ = fsbl.log.drain_to(&mut UartStatus);
        match outcome {
            BootOutcome::Handoff(address) => {
                let _ = UartStatus.write_str("handoff\r\n");
                // SAFETY: `address` is the entry of a processing-system
                // partition that has been loaded and verified, and the
                // watchdog has been stopped.
                unsafe { jump(address) };
                outcome = match fsbl.recover(BootError::IllegalReturn) {
                    FallbackAction::Retry { image_base } => fsbl.boot_from(image_base),
                    FallbackAction::Reset => BootOutcome::Reset,
                };
            }
            BootOutcome::JtagExit => jtag_exit(),
            BootOutcome::Reset => SlcrReset.reset_processing_system(),
        }
    }
}

#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    SlcrReset.reset_processing_system()
}
