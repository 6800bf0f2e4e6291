// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Fallback and recovery
//!
//! When an image cannot be booted the loader advances the multi-boot
//! counter so the boot ROM skips that image on the next reset, and may
//! search the flash itself for the next image with a valid boot header.
//!
//! Media without multi-boot support (SD, MMC, JTAG) cannot skip images:
//! the loader clears its marks, runs the board's fallback hook and resets.

use fsbl_common::{log_error, log_info, log_warn};
use fsbl_common::{LoaderConfig, LogBuffer};
use fsbl_hal::{BootMedium, BootRegisters, FabricInterface};

use crate::header::probe_image;
use crate::hooks::BootHooks;

const MODULE: &str = "recovery";

/// What to do after a failed boot attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackAction {
    /// Load the image at this flash offset
    Retry {
        /// Flash offset of the next candidate image
        image_base: u32,
    },
    /// Give up and reset the processing system
    Reset,
}

/// Decides between trying the next image and resetting
#[derive(Debug, Clone, Copy)]
pub struct FallbackController<'a> {
    config: &'a LoaderConfig,
}

impl<'a> FallbackController<'a> {
    /// Controller for `config`
    #[must_use]
    pub const fn new(config: &'a LoaderConfig) -> Self {
        Self { config }
    }

    /// Choose the next step after a failed attempt
    ///
    /// On multi-boot media the counter always advances and the failed
    /// mark is set, whether or not a next image is found.
    pub fn next_action<M, R, F, H>(
        &self,
        medium: &mut M,
        registers: &mut R,
        fabric: &mut F,
        hooks: &mut H,
        log: &mut LogBuffer,
    ) -> FallbackAction
    where
        M: BootMedium,
        R: BootRegisters,
        F: FabricInterface,
        H: BootHooks,
    {
        let mode = medium.boot_mode();
        if !mode.supports_multiboot() {
            log_warn!(log, MODULE, "no multi-boot on {:?}, resetting", mode);
            Self::abandon(registers, hooks, log);
            return FallbackAction::Reset;
        }

        let next = registers.multiboot().wrapping_add(1);
        registers.set_multiboot(next);
        registers.mark_loader_failed();
        log_info!(log, MODULE, "multi-boot register now 0x{:08X}", next);

        if !self.config.search_in_loader {
            return FallbackAction::Reset;
        }

        // Reading flash through the linear controller needs the fabric
        // engine clocked.
        if let Err(fault) = fabric.init() {
            log_error!(log, MODULE, "{}", fault);
            Self::abandon(registers, hooks, log);
            return FallbackAction::Reset;
        }

        match self.search_next_image(medium, registers, log) {
            Some(image_base) => FallbackAction::Retry { image_base },
            None => {
                log_error!(log, MODULE, "no valid image found");
                Self::abandon(registers, hooks, log);
                FallbackAction::Reset
            }
        }
    }

    /// Probe candidate images from the current multi-boot counter onward
    ///
    /// Each candidate that fails the probe advances the counter. The
    /// register is written only once a valid image is found.
    pub fn search_next_image<M, R>(
        &self,
        medium: &mut M,
        registers: &mut R,
        log: &mut LogBuffer,
    ) -> Option<u32>
    where
        M: BootMedium,
        R: BootRegisters,
    {
        let mask = self.config.multiboot_offset_mask;
        let size = medium.device_size();
        let mut multiboot = registers.multiboot() & mask;

        for _ in 0..=mask {
            let base = self.config.image_base(multiboot);
            if base >= size {
                break;
            }
            if probe_image(medium, base) {
                registers.set_multiboot(multiboot);
                log_info!(log, MODULE, "image found at 0x{:08X}", base);
                return Some(base);
            }
            multiboot = multiboot.wrapping_add(1) & mask;
            if multiboot == 0 {
                break;
            }
        }
        None
    }

    /// Stop trying images in this boot: clear the loader marks and run the
    /// board's fallback hook. A failing hook is only logged.
    pub fn abandon<R: BootRegisters, H: BootHooks>(
        registers: &mut R,
        hooks: &mut H,
        log: &mut LogBuffer,
    ) {
        registers.clear_loader_marks();
        if let Err(e) = hooks.fallback() {
            log_error!(log, MODULE, "fallback hook: {}", e);
        }
    }
}
