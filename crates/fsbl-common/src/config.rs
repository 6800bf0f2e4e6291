// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Loader configuration
//!
//! All configuration is compile-time or latched from eFUSE/boot-mode pins at
//! reset. Nothing here changes during a boot attempt.

use crate::constants::{
    DDR_END_ADDRESS, DDR_START_ADDRESS, DDR_TEMP_START_ADDRESS, GOLDEN_IMAGE_OFFSET,
    MULTIBOOT_OFFSET_MASK,
};

/// Boot mode latched from the boot-mode strapping pins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BootMode {
    /// JTAG (no boot medium)
    Jtag = 0x0,
    /// Quad-SPI flash
    Qspi = 0x1,
    /// NOR flash
    Nor = 0x2,
    /// NAND flash
    Nand = 0x4,
    /// SD card
    Sd = 0x5,
    /// eMMC (alternate media, no loader self-entry)
    Mmc = 0x6,
}

impl BootMode {
    /// Decode the boot-mode register field
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x0 => Some(Self::Jtag),
            0x1 => Some(Self::Qspi),
            0x2 => Some(Self::Nor),
            0x4 => Some(Self::Nand),
            0x5 => Some(Self::Sd),
            0x6 => Some(Self::Mmc),
            _ => None,
        }
    }

    /// Whether the boot ROM understands the multi-boot "next image"
    /// convention for this medium (flash devices only)
    #[must_use]
    pub const fn supports_multiboot(&self) -> bool {
        matches!(self, Self::Qspi | Self::Nand | Self::Nor)
    }

    /// Whether the partition table carries an entry for the loader itself
    #[must_use]
    pub const fn has_self_entry(&self) -> bool {
        !matches!(self, Self::Mmc)
    }
}

/// Inclusive physical address range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    /// First usable address
    pub start: u32,
    /// Last usable address
    pub end: u32,
}

impl AddressRange {
    /// Whether `addr` falls inside the range
    #[must_use]
    pub const fn contains(&self, addr: u32) -> bool {
        addr >= self.start && addr <= self.end
    }

    /// Whether `len` bytes starting at `addr` fit inside the range
    #[must_use]
    pub const fn contains_span(&self, addr: u32, len: u32) -> bool {
        if len == 0 {
            return self.contains(addr);
        }
        match addr.checked_add(len - 1) {
            Some(last) => self.contains(addr) && last <= self.end,
            None => false,
        }
    }
}

/// Loader configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Usable processing-system memory
    pub ddr: AddressRange,
    /// Staging address for fabric payloads
    pub scratch_address: u32,
    /// Multi-boot step between candidate images on flash
    pub golden_image_offset: u32,
    /// Bits of the multi-boot register that hold the image index
    pub multiboot_offset_mask: u32,
    /// Authenticate the header tables before walking them (RSA eFUSE)
    pub header_authentication: bool,
    /// RSA signature checking compiled in
    pub rsa_support: bool,
    /// Search for the next valid image inside the loader instead of
    /// leaving it to the boot ROM after reset
    pub search_in_loader: bool,
}

impl LoaderConfig {
    /// Default configuration for the reference board
    pub const DEFAULT: Self = Self {
        ddr: AddressRange {
            start: DDR_START_ADDRESS,
            end: DDR_END_ADDRESS,
        },
        scratch_address: DDR_TEMP_START_ADDRESS,
        golden_image_offset: GOLDEN_IMAGE_OFFSET,
        multiboot_offset_mask: MULTIBOOT_OFFSET_MASK,
        header_authentication: false,
        rsa_support: true,
        search_in_loader: true,
    };

    /// Flash byte offset of the image selected by a multi-boot counter value
    #[must_use]
    pub const fn image_base(&self, multiboot: u32) -> u32 {
        (multiboot & self.multiboot_offset_mask).wrapping_mul(self.golden_image_offset)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
