// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! On-media layout and memory map constants
//!
//! Boot header offsets are byte offsets from the image base. All header
//! words are little-endian.

// =============================================================================
// Boot Header
// =============================================================================

/// Width-detection word
pub const BOOT_HDR_WIDTH_DETECT_OFFSET: usize = 0x020;

/// Image identification word
pub const BOOT_HDR_IDENT_OFFSET: usize = 0x024;

/// Encryption status word
pub const BOOT_HDR_ENC_STATUS_OFFSET: usize = 0x028;

/// Loader execution address
pub const BOOT_HDR_EXEC_OFFSET: usize = 0x038;

/// Total loader length
pub const BOOT_HDR_TOTAL_LEN_OFFSET: usize = 0x040;

/// Flash configuration word
pub const BOOT_HDR_FLASH_CFG_OFFSET: usize = 0x044;

/// Header checksum word
pub const BOOT_HDR_CHECKSUM_OFFSET: usize = 0x048;

/// Image header table offset
pub const BOOT_HDR_IHT_OFFSET: usize = 0x098;

/// Partition header table offset
pub const BOOT_HDR_PHT_OFFSET: usize = 0x09C;

/// Bytes of boot header needed to reach every field above
pub const BOOT_HDR_SIZE: usize = 0x0A0;

/// Words covered by the boot header checksum (`0x020..=0x044`)
pub const BOOT_HDR_CHECKSUM_WORDS: usize = 10;

/// Expected image identification word
pub const IMAGE_IDENT: u32 = 0xAA99_5566;

// =============================================================================
// Partition Header Table
// =============================================================================

/// Maximum number of partition header slots
pub const MAX_PARTITION_NUMBER: usize = 14;

/// Size of one partition header in bytes
pub const PARTITION_HEADER_SIZE: usize = 64;

/// Words covered by a partition header checksum
pub const PARTITION_HEADER_CHECKSUM_WORDS: usize = 15;

/// Checksum word of a terminal (end-of-table) slot
pub const LAST_PARTITION_CHECKSUM: u32 = 0xFFFF_FFFF;

/// Largest image length accepted, in words
pub const MAXIMUM_IMAGE_WORD_LEN: u32 = 0x4000_0000;

// =============================================================================
// Authentication
// =============================================================================

/// RSA modulus size in bytes
pub const RSA_MODULUS_SIZE: usize = 256;

/// RSA exponent field size in bytes
pub const RSA_EXPONENT_FIELD_SIZE: usize = 64;

/// RSA signature size in bytes
pub const RSA_SIGNATURE_SIZE: usize = 256;

/// Certificate appended to a signed partition
pub const AUTH_CERT_SIZE: usize = 0x6C0;

/// SHA-256 digest size in bytes
pub const SHA256_DIGEST_SIZE: usize = 32;

/// Size of a stored partition checksum
pub const PARTITION_CHECKSUM_SIZE: usize = SHA256_DIGEST_SIZE;

// =============================================================================
// Memory Map
// =============================================================================

/// First usable DDR address
pub const DDR_START_ADDRESS: u32 = 0x0010_0000;

/// Last usable DDR address
pub const DDR_END_ADDRESS: u32 = 0x3FFF_FFFF;

/// Fabric staging buffer in DDR
pub const DDR_TEMP_START_ADDRESS: u32 = 0x0800_0000;

// =============================================================================
// Multi-boot
// =============================================================================

/// Spacing between candidate images on flash
pub const GOLDEN_IMAGE_OFFSET: u32 = 0x8000;

/// Image index bits of the multi-boot register
pub const MULTIBOOT_OFFSET_MASK: u32 = 0x1FFF;

// =============================================================================
// Fabric Engine
// =============================================================================

/// Status bit raised by decrypt-only transfers that carry no HMAC
pub const FABRIC_STATUS_HMAC_ERROR: u32 = 0x0000_0040;

/// Fabric status bits ignored for decrypt-only transfers
pub const DECRYPT_TOLERATED_STATUS: u32 = FABRIC_STATUS_HMAC_ERROR;
