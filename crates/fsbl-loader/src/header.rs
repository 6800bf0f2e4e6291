// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Boot header and partition header table parsing
//!
//! # Partition Header Layout
//!
//! ```text
//! Word  Field
//! 0     Image word length (on media)
//! 1     Data word length (in memory, after decryption)
//! 2     Partition word length (payload + certificate)
//! 3     Load address
//! 4     Execution address
//! 5     Partition start (words from image base)
//! 6     Attributes
//! 7     Section count
//! 8     Checksum offset (words from image base)
//! 9-14  Reserved
//! 15    Header checksum (inverted sum of words 0-14)
//! ```

use bitflags::bitflags;
use core::fmt;

use fsbl_common::constants::{
    BOOT_HDR_CHECKSUM_OFFSET, BOOT_HDR_CHECKSUM_WORDS, BOOT_HDR_ENC_STATUS_OFFSET,
    BOOT_HDR_EXEC_OFFSET, BOOT_HDR_FLASH_CFG_OFFSET, BOOT_HDR_IDENT_OFFSET, BOOT_HDR_IHT_OFFSET,
    BOOT_HDR_PHT_OFFSET, BOOT_HDR_SIZE, BOOT_HDR_TOTAL_LEN_OFFSET, BOOT_HDR_WIDTH_DETECT_OFFSET,
    IMAGE_IDENT, LAST_PARTITION_CHECKSUM, MAXIMUM_IMAGE_WORD_LEN, MAX_PARTITION_NUMBER,
    PARTITION_HEADER_CHECKSUM_WORDS, PARTITION_HEADER_SIZE,
};
use fsbl_common::Error;
use fsbl_hal::BootMedium;
use heapless::Vec;

/// Words in one partition header
pub const PARTITION_HEADER_WORDS: usize = PARTITION_HEADER_SIZE / 4;

/// Bytes covered by a full partition header table
pub const PARTITION_TABLE_SIZE: usize = MAX_PARTITION_NUMBER * PARTITION_HEADER_SIZE;

// ============================================================================
// Errors
// ============================================================================

/// Header table errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// Boot header or table pointer could not be read
    BadPointer,
    /// A partition header failed its checksum or length ceiling, or the
    /// table has no terminator
    Corrupt,
    /// Nothing for the loader to load
    Empty,
}

impl From<HeaderError> for Error {
    fn from(e: HeaderError) -> Self {
        match e {
            HeaderError::BadPointer => Error::HeaderInfoUnavailable,
            HeaderError::Corrupt => Error::InvalidHeader,
            HeaderError::Empty => Error::NoUsablePartition,
        }
    }
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::BadPointer => "header pointer unreadable",
            Self::Corrupt => "partition header corrupt",
            Self::Empty => "partition table empty",
        };
        f.write_str(msg)
    }
}

fn word_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Bit-inverted sum of `words`
#[must_use]
pub fn inverted_sum(words: &[u32]) -> u32 {
    !words.iter().fold(0u32, |acc, w| acc.wrapping_add(*w))
}

// ============================================================================
// Boot Header
// ============================================================================

/// Fixed boot header at the start of every image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootHeader {
    /// Words `0x020..=0x044`, the span covered by the header checksum
    checksummed: [u32; BOOT_HDR_CHECKSUM_WORDS],
    /// Stored header checksum
    pub checksum: u32,
    /// Image header table offset (bytes from image base)
    pub iht_offset: u32,
    /// Partition header table offset (bytes from image base)
    pub pht_offset: u32,
}

impl BootHeader {
    /// Parse the first [`BOOT_HDR_SIZE`] bytes of an image
    #[must_use]
    pub fn from_bytes(bytes: &[u8; BOOT_HDR_SIZE]) -> Self {
        let mut checksummed = [0u32; BOOT_HDR_CHECKSUM_WORDS];
        for (i, w) in checksummed.iter_mut().enumerate() {
            *w = word_at(bytes, BOOT_HDR_WIDTH_DETECT_OFFSET + i * 4);
        }
        Self {
            checksummed,
            checksum: word_at(bytes, BOOT_HDR_CHECKSUM_OFFSET),
            iht_offset: word_at(bytes, BOOT_HDR_IHT_OFFSET),
            pht_offset: word_at(bytes, BOOT_HDR_PHT_OFFSET),
        }
    }

    /// Read the boot header of the image at `image_base`
    ///
    /// # Errors
    ///
    /// Returns `HeaderError::BadPointer` if the medium cannot supply it.
    pub fn read<M: BootMedium>(medium: &mut M, image_base: u32) -> Result<Self, HeaderError> {
        let mut raw = [0u8; BOOT_HDR_SIZE];
        medium
            .read(image_base, &mut raw)
            .map_err(|_| HeaderError::BadPointer)?;
        Ok(Self::from_bytes(&raw))
    }

    fn field(&self, offset: usize) -> u32 {
        self.checksummed[(offset - BOOT_HDR_WIDTH_DETECT_OFFSET) / 4]
    }

    /// Image identification word
    #[must_use]
    pub fn ident(&self) -> u32 {
        self.field(BOOT_HDR_IDENT_OFFSET)
    }

    /// Encryption status word
    #[must_use]
    pub fn encryption_status(&self) -> u32 {
        self.field(BOOT_HDR_ENC_STATUS_OFFSET)
    }

    /// Loader execution address
    #[must_use]
    pub fn exec_address(&self) -> u32 {
        self.field(BOOT_HDR_EXEC_OFFSET)
    }

    /// Total loader length in bytes
    #[must_use]
    pub fn total_length(&self) -> u32 {
        self.field(BOOT_HDR_TOTAL_LEN_OFFSET)
    }

    /// Flash configuration word
    #[must_use]
    pub fn flash_config(&self) -> u32 {
        self.field(BOOT_HDR_FLASH_CFG_OFFSET)
    }

    /// Checksum the header should carry
    #[must_use]
    pub fn expected_checksum(&self) -> u32 {
        inverted_sum(&self.checksummed)
    }

    /// Identification word and checksum both match
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.ident() == IMAGE_IDENT && self.checksum == self.expected_checksum()
    }
}

/// Check for a plausible image at `image_base` without walking its tables
///
/// Read failures count as "no image". Blank or foreign flash is rejected
/// on the identification word alone.
pub fn probe_image<M: BootMedium>(medium: &mut M, image_base: u32) -> bool {
    let Some(ident_at) = image_base.checked_add(BOOT_HDR_IDENT_OFFSET as u32) else {
        return false;
    };
    if !matches!(medium.read_u32(ident_at), Ok(IMAGE_IDENT)) {
        return false;
    }
    BootHeader::read(medium, image_base).is_ok_and(|h| h.is_valid())
}

// ============================================================================
// Partition Attributes
// ============================================================================

bitflags! {
    /// Partition attribute word
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PartitionAttributes: u32 {
        /// Destined for processing-system memory
        const DEST_PS = 0x0000_0010;
        /// Destined for the programmable-logic fabric
        const DEST_PL = 0x0000_0020;
        /// Checksum type (non-zero means checksum-protected)
        const CHECKSUM_TYPE = 0x0000_7000;
        /// RSA certificate appended
        const RSA_SIGNATURE = 0x0000_8000;
        /// Owner (zero means the loader owns the partition)
        const OWNER = 0x0003_0000;
    }
}

/// Destination device field
const DESTINATION_MASK: u32 = 0x0000_00F0;

/// Where a partition goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Processing-system memory
    ProcessingSystem,
    /// Programmable-logic fabric
    Fabric,
    /// Anything else; loaded nowhere special
    Other,
}

impl PartitionAttributes {
    /// Decode the destination field
    #[must_use]
    pub const fn destination(self) -> Destination {
        match self.bits() & DESTINATION_MASK {
            0x10 => Destination::ProcessingSystem,
            0x20 => Destination::Fabric,
            _ => Destination::Other,
        }
    }

    /// Checksum type is set
    #[must_use]
    pub const fn is_checksummed(self) -> bool {
        self.intersects(Self::CHECKSUM_TYPE)
    }

    /// Certificate appended
    #[must_use]
    pub const fn is_signed(self) -> bool {
        self.contains(Self::RSA_SIGNATURE)
    }

    /// Owned by the loader
    #[must_use]
    pub const fn is_loader_owned(self) -> bool {
        !self.intersects(Self::OWNER)
    }
}

// ============================================================================
// Partition Header
// ============================================================================

/// One partition header table slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionHeader {
    /// On-media length in words
    pub image_word_len: u32,
    /// In-memory length in words
    pub data_word_len: u32,
    /// Length including the certificate, in words
    pub partition_word_len: u32,
    /// Load address
    pub load_address: u32,
    /// Execution address
    pub exec_address: u32,
    /// Start, in words from the image base
    pub partition_start: u32,
    /// Attribute word
    pub attributes: PartitionAttributes,
    /// Section count
    pub section_count: u32,
    /// Stored checksum location, in words from the image base
    pub checksum_offset: u32,
    /// Reserved words 9-14
    pub reserved: [u32; 6],
    /// Inverted sum of words 0-14
    pub header_checksum: u32,
}

impl PartitionHeader {
    /// Build from the sixteen raw words
    #[must_use]
    pub fn from_words(w: &[u32; PARTITION_HEADER_WORDS]) -> Self {
        let mut reserved = [0u32; 6];
        reserved.copy_from_slice(&w[9..15]);
        Self {
            image_word_len: w[0],
            data_word_len: w[1],
            partition_word_len: w[2],
            load_address: w[3],
            exec_address: w[4],
            partition_start: w[5],
            attributes: PartitionAttributes::from_bits_retain(w[6]),
            section_count: w[7],
            checksum_offset: w[8],
            reserved,
            header_checksum: w[15],
        }
    }

    /// Parse one 64-byte slot
    #[must_use]
    pub fn from_bytes(bytes: &[u8; PARTITION_HEADER_SIZE]) -> Self {
        let mut words = [0u32; PARTITION_HEADER_WORDS];
        for (i, w) in words.iter_mut().enumerate() {
            *w = word_at(bytes, i * 4);
        }
        Self::from_words(&words)
    }

    /// Raw words in table order
    #[must_use]
    pub fn to_words(&self) -> [u32; PARTITION_HEADER_WORDS] {
        let mut w = [0u32; PARTITION_HEADER_WORDS];
        w[0] = self.image_word_len;
        w[1] = self.data_word_len;
        w[2] = self.partition_word_len;
        w[3] = self.load_address;
        w[4] = self.exec_address;
        w[5] = self.partition_start;
        w[6] = self.attributes.bits();
        w[7] = self.section_count;
        w[8] = self.checksum_offset;
        w[9..15].copy_from_slice(&self.reserved);
        w[15] = self.header_checksum;
        w
    }

    /// Serialise to the 64-byte on-media form
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PARTITION_HEADER_SIZE] {
        let mut out = [0u8; PARTITION_HEADER_SIZE];
        for (chunk, w) in out.chunks_exact_mut(4).zip(self.to_words()) {
            chunk.copy_from_slice(&w.to_le_bytes());
        }
        out
    }

    /// Checksum the header should carry
    #[must_use]
    pub fn expected_checksum(&self) -> u32 {
        inverted_sum(&self.to_words()[..PARTITION_HEADER_CHECKSUM_WORDS])
    }

    /// Recompute and store the header checksum
    pub fn seal(&mut self) {
        self.header_checksum = self.expected_checksum();
    }

    /// End-of-table sentinel: fifteen zero words and an all-ones checksum
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.header_checksum == LAST_PARTITION_CHECKSUM
            && self.to_words()[..PARTITION_HEADER_CHECKSUM_WORDS]
                .iter()
                .all(|w| *w == 0)
    }

    /// Check the checksum and the length ceiling
    ///
    /// # Errors
    ///
    /// Returns `HeaderError::Corrupt` on either failure.
    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.header_checksum != self.expected_checksum()
            || self.image_word_len > MAXIMUM_IMAGE_WORD_LEN
        {
            return Err(HeaderError::Corrupt);
        }
        Ok(())
    }

    /// Payload carried on the medium differs from what lands in memory
    #[must_use]
    pub const fn is_encrypted(&self) -> bool {
        self.data_word_len != self.image_word_len
    }
}

// ============================================================================
// Partition Table
// ============================================================================

/// Validated, non-terminal prefix of a partition header table
#[derive(Debug, Clone)]
pub struct PartitionTable {
    headers: Vec<PartitionHeader, MAX_PARTITION_NUMBER>,
    boot_header: BootHeader,
}

impl PartitionTable {
    /// Usable partition headers in table order
    #[must_use]
    pub fn headers(&self) -> &[PartitionHeader] {
        &self.headers
    }

    /// Number of usable slots, including the loader's own entry
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// No usable slots
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Boot header the table was found through
    #[must_use]
    pub const fn boot_header(&self) -> &BootHeader {
        &self.boot_header
    }
}

/// Read and validate the partition header table of the image at
/// `image_base`
///
/// `self_entry` says whether slot 0 describes the loader itself, in which
/// case a table must hold at least one more slot to be worth loading.
///
/// # Errors
///
/// - `HeaderError::BadPointer` if the boot header or the table cannot be read
/// - `HeaderError::Corrupt` if a slot before the terminator fails its
///   checksum or length ceiling, or no terminator is found
/// - `HeaderError::Empty` if nothing is left to load
pub fn locate_partition_table<M: BootMedium>(
    medium: &mut M,
    image_base: u32,
    self_entry: bool,
) -> Result<PartitionTable, HeaderError> {
    let boot_header = BootHeader::read(medium, image_base)?;
    let table_at = image_base
        .checked_add(boot_header.pht_offset)
        .ok_or(HeaderError::BadPointer)?;

    let mut raw = [0u8; PARTITION_TABLE_SIZE];
    medium
        .read(table_at, &mut raw)
        .map_err(|_| HeaderError::BadPointer)?;

    let mut headers = Vec::new();
    let mut terminated = false;
    for slot in raw.chunks_exact(PARTITION_HEADER_SIZE) {
        let mut bytes = [0u8; PARTITION_HEADER_SIZE];
        bytes.copy_from_slice(slot);
        let header = PartitionHeader::from_bytes(&bytes);
        if header.is_terminal() {
            terminated = true;
            break;
        }
        header.validate()?;
        // Capacity equals the slot count, so this cannot overflow.
        let _ = headers.push(header);
    }

    if !terminated {
        return Err(HeaderError::Corrupt);
    }

    let needed = if self_entry { 2 } else { 1 };
    if headers.len() < needed {
        return Err(HeaderError::Empty);
    }

    Ok(PartitionTable {
        headers,
        boot_header,
    })
}
