// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Test doubles and a boot image builder

#![allow(dead_code)]

pub mod keys;

use fsbl_common::config::AddressRange;
use fsbl_common::constants::{
    AUTH_CERT_SIZE, BOOT_HDR_CHECKSUM_OFFSET, BOOT_HDR_IDENT_OFFSET, BOOT_HDR_IHT_OFFSET,
    BOOT_HDR_PHT_OFFSET, BOOT_HDR_WIDTH_DETECT_OFFSET, IMAGE_IDENT, LAST_PARTITION_CHECKSUM,
    MAX_PARTITION_NUMBER, PARTITION_HEADER_SIZE, RSA_SIGNATURE_SIZE,
};
use fsbl_common::{BootMode, Error, LoaderConfig, LogBuffer, Result};
use fsbl_crypto::sign::RsaPrivateKey;
use fsbl_crypto::{RsaPublicKey, Sha256};
use fsbl_hal::{
    BootMedium, BootRegisters, DiagnosticChannel, FabricFault, FabricInterface, FabricStage,
    HalError, HalResult, RebootStatus, SystemMemory, WatchdogInterface,
};
use fsbl_loader::header::{
    inverted_sum, PartitionAttributes, PartitionHeader, PARTITION_HEADER_WORDS,
};
use fsbl_loader::hooks::{BootHooks, HookPoint};
use fsbl_loader::verify::{PARTITION_SIGNATURE_OFFSET, SPK_FIELDS_OFFSET, SPK_FIELDS_SIZE};
use fsbl_loader::{Board, Fsbl, Loader};

// ============================================================================
// Keys
// ============================================================================

pub fn private_key(n: &[u8; 256], d: &[u8; 256]) -> RsaPrivateKey {
    RsaPrivateKey::from_be_bytes(n, d, 65537).unwrap()
}

pub fn root_private() -> RsaPrivateKey {
    private_key(&keys::ROOT_N, &keys::ROOT_D)
}

pub fn secondary_private() -> RsaPrivateKey {
    private_key(&keys::SECONDARY_N, &keys::SECONDARY_D)
}

pub fn rogue_private() -> RsaPrivateKey {
    private_key(&keys::ROGUE_N, &keys::ROGUE_D)
}

pub fn root_public() -> RsaPublicKey {
    root_private().public_key().clone()
}

pub fn rogue_public() -> RsaPublicKey {
    rogue_private().public_key().clone()
}

// ============================================================================
// Boot medium
// ============================================================================

/// Flash device backed by a vector
pub struct MemMedium {
    pub data: Vec<u8>,
    pub mode: BootMode,
    pub reads: usize,
}

impl MemMedium {
    pub fn new(size: usize, mode: BootMode) -> Self {
        Self {
            data: vec![0xFF; size],
            mode,
            reads: 0,
        }
    }

    /// Copy `image` to flash offset `base`
    pub fn place(&mut self, base: u32, image: &[u8]) {
        let base = base as usize;
        self.data[base..base + image.len()].copy_from_slice(image);
    }

    pub fn flip(&mut self, offset: usize, mask: u8) {
        self.data[offset] ^= mask;
    }
}

impl BootMedium for MemMedium {
    fn boot_mode(&self) -> BootMode {
        self.mode
    }

    fn device_size(&self) -> u32 {
        self.data.len() as u32
    }

    fn read(&mut self, offset: u32, buf: &mut [u8]) -> HalResult<()> {
        self.reads += 1;
        let start = offset as usize;
        let end = start.checked_add(buf.len()).ok_or(HalError::OutOfBounds)?;
        let src = self.data.get(start..end).ok_or(HalError::OutOfBounds)?;
        buf.copy_from_slice(src);
        Ok(())
    }
}

// ============================================================================
// System memory
// ============================================================================

/// Sparse RAM: a few backed windows
pub struct RamMemory {
    regions: Vec<(u32, Vec<u8>)>,
}

impl RamMemory {
    pub fn new(windows: &[(u32, usize)]) -> Self {
        Self {
            regions: windows
                .iter()
                .map(|(base, len)| (*base, vec![0u8; *len]))
                .collect(),
        }
    }

    /// DDR low window plus the scratch window of the default configuration
    pub fn board() -> Self {
        Self::new(&[
            (LoaderConfig::DEFAULT.ddr.start, 0x4_0000),
            (LoaderConfig::DEFAULT.scratch_address, 0x4_0000),
        ])
    }

    fn locate(&self, addr: u32, len: usize) -> Option<(usize, usize)> {
        self.regions.iter().enumerate().find_map(|(i, (base, bytes))| {
            let off = addr.checked_sub(*base)? as usize;
            (off + len <= bytes.len()).then_some((i, off))
        })
    }

    pub fn read(&self, addr: u32, len: usize) -> Vec<u8> {
        self.slice(addr, len).unwrap().to_vec()
    }
}

impl SystemMemory for RamMemory {
    fn slice(&self, addr: u32, len: usize) -> HalResult<&[u8]> {
        let (i, off) = self.locate(addr, len).ok_or(HalError::OutOfBounds)?;
        Ok(&self.regions[i].1[off..off + len])
    }

    fn slice_mut(&mut self, addr: u32, len: usize) -> HalResult<&mut [u8]> {
        let (i, off) = self.locate(addr, len).ok_or(HalError::OutOfBounds)?;
        Ok(&mut self.regions[i].1[off..off + len])
    }
}

// ============================================================================
// Fabric engine
// ============================================================================

/// Byte the test cipher XORs with
pub const CIPHER_KEY: u8 = 0x5A;

pub fn cipher(data: &[u8]) -> Vec<u8> {
    data.iter().map(|b| b ^ CIPHER_KEY).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FabricEvent {
    Init,
    Configure { bitstream: Vec<u8>, encrypted: bool },
    Decrypt { len: usize, data_len: usize },
}

/// Fabric engine that records every request
#[derive(Default)]
pub struct RecordingFabric {
    pub events: Vec<FabricEvent>,
    pub init_fault: Option<FabricFault>,
    pub configure_fault: Option<FabricFault>,
    /// Status bits raised by decrypt-only transfers
    pub decrypt_status: u32,
    /// Transfers complete but the done signal never rises
    pub done_stuck_low: bool,
    pub configured: bool,
}

impl RecordingFabric {
    pub fn configure_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, FabricEvent::Configure { .. }))
            .count()
    }

    pub fn init_count(&self) -> usize {
        self.events.iter().filter(|e| **e == FabricEvent::Init).count()
    }
}

impl FabricInterface for RecordingFabric {
    fn init(&mut self) -> core::result::Result<(), FabricFault> {
        self.events.push(FabricEvent::Init);
        match self.init_fault {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    fn configure(
        &mut self,
        bitstream: &[u8],
        encrypted: bool,
    ) -> core::result::Result<(), FabricFault> {
        self.events.push(FabricEvent::Configure {
            bitstream: bitstream.to_vec(),
            encrypted,
        });
        if let Some(fault) = self.configure_fault {
            return Err(fault);
        }
        self.configured = !self.done_stuck_low;
        Ok(())
    }

    fn decrypt_in_place(
        &mut self,
        buf: &mut [u8],
        data_len: usize,
    ) -> core::result::Result<(), FabricFault> {
        self.events.push(FabricEvent::Decrypt {
            len: buf.len(),
            data_len,
        });
        for b in &mut buf[..data_len] {
            *b ^= CIPHER_KEY;
        }
        if self.decrypt_status != 0 {
            return Err(FabricFault::new(FabricStage::Decrypt, self.decrypt_status));
        }
        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

// ============================================================================
// Watchdog, registers, diagnostics, hooks
// ============================================================================

#[derive(Default)]
pub struct CountingWatchdog {
    pub feeds: usize,
    pub stopped: bool,
    pub caused_reset: bool,
}

impl WatchdogInterface for CountingWatchdog {
    fn feed(&mut self) {
        self.feeds += 1;
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn caused_last_reset(&self) -> bool {
        self.caused_reset
    }
}

/// Persistent registers with a write log for the multi-boot counter
pub struct MockRegisters {
    pub multiboot: u32,
    pub status: u32,
    pub multiboot_writes: Vec<u32>,
}

impl MockRegisters {
    pub fn new(multiboot: u32) -> Self {
        Self {
            multiboot,
            status: 0,
            multiboot_writes: Vec::new(),
        }
    }

    pub fn marks(&self) -> RebootStatus {
        RebootStatus::from_bits_truncate(self.status)
    }
}

impl BootRegisters for MockRegisters {
    fn multiboot(&self) -> u32 {
        self.multiboot
    }

    fn set_multiboot(&mut self, value: u32) {
        self.multiboot = value;
        self.multiboot_writes.push(value);
    }

    fn reboot_status(&self) -> RebootStatus {
        RebootStatus::from_bits_retain(self.status)
    }

    fn set_reboot_status(&mut self, status: RebootStatus) {
        self.status = status.bits();
    }
}

#[derive(Default)]
pub struct RecordingDiagnostic {
    pub codes: Vec<u32>,
}

impl DiagnosticChannel for RecordingDiagnostic {
    fn emit_status(&mut self, code: u32) {
        self.codes.push(code);
    }
}

#[derive(Default)]
pub struct RecordingHooks {
    pub calls: Vec<HookPoint>,
    pub fail_at: Option<HookPoint>,
}

impl RecordingHooks {
    fn run(&mut self, point: HookPoint) -> Result<()> {
        self.calls.push(point);
        if self.fail_at == Some(point) {
            return Err(Error::from(point));
        }
        Ok(())
    }

    pub fn count(&self, point: HookPoint) -> usize {
        self.calls.iter().filter(|p| **p == point).count()
    }
}

impl BootHooks for RecordingHooks {
    fn before_bitstream(&mut self) -> Result<()> {
        self.run(HookPoint::BeforeBitstream)
    }

    fn after_bitstream(&mut self) -> Result<()> {
        self.run(HookPoint::AfterBitstream)
    }

    fn before_handoff(&mut self) -> Result<()> {
        self.run(HookPoint::BeforeHandoff)
    }

    fn fallback(&mut self) -> Result<()> {
        self.run(HookPoint::Fallback)
    }
}

// ============================================================================
// Image builder
// ============================================================================

pub const IHT_OFFSET: usize = 0x0C0;
pub const PHT_OFFSET: usize = 0x100;
pub const PHT_END: usize = PHT_OFFSET + MAX_PARTITION_NUMBER * PARTITION_HEADER_SIZE;
pub const HEADER_CERT_OFFSET: usize = PHT_END;
pub const FIRST_PARTITION_OFFSET: usize = 0xC00;

pub const PS_LOAD: u32 = 0x0010_0000;

/// One partition to put in an image
#[derive(Clone)]
pub struct PartitionSpec {
    /// Plaintext payload; length must be a multiple of four
    pub payload: Vec<u8>,
    pub destination: PartitionAttributes,
    pub load_address: u32,
    pub exec_address: u32,
    pub checksum: bool,
    pub signed: bool,
    pub encrypted: bool,
    pub owner: u32,
}

impl PartitionSpec {
    pub fn application(payload: Vec<u8>) -> Self {
        Self {
            payload,
            destination: PartitionAttributes::DEST_PS,
            load_address: PS_LOAD,
            exec_address: PS_LOAD,
            checksum: false,
            signed: false,
            encrypted: false,
            owner: 0,
        }
    }

    pub fn bitstream(payload: Vec<u8>) -> Self {
        Self {
            destination: PartitionAttributes::DEST_PL,
            load_address: 0,
            exec_address: 0,
            ..Self::application(payload)
        }
    }

    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    pub fn checksummed(mut self) -> Self {
        self.checksum = true;
        self
    }

    pub fn encrypted(mut self) -> Self {
        self.encrypted = true;
        self
    }

    pub fn at(mut self, load_address: u32) -> Self {
        self.load_address = load_address;
        self.exec_address = load_address;
        self
    }

    pub fn owned_by(mut self, owner: u32) -> Self {
        self.owner = owner;
        self
    }
}

/// Where the builder put one partition, as byte offsets from the image base
#[derive(Debug, Clone, Copy)]
pub struct PartitionLayout {
    pub start: usize,
    pub payload_len: usize,
    pub total_len: usize,
    pub cert: Option<usize>,
    pub checksum_at: Option<usize>,
}

pub struct BuiltImage {
    pub bytes: Vec<u8>,
    pub partitions: Vec<PartitionLayout>,
}

pub struct ImageBuilder {
    partitions: Vec<PartitionSpec>,
    self_entry: bool,
    header_auth: bool,
}

impl Default for ImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn align(n: usize) -> usize {
    (n + 0x3F) & !0x3F
}

fn sha256(data: &[u8]) -> [u8; 32] {
    *Sha256::digest_with_feed(data, &mut || {}).as_bytes()
}

/// Certificate for a payload, signed with the secondary key
pub fn certificate(signed_payload: &[u8]) -> Vec<u8> {
    let root = root_private();
    let secondary = secondary_private();
    let mut cert = vec![0u8; AUTH_CERT_SIZE];
    cert[..4].copy_from_slice(&0x0000_0101u32.to_le_bytes());

    let mut at = 0x40;
    for key in [root.public_key(), secondary.public_key()] {
        cert[at..at + 256].copy_from_slice(&key.modulus().to_le_bytes());
        cert[at + 256..at + 512].copy_from_slice(&key.modulus_ext().to_le_bytes());
        cert[at + 512..at + 576].copy_from_slice(&key.exponent_field());
        at += 576;
    }

    let d1 = sha256(&cert[SPK_FIELDS_OFFSET..SPK_FIELDS_OFFSET + SPK_FIELDS_SIZE]);
    let spk_sig = root.sign_digest(&d1).unwrap();
    cert[SPK_FIELDS_OFFSET + SPK_FIELDS_SIZE..PARTITION_SIGNATURE_OFFSET].copy_from_slice(&spk_sig);

    let mut covered = signed_payload.to_vec();
    covered.extend_from_slice(&cert[..PARTITION_SIGNATURE_OFFSET]);
    let d2 = sha256(&covered);
    let sig = secondary.sign_digest(&d2).unwrap();
    cert[PARTITION_SIGNATURE_OFFSET..].copy_from_slice(&sig);
    cert
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self {
            partitions: Vec::new(),
            self_entry: true,
            header_auth: false,
        }
    }

    pub fn without_self_entry(mut self) -> Self {
        self.self_entry = false;
        self
    }

    pub fn authenticated_headers(mut self) -> Self {
        self.header_auth = true;
        self
    }

    pub fn partition(mut self, spec: PartitionSpec) -> Self {
        self.partitions.push(spec);
        self
    }

    pub fn build(&self) -> BuiltImage {
        let mut bytes = vec![0u8; FIRST_PARTITION_OFFSET];
        let mut headers = Vec::new();
        let mut layouts = Vec::new();

        if self.self_entry {
            let mut own = blank_header();
            own.image_word_len = 0x10;
            own.data_word_len = 0x10;
            own.partition_word_len = 0x10;
            own.attributes = PartitionAttributes::DEST_PS;
            own.seal();
            headers.push(own);
        }

        for spec in &self.partitions {
            assert_eq!(spec.payload.len() % 4, 0);
            let start = align(bytes.len());
            bytes.resize(start, 0);

            let mut on_media = if spec.encrypted {
                let mut c = cipher(&spec.payload);
                c.extend_from_slice(&[0u8; 4]);
                c
            } else {
                spec.payload.clone()
            };
            let payload_len = on_media.len();

            let cert = if spec.signed {
                let cert = certificate(&on_media);
                on_media.extend_from_slice(&cert);
                Some(start + payload_len)
            } else {
                None
            };
            let total_len = on_media.len();
            bytes.extend_from_slice(&on_media);

            let checksum_at = if spec.checksum {
                let at = align(bytes.len());
                bytes.resize(at, 0);
                bytes.extend_from_slice(&sha256(&on_media));
                Some(at)
            } else {
                None
            };

            let mut h = blank_header();
            h.image_word_len = (payload_len / 4) as u32;
            h.data_word_len = (spec.payload.len() / 4) as u32;
            h.partition_word_len = (total_len / 4) as u32;
            h.load_address = spec.load_address;
            h.exec_address = spec.exec_address;
            h.partition_start = (start / 4) as u32;
            let mut attrs = spec.destination.bits() | (spec.owner << 16);
            if spec.checksum {
                attrs |= 0x1000;
            }
            if spec.signed {
                attrs |= PartitionAttributes::RSA_SIGNATURE.bits();
            }
            h.attributes = PartitionAttributes::from_bits_retain(attrs);
            h.checksum_offset = checksum_at.map_or(0, |a| (a / 4) as u32);
            h.seal();
            headers.push(h);

            layouts.push(PartitionLayout {
                start,
                payload_len,
                total_len,
                cert,
                checksum_at,
            });
        }

        assert!(headers.len() < MAX_PARTITION_NUMBER);
        let mut at = PHT_OFFSET;
        for h in &headers {
            bytes[at..at + PARTITION_HEADER_SIZE].copy_from_slice(&h.to_bytes());
            at += PARTITION_HEADER_SIZE;
        }
        let mut terminal = [0u8; PARTITION_HEADER_SIZE];
        terminal[60..].copy_from_slice(&LAST_PARTITION_CHECKSUM.to_le_bytes());
        bytes[at..at + PARTITION_HEADER_SIZE].copy_from_slice(&terminal);

        for (i, b) in bytes[IHT_OFFSET..PHT_OFFSET].iter_mut().enumerate() {
            *b = i as u8;
        }
        write_boot_header(&mut bytes);

        if self.header_auth {
            let cert = certificate(&bytes[IHT_OFFSET..PHT_END]);
            bytes[HEADER_CERT_OFFSET..HEADER_CERT_OFFSET + AUTH_CERT_SIZE].copy_from_slice(&cert);
        }

        BuiltImage {
            bytes,
            partitions: layouts,
        }
    }
}

fn blank_header() -> PartitionHeader {
    PartitionHeader::from_words(&[0; PARTITION_HEADER_WORDS])
}

fn put_word(bytes: &mut [u8], at: usize, word: u32) {
    bytes[at..at + 4].copy_from_slice(&word.to_le_bytes());
}

/// Fill in the boot header fields and checksum
pub fn write_boot_header(bytes: &mut [u8]) {
    put_word(bytes, BOOT_HDR_WIDTH_DETECT_OFFSET, 0x0000_0066);
    put_word(bytes, BOOT_HDR_IDENT_OFFSET, IMAGE_IDENT);
    put_word(bytes, BOOT_HDR_IHT_OFFSET, IHT_OFFSET as u32);
    put_word(bytes, BOOT_HDR_PHT_OFFSET, PHT_OFFSET as u32);
    let words: Vec<u32> = (0..10)
        .map(|i| {
            let at = BOOT_HDR_WIDTH_DETECT_OFFSET + i * 4;
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        })
        .collect();
    put_word(bytes, BOOT_HDR_CHECKSUM_OFFSET, inverted_sum(&words));
}

/// Payload of `words` recognisable words
pub fn payload(words: usize, seed: u32) -> Vec<u8> {
    (0..words as u32)
        .flat_map(|i| (seed.wrapping_mul(0x0101_0101) ^ i).to_le_bytes())
        .collect()
}

// ============================================================================
// Rigs
// ============================================================================

pub const FLASH_SIZE: usize = 0x4_0000;

pub type TestFsbl = Fsbl<
    MemMedium,
    RamMemory,
    RecordingFabric,
    CountingWatchdog,
    MockRegisters,
    RecordingDiagnostic,
    RecordingHooks,
>;

pub fn flash_with(images: &[(u32, &BuiltImage)], mode: BootMode) -> MemMedium {
    let mut medium = MemMedium::new(FLASH_SIZE, mode);
    for (base, image) in images {
        medium.place(*base, &image.bytes);
    }
    medium
}

pub fn fsbl(medium: MemMedium, multiboot: u32, config: LoaderConfig) -> TestFsbl {
    fsbl_with_key(medium, multiboot, config, Some(root_public()))
}

pub fn fsbl_with_key(
    medium: MemMedium,
    multiboot: u32,
    config: LoaderConfig,
    root_key: Option<RsaPublicKey>,
) -> TestFsbl {
    let board = Board {
        medium,
        memory: RamMemory::board(),
        fabric: RecordingFabric::default(),
        watchdog: CountingWatchdog::default(),
        registers: MockRegisters::new(multiboot),
        diagnostic: RecordingDiagnostic::default(),
    };
    Fsbl::new(board, RecordingHooks::default(), config, root_key)
}

/// Collaborators for driving a [`Loader`] directly
pub struct Rig {
    pub config: LoaderConfig,
    pub root_key: Option<RsaPublicKey>,
    pub medium: MemMedium,
    pub memory: RamMemory,
    pub fabric: RecordingFabric,
    pub watchdog: CountingWatchdog,
    pub hooks: RecordingHooks,
    pub log: LogBuffer,
}

impl Rig {
    pub fn new(medium: MemMedium) -> Self {
        Self {
            config: LoaderConfig::DEFAULT,
            root_key: Some(root_public()),
            medium,
            memory: RamMemory::board(),
            fabric: RecordingFabric::default(),
            watchdog: CountingWatchdog::default(),
            hooks: RecordingHooks::default(),
            log: LogBuffer::new(),
        }
    }

    pub fn loader(
        &mut self,
    ) -> Loader<'_, MemMedium, RamMemory, RecordingFabric, CountingWatchdog, RecordingHooks> {
        Loader {
            config: &self.config,
            root_key: self.root_key.as_ref(),
            medium: &mut self.medium,
            memory: &mut self.memory,
            fabric: &mut self.fabric,
            watchdog: &mut self.watchdog,
            hooks: &mut self.hooks,
            log: &mut self.log,
        }
    }
}

/// DDR window that excludes everything below `start`
pub fn ddr_from(start: u32) -> AddressRange {
    AddressRange {
        start,
        end: LoaderConfig::DEFAULT.ddr.end,
    }
}

pub const SIGNATURE_LEN: usize = RSA_SIGNATURE_SIZE;
