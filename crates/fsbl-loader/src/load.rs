// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Partition loading
//!
//! Walks the partition header table of one image and, per partition:
//!
//! 1. skips partitions owned by a later boot stage
//! 2. classifies it (destination, encryption, checksum, signature)
//! 3. checks the load address policy
//! 4. moves it from the boot medium into memory
//! 5. verifies the checksum and the signature chain
//! 6. decrypts processing-system partitions, configures the fabric with
//!    fabric partitions
//!
//! Any failure fails the whole attempt. There is no partial success and
//! no retry in place; the caller hands the error to the fallback
//! controller.
//!
//! Fabric partitions are always staged at the scratch address and only
//! reach the configuration engine once verified.

use core::fmt;

use fsbl_common::constants::{AUTH_CERT_SIZE, DECRYPT_TOLERATED_STATUS, PARTITION_CHECKSUM_SIZE};
use fsbl_common::{log_debug, log_error, log_info, log_warn};
use fsbl_common::{Error, LoaderConfig, LogBuffer};
use fsbl_crypto::{RsaPublicKey, Sha256};
use fsbl_hal::{
    BootMedium, FabricFault, FabricInterface, FabricStage, SystemMemory, WatchdogInterface,
};
use zeroize::Zeroize;

use crate::header::{
    locate_partition_table, BootHeader, Destination, HeaderError, PartitionHeader,
    PARTITION_TABLE_SIZE,
};
use crate::hooks::{BootHooks, HookPoint};
use crate::verify::{authenticate_staged, AuthError};

const MODULE: &str = "load";

/// Address control passes to after loading; zero means no executable
/// partition was loaded
pub type HandoffAddress = u32;

// ============================================================================
// Errors
// ============================================================================

/// Per-partition load errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// Load address outside usable memory, or zero where not allowed
    BadAddress,
    /// Partition digest does not match the stored checksum
    ChecksumMismatch,
    /// Signature chain did not verify
    AuthFailed(AuthError),
    /// Decrypt-only transfer failed
    DecryptFailed,
    /// Copy from the boot medium failed
    MoveFailed,
    /// Partition is signed but signature support is disabled
    RsaSupportDisabled,
}

impl From<LoadError> for Error {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::BadAddress => Error::InvalidLoadAddress,
            LoadError::ChecksumMismatch => Error::PartitionChecksumFailed,
            LoadError::AuthFailed(_) => Error::AuthenticationFailed,
            LoadError::DecryptFailed => Error::DecryptionFailed,
            LoadError::MoveFailed => Error::PartitionMoveFailed,
            LoadError::RsaSupportDisabled => Error::RsaSupportDisabled,
        }
    }
}

impl From<AuthError> for LoadError {
    fn from(e: AuthError) -> Self {
        Self::AuthFailed(e)
    }
}

/// Reasons a boot attempt fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    /// Start-up known-answer test failed
    SelfTestFailed,
    /// Header table unusable
    Header(HeaderError),
    /// Header table authentication failed
    HeaderAuth(LoadError),
    /// A partition failed to load
    Load {
        /// Table index of the failing partition
        partition: usize,
        /// What went wrong
        error: LoadError,
    },
    /// The fabric engine reported a fault
    Fabric {
        /// Table index of the failing partition
        partition: usize,
        /// Engine fault
        fault: FabricFault,
    },
    /// A board hook failed
    Hook(HookPoint),
    /// Control came back from the handed-off image
    IllegalReturn,
}

impl BootError {
    /// Table index of the partition involved, if any
    #[must_use]
    pub const fn partition(&self) -> Option<usize> {
        match self {
            Self::Load { partition, .. } | Self::Fabric { partition, .. } => Some(*partition),
            _ => None,
        }
    }
}

impl From<BootError> for Error {
    fn from(e: BootError) -> Self {
        match e {
            BootError::SelfTestFailed => Error::CryptoSelfTestFailed,
            BootError::Header(h) => h.into(),
            BootError::HeaderAuth(LoadError::RsaSupportDisabled) => Error::RsaSupportDisabled,
            BootError::HeaderAuth(_) => Error::HeaderInfoUnavailable,
            BootError::Load { error, .. } => error.into(),
            BootError::Fabric { fault, .. } => fault.into(),
            BootError::Hook(point) => point.into(),
            BootError::IllegalReturn => Error::IllegalReturn,
        }
    }
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfTestFailed => f.write_str("crypto self-test failed"),
            Self::Header(e) => write!(f, "header table: {e}"),
            Self::HeaderAuth(e) => write!(f, "header authentication: {e:?}"),
            Self::Load { partition, error } => write!(f, "partition {partition}: {error:?}"),
            Self::Fabric { partition, fault } => write!(f, "partition {partition}: {fault}"),
            Self::Hook(point) => write!(f, "{point:?} hook failed"),
            Self::IllegalReturn => f.write_str("illegal return from handoff"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BootError {
    fn format(&self, f: defmt::Formatter) {
        match self.partition() {
            Some(partition) => defmt::write!(f, "partition {}: {}", partition, Error::from(*self)),
            None => defmt::write!(f, "{}", Error::from(*self)),
        }
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Policy flags derived from one partition header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionFlags {
    /// Destination device
    pub destination: Destination,
    /// On-media and in-memory lengths differ
    pub is_encrypted: bool,
    /// Checksum stored in the image
    pub is_checksum_protected: bool,
    /// Certificate appended
    pub is_signed: bool,
    /// Owned by this loader
    pub is_loader_owned: bool,
}

impl PartitionFlags {
    /// Fabric bitstream
    #[must_use]
    pub const fn is_fabric(&self) -> bool {
        matches!(self.destination, Destination::Fabric)
    }

    /// Processing-system (application) partition
    #[must_use]
    pub const fn is_processing_system(&self) -> bool {
        matches!(self.destination, Destination::ProcessingSystem)
    }

    /// Verification covers payload and certificate, so both are staged
    #[must_use]
    pub const fn stages_whole_partition(&self) -> bool {
        self.is_signed || self.is_checksum_protected
    }
}

/// Derive policy flags from a header. Pure.
#[must_use]
pub fn classify(header: &PartitionHeader) -> PartitionFlags {
    let attrs = header.attributes;
    PartitionFlags {
        destination: attrs.destination(),
        is_encrypted: header.is_encrypted(),
        is_checksum_protected: attrs.is_checksummed(),
        is_signed: attrs.is_signed(),
        is_loader_owned: attrs.is_loader_owned(),
    }
}

// ============================================================================
// Loader State
// ============================================================================

/// Progress through one image's partition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderState {
    /// Flash offset of the image
    pub image_base: u32,
    /// Next table index to examine
    pub index: usize,
    /// Usable table entries
    pub count: usize,
    /// Partitions moved and verified so far
    pub loaded: usize,
    /// Execution address of the first processing-system partition
    pub handoff: Option<HandoffAddress>,
    /// A processing-system partition has been seen
    pub application_seen: bool,
    /// At least one bitstream has been configured
    pub bitstream_loaded: bool,
    /// Fabric engine initialised
    pub fabric_ready: bool,
}

impl LoaderState {
    /// State before the first partition of an image
    #[must_use]
    pub const fn new(image_base: u32, first: usize, count: usize) -> Self {
        Self {
            image_base,
            index: first,
            count,
            loaded: 0,
            handoff: None,
            application_seen: false,
            bitstream_loaded: false,
            fabric_ready: false,
        }
    }
}

/// Result of examining one partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Continue with the next table entry
    Next(LoaderState),
    /// Stop walking; the image is complete
    Done(LoaderState),
}

/// Where one partition is copied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    source: u32,
    dest: u32,
    len: usize,
}

fn words_to_bytes(words: u32) -> Option<usize> {
    usize::try_from(words).ok()?.checked_mul(4)
}

// ============================================================================
// Loader
// ============================================================================

/// One boot attempt's view of the board
pub struct Loader<'a, M, S, F, W, H> {
    /// Loader configuration
    pub config: &'a LoaderConfig,
    /// Root public key; `None` when no key is provisioned
    pub root_key: Option<&'a RsaPublicKey>,
    /// Boot medium
    pub medium: &'a mut M,
    /// Destination memory
    pub memory: &'a mut S,
    /// Fabric configuration engine
    pub fabric: &'a mut F,
    /// Watchdog
    pub watchdog: &'a mut W,
    /// Board hooks
    pub hooks: &'a mut H,
    /// Log
    pub log: &'a mut LogBuffer,
}

impl<M, S, F, W, H> Loader<'_, M, S, F, W, H>
where
    M: BootMedium,
    S: SystemMemory,
    F: FabricInterface,
    W: WatchdogInterface,
    H: BootHooks,
{
    /// Load every partition of the image at `image_base`
    ///
    /// Returns the execution address of the first processing-system
    /// partition, or zero if none was loaded.
    ///
    /// # Errors
    ///
    /// Returns the first failure; nothing loaded before it may be used.
    pub fn load_boot_image(&mut self, image_base: u32) -> Result<HandoffAddress, BootError> {
        log_info!(self.log, MODULE, "image base 0x{:08X}", image_base);

        let self_entry = self.medium.boot_mode().has_self_entry();
        let table = locate_partition_table(&mut *self.medium, image_base, self_entry)
            .map_err(|e| {
                log_error!(self.log, MODULE, "{}", e);
                BootError::Header(e)
            })?;
        log_info!(self.log, MODULE, "partition count {}", table.len());
        let boot_header = table.boot_header();
        log_debug!(
            self.log,
            MODULE,
            "boot header exec 0x{:08X} len 0x{:08X} cfg 0x{:08X} enc 0x{:08X}",
            boot_header.exec_address(),
            boot_header.total_length(),
            boot_header.flash_config(),
            boot_header.encryption_status()
        );

        if self.config.header_authentication {
            self.authenticate_headers(image_base, table.boot_header())?;
            log_info!(self.log, MODULE, "header authentication done");
        }

        let first = usize::from(self_entry);
        let mut state = LoaderState::new(image_base, first, table.len());
        let finished = loop {
            let Some(header) = table.headers().get(state.index) else {
                break state;
            };
            match self.step(state, header)? {
                Transition::Next(next) => state = next,
                Transition::Done(done) => break done,
            }
        };

        log_info!(
            self.log,
            MODULE,
            "{} partition(s) loaded, handoff 0x{:08X}",
            finished.loaded,
            finished.handoff.unwrap_or(0)
        );
        Ok(finished.handoff.unwrap_or(0))
    }

    /// Examine the partition at `state.index` and advance
    ///
    /// # Errors
    ///
    /// Any failure of the partition fails the attempt.
    pub fn step(
        &mut self,
        mut state: LoaderState,
        header: &PartitionHeader,
    ) -> Result<Transition, BootError> {
        let index = state.index;
        state.index += 1;
        self.dump_header(index, header);

        let flags = classify(header);
        if !flags.is_loader_owned {
            log_info!(self.log, MODULE, "skipping partition {}", index);
            return Ok(Transition::Next(state));
        }

        if flags.is_fabric() && state.application_seen {
            log_warn!(self.log, MODULE, "bitstream not loaded: partition order invalid");
            return Ok(Transition::Done(state));
        }

        if flags.is_processing_system() {
            state.application_seen = true;
            if header.load_address == 0 && !flags.is_signed && !flags.is_encrypted {
                log_info!(self.log, MODULE, "partition {} has no load address", index);
                return Ok(Transition::Done(state));
            }
        }

        let placement = self.plan(&state, header, flags).map_err(|error| {
            log_error!(self.log, MODULE, "partition {}: {:?}", index, error);
            BootError::Load {
                partition: index,
                error,
            }
        })?;

        if flags.is_processing_system() && state.handoff.is_none() {
            state.handoff = Some(header.exec_address);
        }

        if flags.is_fabric() {
            self.run_hook(HookPoint::BeforeBitstream)?;
        }

        self.watchdog.feed();
        if let Err(e) = self.place(&mut state, index, header, flags, placement) {
            if flags.is_fabric() {
                self.scrub(placement);
            }
            return Err(e);
        }

        if flags.is_fabric() {
            self.run_hook(HookPoint::AfterBitstream)?;
        }

        state.loaded += 1;
        Ok(Transition::Next(state))
    }

    fn plan(
        &self,
        state: &LoaderState,
        header: &PartitionHeader,
        flags: PartitionFlags,
    ) -> Result<Placement, LoadError> {
        let words = if flags.stages_whole_partition() {
            header.partition_word_len
        } else {
            header.image_word_len
        };
        let len = words_to_bytes(words).ok_or(LoadError::MoveFailed)?;
        let source = header
            .partition_start
            .checked_mul(4)
            .and_then(|off| state.image_base.checked_add(off))
            .ok_or(LoadError::MoveFailed)?;

        let dest = if flags.is_fabric() {
            self.config.scratch_address
        } else {
            let span = u32::try_from(len).map_err(|_| LoadError::BadAddress)?;
            if !self.config.ddr.contains_span(header.load_address, span) {
                return Err(LoadError::BadAddress);
            }
            header.load_address
        };

        Ok(Placement { source, dest, len })
    }

    fn place(
        &mut self,
        state: &mut LoaderState,
        index: usize,
        header: &PartitionHeader,
        flags: PartitionFlags,
        placement: Placement,
    ) -> Result<(), BootError> {
        let fail = |error| BootError::Load {
            partition: index,
            error,
        };

        self.move_partition(placement).map_err(fail)?;

        if flags.is_checksum_protected {
            self.verify_checksum(state.image_base, header, placement)
                .map_err(fail)?;
            log_info!(self.log, MODULE, "partition {} validation done", index);
        }

        if flags.is_signed {
            self.authenticate_partition(placement).map_err(fail)?;
            log_info!(self.log, MODULE, "partition {} authentication done", index);
        }

        if flags.is_encrypted && !flags.is_fabric() {
            self.ensure_fabric(state, index)?;
            self.decrypt(header, placement).map_err(fail)?;
        }

        if flags.is_fabric() {
            self.ensure_fabric(state, index)?;
            let len = words_to_bytes(header.image_word_len)
                .filter(|len| *len <= placement.len)
                .ok_or(fail(LoadError::MoveFailed))?;
            let bitstream = self
                .memory
                .slice(placement.dest, len)
                .map_err(|_| fail(LoadError::MoveFailed))?;
            self.fabric
                .configure(bitstream, flags.is_encrypted)
                .map_err(|fault| BootError::Fabric {
                    partition: index,
                    fault,
                })?;
            if !self.fabric.is_configured() {
                return Err(BootError::Fabric {
                    partition: index,
                    fault: FabricFault::new(FabricStage::Download, 0),
                });
            }
            state.bitstream_loaded = true;
            log_info!(self.log, MODULE, "partition {} bitstream configured", index);
        }

        Ok(())
    }

    fn move_partition(&mut self, placement: Placement) -> Result<(), LoadError> {
        let dest = self
            .memory
            .slice_mut(placement.dest, placement.len)
            .map_err(|_| LoadError::MoveFailed)?;
        self.medium
            .read(placement.source, dest)
            .map_err(|_| LoadError::MoveFailed)
    }

    fn verify_checksum(
        &mut self,
        image_base: u32,
        header: &PartitionHeader,
        placement: Placement,
    ) -> Result<(), LoadError> {
        let stored_at = header
            .checksum_offset
            .checked_mul(4)
            .and_then(|off| image_base.checked_add(off))
            .ok_or(LoadError::MoveFailed)?;
        let mut stored = [0u8; PARTITION_CHECKSUM_SIZE];
        self.medium
            .read(stored_at, &mut stored)
            .map_err(|_| LoadError::MoveFailed)?;

        let staged = self
            .memory
            .slice(placement.dest, placement.len)
            .map_err(|_| LoadError::MoveFailed)?;
        let watchdog = &mut *self.watchdog;
        let digest = Sha256::digest_with_feed(staged, &mut || watchdog.feed());

        if digest.as_bytes() != &stored {
            return Err(LoadError::ChecksumMismatch);
        }
        Ok(())
    }

    fn authenticate_partition(&mut self, placement: Placement) -> Result<(), LoadError> {
        if !self.config.rsa_support {
            return Err(LoadError::RsaSupportDisabled);
        }
        let root_key = self.root_key.ok_or(AuthError::NoRootKey)?;
        let staged = self
            .memory
            .slice(placement.dest, placement.len)
            .map_err(|_| LoadError::MoveFailed)?;
        let watchdog = &mut *self.watchdog;
        authenticate_staged(staged, root_key, &mut || watchdog.feed())?;
        Ok(())
    }

    fn decrypt(&mut self, header: &PartitionHeader, placement: Placement) -> Result<(), LoadError> {
        let image_len = words_to_bytes(header.image_word_len)
            .filter(|len| *len <= placement.len)
            .ok_or(LoadError::DecryptFailed)?;
        let data_len = words_to_bytes(header.data_word_len)
            .filter(|len| *len <= image_len)
            .ok_or(LoadError::DecryptFailed)?;
        let buf = self
            .memory
            .slice_mut(placement.dest, image_len)
            .map_err(|_| LoadError::MoveFailed)?;

        match self.fabric.decrypt_in_place(buf, data_len) {
            Ok(()) => Ok(()),
            Err(fault) => match fault.without(DECRYPT_TOLERATED_STATUS) {
                None => Ok(()),
                Some(fault) => {
                    log_error!(self.log, MODULE, "{}", fault);
                    Err(LoadError::DecryptFailed)
                }
            },
        }
    }

    fn ensure_fabric(&mut self, state: &mut LoaderState, index: usize) -> Result<(), BootError> {
        if !state.fabric_ready {
            self.fabric.init().map_err(|fault| BootError::Fabric {
                partition: index,
                fault,
            })?;
            state.fabric_ready = true;
        }
        Ok(())
    }

    fn scrub(&mut self, placement: Placement) {
        if let Ok(staged) = self.memory.slice_mut(placement.dest, placement.len) {
            staged.zeroize();
        }
    }

    fn run_hook(&mut self, point: HookPoint) -> Result<(), BootError> {
        let result = match point {
            HookPoint::BeforeBitstream => self.hooks.before_bitstream(),
            HookPoint::AfterBitstream => self.hooks.after_bitstream(),
            HookPoint::BeforeHandoff => self.hooks.before_handoff(),
            HookPoint::Fallback => self.hooks.fallback(),
        };
        result.map_err(|e| {
            log_error!(self.log, MODULE, "{:?} hook: {}", point, e);
            BootError::Hook(point)
        })
    }

    /// Authenticate the image header table through the end of the
    /// partition header table, with its certificate appended
    fn authenticate_headers(
        &mut self,
        image_base: u32,
        boot_header: &BootHeader,
    ) -> Result<(), BootError> {
        if !self.config.rsa_support {
            return Err(BootError::HeaderAuth(LoadError::RsaSupportDisabled));
        }
        let moved = |_| BootError::HeaderAuth(LoadError::MoveFailed);

        let len = header_auth_len(boot_header)
            .ok_or(BootError::HeaderAuth(LoadError::MoveFailed))?;
        let source = image_base
            .checked_add(boot_header.iht_offset)
            .ok_or(BootError::HeaderAuth(LoadError::MoveFailed))?;

        let staged = self
            .memory
            .slice_mut(self.config.scratch_address, len)
            .map_err(moved)?;
        self.medium.read(source, staged).map_err(moved)?;

        let root_key = self
            .root_key
            .ok_or(BootError::HeaderAuth(LoadError::AuthFailed(AuthError::NoRootKey)))?;
        let staged = self
            .memory
            .slice(self.config.scratch_address, len)
            .map_err(moved)?;
        let watchdog = &mut *self.watchdog;
        authenticate_staged(staged, root_key, &mut || watchdog.feed()).map_err(|e| {
            log_error!(self.log, MODULE, "header authentication: {}", e);
            BootError::HeaderAuth(LoadError::AuthFailed(e))
        })
    }

    fn dump_header(&mut self, index: usize, h: &PartitionHeader) {
        if !self.log.should_log(fsbl_common::LogLevel::Debug) {
            return;
        }
        log_debug!(
            self.log,
            MODULE,
            "p{} img 0x{:08X} data 0x{:08X} part 0x{:08X} attr 0x{:08X}",
            index,
            h.image_word_len,
            h.data_word_len,
            h.partition_word_len,
            h.attributes.bits()
        );
        log_debug!(
            self.log,
            MODULE,
            "p{} load 0x{:08X} exec 0x{:08X} start 0x{:08X} csum@ 0x{:08X}",
            index,
            h.load_address,
            h.exec_address,
            h.partition_start,
            h.checksum_offset
        );
    }
}

/// Bytes covered by header authentication: the image header table up to
/// the partition header table, the partition header table, and the
/// certificate behind it
fn header_auth_len(boot_header: &BootHeader) -> Option<usize> {
    let tables = boot_header.pht_offset.checked_sub(boot_header.iht_offset)?;
    usize::try_from(tables)
        .ok()?
        .checked_add(PARTITION_TABLE_SIZE)?
        .checked_add(AUTH_CERT_SIZE)
}
