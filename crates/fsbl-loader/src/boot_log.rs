// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Boot status record
//!
//! Every status code the loader reports is kept here and forwarded to the
//! diagnostic channel. The most recent entries survive for inspection by
//! the board code; older ones are dropped.

use fsbl_common::errors::SUCCESSFUL_HANDOFF;
use fsbl_common::log_error;
use fsbl_common::{Error, LogBuffer};
use fsbl_hal::DiagnosticChannel;
use heapless::Deque;

use crate::load::BootError;

const MODULE: &str = "boot";

/// Entries kept in the record
pub const BOOT_LOG_CAPACITY: usize = 16;

/// Phase of the boot flow a status belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootStage {
    /// Known-answer self-test
    SelfTest,
    /// Locating the partition header table
    HeaderTable,
    /// Header table authentication
    HeaderAuthentication,
    /// Loading a partition
    Partition,
    /// Fallback and recovery
    Fallback,
    /// Handing control to the loaded image
    Handoff,
}

impl BootStage {
    /// Stage a boot error was raised in
    #[must_use]
    pub const fn of(error: &BootError) -> Self {
        match error {
            BootError::SelfTestFailed => Self::SelfTest,
            BootError::Header(_) => Self::HeaderTable,
            BootError::HeaderAuth(_) => Self::HeaderAuthentication,
            BootError::Load { .. } | BootError::Fabric { .. } => Self::Partition,
            BootError::Hook(crate::hooks::HookPoint::BeforeHandoff)
            | BootError::IllegalReturn => Self::Handoff,
            BootError::Hook(crate::hooks::HookPoint::Fallback) => Self::Fallback,
            BootError::Hook(_) => Self::Partition,
        }
    }
}

/// One reported status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootLogEntry {
    /// Position among all statuses reported since reset
    pub seq: u32,
    /// Boot phase
    pub stage: BootStage,
    /// Partition index, if the status concerns one
    pub partition: Option<u8>,
    /// Reported status code
    pub status: u32,
}

/// Bounded record of reported statuses
#[derive(Debug, Default)]
pub struct BootLog {
    entries: Deque<BootLogEntry, BOOT_LOG_CAPACITY>,
    total: u32,
}

impl BootLog {
    /// Empty record
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
            total: 0,
        }
    }

    /// Record a status without reporting it
    pub fn record(&mut self, stage: BootStage, partition: Option<usize>, status: u32) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        let entry = BootLogEntry {
            seq: self.total,
            stage,
            partition: partition.and_then(|p| u8::try_from(p).ok()),
            status,
        };
        // A slot was freed above.
        let _ = self.entries.push_back(entry);
        self.total = self.total.wrapping_add(1);
    }

    /// Record a boot error and emit its status code
    pub fn report<D: DiagnosticChannel>(
        &mut self,
        error: &BootError,
        diagnostic: &mut D,
        log: &mut LogBuffer,
    ) {
        let code = Error::from(*error).code();
        log_error!(log, MODULE, "status 0x{:04X}: {}", code, error);
        self.record(BootStage::of(error), error.partition(), code);
        diagnostic.emit_status(code);
    }

    /// Record and emit the successful-handoff status
    pub fn record_handoff<D: DiagnosticChannel>(&mut self, diagnostic: &mut D) {
        self.record(BootStage::Handoff, None, SUCCESSFUL_HANDOFF);
        diagnostic.emit_status(SUCCESSFUL_HANDOFF);
    }

    /// Most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&BootLogEntry> {
        self.entries.back()
    }

    /// Retained entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &BootLogEntry> {
        self.entries.iter()
    }

    /// Retained entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Nothing recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Statuses recorded since reset, including dropped ones
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }
}
