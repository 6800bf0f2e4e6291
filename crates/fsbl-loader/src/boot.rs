// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Boot flow
//!
//! Ties the loader, the fallback controller and the status record
//! together:
//!
//! 1. Note a watchdog reset left over from the previous run
//! 2. Set the running mark
//! 3. Run the crypto self-test
//! 4. Load the image the multi-boot counter selects
//! 5. On failure, report and ask the fallback controller what next
//! 6. On success, stop the watchdog, clear the marks and hand off

use fsbl_common::{log_info, log_warn};
use fsbl_common::{LoaderConfig, LogBuffer};
use fsbl_crypto::kat::run_all_kat;
use fsbl_crypto::RsaPublicKey;
use fsbl_hal::{
    BootMedium, BootRegisters, DiagnosticChannel, FabricInterface, RebootStatus, SystemMemory,
    WatchdogInterface,
};

use crate::boot_log::BootLog;
use crate::hooks::{BootHooks, HookPoint};
use crate::load::{BootError, HandoffAddress, Loader};
use crate::recovery::{FallbackAction, FallbackController};

const MODULE: &str = "boot";

/// Board collaborators the loader drives
pub struct Board<M, S, F, W, R, D> {
    /// Boot medium
    pub medium: M,
    /// Destination memory
    pub memory: S,
    /// Fabric configuration engine
    pub fabric: F,
    /// Watchdog
    pub watchdog: W,
    /// Persistent boot registers
    pub registers: R,
    /// Status output
    pub diagnostic: D,
}

/// How a boot run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootOutcome {
    /// Jump to this address
    Handoff(HandoffAddress),
    /// Nothing to execute; park for the debugger
    JtagExit,
    /// Reset the processing system
    Reset,
}

/// The first-stage boot loader
pub struct Fsbl<M, S, F, W, R, D, H> {
    /// Board collaborators
    pub board: Board<M, S, F, W, R, D>,
    /// Board hooks
    pub hooks: H,
    /// Loader log
    pub log: LogBuffer,
    /// Reported statuses
    pub boot_log: BootLog,
    config: LoaderConfig,
    root_key: Option<RsaPublicKey>,
}

impl<M, S, F, W, R, D, H> Fsbl<M, S, F, W, R, D, H>
where
    M: BootMedium,
    S: SystemMemory,
    F: FabricInterface,
    W: WatchdogInterface,
    R: BootRegisters,
    D: DiagnosticChannel,
    H: BootHooks,
{
    /// Loader for `board`. `root_key` is fixed for the life of the loader.
    pub fn new(
        board: Board<M, S, F, W, R, D>,
        hooks: H,
        config: LoaderConfig,
        root_key: Option<RsaPublicKey>,
    ) -> Self {
        Self {
            board,
            hooks,
            log: LogBuffer::new(),
            boot_log: BootLog::new(),
            config,
            root_key,
        }
    }

    /// Loader configuration
    #[must_use]
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Run from reset until an image is ready to run or the loader gives up
    pub fn start(&mut self) -> BootOutcome {
        log_info!(self.log, MODULE, "first-stage boot loader");
        self.check_watchdog_reset();
        self.board.registers.mark_loader_running();

        if self.config.rsa_support && !self.self_test() {
            self.boot_log.report(
                &BootError::SelfTestFailed,
                &mut self.board.diagnostic,
                &mut self.log,
            );
            FallbackController::abandon(&mut self.board.registers, &mut self.hooks, &mut self.log);
            return BootOutcome::Reset;
        }

        let image_base = self.config.image_base(self.board.registers.multiboot());
        self.boot_from(image_base)
    }

    /// Try images starting with the one at `image_base`
    ///
    /// Each failure goes through the fallback controller, which either
    /// names the next image or gives up.
    pub fn boot_from(&mut self, image_base: u32) -> BootOutcome {
        let mut base = image_base;
        for _ in 0..=self.config.multiboot_offset_mask {
            let attempt = self.loader().load_boot_image(base);
            let result = match attempt {
                Ok(address) => self.prepare_handoff(address),
                Err(e) => Err(e),
            };
            match result {
                Ok(outcome) => return outcome,
                Err(e) => match self.recover(e) {
                    FallbackAction::Retry { image_base } => base = image_base,
                    FallbackAction::Reset => return BootOutcome::Reset,
                },
            }
        }
        BootOutcome::Reset
    }

    /// Report `error` and decide what to try next
    pub fn recover(&mut self, error: BootError) -> FallbackAction {
        self.boot_log
            .report(&error, &mut self.board.diagnostic, &mut self.log);
        FallbackController::new(&self.config).next_action(
            &mut self.board.medium,
            &mut self.board.registers,
            &mut self.board.fabric,
            &mut self.hooks,
            &mut self.log,
        )
    }

    /// Known-answer tests of the digest and signature engines
    pub fn self_test(&mut self) -> bool {
        let watchdog = &mut self.board.watchdog;
        let passed = run_all_kat(&mut || watchdog.feed()).all_passed();
        if passed {
            log_info!(self.log, MODULE, "crypto self-test passed");
        }
        passed
    }

    fn loader(&mut self) -> Loader<'_, M, S, F, W, H> {
        Loader {
            config: &self.config,
            root_key: self.root_key.as_ref(),
            medium: &mut self.board.medium,
            memory: &mut self.board.memory,
            fabric: &mut self.board.fabric,
            watchdog: &mut self.board.watchdog,
            hooks: &mut self.hooks,
            log: &mut self.log,
        }
    }

    fn prepare_handoff(&mut self, address: HandoffAddress) -> Result<BootOutcome, BootError> {
        if let Err(e) = self.hooks.before_handoff() {
            log_warn!(self.log, MODULE, "before-handoff hook: {}", e);
            return Err(BootError::Hook(HookPoint::BeforeHandoff));
        }

        self.board.watchdog.stop();
        self.board.registers.clear_loader_marks();

        if address == 0 {
            log_info!(self.log, MODULE, "no executable partition, JTAG exit");
            return Ok(BootOutcome::JtagExit);
        }

        self.boot_log.record_handoff(&mut self.board.diagnostic);
        log_info!(self.log, MODULE, "handoff to 0x{:08X}", address);
        Ok(BootOutcome::Handoff(address))
    }

    /// A watchdog reset while the running mark was still set means the
    /// previous run hung; note it and clear the mark
    fn check_watchdog_reset(&mut self) {
        let status = self.board.registers.reboot_status();
        if self.board.watchdog.caused_last_reset() && status.contains(RebootStatus::LOADER_RUNNING)
        {
            log_warn!(self.log, MODULE, "watchdog reset during previous run");
            self.board
                .registers
                .set_reboot_status(status - RebootStatus::LOADER_RUNNING);
        }
    }
}
