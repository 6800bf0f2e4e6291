// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Board hooks
//!
//! Boards customise the boot flow at four fixed points. A failing hook
//! fails the boot attempt with the hook's own status code; the returned
//! error value itself is only logged.

use fsbl_common::{Error, Result};

/// Point in the boot flow a hook runs at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPoint {
    /// Before a bitstream is staged
    BeforeBitstream,
    /// After a bitstream has been downloaded
    AfterBitstream,
    /// Before control passes to the loaded image
    BeforeHandoff,
    /// When the loader gives up on the current image
    Fallback,
}

impl From<HookPoint> for Error {
    fn from(point: HookPoint) -> Self {
        match point {
            HookPoint::BeforeBitstream => Error::BeforeBitstreamHookFailed,
            HookPoint::AfterBitstream => Error::AfterBitstreamHookFailed,
            HookPoint::BeforeHandoff => Error::BeforeHandoffHookFailed,
            HookPoint::Fallback => Error::FallbackHookFailed,
        }
    }
}

/// Board hooks; every method defaults to doing nothing
pub trait BootHooks {
    /// Runs before each fabric partition is moved
    ///
    /// # Errors
    ///
    /// Any error fails the boot attempt.
    fn before_bitstream(&mut self) -> Result<()> {
        Ok(())
    }

    /// Runs after each fabric partition is configured
    ///
    /// # Errors
    ///
    /// Any error fails the boot attempt.
    fn after_bitstream(&mut self) -> Result<()> {
        Ok(())
    }

    /// Runs once the image is loaded, before the handoff
    ///
    /// # Errors
    ///
    /// Any error fails the boot attempt.
    fn before_handoff(&mut self) -> Result<()> {
        Ok(())
    }

    /// Runs when no further image will be tried in this boot
    ///
    /// # Errors
    ///
    /// Errors are logged; the reset follows regardless.
    fn fallback(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Hooks that do nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl BootHooks for NoHooks {}
