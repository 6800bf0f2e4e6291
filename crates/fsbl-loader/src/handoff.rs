// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Transfer of control to the loaded image

/// Jump to the loaded image at `address`
///
/// Returns only if the image returns, which the caller treats as a boot
/// failure.
///
/// # Safety
///
/// `address` must be the entry point of an image that has been loaded and
/// verified, and the watchdog must already be stopped.
pub unsafe fn jump(address: u32) {
    dsb();
    isb();

    #[cfg(target_arch = "arm")]
    {
        // SAFETY: the caller guarantees a verified image at `address`; the
        // ABI matches the loaded image's reset entry.
        let entry: extern "C" fn() = unsafe { core::mem::transmute(address as usize) };
        entry();
    }

    #[cfg(not(target_arch = "arm"))]
    let _ = address;
}

/// Leave the loader for a debugger when nothing was loaded to run
pub fn jtag_exit() -> ! {
    dsb();
    loop {
        #[cfg(target_arch = "arm")]
        // SAFETY: WFE only parks the core until an event arrives.
        unsafe {
            core::arch::asm!("wfe", options(nomem, nostack, preserves_flags));
        }
        #[cfg(not(target_arch = "arm"))]
        core::hint::spin_loop();
    }
}

/// Data Synchronization Barrier
#[inline(always)]
fn dsb() {
    #[cfg(target_arch = "arm")]
    // SAFETY: DSB only orders memory accesses.
    unsafe {
        core::arch::asm!("dsb sy", options(nomem, nostack, preserves_flags));
    }
}

/// Instruction Synchronization Barrier
#[inline(always)]
fn isb() {
    #[cfg(target_arch = "arm")]
    // SAFETY: ISB only flushes the pipeline.
    unsafe {
        core::arch::asm!("isb", options(nomem, nostack, preserves_flags));
    }
}
