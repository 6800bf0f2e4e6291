// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! SHA-256 digest engine
//!
//! Thin wrapper over the `sha2` crate so the rest of the loader only sees
//! the [`Hash`] trait and a fixed-size output type.

use crate::traits::Hash;
use fsbl_common::constants::SHA256_DIGEST_SIZE;
use sha2::{Digest, Sha256 as Sha256Impl};

/// Bytes hashed between watchdog feeds
pub const DIGEST_CHUNK_SIZE: usize = 4096;

/// SHA-256 hash output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sha256Output([u8; SHA256_DIGEST_SIZE]);

impl Sha256Output {
    /// Create from bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SHA256_DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Borrow the digest bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SHA256_DIGEST_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for Sha256Output {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; SHA256_DIGEST_SIZE]> for Sha256Output {
    fn from(bytes: [u8; SHA256_DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

/// SHA-256 hasher
#[derive(Clone)]
pub struct Sha256 {
    inner: Sha256Impl,
}

impl Sha256 {
    /// Hash `message`, feeding the watchdog every [`DIGEST_CHUNK_SIZE`] bytes
    pub fn digest_with_feed<F: FnMut()>(message: &[u8], feed: &mut F) -> Sha256Output {
        <Self as Hash>::hash_paced(message, DIGEST_CHUNK_SIZE, feed)
    }
}

impl Hash for Sha256 {
    const OUTPUT_SIZE: usize = SHA256_DIGEST_SIZE;
    const BLOCK_SIZE: usize = 64;

    type Output = Sha256Output;

    fn hash(message: &[u8]) -> Self::Output {
        let result = Sha256Impl::digest(message);
        let mut output = [0u8; SHA256_DIGEST_SIZE];
        output.copy_from_slice(&result);
        Sha256Output(output)
    }

    fn new() -> Self {
        Self {
            inner: Sha256Impl::new(),
        }
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
    }

    fn finalize(self) -> Self::Output {
        let result = self.inner.finalize();
        let mut output = [0u8; SHA256_DIGEST_SIZE];
        output.copy_from_slice(&result);
        Sha256Output(output)
    }

    fn reset(&mut self) {
        Digest::reset(&mut self.inner);
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        <Self as Hash>::new()
    }
}
