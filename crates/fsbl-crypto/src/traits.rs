// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Core cryptographic traits

/// Incremental hash function
pub trait Hash: Sized {
    /// Output size in bytes
    const OUTPUT_SIZE: usize;
    /// Block size in bytes
    const BLOCK_SIZE: usize;

    /// Output type
    type Output: AsRef<[u8]> + Clone;

    /// Hash a message in one shot
    fn hash(message: &[u8]) -> Self::Output;

    /// Create a new incremental hasher
    fn new() -> Self;

    /// Update the hasher with data
    fn update(&mut self, data: &[u8]);

    /// Finalize and return the hash
    fn finalize(self) -> Self::Output;

    /// Reset the hasher for reuse
    fn reset(&mut self);

    /// Hash `message` in `chunk`-sized pieces, calling `feed` after each
    /// piece. A `chunk` of zero is treated as one.
    fn hash_paced<F: FnMut()>(message: &[u8], chunk: usize, feed: &mut F) -> Self::Output {
        let mut hasher = Self::new();
        for piece in message.chunks(chunk.max(1)) {
            hasher.update(piece);
            feed();
        }
        hasher.finalize()
    }
}
