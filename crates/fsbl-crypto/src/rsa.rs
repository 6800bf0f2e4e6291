// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! RSA-2048 public-key operation with PKCS#1 v1.5 padding
//!
//! Keys are stored on media as three little-endian fields: the modulus, the
//! modulus extension (`R^2 mod n`) and a 64-byte exponent field whose first
//! four bytes hold the public exponent. Signatures are little-endian too.
//! The recovered message block is compared big-endian, in the layout
//!
//! ```text
//! 00 01 FF .. FF 00 || DigestInfo(SHA-256) || digest
//! ```

use crate::bignum::{Montgomery, U2048, BYTES};
use crate::error::{CryptoError, CryptoResult};
use fsbl_common::constants::{RSA_EXPONENT_FIELD_SIZE, SHA256_DIGEST_SIZE};

/// DER prefix of a SHA-256 `DigestInfo`
pub const SHA256_DIGEST_INFO: [u8; 19] = [
    0x30, 0x31, 0x30, 0x0D, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
    0x05, 0x00, 0x04, 0x20,
];

/// Length of the `FF` run in an encoded SHA-256 block
pub const PADDING_LEN: usize = BYTES - 3 - SHA256_DIGEST_INFO.len() - SHA256_DIGEST_SIZE;

/// RSA public key
#[derive(Clone)]
pub struct RsaPublicKey {
    ctx: Montgomery,
    exponent: u32,
}

impl RsaPublicKey {
    /// Build a key from its on-media fields
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::BufferTooSmall` if a field is mis-sized,
    /// `CryptoError::EvenModulus` for an even modulus, and
    /// `CryptoError::InvalidKey` for a zero exponent or an unreduced
    /// modulus extension.
    pub fn from_fields(modulus: &[u8], modulus_ext: &[u8], exponent: &[u8]) -> CryptoResult<Self> {
        if modulus.len() != BYTES
            || modulus_ext.len() != BYTES
            || exponent.len() != RSA_EXPONENT_FIELD_SIZE
        {
            return Err(CryptoError::BufferTooSmall);
        }
        let n = U2048::from_le_slice(modulus)?;
        let r2 = U2048::from_le_slice(modulus_ext)?;
        let exponent = u32::from_le_bytes([exponent[0], exponent[1], exponent[2], exponent[3]]);
        if exponent == 0 {
            return Err(CryptoError::InvalidKey);
        }
        Ok(Self {
            ctx: Montgomery::with_r2(&n, &r2)?,
            exponent,
        })
    }

    /// Build a key from a modulus alone, deriving the modulus extension
    ///
    /// # Errors
    ///
    /// As [`RsaPublicKey::from_fields`].
    pub fn from_modulus(modulus: &U2048, exponent: u32) -> CryptoResult<Self> {
        if exponent == 0 {
            return Err(CryptoError::InvalidKey);
        }
        Ok(Self {
            ctx: Montgomery::new(modulus)?,
            exponent,
        })
    }

    /// Modulus
    #[must_use]
    pub const fn modulus(&self) -> &U2048 {
        self.ctx.modulus()
    }

    /// Modulus extension, `R^2 mod n`
    #[must_use]
    pub const fn modulus_ext(&self) -> &U2048 {
        self.ctx.r2()
    }

    /// Public exponent
    #[must_use]
    pub const fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Exponent in its 64-byte on-media field
    #[must_use]
    pub fn exponent_field(&self) -> [u8; RSA_EXPONENT_FIELD_SIZE] {
        let mut field = [0u8; RSA_EXPONENT_FIELD_SIZE];
        field[..4].copy_from_slice(&self.exponent.to_le_bytes());
        field
    }

    /// Whether the on-media fields describe this key
    #[must_use]
    pub fn matches_fields(&self, modulus: &[u8], modulus_ext: &[u8], exponent: &[u8]) -> bool {
        modulus == self.modulus().to_le_bytes().as_slice()
            && modulus_ext == self.modulus_ext().to_le_bytes().as_slice()
            && exponent == self.exponent_field().as_slice()
    }

    /// Raw public operation: `signature^e mod n`, returned big-endian
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::BufferTooSmall` for a mis-sized signature and
    /// `CryptoError::SignatureOutOfRange` if it is not below the modulus.
    pub fn recover<F: FnMut()>(&self, signature: &[u8], feed: &mut F) -> CryptoResult<[u8; BYTES]> {
        if signature.len() != BYTES {
            return Err(CryptoError::BufferTooSmall);
        }
        let s = U2048::from_le_slice(signature)?;
        let m = self
            .ctx
            .pow(&s, &U2048::from_u32(self.exponent), feed)?;
        Ok(m.to_be_bytes())
    }

    /// Verify a PKCS#1 v1.5 SHA-256 signature over `digest`
    ///
    /// The recovered block is walked byte by byte and the walk stops at
    /// the first mismatch.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidSignature` on mismatch, or an error from
    /// [`RsaPublicKey::recover`].
    pub fn verify_pkcs1v15<F: FnMut()>(
        &self,
        signature: &[u8],
        digest: &[u8; SHA256_DIGEST_SIZE],
        feed: &mut F,
    ) -> CryptoResult<()> {
        let recovered = self.recover(signature, feed)?;
        let expected = encode_pkcs1v15_sha256(digest);
        for (got, want) in recovered.iter().zip(expected.iter()) {
            if got != want {
                return Err(CryptoError::InvalidSignature);
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for RsaPublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RsaPublicKey")
            .field("bits", &self.modulus().bit_len())
            .field("exponent", &self.exponent)
            .finish_non_exhaustive()
    }
}

/// Big-endian PKCS#1 v1.5 block for a SHA-256 digest
#[must_use]
pub fn encode_pkcs1v15_sha256(digest: &[u8; SHA256_DIGEST_SIZE]) -> [u8; BYTES] {
    let mut em = [0xFFu8; BYTES];
    em[0] = 0x00;
    em[1] = 0x01;
    let info_at = 2 + PADDING_LEN + 1;
    em[info_at - 1] = 0x00;
    em[info_at..info_at + SHA256_DIGEST_INFO.len()].copy_from_slice(&SHA256_DIGEST_INFO);
    em[BYTES - SHA256_DIGEST_SIZE..].copy_from_slice(digest);
    em
}
