// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! PKCS#1 v1.5 signing
//!
//! Produces signatures in the on-media (little-endian) layout. Only built
//! for image tooling and tests.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::bignum::{Montgomery, U2048, BYTES};
use crate::error::CryptoResult;
use crate::rsa::{encode_pkcs1v15_sha256, RsaPublicKey};
use fsbl_common::constants::SHA256_DIGEST_SIZE;

/// RSA private key (modulus and private exponent)
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct RsaPrivateKey {
    #[zeroize(skip)]
    public: RsaPublicKey,
    d: U2048,
}

impl RsaPrivateKey {
    /// Build from big-endian modulus and private exponent bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the modulus is unusable.
    pub fn from_be_bytes(modulus: &[u8; BYTES], d: &[u8; BYTES], e: u32) -> CryptoResult<Self> {
        let n = U2048::from_be_bytes(modulus);
        Ok(Self {
            public: RsaPublicKey::from_modulus(&n, e)?,
            d: U2048::from_be_bytes(d),
        })
    }

    /// Public half
    #[must_use]
    pub const fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Sign a SHA-256 digest, returning the little-endian signature
    ///
    /// # Errors
    ///
    /// Returns an error if the encoded block is not below the modulus,
    /// which cannot happen for a 2048-bit key with the top bit set.
    pub fn sign_digest(&self, digest: &[u8; SHA256_DIGEST_SIZE]) -> CryptoResult<[u8; BYTES]> {
        let em = U2048::from_be_bytes(&encode_pkcs1v15_sha256(digest));
        let ctx = Montgomery::with_r2(self.public.modulus(), self.public.modulus_ext())?;
        let s = ctx.pow(&em, &self.d, &mut || {})?;
        Ok(s.to_le_bytes())
    }
}
