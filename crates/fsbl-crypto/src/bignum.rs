// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Fixed-width 2048-bit arithmetic
//!
//! [`U2048`] holds 64 little-endian 32-bit limbs. [`Montgomery`] carries the
//! per-modulus constants and implements modular exponentiation with
//! word-serial (CIOS) Montgomery multiplication.
//!
//! Operations are not constant-time. Only public values (moduli, public
//! exponents, signatures) pass through the verification path; the signing
//! path exists for tooling and tests and never runs on target.

use core::cmp::Ordering;
use zeroize::Zeroize;

use crate::error::{CryptoError, CryptoResult};

/// Number of 32-bit limbs
pub const LIMBS: usize = 64;

/// Width in bytes
pub const BYTES: usize = LIMBS * 4;

/// Width in bits
pub const BITS: usize = LIMBS * 32;

/// 2048-bit unsigned integer
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct U2048 {
    limbs: [u32; LIMBS],
}

impl U2048 {
    /// Zero
    pub const ZERO: Self = Self { limbs: [0; LIMBS] };

    /// One
    pub const ONE: Self = {
        let mut limbs = [0; LIMBS];
        limbs[0] = 1;
        Self { limbs }
    };

    /// Build from a small value
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        let mut limbs = [0; LIMBS];
        limbs[0] = value;
        Self { limbs }
    }

    /// Decode little-endian bytes. Shorter input is zero-extended.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::BufferTooSmall` if `bytes` is wider than 256 bytes.
    pub fn from_le_slice(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() > BYTES {
            return Err(CryptoError::BufferTooSmall);
        }
        let mut buf = [0u8; BYTES];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self::from_le_bytes(&buf))
    }

    /// Decode 256 little-endian bytes
    #[must_use]
    pub fn from_le_bytes(bytes: &[u8; BYTES]) -> Self {
        let mut limbs = [0u32; LIMBS];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(4)) {
            *limb = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self { limbs }
    }

    /// Decode 256 big-endian bytes
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8; BYTES]) -> Self {
        let mut le = *bytes;
        le.reverse();
        Self::from_le_bytes(&le)
    }

    /// Encode as 256 little-endian bytes
    #[must_use]
    pub fn to_le_bytes(&self) -> [u8; BYTES] {
        let mut out = [0u8; BYTES];
        for (chunk, limb) in out.chunks_exact_mut(4).zip(self.limbs.iter()) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        out
    }

    /// Encode as 256 big-endian bytes
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; BYTES] {
        let mut out = self.to_le_bytes();
        out.reverse();
        out
    }

    /// Borrow the limbs, least significant first
    #[must_use]
    pub const fn limbs(&self) -> &[u32; LIMBS] {
        &self.limbs
    }

    /// Whether the value is zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    /// Whether the lowest bit is set
    #[must_use]
    pub const fn is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    /// Number of significant bits
    #[must_use]
    pub fn bit_len(&self) -> usize {
        for i in (0..LIMBS).rev() {
            if self.limbs[i] != 0 {
                return i * 32 + (32 - self.limbs[i].leading_zeros() as usize);
            }
        }
        0
    }

    /// Test bit `i` (0 = least significant)
    #[must_use]
    pub const fn bit(&self, i: usize) -> bool {
        (self.limbs[i / 32] >> (i % 32)) & 1 == 1
    }

    /// `self -= rhs`, returning the borrow out of the top limb
    fn sub_assign_borrow(&mut self, rhs: &Self) -> bool {
        let mut borrow = 0u64;
        for (a, &b) in self.limbs.iter_mut().zip(rhs.limbs.iter()) {
            let diff = u64::from(*a)
                .wrapping_sub(u64::from(b))
                .wrapping_sub(borrow);
            *a = diff as u32;
            borrow = (diff >> 63) & 1;
        }
        borrow == 1
    }

    /// `self = 2 * self mod m`, for `self < m`
    fn double_mod(&mut self, m: &Self) {
        let mut carry = 0u32;
        for limb in &mut self.limbs {
            let next = *limb >> 31;
            *limb = (*limb << 1) | carry;
            carry = next;
        }
        if carry == 1 || *self >= *m {
            self.sub_assign_borrow(m);
        }
    }
}

impl Ord for U2048 {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..LIMBS).rev() {
            match self.limbs[i].cmp(&other.limbs[i]) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for U2048 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl core::fmt::Debug for U2048 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "U2048(0x")?;
        for limb in self.limbs.iter().rev() {
            write!(f, "{limb:08x}")?;
        }
        write!(f, ")")
    }
}

/// Montgomery context for one odd modulus
///
/// With `R = 2^2048`, `r2` is `R^2 mod n` (the "modulus extension" carried
/// alongside every key on media) and `n0inv` is `-n^-1 mod 2^32`.
#[derive(Clone)]
pub struct Montgomery {
    n: U2048,
    r2: U2048,
    n0inv: u32,
}

impl Montgomery {
    /// Build a context, deriving `R^2 mod n`
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::EvenModulus` for an even modulus and
    /// `CryptoError::InvalidKey` for a modulus below 2.
    pub fn new(n: &U2048) -> CryptoResult<Self> {
        Self::check_modulus(n)?;
        Ok(Self {
            n: n.clone(),
            r2: Self::compute_r2(n),
            n0inv: Self::neg_inv_word(n.limbs[0]),
        })
    }

    /// Build a context from a modulus and a precomputed `R^2 mod n`
    ///
    /// # Errors
    ///
    /// As [`Montgomery::new`], plus `CryptoError::InvalidKey` if `r2` is
    /// not reduced.
    pub fn with_r2(n: &U2048, r2: &U2048) -> CryptoResult<Self> {
        Self::check_modulus(n)?;
        if r2 >= n {
            return Err(CryptoError::InvalidKey);
        }
        Ok(Self {
            n: n.clone(),
            r2: r2.clone(),
            n0inv: Self::neg_inv_word(n.limbs[0]),
        })
    }

    fn check_modulus(n: &U2048) -> CryptoResult<()> {
        if !n.is_odd() {
            return Err(CryptoError::EvenModulus);
        }
        if n.bit_len() < 2 {
            return Err(CryptoError::InvalidKey);
        }
        Ok(())
    }

    /// `R^2 mod n` by 2 * 2048 modular doublings of one
    #[must_use]
    pub fn compute_r2(n: &U2048) -> U2048 {
        let mut v = U2048::ONE;
        for _ in 0..(2 * BITS) {
            v.double_mod(n);
        }
        v
    }

    /// `-w^-1 mod 2^32` for odd `w`, by Newton iteration
    const fn neg_inv_word(w: u32) -> u32 {
        let mut inv: u32 = 1;
        let mut i = 0;
        while i < 5 {
            inv = inv.wrapping_mul(2u32.wrapping_sub(w.wrapping_mul(inv)));
            i += 1;
        }
        inv.wrapping_neg()
    }

    /// The modulus
    #[must_use]
    pub const fn modulus(&self) -> &U2048 {
        &self.n
    }

    /// `R^2 mod n`
    #[must_use]
    pub const fn r2(&self) -> &U2048 {
        &self.r2
    }

    /// `a * b * R^-1 mod n` for `a, b < n`
    #[must_use]
    pub fn mul(&self, a: &U2048, b: &U2048) -> U2048 {
        let n = &self.n.limbs;
        let mut t = [0u32; LIMBS + 2];

        for &bi in &b.limbs {
            let mut carry = 0u64;
            for j in 0..LIMBS {
                let uv = u64::from(t[j]) + u64::from(a.limbs[j]) * u64::from(bi) + carry;
                t[j] = uv as u32;
                carry = uv >> 32;
            }
            let uv = u64::from(t[LIMBS]) + carry;
            t[LIMBS] = uv as u32;
            t[LIMBS + 1] = (uv >> 32) as u32;

            let m = t[0].wrapping_mul(self.n0inv);
            let uv = u64::from(t[0]) + u64::from(m) * u64::from(n[0]);
            let mut carry = uv >> 32;
            for j in 1..LIMBS {
                let uv = u64::from(t[j]) + u64::from(m) * u64::from(n[j]) + carry;
                t[j - 1] = uv as u32;
                carry = uv >> 32;
            }
            let uv = u64::from(t[LIMBS]) + carry;
            t[LIMBS - 1] = uv as u32;
            t[LIMBS] = t[LIMBS + 1] + (uv >> 32) as u32;
            t[LIMBS + 1] = 0;
        }

        let mut out = U2048::ZERO;
        out.limbs.copy_from_slice(&t[..LIMBS]);
        if t[LIMBS] != 0 || out >= self.n {
            out.sub_assign_borrow(&self.n);
        }
        out
    }

    /// `base^exp mod n`, left-to-right binary, calling `feed` once per
    /// exponent bit
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::SignatureOutOfRange` if `base >= n`.
    pub fn pow<F: FnMut()>(&self, base: &U2048, exp: &U2048, feed: &mut F) -> CryptoResult<U2048> {
        if *base >= self.n {
            return Err(CryptoError::SignatureOutOfRange);
        }

        let base_m = self.mul(base, &self.r2);
        let mut acc = self.mul(&U2048::ONE, &self.r2);

        for i in (0..exp.bit_len()).rev() {
            acc = self.mul(&acc, &acc);
            if exp.bit(i) {
                acc = self.mul(&acc, &base_m);
            }
            feed();
        }

        Ok(self.mul(&acc, &U2048::ONE))
    }
}
