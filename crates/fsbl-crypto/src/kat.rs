// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Known Answer Tests
//!
//! Power-on self test of the digest and RSA engines. The loader runs these
//! once before it relies on either engine to accept an image. The RSA vector
//! is a fixed 2048-bit test key (public half only) and its PKCS#1 v1.5
//! signature over `"abc"`.

use crate::bignum::{Montgomery, U2048};
use crate::hash::Sha256;
use crate::rsa::RsaPublicKey;
use crate::traits::Hash;

/// Message signed by the test vector
pub const KAT_MESSAGE: &[u8] = b"abc";

/// SHA-256 of [`KAT_MESSAGE`] (FIPS 180-2, appendix B.1)
pub const KAT_SHA256: [u8; 32] = [
    0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae, 0x22, 0x23,
    0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61, 0xf2, 0x00, 0x15, 0xad,
];

/// Test key modulus, little-endian
pub const KAT_MODULUS: [u8; 256] = [
    0xbd, 0x01, 0xc4, 0x7d, 0x49, 0x2a, 0x59, 0xe7, 0xff, 0xb5, 0xbb, 0xb4, 0x1e, 0xd5, 0x7e, 0x73,
    0x48, 0xa9, 0x46, 0x34, 0xcb, 0x75, 0xd0, 0x3e, 0xfc, 0x89, 0x62, 0xf7, 0x07, 0x0d, 0x27, 0xd6,
    0xe7, 0x6c, 0x1d, 0xdb, 0x4f, 0x50, 0xd8, 0xf2, 0x27, 0x54, 0x43, 0xb9, 0x40, 0x26, 0xd1, 0x04,
    0x30, 0xdd, 0xaa, 0xd0, 0x06, 0xca, 0xd0, 0x80, 0x5f, 0x90, 0x83, 0x7c, 0xf2, 0x53, 0x8e, 0xe5,
    0xcb, 0x0f, 0x01, 0xd4, 0x2d, 0x60, 0x80, 0xe3, 0x66, 0xfc, 0x39, 0xcf, 0x81, 0x54, 0x31, 0x74,
    0x1f, 0x5d, 0xe9, 0xe0, 0x20, 0xed, 0xdc, 0x13, 0xfc, 0x06, 0xcc, 0x5f, 0x17, 0x62, 0xc6, 0x05,
    0x0b, 0x9c, 0x97, 0x69, 0x48, 0xe5, 0xd6, 0x97, 0x52, 0xfd, 0x13, 0xd3, 0x16, 0x5b, 0xe7, 0x7a,
    0xda, 0x39, 0x98, 0xeb, 0x10, 0x98, 0xd1, 0x37, 0x03, 0x0f, 0x63, 0x8f, 0xe6, 0xb9, 0xdf, 0x53,
    0x95, 0x01, 0x95, 0x7b, 0xac, 0x0d, 0x7e, 0xa0, 0xd3, 0xbd, 0x9a, 0x9a, 0x44, 0xef, 0x0a, 0x50,
    0x85, 0x67, 0x28, 0xdd, 0xd0, 0xe4, 0x16, 0x5a, 0xfd, 0x36, 0x95, 0x72, 0x4d, 0xc2, 0xd2, 0x1f,
    0x70, 0x1e, 0xa2, 0xc3, 0x44, 0x72, 0x5d, 0x81, 0x70, 0x64, 0x7f, 0x69, 0x02, 0x01, 0x70, 0x1f,
    0x6a, 0x08, 0x91, 0xf5, 0x3b, 0x6b, 0xc2, 0x4c, 0xab, 0x2c, 0xfe, 0x02, 0xa3, 0xba, 0x39, 0xe6,
    0x98, 0xc4, 0xde, 0x97, 0x44, 0xbf, 0xd4, 0x2f, 0x7f, 0x2d, 0xc4, 0x8c, 0xdb, 0x4f, 0xea, 0x9b,
    0x88, 0x22, 0x13, 0x63, 0x4f, 0xc1, 0x99, 0x4c, 0x44, 0xd9, 0x43, 0x28, 0x35, 0x2e, 0xf1, 0x83,
    0x74, 0x51, 0x56, 0x82, 0xf0, 0xc1, 0x36, 0x63, 0xb5, 0xf3, 0x68, 0x3b, 0x49, 0x85, 0xda, 0xf4,
    0x00, 0xef, 0xad, 0x0a, 0xdc, 0x75, 0x07, 0xc9, 0xdc, 0x5d, 0x84, 0x41, 0xc2, 0xd6, 0xe1, 0x87,
];

/// Test key modulus extension (`R^2 mod n`), little-endian
pub const KAT_MODULUS_EXT: [u8; 256] = [
    0xb2, 0x3f, 0x33, 0xc7, 0x01, 0xdd, 0x67, 0x7f, 0xa0, 0xa4, 0xe5, 0xbb, 0xd4, 0xd5, 0x21, 0x21,
    0xdd, 0x3f, 0x99, 0xf8, 0x78, 0x76, 0x97, 0x82, 0x78, 0x24, 0x5d, 0x21, 0x55, 0x57, 0xcb, 0x84,
    0xe1, 0x16, 0x29, 0xd5, 0xfd, 0x76, 0xda, 0xa1, 0x56, 0x99, 0x2c, 0xec, 0x68, 0x8b, 0x99, 0xdc,
    0xae, 0xf5, 0xc3, 0xe9, 0x1f, 0x9a, 0x9c, 0x2e, 0x89, 0x5c, 0x3c, 0x0d, 0xac, 0xc0, 0xba, 0x63,
    0xb4, 0x7a, 0x4f, 0xb0, 0x04, 0x80, 0x46, 0x95, 0x7e, 0xaa, 0xdd, 0x77, 0x2f, 0x4b, 0x23, 0x4c,
    0x9c, 0x65, 0x47, 0x94, 0x7a, 0xd0, 0xbb, 0x75, 0xe9, 0x3d, 0x3e, 0x5f, 0x4d, 0x65, 0xd9, 0x85,
    0xf4, 0x5f, 0xaa, 0xeb, 0xad, 0xb6, 0x49, 0x66, 0xfc, 0xba, 0x8e, 0xcd, 0x7a, 0xa8, 0x18, 0x22,
    0xec, 0xee, 0x28, 0x1f, 0x26, 0xab, 0xdc, 0x57, 0x34, 0xf3, 0x0d, 0x06, 0xfc, 0x67, 0xb8, 0xef,
    0xaf, 0xe8, 0x85, 0xcc, 0x01, 0x46, 0x20, 0x50, 0xd2, 0xbc, 0xbd, 0x68, 0x92, 0xe6, 0xe5, 0x88,
    0xd7, 0xe7, 0x42, 0xb1, 0x71, 0xf8, 0xf4, 0x4c, 0x7f, 0xed, 0x66, 0x6d, 0xf4, 0xf2, 0x3c, 0xbe,
    0x6e, 0x81, 0x28, 0x08, 0x2d, 0x17, 0x4a, 0x41, 0x70, 0xe9, 0xb7, 0x68, 0x76, 0xec, 0xb8, 0xae,
    0x61, 0x99, 0xd8, 0x50, 0xda, 0xab, 0xf5, 0x09, 0xe6, 0xff, 0x6d, 0x8a, 0x99, 0x62, 0x8b, 0xb4,
    0x7b, 0xe2, 0x26, 0xb1, 0x3a, 0x5d, 0x89, 0x70, 0xc1, 0xc7, 0xf0, 0x31, 0xd7, 0x36, 0x81, 0x2e,
    0x53, 0x29, 0xdb, 0xa3, 0x7f, 0xb5, 0x51, 0x3a, 0x2b, 0xa0, 0x98, 0x27, 0x84, 0xa9, 0x7f, 0xe5,
    0x7a, 0xae, 0x07, 0xb2, 0xd4, 0x0e, 0x3c, 0x67, 0x0f, 0xe8, 0xe3, 0xc1, 0x54, 0x5a, 0x23, 0x97,
    0xa9, 0x0a, 0x72, 0x7a, 0x1e, 0x6d, 0xc1, 0xb9, 0x1d, 0xb9, 0x93, 0x36, 0xe6, 0x07, 0x1e, 0x7b,
];

/// Test key public exponent
pub const KAT_EXPONENT: u32 = 65537;

/// Signature over [`KAT_MESSAGE`], little-endian
pub const KAT_SIGNATURE: [u8; 256] = [
    0xe8, 0x7f, 0x68, 0xdf, 0x07, 0x12, 0x7c, 0xf2, 0xfb, 0x52, 0x6c, 0x14, 0x5a, 0xb5, 0xad, 0xc5,
    0xda, 0x6b, 0x13, 0x12, 0xa5, 0x52, 0x83, 0x5e, 0x8a, 0x67, 0x8b, 0x4a, 0x6f, 0xc0, 0xaf, 0x31,
    0x95, 0x86, 0xad, 0x4d, 0x4d, 0xdb, 0x17, 0xc1, 0xc6, 0xa6, 0xf8, 0xd6, 0xd2, 0x5a, 0x02, 0xa0,
    0x97, 0x56, 0x59, 0xe6, 0xf8, 0xb3, 0x80, 0x45, 0x67, 0x1e, 0x85, 0xa4, 0xbb, 0x62, 0x3d, 0xc2,
    0x4e, 0x00, 0x5b, 0xef, 0x36, 0xb8, 0xf3, 0x7e, 0xeb, 0xc5, 0xf6, 0x39, 0xde, 0xff, 0xd4, 0xd9,
    0x18, 0x04, 0xbc, 0xed, 0x8f, 0xa1, 0x4c, 0x67, 0xb6, 0xf6, 0x78, 0xa4, 0xb7, 0xef, 0x66, 0x7b,
    0xe6, 0xde, 0xda, 0x0d, 0x31, 0xc9, 0xea, 0xa3, 0x7a, 0x39, 0x8f, 0x6b, 0x24, 0xec, 0x01, 0xc7,
    0x42, 0x2f, 0x53, 0x85, 0xb5, 0x88, 0x49, 0x43, 0x9c, 0xb8, 0xe3, 0xc1, 0x51, 0xf1, 0x5d, 0xea,
    0xd4, 0x4e, 0xce, 0x09, 0xee, 0x91, 0x8b, 0x88, 0xb3, 0xf7, 0x63, 0x1d, 0xe1, 0x6e, 0xc3, 0x4a,
    0xa6, 0x65, 0x23, 0x1b, 0x82, 0xe2, 0xb0, 0x10, 0xf8, 0x2c, 0x2e, 0x2f, 0x62, 0x14, 0x96, 0x39,
    0x90, 0xef, 0x12, 0x13, 0x5a, 0x47, 0xc2, 0xcc, 0xfe, 0xd3, 0x2b, 0x9d, 0x6d, 0x67, 0x72, 0x98,
    0xd9, 0x49, 0x1e, 0xc9, 0x6d, 0xa7, 0xb3, 0x42, 0x55, 0xd7, 0x15, 0x13, 0xf7, 0x0a, 0xa1, 0xac,
    0x6e, 0xeb, 0xf9, 0x3e, 0xc3, 0x6c, 0x24, 0x14, 0x06, 0x50, 0x6e, 0xa5, 0xaf, 0x46, 0xfe, 0x5c,
    0x35, 0x57, 0xfe, 0x24, 0x47, 0xd1, 0xcf, 0xb0, 0x2a, 0x39, 0xa4, 0x62, 0xc0, 0xf9, 0x45, 0xff,
    0x23, 0x1a, 0xf6, 0xc8, 0x66, 0x9e, 0x50, 0x02, 0xc9, 0xe0, 0x3d, 0x42, 0x37, 0x2c, 0xf9, 0xe6,
    0x20, 0x34, 0x9c, 0x8b, 0x73, 0x6a, 0x1f, 0x01, 0xa5, 0x61, 0x78, 0xd5, 0x51, 0x0a, 0xdf, 0x16,
];

/// Result of a single KAT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KatTestResult {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
}

impl KatTestResult {
    const fn from_bool(ok: bool) -> Self {
        if ok {
            Self::Passed
        } else {
            Self::Failed
        }
    }
}

/// Results of all KATs
#[derive(Debug, Clone, Copy)]
pub struct KatResults {
    /// SHA-256 digest of the reference message
    pub sha256: KatTestResult,
    /// Derivation of the modulus extension
    pub modulus_ext: KatTestResult,
    /// Acceptance of the reference signature
    pub rsa_accept: KatTestResult,
    /// Rejection of a corrupted signature
    pub rsa_reject: KatTestResult,
}

impl KatResults {
    /// Check if every test passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        [self.sha256, self.modulus_ext, self.rsa_accept, self.rsa_reject]
            .iter()
            .all(|r| *r == KatTestResult::Passed)
    }
}

/// SHA-256 KAT
#[must_use]
pub fn kat_sha256() -> KatTestResult {
    KatTestResult::from_bool(Sha256::hash(KAT_MESSAGE).as_bytes() == &KAT_SHA256)
}

/// Modulus extension KAT
#[must_use]
pub fn kat_modulus_ext() -> KatTestResult {
    let n = U2048::from_le_bytes(&KAT_MODULUS);
    let ext = U2048::from_le_bytes(&KAT_MODULUS_EXT);
    KatTestResult::from_bool(Montgomery::compute_r2(&n) == ext)
}

fn kat_key() -> Option<RsaPublicKey> {
    let mut exponent = [0u8; 64];
    exponent[..4].copy_from_slice(&KAT_EXPONENT.to_le_bytes());
    RsaPublicKey::from_fields(&KAT_MODULUS, &KAT_MODULUS_EXT, &exponent).ok()
}

/// RSA acceptance KAT
pub fn kat_rsa_accept<F: FnMut()>(feed: &mut F) -> KatTestResult {
    let ok = kat_key().is_some_and(|key| {
        key.verify_pkcs1v15(&KAT_SIGNATURE, &KAT_SHA256, feed).is_ok()
    });
    KatTestResult::from_bool(ok)
}

/// RSA rejection KAT: a signature with one flipped bit must not verify
pub fn kat_rsa_reject<F: FnMut()>(feed: &mut F) -> KatTestResult {
    let mut corrupted = KAT_SIGNATURE;
    corrupted[0] ^= 0x01;
    let rejected = kat_key().is_some_and(|key| {
        key.verify_pkcs1v15(&corrupted, &KAT_SHA256, feed).is_err()
    });
    KatTestResult::from_bool(rejected)
}

/// Run every KAT
pub fn run_all_kat<F: FnMut()>(feed: &mut F) -> KatResults {
    KatResults {
        sha256: kat_sha256(),
        modulus_ext: kat_modulus_ext(),
        rsa_accept: kat_rsa_accept(feed),
        rsa_reject: kat_rsa_reject(feed),
    }
}
