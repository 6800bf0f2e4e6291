// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Chain-of-trust verification
//!
//! A signed partition carries an authentication certificate after its
//! payload. The certificate holds a copy of the root public key, a
//! secondary public key signed by the root key, and the partition
//! signature made with the secondary key:
//!
//! ```text
//! Offset  Size  Field
//! 0x000   4     Tag
//! 0x004   60    Reserved
//! 0x040   256   Root modulus
//! 0x140   256   Root modulus extension
//! 0x240   64    Root exponent
//! 0x280   256   Secondary modulus
//! 0x380   256   Secondary modulus extension
//! 0x480   64    Secondary exponent
//! 0x4C0   256   Secondary-key signature (by the root key)
//! 0x5C0   256   Partition signature (by the secondary key)
//! ```
//!
//! The secondary-key signature covers the three secondary-key fields. The
//! partition signature covers everything before it: payload and
//! certificate up to `0x5C0`.
//!
//! # Security
//!
//! Padding comparisons stop at the first mismatching byte; they are not
//! constant-time. Only public values flow through them.

use core::fmt;

use fsbl_common::constants::{
    AUTH_CERT_SIZE, RSA_EXPONENT_FIELD_SIZE, RSA_MODULUS_SIZE, RSA_SIGNATURE_SIZE,
};
use fsbl_common::Error;
use fsbl_crypto::{CryptoError, RsaPublicKey, Sha256};

// ============================================================================
// Certificate Layout
// ============================================================================

const ROOT_MODULUS: usize = 0x040;
const ROOT_MODULUS_EXT: usize = ROOT_MODULUS + RSA_MODULUS_SIZE;
const ROOT_EXPONENT: usize = ROOT_MODULUS_EXT + RSA_MODULUS_SIZE;
const SPK_MODULUS: usize = ROOT_EXPONENT + RSA_EXPONENT_FIELD_SIZE;
const SPK_MODULUS_EXT: usize = SPK_MODULUS + RSA_MODULUS_SIZE;
const SPK_EXPONENT: usize = SPK_MODULUS_EXT + RSA_MODULUS_SIZE;
const SPK_SIGNATURE: usize = SPK_EXPONENT + RSA_EXPONENT_FIELD_SIZE;
const PARTITION_SIGNATURE: usize = SPK_SIGNATURE + RSA_SIGNATURE_SIZE;

/// Offset of the secondary-key fields within the certificate
pub const SPK_FIELDS_OFFSET: usize = SPK_MODULUS;

/// Bytes of secondary-key fields covered by the secondary-key signature
pub const SPK_FIELDS_SIZE: usize = SPK_SIGNATURE - SPK_MODULUS;

/// Offset of the partition signature within the certificate
pub const PARTITION_SIGNATURE_OFFSET: usize = PARTITION_SIGNATURE;

const _: () = assert!(PARTITION_SIGNATURE + RSA_SIGNATURE_SIZE == AUTH_CERT_SIZE);

// ============================================================================
// Errors
// ============================================================================

/// Authentication errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Signed block too short to hold a certificate
    Truncated,
    /// No root key provisioned for this boot attempt
    NoRootKey,
    /// Certificate's root-key copy differs from the hardware root key
    RootKeyMismatch,
    /// Secondary-key signature does not verify under the root key
    SpkSignatureInvalid,
    /// Secondary-key fields do not form a usable key
    SpkUnusable,
    /// Partition signature does not verify under the secondary key
    PartitionSignatureInvalid,
}

impl From<AuthError> for Error {
    fn from(_: AuthError) -> Self {
        Error::AuthenticationFailed
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Truncated => "certificate truncated",
            Self::NoRootKey => "no root key",
            Self::RootKeyMismatch => "root key mismatch",
            Self::SpkSignatureInvalid => "secondary key signature invalid",
            Self::SpkUnusable => "secondary key unusable",
            Self::PartitionSignatureInvalid => "partition signature invalid",
        };
        f.write_str(msg)
    }
}

// ============================================================================
// Certificate
// ============================================================================

/// Borrowed view of an authentication certificate
#[derive(Clone, Copy)]
pub struct Certificate<'a> {
    bytes: &'a [u8],
}

impl<'a> Certificate<'a> {
    /// View `bytes` as a certificate
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Truncated` unless `bytes` is exactly one
    /// certificate long.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, AuthError> {
        if bytes.len() != AUTH_CERT_SIZE {
            return Err(AuthError::Truncated);
        }
        Ok(Self { bytes })
    }

    /// Split a staged block into the bytes covered by the partition
    /// signature and the certificate at its tail
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Truncated` if `staged` is shorter than a
    /// certificate.
    pub fn split_tail(staged: &'a [u8]) -> Result<(&'a [u8], Self), AuthError> {
        let cert_at = staged
            .len()
            .checked_sub(AUTH_CERT_SIZE)
            .ok_or(AuthError::Truncated)?;
        let signed_len = staged.len() - RSA_SIGNATURE_SIZE;
        Ok((&staged[..signed_len], Self::parse(&staged[cert_at..])?))
    }

    /// Certificate tag
    #[must_use]
    pub fn tag(&self) -> u32 {
        let b = &self.bytes[..4];
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    /// Root modulus copy
    #[must_use]
    pub fn root_modulus(&self) -> &'a [u8] {
        &self.bytes[ROOT_MODULUS..ROOT_MODULUS_EXT]
    }

    /// Root modulus extension copy
    #[must_use]
    pub fn root_modulus_ext(&self) -> &'a [u8] {
        &self.bytes[ROOT_MODULUS_EXT..ROOT_EXPONENT]
    }

    /// Root exponent field copy
    #[must_use]
    pub fn root_exponent(&self) -> &'a [u8] {
        &self.bytes[ROOT_EXPONENT..SPK_MODULUS]
    }

    /// Secondary-key fields, in signed order
    #[must_use]
    pub fn spk_fields(&self) -> &'a [u8] {
        &self.bytes[SPK_MODULUS..SPK_SIGNATURE]
    }

    /// Secondary-key signature
    #[must_use]
    pub fn spk_signature(&self) -> &'a [u8] {
        &self.bytes[SPK_SIGNATURE..PARTITION_SIGNATURE]
    }

    /// Partition signature
    #[must_use]
    pub fn partition_signature(&self) -> &'a [u8] {
        &self.bytes[PARTITION_SIGNATURE..]
    }

    /// Secondary public key
    ///
    /// # Errors
    ///
    /// Returns the key-construction error.
    pub fn secondary_key(&self) -> Result<RsaPublicKey, CryptoError> {
        RsaPublicKey::from_fields(
            &self.bytes[SPK_MODULUS..SPK_MODULUS_EXT],
            &self.bytes[SPK_MODULUS_EXT..SPK_EXPONENT],
            &self.bytes[SPK_EXPONENT..SPK_SIGNATURE],
        )
    }
}

impl fmt::Debug for Certificate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Certificate")
            .field("tag", &self.tag())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Verification
// ============================================================================

/// Check the two-level signature chain
///
/// `signed` is everything the partition signature covers. The watchdog
/// `feed` is called during digesting and once per exponent bit.
///
/// # Errors
///
/// Returns the first link of the chain that fails. `signed` is never
/// modified.
pub fn authenticate<F: FnMut()>(
    signed: &[u8],
    cert: &Certificate<'_>,
    root_key: &RsaPublicKey,
    feed: &mut F,
) -> Result<(), AuthError> {
    if !root_key.matches_fields(
        cert.root_modulus(),
        cert.root_modulus_ext(),
        cert.root_exponent(),
    ) {
        return Err(AuthError::RootKeyMismatch);
    }

    let spk_digest = Sha256::digest_with_feed(cert.spk_fields(), feed);
    root_key
        .verify_pkcs1v15(cert.spk_signature(), spk_digest.as_bytes(), feed)
        .map_err(|_| AuthError::SpkSignatureInvalid)?;

    let secondary = cert.secondary_key().map_err(|_| AuthError::SpkUnusable)?;

    let digest = Sha256::digest_with_feed(signed, feed);
    secondary
        .verify_pkcs1v15(cert.partition_signature(), digest.as_bytes(), feed)
        .map_err(|_| AuthError::PartitionSignatureInvalid)
}

/// Authenticate a staged block whose tail is its certificate
///
/// # Errors
///
/// As [`authenticate`], plus `AuthError::Truncated`.
pub fn authenticate_staged<F: FnMut()>(
    staged: &[u8],
    root_key: &RsaPublicKey,
    feed: &mut F,
) -> Result<(), AuthError> {
    let (signed, cert) = Certificate::split_tail(staged)?;
    authenticate(signed, &cert, root_key, feed)
}
