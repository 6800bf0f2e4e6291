// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Cryptographic error types

use core::fmt;

/// Error type for cryptographic operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    /// Key field has the wrong length or an unusable value
    InvalidKey,
    /// Modulus is even, Montgomery reduction is undefined
    EvenModulus,
    /// Signature value is not below the modulus
    SignatureOutOfRange,
    /// Recovered block does not match the expected padding and digest
    InvalidSignature,
    /// Buffer is too small for the operation
    BufferTooSmall,
}

impl CryptoError {
    /// Get error code for logging/debugging
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::InvalidKey => 0x0101,
            Self::EvenModulus => 0x0102,
            Self::SignatureOutOfRange => 0x0103,
            Self::InvalidSignature => 0x0104,
            Self::BufferTooSmall => 0x0105,
        }
    }

    /// Get error description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidKey => "invalid key",
            Self::EvenModulus => "modulus is even",
            Self::SignatureOutOfRange => "signature not below modulus",
            Self::InvalidSignature => "invalid signature",
            Self::BufferTooSmall => "buffer too small",
        }
    }
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[0x{:04X}] {}", self.code(), self.description())
    }
}

impl From<CryptoError> for fsbl_common::Error {
    fn from(_: CryptoError) -> Self {
        // Every crypto failure during boot is an authentication failure
        Self::AuthenticationFailed
    }
}

/// Result type for cryptographic operations
pub type CryptoResult<T> = Result<T, CryptoError>;
