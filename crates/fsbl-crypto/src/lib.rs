// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Qbitel First-Stage Boot Loader Cryptography
//!
//! The two primitives the loader needs to establish a chain of trust:
//!
//! - SHA-256, used for partition checksums and as the signature digest
//! - RSA-2048 public-key operation with PKCS#1 v1.5 (SHA-256) padding,
//!   built on a fixed-width Montgomery multiplier
//!
//! Long-running operations take a `feed` callback which is invoked at a
//! bounded interval so the caller can service the watchdog.
//!
//! # Features
//!
//! - `signing`: private-key signing for image tooling and tests

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]

pub mod error;
pub mod traits;
pub mod hash;
pub mod bignum;
pub mod rsa;
pub mod kat;

#[cfg(any(test, feature = "signing"))]
pub mod sign;

pub use error::CryptoError;
pub use traits::Hash;
pub use hash::{Sha256, Sha256Output};
pub use bignum::U2048;
pub use rsa::RsaPublicKey;
