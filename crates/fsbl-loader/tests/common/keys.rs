// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! RSA-2048 test keys, big-endian, public exponent 65537
//!
//! `ROOT` is the same key as the crypto known-answer vector.

/// Root key, modulus
pub const ROOT_N: [u8; 256] = [
    0x87, 0xe1, 0xd6, 0xc2, 0x41, 0x84, 0x5d, 0xdc, 0xc9, 0x07, 0x75, 0xdc,
    0x0a, 0xad, 0xef, 0x00, 0xf4, 0xda, 0x85, 0x49, 0x3b, 0x68, 0xf3, 0xb5,
    0x63, 0x36, 0xc1, 0xf0, 0x82, 0x56, 0x51, 0x74, 0x83, 0xf1, 0x2e, 0x35,
    0x28, 0x43, 0xd9, 0x44, 0x4c, 0x99, 0xc1, 0x4f, 0x63, 0x13, 0x22, 0x88,
    0x9b, 0xea, 0x4f, 0xdb, 0x8c, 0xc4, 0x2d, 0x7f, 0x2f, 0xd4, 0xbf, 0x44,
    0x97, 0xde, 0xc4, 0x98, 0xe6, 0x39, 0xba, 0xa3, 0x02, 0xfe, 0x2c, 0xab,
    0x4c, 0xc2, 0x6b, 0x3b, 0xf5, 0x91, 0x08, 0x6a, 0x1f, 0x70, 0x01, 0x02,
    0x69, 0x7f, 0x64, 0x70, 0x81, 0x5d, 0x72, 0x44, 0xc3, 0xa2, 0x1e, 0x70,
    0x1f, 0xd2, 0xc2, 0x4d, 0x72, 0x95, 0x36, 0xfd, 0x5a, 0x16, 0xe4, 0xd0,
    0xdd, 0x28, 0x67, 0x85, 0x50, 0x0a, 0xef, 0x44, 0x9a, 0x9a, 0xbd, 0xd3,
    0xa0, 0x7e, 0x0d, 0xac, 0x7b, 0x95, 0x01, 0x95, 0x53, 0xdf, 0xb9, 0xe6,
    0x8f, 0x63, 0x0f, 0x03, 0x37, 0xd1, 0x98, 0x10, 0xeb, 0x98, 0x39, 0xda,
    0x7a, 0xe7, 0x5b, 0x16, 0xd3, 0x13, 0xfd, 0x52, 0x97, 0xd6, 0xe5, 0x48,
    0x69, 0x97, 0x9c, 0x0b, 0x05, 0xc6, 0x62, 0x17, 0x5f, 0xcc, 0x06, 0xfc,
    0x13, 0xdc, 0xed, 0x20, 0xe0, 0xe9, 0x5d, 0x1f, 0x74, 0x31, 0x54, 0x81,
    0xcf, 0x39, 0xfc, 0x66, 0xe3, 0x80, 0x60, 0x2d, 0xd4, 0x01, 0x0f, 0xcb,
    0xe5, 0x8e, 0x53, 0xf2, 0x7c, 0x83, 0x90, 0x5f, 0x80, 0xd0, 0xca, 0x06,
    0xd0, 0xaa, 0xdd, 0x30, 0x04, 0xd1, 0x26, 0x40, 0xb9, 0x43, 0x54, 0x27,
    0xf2, 0xd8, 0x50, 0x4f, 0xdb, 0x1d, 0x6c, 0xe7, 0xd6, 0x27, 0x0d, 0x07,
    0xf7, 0x62, 0x89, 0xfc, 0x3e, 0xd0, 0x75, 0xcb, 0x34, 0x46, 0xa9, 0x48,
    0x73, 0x7e, 0xd5, 0x1e, 0xb4, 0xbb, 0xb5, 0xff, 0xe7, 0x59, 0x2a, 0x49,
    0x7d, 0xc4, 0x01, 0xbd,
];

/// Root key, private exponent
pub const ROOT_D: [u8; 256] = [
    0x41, 0x82, 0x50, 0x02, 0xb4, 0x0a, 0x68, 0x24, 0x16, 0xa8, 0xe9, 0x99,
    0xcd, 0x6e, 0x40, 0x71, 0x12, 0x1a, 0xbd, 0xb2, 0x6a, 0x19, 0x75, 0x91,
    0x07, 0xc5, 0x70, 0xe7, 0x8e, 0x36, 0xa6, 0x2b, 0x89, 0xa6, 0xbf, 0x53,
    0xb2, 0x57, 0x4f, 0x8a, 0x3d, 0x71, 0xcd, 0x00, 0x04, 0x70, 0x47, 0xb0,
    0x5b, 0x96, 0xb1, 0xac, 0x53, 0xa7, 0x8a, 0x95, 0xac, 0x4e, 0x21, 0x6e,
    0x24, 0xd7, 0xa9, 0xa9, 0x5b, 0x29, 0x0e, 0xc1, 0x23, 0x22, 0xbe, 0x0f,
    0x51, 0xc0, 0xd3, 0x69, 0x03, 0x41, 0x4a, 0x30, 0xbb, 0x7a, 0x48, 0x8a,
    0x4c, 0xa9, 0x35, 0x97, 0x85, 0xce, 0xb2, 0xd5, 0xd3, 0x09, 0x38, 0x2a,
    0x6f, 0x35, 0x31, 0x26, 0x9c, 0x6c, 0xb2, 0xa7, 0x9f, 0x04, 0xb5, 0x88,
    0xba, 0x6e, 0x8d, 0xc5, 0xf8, 0x2a, 0x65, 0x63, 0x0a, 0x34, 0x3a, 0xfb,
    0x29, 0x7f, 0x4c, 0x01, 0x51, 0x4d, 0x2b, 0x87, 0x0a, 0x22, 0xee, 0xea,
    0xe7, 0x98, 0x0e, 0xb3, 0x28, 0x28, 0x82, 0x80, 0xa7, 0x6d, 0x85, 0x93,
    0x94, 0xea, 0x41, 0x1e, 0x13, 0x5d, 0x89, 0xea, 0xfb, 0xf2, 0xc3, 0x0c,
    0xa5, 0xf8, 0x3d, 0x38, 0x8a, 0x3f, 0x6f, 0x6d, 0xf4, 0xa2, 0x30, 0x2c,
    0xba, 0x50, 0xb3, 0x86, 0x3f, 0x32, 0x2b, 0x24, 0x80, 0xb1, 0xf2, 0x1b,
    0x3b, 0x3f, 0x8f, 0x61, 0xb1, 0xdc, 0xba, 0xad, 0x36, 0xa6, 0x16, 0x44,
    0xc1, 0x4f, 0xb3, 0x6a, 0xd3, 0x6e, 0x27, 0x1e, 0x9a, 0xae, 0x05, 0x3f,
    0x2c, 0xc2, 0x4e, 0xa0, 0x7a, 0xa5, 0xbf, 0x70, 0xbc, 0xee, 0x9b, 0xd0,
    0x81, 0x52, 0xab, 0x5c, 0x57, 0xf1, 0x1c, 0x54, 0x49, 0xb0, 0x8b, 0xbd,
    0xc0, 0xba, 0x5e, 0x7c, 0x3c, 0xa9, 0x65, 0x3e, 0x26, 0x1f, 0x26, 0x6b,
    0xbf, 0x27, 0xca, 0xda, 0xc7, 0x81, 0x88, 0x9a, 0xb8, 0x6b, 0x55, 0xb8,
    0x63, 0x09, 0x2d, 0x63,
];

/// Secondary key signed by the root key, modulus
pub const SECONDARY_N: [u8; 256] = [
    0xde, 0xae, 0xe1, 0x89, 0xfd, 0x1d, 0x62, 0xc0, 0x72, 0x4c, 0x3b, 0xe5,
    0x97, 0x95, 0x82, 0x32, 0x6f, 0xdf, 0x28, 0xbf, 0xdf, 0x9d, 0x2f, 0x1e,
    0x51, 0x95, 0x5f, 0xd5, 0x0f, 0xad, 0xa1, 0x94, 0x22, 0xcd, 0xcd, 0x16,
    0xc2, 0x53, 0x25, 0x83, 0xf8, 0x26, 0x40, 0x95, 0xd0, 0x0b, 0x0d, 0xf8,
    0xa2, 0xef, 0xa2, 0x30, 0x60, 0xdd, 0x70, 0x71, 0x00, 0xa0, 0xa1, 0x05,
    0x1b, 0xd7, 0x10, 0x18, 0x0f, 0x5d, 0xf4, 0x81, 0x9f, 0x64, 0x72, 0x5e,
    0x41, 0xb3, 0x64, 0x0d, 0x3a, 0x98, 0xbe, 0x23, 0x0b, 0xa3, 0x0b, 0x3a,
    0x03, 0x0c, 0xc4, 0xf0, 0x8b, 0x3a, 0xc4, 0x17, 0xeb, 0x23, 0xf8, 0x4e,
    0x63, 0xed, 0x88, 0x16, 0x7e, 0xf6, 0xe3, 0x86, 0xc8, 0x8d, 0xa3, 0x16,
    0xaf, 0xad, 0xb6, 0x46, 0xd4, 0xc3, 0x9a, 0x70, 0x2e, 0x47, 0x8a, 0xdc,
    0x0d, 0x0a, 0x8f, 0x19, 0x40, 0x6c, 0x91, 0x2b, 0xe5, 0x7b, 0xf0, 0xba,
    0x03, 0xb8, 0xd5, 0x5b, 0x8f, 0x23, 0x15, 0xbf, 0x3c, 0x7a, 0x04, 0x70,
    0x77, 0x77, 0x28, 0x68, 0x21, 0xde, 0xcb, 0xff, 0x32, 0xa4, 0xc2, 0x2e,
    0x52, 0xed, 0xe5, 0x5a, 0x40, 0x6d, 0x0a, 0x71, 0x05, 0xab, 0xf4, 0x87,
    0xb4, 0x7e, 0x7d, 0x28, 0x4b, 0xf6, 0x63, 0x24, 0xb4, 0x71, 0xd8, 0xcd,
    0xb1, 0xa2, 0x0c, 0x9c, 0xe7, 0x41, 0xf3, 0xd4, 0x7b, 0xb9, 0x71, 0x78,
    0x7b, 0x9c, 0xea, 0x9c, 0x3b, 0xb4, 0xc3, 0x0c, 0xee, 0x51, 0x16, 0x9c,
    0x26, 0xb0, 0x7e, 0x99, 0xa0, 0x3a, 0x56, 0x0e, 0x96, 0x4e, 0x2a, 0x11,
    0xf0, 0xd2, 0x7f, 0xc4, 0xa3, 0xa8, 0xd6, 0x1d, 0x44, 0x26, 0x44, 0x24,
    0x9c, 0x3b, 0xc1, 0xa4, 0x98, 0xe6, 0x28, 0xe0, 0x98, 0x85, 0x60, 0x66,
    0x73, 0x4a, 0x87, 0xa5, 0xdb, 0xec, 0x35, 0x9f, 0x4f, 0x1c, 0xf0, 0x44,
    0x7d, 0xd4, 0x14, 0xf9,
];

/// Secondary key signed by the root key, private exponent
pub const SECONDARY_D: [u8; 256] = [
    0x23, 0xe6, 0x52, 0xb3, 0x01, 0xcc, 0xea, 0x7e, 0x37, 0x0f, 0x06, 0x3b,
    0x01, 0xe0, 0x97, 0x10, 0x55, 0x8b, 0xc7, 0x10, 0x83, 0xd6, 0xdd, 0xe1,
    0x47, 0xea, 0xca, 0x7b, 0xd9, 0x5e, 0xb7, 0x25, 0x60, 0x25, 0x08, 0x92,
    0xca, 0x3a, 0x48, 0x5a, 0x89, 0xb7, 0x75, 0x03, 0x11, 0xfa, 0xae, 0x42,
    0x6e, 0xd6, 0x2e, 0x32, 0x19, 0x73, 0xa9, 0xac, 0x76, 0x1a, 0xef, 0x4a,
    0x99, 0x0d, 0xe7, 0x68, 0xd1, 0x95, 0x66, 0x95, 0x3d, 0x22, 0x9e, 0xf3,
    0x86, 0x29, 0x0b, 0x10, 0xbc, 0xe9, 0x22, 0x02, 0x19, 0x5e, 0xac, 0x31,
    0x2a, 0x8b, 0xb4, 0xf6, 0x48, 0xa3, 0xed, 0x38, 0x23, 0xee, 0xf5, 0x19,
    0x82, 0x2f, 0xa9, 0x98, 0x62, 0xd8, 0x9f, 0x9e, 0xbb, 0x97, 0x65, 0xfb,
    0x02, 0xd0, 0x81, 0x09, 0xd3, 0x44, 0x43, 0x92, 0x21, 0x4b, 0xe4, 0x5d,
    0x8c, 0x76, 0xae, 0xd2, 0x35, 0xda, 0x2a, 0xde, 0xf9, 0x50, 0x67, 0x6d,
    0xd2, 0x40, 0x36, 0x29, 0x92, 0x3c, 0x37, 0xec, 0xb6, 0x29, 0x91, 0xbd,
    0x79, 0xbe, 0xfc, 0x11, 0x31, 0x16, 0xdc, 0x7a, 0x6e, 0x0e, 0xde, 0x10,
    0xb6, 0x3c, 0x3d, 0x5c, 0xac, 0x80, 0x56, 0xa4, 0x9a, 0x61, 0xa9, 0x3f,
    0xce, 0xa7, 0x0e, 0xfc, 0xf0, 0x86, 0x6a, 0xf2, 0x9b, 0xca, 0xf1, 0x1d,
    0xe4, 0x89, 0x35, 0xc8, 0xbb, 0x24, 0xc0, 0xc5, 0x86, 0x59, 0x31, 0x2a,
    0x41, 0x32, 0x62, 0xdc, 0xb4, 0xc1, 0xa0, 0xe0, 0x87, 0x9a, 0x7b, 0xe8,
    0x53, 0xa6, 0x20, 0x1f, 0x71, 0xa9, 0xe1, 0x50, 0x96, 0xb1, 0xb0, 0x4a,
    0x08, 0x28, 0x69, 0x56, 0x5c, 0xa9, 0x2d, 0x7f, 0x40, 0x47, 0x65, 0x56,
    0x89, 0x4a, 0xfe, 0xbc, 0xcf, 0x50, 0xed, 0xa0, 0x75, 0x50, 0x99, 0x43,
    0x13, 0x28, 0xdf, 0x5d, 0x63, 0x3a, 0x06, 0x85, 0x58, 0x49, 0x56, 0xf0,
    0x50, 0x66, 0x69, 0xbf,
];

/// Key unrelated to the chain, modulus
pub const ROGUE_N: [u8; 256] = [
    0xa9, 0xb5, 0x97, 0x07, 0x83, 0xe7, 0xfc, 0x2b, 0x4f, 0x80, 0x1b, 0x6f,
    0x93, 0xe2, 0x8e, 0x3b, 0x71, 0x4c, 0x7d, 0x4d, 0xdd, 0xfb, 0x7e, 0x27,
    0x19, 0x5e, 0x4f, 0x88, 0xc1, 0xf3, 0x54, 0x8e, 0x1e, 0x4a, 0x6d, 0xf4,
    0x00, 0x20, 0xde, 0x82, 0xa5, 0x37, 0x95, 0x81, 0xfb, 0x8a, 0x72, 0x33,
    0x58, 0x0d, 0x27, 0xaf, 0xb0, 0xea, 0x9e, 0x6f, 0xa7, 0xfd, 0x16, 0x91,
    0x43, 0xe8, 0xa9, 0xa9, 0x77, 0x70, 0xa1, 0xd0, 0x3c, 0x52, 0xa2, 0xf5,
    0xb4, 0xd8, 0x42, 0xdf, 0x28, 0xc8, 0xb0, 0x13, 0xba, 0x71, 0xef, 0x23,
    0x08, 0x07, 0xd3, 0xad, 0xcf, 0x6b, 0xe8, 0x6f, 0xb9, 0x7b, 0xd4, 0xdc,
    0x7f, 0x51, 0xb9, 0x7f, 0xc4, 0x4f, 0xf9, 0xac, 0x1c, 0x40, 0x2b, 0x06,
    0x05, 0x76, 0xf1, 0xfa, 0x04, 0x00, 0xf1, 0xaf, 0x55, 0xd1, 0x35, 0xd5,
    0xb0, 0xae, 0x9b, 0x51, 0x4c, 0x1d, 0x15, 0x7e, 0x70, 0xc7, 0x9a, 0x0a,
    0x06, 0x92, 0x9d, 0xed, 0x49, 0x5f, 0x59, 0x28, 0xd6, 0xb4, 0xd4, 0x60,
    0x6f, 0x9b, 0x17, 0x3d, 0x81, 0x27, 0x74, 0x06, 0x79, 0x37, 0xb9, 0xce,
    0xc3, 0x00, 0x32, 0xac, 0x77, 0x50, 0x52, 0xc8, 0x37, 0x06, 0x35, 0x40,
    0x65, 0x7d, 0xb7, 0xa5, 0xe6, 0xb2, 0xce, 0x62, 0x7b, 0xe5, 0x89, 0x9a,
    0x3b, 0x75, 0x4b, 0x48, 0x83, 0xa1, 0x83, 0x3b, 0x19, 0x84, 0x05, 0xfb,
    0x68, 0x23, 0xae, 0x2e, 0xc7, 0x9a, 0x99, 0x87, 0x13, 0xae, 0x8f, 0xa6,
    0x30, 0x01, 0x60, 0x6f, 0x9f, 0x2c, 0xca, 0xf8, 0x52, 0xb2, 0x2e, 0x41,
    0x0e, 0xbe, 0x82, 0x43, 0x8c, 0x1d, 0x63, 0x52, 0x16, 0xc8, 0x46, 0x90,
    0x09, 0x26, 0x5e, 0xf9, 0x82, 0x10, 0x00, 0xe2, 0x3c, 0x07, 0x5b, 0x1c,
    0x6a, 0xa7, 0xb4, 0x4a, 0x34, 0xd9, 0x0e, 0xfc, 0x67, 0xc7, 0x1c, 0xe3,
    0x05, 0x6f, 0x0e, 0xa9,
];

/// Key unrelated to the chain, private exponent
pub const ROGUE_D: [u8; 256] = [
    0x05, 0xf2, 0x8d, 0xf8, 0x2e, 0xb4, 0x7c, 0xd7, 0x24, 0xba, 0x5b, 0xdb,
    0xc9, 0x6e, 0x3d, 0x67, 0x52, 0x65, 0x68, 0x97, 0xc7, 0xc1, 0x86, 0x4e,
    0x86, 0xfa, 0x51, 0xe5, 0xbc, 0x4c, 0x53, 0x88, 0x86, 0x81, 0xbb, 0xc0,
    0x3b, 0x17, 0xeb, 0xcc, 0x5e, 0xcf, 0x67, 0x9f, 0x2e, 0x4a, 0x50, 0x0d,
    0xc2, 0x16, 0x75, 0xef, 0x57, 0x8f, 0x25, 0x5d, 0xca, 0xe0, 0x98, 0xff,
    0x9e, 0xc6, 0x62, 0xd9, 0xc4, 0x4c, 0x8f, 0x73, 0x2d, 0x86, 0x04, 0xdd,
    0x81, 0x08, 0xba, 0x31, 0x39, 0x6b, 0xed, 0x15, 0xc7, 0xe9, 0x31, 0xc5,
    0x03, 0xc5, 0x48, 0x73, 0x15, 0x2b, 0x96, 0x32, 0x02, 0x29, 0x57, 0x90,
    0xa1, 0xaa, 0xa2, 0xca, 0x5a, 0x3e, 0x26, 0x45, 0x14, 0x99, 0x60, 0x18,
    0x9e, 0x2c, 0xe8, 0xb6, 0x87, 0x18, 0xe4, 0x5f, 0x6d, 0x6d, 0xbf, 0x49,
    0xfd, 0x9e, 0xe4, 0xe5, 0x10, 0xba, 0x8d, 0x33, 0xfa, 0x52, 0x4a, 0xe0,
    0x6f, 0x16, 0x05, 0xc8, 0x80, 0xf7, 0xf6, 0x83, 0x42, 0x51, 0x7b, 0x16,
    0xf0, 0xac, 0x93, 0x55, 0x1e, 0xb4, 0xf7, 0x02, 0x88, 0xc1, 0x25, 0x1f,
    0xde, 0xce, 0xe2, 0x11, 0x44, 0x1b, 0x1b, 0xe7, 0x74, 0xd8, 0x9b, 0x74,
    0x3b, 0x0f, 0xe6, 0x23, 0xfd, 0x01, 0x17, 0xed, 0xcb, 0x1c, 0xd2, 0xd9,
    0x43, 0xcd, 0x6e, 0x2a, 0x72, 0x90, 0xe1, 0x6a, 0xc3, 0x03, 0xd4, 0xba,
    0x4d, 0xb1, 0xba, 0x12, 0x8e, 0xdc, 0xca, 0x7a, 0xcc, 0x09, 0x2a, 0x22,
    0x6f, 0x72, 0x4f, 0xe5, 0x96, 0x95, 0x64, 0xdb, 0x8e, 0xf8, 0xa2, 0xbe,
    0x7b, 0xb0, 0x3f, 0xb6, 0x70, 0x00, 0x61, 0xec, 0xe1, 0x7d, 0x9e, 0x1e,
    0x9d, 0x63, 0x00, 0x3c, 0xc7, 0x8d, 0x34, 0x95, 0x3a, 0xdb, 0x12, 0x83,
    0x93, 0xde, 0x9c, 0x0a, 0xe0, 0x94, 0x3f, 0x3a, 0xe1, 0xd8, 0x30, 0x1b,
    0xe6, 0x5e, 0x6e, 0xa1,
];
