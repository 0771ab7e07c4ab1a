//! Cryptographic primitives for the HD key toolkit.
//!
//! Foundation layer shared by the key-derivation crates:
//! - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160, HMAC-SHA512, PBKDF2)
//! - Bech32 checksummed text encoding (BIP-173)
//! - BIP-39 mnemonic phrases and seed stretching
//! - Base58Check wrapping of binary key material
//! - Curve-order scalar arithmetic and point operations on secp256k1

pub mod base58;
pub mod bech32;
pub mod bip39;
pub mod ec;
pub mod hash;

mod error;
pub use error::PrimitivesError;
