//! BIP-32 extended-key derivation.
//!
//! Builds hierarchical-deterministic key trees: master keys from seeds or
//! mnemonics, parent-to-child derivation (hardened and normal), the
//! private-to-public projection, and the 78-byte wire layout with its
//! Base58Check text wrapping. All values are immutable; derivation always
//! returns new keys.

pub mod extended_key;
pub mod network;
pub mod path;
pub mod seed;

mod error;
pub use error::KeyError;
pub use extended_key::{ExtendedPrivKey, ExtendedPubKey, HARDENED_OFFSET};
pub use network::Network;
pub use path::DerivationPath;
