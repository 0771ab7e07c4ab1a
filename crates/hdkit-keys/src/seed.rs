//! Master key material from seeds, hex strings and mnemonic phrases.

use hdkit_primitives::bip39::{self, Language};
use hdkit_primitives::ec::{ScalarField, Secp256k1Field};
use hdkit_primitives::hash::sha512_hmac;
use hdkit_primitives::PrimitivesError;

use crate::extended_key::ExtendedPrivKey;
use crate::network::Network;
use crate::KeyError;

/// HMAC key fixed by BIP-32 for master key generation.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Derive the master extended private key from raw seed bytes.
///
/// The left half of HMAC-SHA512("Bitcoin seed", seed) becomes the master
/// scalar, the right half the chain code. Fails with
/// [`KeyError::InvalidSeed`] when the scalar is zero or not below the
/// curve order, a cryptographically negligible but mandatory check.
pub fn master_from_seed(seed: &[u8], network: Network) -> Result<ExtendedPrivKey, KeyError> {
    let i = sha512_hmac(MASTER_HMAC_KEY, seed);
    let (il, ir) = i.split_at(32);
    let mut secret = [0u8; 32];
    secret.copy_from_slice(il);
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(ir);

    if !Secp256k1Field.is_valid(&secret) {
        return Err(KeyError::InvalidSeed);
    }
    Ok(ExtendedPrivKey::master(secret, chain_code, network))
}

/// Derive the master key from a hex seed string.
///
/// An odd-length string gains one leading zero nibble before decoding.
pub fn master_from_hex(seed_hex: &str, network: Network) -> Result<ExtendedPrivKey, KeyError> {
    let padded;
    let normalized = if seed_hex.len() % 2 == 1 {
        padded = format!("0{seed_hex}");
        padded.as_str()
    } else {
        seed_hex
    };
    let seed = hex::decode(normalized).map_err(PrimitivesError::from)?;
    master_from_seed(&seed, network)
}

/// Derive the master key from a mnemonic phrase and passphrase.
///
/// Validation semantics follow [`bip39::seed_from_phrase`]: the phrase is
/// checked against the wordlist only when `language` is supplied.
pub fn master_from_mnemonic(
    phrase: &str,
    passphrase: &str,
    language: Option<Language>,
    network: Network,
) -> Result<ExtendedPrivKey, KeyError> {
    let seed = bip39::seed_from_phrase(phrase, passphrase, language)?;
    master_from_seed(&seed, network)
}
