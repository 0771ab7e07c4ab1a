//! Hash primitives shared across the toolkit.
//!
//! Thin fixed-output wrappers over the RustCrypto digest crates. Extended
//! keys lean on HMAC-SHA512 and Hash160; mnemonics on SHA-256 and the
//! PBKDF2-HMAC-SHA512 stretch; Base58Check on double SHA-256.

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

/// SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Double SHA-256, the Bitcoin checksum hash.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    Sha256::digest(sha256(data)).into()
}

/// RIPEMD-160 digest of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Hash160: RIPEMD-160 over SHA-256, the key-identifier hash.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// HMAC-SHA512 tag over `data` keyed by `key`.
pub fn sha512_hmac(key: &[u8], data: &[u8]) -> [u8; 64] {
    let mut mac =
        <Hmac<Sha512>>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    let tag = mac.finalize().into_bytes();
    let mut out = [0u8; 64];
    out.copy_from_slice(&tag);
    out
}

/// PBKDF2-HMAC-SHA512 key stretch, filling `out` completely.
pub fn pbkdf2_sha512(password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
    pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, rounds, out);
}
