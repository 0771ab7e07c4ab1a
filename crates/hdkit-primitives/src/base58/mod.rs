//! Base58Check text wrapping.
//!
//! Base58 itself is consumed as an opaque encoder (the `bs58` crate with
//! Bitcoin's alphabet); this module layers the Bitcoin convention on top:
//! a 4-byte double-SHA-256 checksum over the payload, appended before
//! encoding and verified after decoding.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Encode `payload` with its 4-byte SHA-256d checksum appended.
pub fn check_encode(payload: &[u8]) -> String {
    let checksum = sha256d(payload);
    let mut buf = Vec::with_capacity(payload.len() + 4);
    buf.extend_from_slice(payload);
    buf.extend_from_slice(&checksum[..4]);
    bs58::encode(buf).into_string()
}

/// Decode a Base58Check string, stripping and verifying the checksum.
///
/// Returns the payload without the checksum, or an error when the string
/// contains characters outside the alphabet, is too short to carry a
/// checksum, or the checksum does not match.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = bs58::decode(s)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))?;
    if decoded.len() < 4 {
        return Err(PrimitivesError::InvalidBase58(
            "too short to carry a checksum".to_string(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - 4);
    let expected = sha256d(payload);
    if checksum != &expected[..4] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}
