//! Modular arithmetic over the secp256k1 group order.

use k256::elliptic_curve::{Field, PrimeField};
use k256::Scalar;

/// Big-endian encoding of the secp256k1 group order n.
const ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36,
    0x41, 0x41,
];

/// Modular arithmetic over a curve group order, on fixed-width big-endian
/// bytes.
///
/// This is the whole bignum surface the derivation engine needs: range
/// checking against n and addition mod n. Implementations must be
/// constant-time in the scalar values.
pub trait ScalarField {
    /// The group order n as 32 big-endian bytes.
    fn order(&self) -> [u8; 32];

    /// Whether `bytes` encodes a canonical nonzero scalar in [1, n-1].
    fn is_valid(&self, bytes: &[u8; 32]) -> bool;

    /// (a + b) mod n, or `None` when either input is not canonical (≥ n).
    fn add(&self, a: &[u8; 32], b: &[u8; 32]) -> Option<[u8; 32]>;
}

/// [`ScalarField`] backed by `k256`'s constant-time scalar arithmetic.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Field;

fn parse(bytes: &[u8; 32]) -> Option<Scalar> {
    Option::from(Scalar::from_repr((*bytes).into()))
}

impl ScalarField for Secp256k1Field {
    fn order(&self) -> [u8; 32] {
        ORDER
    }

    fn is_valid(&self, bytes: &[u8; 32]) -> bool {
        match parse(bytes) {
            Some(s) => !bool::from(s.is_zero()),
            None => false,
        }
    }

    fn add(&self, a: &[u8; 32], b: &[u8; 32]) -> Option<[u8; 32]> {
        let sum = parse(a)? + parse(b)?;
        Some(sum.to_bytes().into())
    }
}
