//! secp256k1 scalar and point operations behind a minimal contract.
//!
//! The key-derivation engine consumes modular arithmetic over the curve
//! group order through the [`ScalarField`] trait and point operations
//! through SEC1-byte free functions, so the `k256` backend never leaks
//! into higher-level signatures.

mod point;
mod scalar;

pub use point::{base_point_mul, compress, decompress, point_add_scalar_mul};
pub use scalar::{ScalarField, Secp256k1Field};
