//! Point operations on secp256k1, exposed as SEC1 byte views.

use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::{Field, Group, PrimeField};
use k256::{AffinePoint, EncodedPoint, ProjectivePoint, Scalar};

use crate::PrimitivesError;

fn parse_scalar(bytes: &[u8; 32]) -> Result<Scalar, PrimitivesError> {
    Option::from(Scalar::from_repr((*bytes).into()))
        .ok_or_else(|| PrimitivesError::InvalidScalar("not a canonical scalar".to_string()))
}

fn parse_point(sec1: &[u8]) -> Result<ProjectivePoint, PrimitivesError> {
    let encoded =
        EncodedPoint::from_bytes(sec1).map_err(|_| PrimitivesError::PointNotOnCurve)?;
    if encoded.is_identity() {
        return Err(PrimitivesError::PointNotOnCurve);
    }
    let affine: Option<AffinePoint> = Option::from(AffinePoint::from_encoded_point(&encoded));
    affine
        .map(ProjectivePoint::from)
        .ok_or(PrimitivesError::PointNotOnCurve)
}

fn to_compressed(point: &ProjectivePoint) -> [u8; 33] {
    let encoded = point.to_affine().to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(encoded.as_bytes());
    out
}

/// Multiply the base point by `scalar`, returning the compressed point.
///
/// The zero scalar has no public point and is rejected.
pub fn base_point_mul(scalar: &[u8; 32]) -> Result<[u8; 33], PrimitivesError> {
    let s = parse_scalar(scalar)?;
    if bool::from(s.is_zero()) {
        return Err(PrimitivesError::InvalidScalar(
            "zero scalar has no public point".to_string(),
        ));
    }
    Ok(to_compressed(&(ProjectivePoint::GENERATOR * s)))
}

/// `point + scalar·G`, the non-hardened public derivation step.
///
/// Fails when `point` is not on the curve, `scalar` is not canonical, or
/// the sum lands on the point at infinity.
pub fn point_add_scalar_mul(point: &[u8], scalar: &[u8; 32]) -> Result<[u8; 33], PrimitivesError> {
    let parent = parse_point(point)?;
    let s = parse_scalar(scalar)?;
    let child = parent + ProjectivePoint::GENERATOR * s;
    if bool::from(child.is_identity()) {
        return Err(PrimitivesError::InvalidScalar(
            "derivation landed on the point at infinity".to_string(),
        ));
    }
    Ok(to_compressed(&child))
}

/// Re-encode a SEC1 point (compressed or uncompressed) in compressed
/// form, validating that it lies on the curve.
pub fn compress(sec1: &[u8]) -> Result<[u8; 33], PrimitivesError> {
    Ok(to_compressed(&parse_point(sec1)?))
}

/// Re-encode a SEC1 point in uncompressed form (65 bytes).
pub fn decompress(sec1: &[u8]) -> Result<[u8; 65], PrimitivesError> {
    let point = parse_point(sec1)?;
    let encoded = point.to_affine().to_encoded_point(false);
    let mut out = [0u8; 65];
    out.copy_from_slice(encoded.as_bytes());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATOR_COMPRESSED: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const TWO_G_COMPRESSED: &str =
        "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5";

    fn scalar(v: u8) -> [u8; 32] {
        let mut s = [0u8; 32];
        s[31] = v;
        s
    }

    #[test]
    fn base_point_mul_matches_known_points() {
        assert_eq!(
            hex::encode(base_point_mul(&scalar(1)).unwrap()),
            GENERATOR_COMPRESSED
        );
        assert_eq!(
            hex::encode(base_point_mul(&scalar(2)).unwrap()),
            TWO_G_COMPRESSED
        );
    }

    #[test]
    fn base_point_mul_rejects_zero() {
        assert!(matches!(
            base_point_mul(&[0u8; 32]),
            Err(PrimitivesError::InvalidScalar(_))
        ));
    }

    #[test]
    fn point_add_scalar_mul_matches_doubling() {
        // G + 1·G == 2·G
        let g = hex::decode(GENERATOR_COMPRESSED).unwrap();
        let sum = point_add_scalar_mul(&g, &scalar(1)).unwrap();
        assert_eq!(hex::encode(sum), TWO_G_COMPRESSED);
    }

    #[test]
    fn compress_roundtrip() {
        let g = hex::decode(GENERATOR_COMPRESSED).unwrap();
        let uncompressed = decompress(&g).unwrap();
        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(hex::encode(compress(&uncompressed).unwrap()), GENERATOR_COMPRESSED);
    }

    #[test]
    fn rejects_bytes_off_the_curve() {
        // x = 5 gives a non-residue for y² = x³ + 7, so no point exists.
        let mut bogus = [0u8; 33];
        bogus[0] = 0x02;
        bogus[32] = 0x05;
        assert!(compress(&bogus).is_err());

        assert!(parse_point(&[0x00]).is_err());
        assert!(compress(&[0x02, 0x01]).is_err());
    }
}
