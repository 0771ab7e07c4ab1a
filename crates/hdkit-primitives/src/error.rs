/// Unified error type for primitives operations.
///
/// Covers hashing, scalar/point arithmetic, mnemonic handling, and the
/// Base58Check wrapper. The Bech32 codec carries its own error type
/// because callers need its format/checksum distinction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid scalar: {0}")]
    InvalidScalar(String),

    #[error("point not on curve")]
    PointNotOnCurve,

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
