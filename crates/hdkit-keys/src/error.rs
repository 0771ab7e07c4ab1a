/// Error type for extended-key construction, derivation and serialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// The seed hashed to a master scalar outside [1, n-1].
    #[error("seed produced an out-of-range master scalar")]
    InvalidSeed,
    /// A derivation step produced IL >= n or a zero child scalar. The
    /// caller decides whether to move on to the next index.
    #[error("derived child key is invalid for this index")]
    InvalidChild,
    /// The parent already sits at the maximum depth of 255.
    #[error("derivation depth overflow")]
    DepthOverflow,
    /// The requested derivation is not defined for this key variant.
    #[error("invalid derivation: {0}")]
    InvalidDerivation(String),
    /// A derivation path string could not be parsed.
    #[error("invalid derivation path: {0}")]
    InvalidPath(String),
    /// Serialized key carries version bytes of no known network.
    #[error("unknown extended key version")]
    InvalidVersion,
    /// Serialized key material failed validation.
    #[error("invalid key data: {0}")]
    InvalidKeyData(String),
    /// Serialized key has the wrong length.
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Required byte count.
        expected: usize,
        /// Byte count actually supplied.
        got: usize,
    },
    /// Failure in the primitives layer.
    #[error("primitives error: {0}")]
    Primitives(#[from] hdkit_primitives::PrimitivesError),
}
