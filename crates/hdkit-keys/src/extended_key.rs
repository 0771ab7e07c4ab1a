//! Extended private and public keys (BIP-32).

use std::fmt;

use zeroize::Zeroize;

use hdkit_primitives::base58;
use hdkit_primitives::ec::{self, ScalarField, Secp256k1Field};
use hdkit_primitives::hash::{hash160, sha512_hmac};

use crate::network::{Network, KNOWN_NETWORKS};
use crate::KeyError;

/// Index offset marking the hardened half of the index space.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Byte length of the serialized extended-key payload.
pub const SERIALIZED_LENGTH: usize = 78;

/// An extended private key: a secp256k1 scalar plus the chain code and
/// tree bookkeeping that make child derivation possible.
///
/// Keys are immutable once built; every operation that "changes" one,
/// including [`with_network`](Self::with_network) and derivation itself,
/// returns a new value. The scalar is always a canonical nonzero element
/// of the curve group order.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedPrivKey {
    network: Network,
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: u32,
    chain_code: [u8; 32],
    secret: [u8; 32],
    compressed: bool,
}

/// An extended public key: a curve point plus the chain code and tree
/// bookkeeping. Supports normal (non-hardened) child derivation only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedPubKey {
    network: Network,
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: u32,
    chain_code: [u8; 32],
    point: [u8; 33],
    compressed: bool,
}

impl ExtendedPrivKey {
    /// Depth-0 constructor used by the seed layer. The caller must have
    /// range-checked the scalar.
    pub(crate) fn master(secret: [u8; 32], chain_code: [u8; 32], network: Network) -> Self {
        ExtendedPrivKey {
            network,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_index: 0,
            chain_code,
            secret,
            compressed: true,
        }
    }

    /// Derive the child key at `index` (CKDpriv).
    ///
    /// Hardened indices (top bit set) commit to the parent scalar, normal
    /// indices to the parent public point. Fails with
    /// [`KeyError::InvalidChild`] when the HMAC output falls outside the
    /// scalar field; per BIP-32 such an index is simply unusable and the
    /// caller decides whether to try the next one.
    pub fn derive_child(&self, index: u32) -> Result<Self, KeyError> {
        let depth = self.depth.checked_add(1).ok_or(KeyError::DepthOverflow)?;

        let mut data = Vec::with_capacity(37);
        if index >= HARDENED_OFFSET {
            data.push(0);
            data.extend_from_slice(&self.secret);
        } else {
            data.extend_from_slice(&self.public_point()?);
        }
        data.extend_from_slice(&index.to_be_bytes());

        let i = sha512_hmac(&self.chain_code, &data);
        let (il, ir) = i.split_at(32);
        let mut tweak = [0u8; 32];
        tweak.copy_from_slice(il);

        let field = Secp256k1Field;
        let secret = field.add(&tweak, &self.secret).ok_or(KeyError::InvalidChild)?;
        if !field.is_valid(&secret) {
            return Err(KeyError::InvalidChild);
        }
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(ExtendedPrivKey {
            network: self.network,
            depth,
            parent_fingerprint: self.fingerprint()?,
            child_index: index,
            chain_code,
            secret,
            compressed: self.compressed,
        })
    }

    /// Project to the corresponding extended public key, copying all
    /// bookkeeping and replacing the scalar with scalar·G.
    pub fn to_public(&self) -> Result<ExtendedPubKey, KeyError> {
        Ok(ExtendedPubKey {
            network: self.network,
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_index: self.child_index,
            chain_code: self.chain_code,
            point: self.public_point()?,
            compressed: self.compressed,
        })
    }

    /// HASH160 of the compressed public point.
    pub fn identifier(&self) -> Result<[u8; 20], KeyError> {
        Ok(hash160(&self.public_point()?))
    }

    /// First four bytes of [`identifier`](Self::identifier).
    pub fn fingerprint(&self) -> Result<[u8; 4], KeyError> {
        let id = self.identifier()?;
        let mut fp = [0u8; 4];
        fp.copy_from_slice(&id[..4]);
        Ok(fp)
    }

    /// Serialize into the 78-byte wire layout:
    /// `version(4) || depth(1) || parent_fp(4) || child_index(4) ||
    /// chain_code(32) || 0x00 || scalar(32)`.
    pub fn to_bytes(&self) -> [u8; SERIALIZED_LENGTH] {
        let mut out = [0u8; SERIALIZED_LENGTH];
        out[0..4].copy_from_slice(&self.network.xprv_version);
        out[4] = self.depth;
        out[5..9].copy_from_slice(&self.parent_fingerprint);
        out[9..13].copy_from_slice(&self.child_index.to_be_bytes());
        out[13..45].copy_from_slice(&self.chain_code);
        out[46..78].copy_from_slice(&self.secret);
        out
    }

    /// Parse the 78-byte wire layout, resolving the network from the
    /// version bytes and validating scalar range and the zero-depth
    /// consistency rule.
    pub fn from_bytes(data: &[u8]) -> Result<Self, KeyError> {
        let fields = RawFields::parse(data)?;
        let network = KNOWN_NETWORKS
            .iter()
            .copied()
            .find(|n| n.xprv_version == fields.version)
            .ok_or(KeyError::InvalidVersion)?;

        if fields.key_data[0] != 0 {
            return Err(KeyError::InvalidKeyData(
                "missing private key pad byte".to_string(),
            ));
        }
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&fields.key_data[1..]);
        if !Secp256k1Field.is_valid(&secret) {
            return Err(KeyError::InvalidKeyData(
                "private scalar out of range".to_string(),
            ));
        }

        Ok(ExtendedPrivKey {
            network,
            depth: fields.depth,
            parent_fingerprint: fields.parent_fingerprint,
            child_index: fields.child_index,
            chain_code: fields.chain_code,
            secret,
            compressed: true,
        })
    }

    /// Serialize to Base58Check text (`xprv...` on mainnet).
    pub fn to_base58(&self) -> String {
        base58::check_encode(&self.to_bytes())
    }

    /// Parse Base58Check text back into a key.
    pub fn from_base58(s: &str) -> Result<Self, KeyError> {
        Self::from_bytes(&base58::check_decode(s)?)
    }

    /// A copy of this key tagged for another network.
    pub fn with_network(&self, network: Network) -> Self {
        let mut key = self.clone();
        key.network = network;
        key
    }

    /// A copy of this key with the public-point serialization mode set.
    pub fn with_compressed(&self, compressed: bool) -> Self {
        let mut key = self.clone();
        key.compressed = compressed;
        key
    }

    /// The raw private scalar, big-endian.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.secret
    }

    /// Tree depth; 0 for a master key.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Index this key was derived at; top bit set means hardened.
    pub fn child_index(&self) -> u32 {
        self.child_index
    }

    /// Whether this key was derived with the hardened rule.
    pub fn is_hardened(&self) -> bool {
        self.child_index >= HARDENED_OFFSET
    }

    /// Fingerprint of the parent key; all zero for a master key.
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// The chain code half of the extended key.
    pub fn chain_code(&self) -> [u8; 32] {
        self.chain_code
    }

    /// The network this key serializes for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Whether the public projection serializes compressed.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    fn public_point(&self) -> Result<[u8; 33], KeyError> {
        Ok(ec::base_point_mul(&self.secret)?)
    }
}

impl fmt::Debug for ExtendedPrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("child_index", &self.child_index)
            .field("secret", &"[redacted]")
            .finish()
    }
}

impl Drop for ExtendedPrivKey {
    fn drop(&mut self) {
        self.secret.zeroize();
        self.chain_code.zeroize();
    }
}

impl ExtendedPubKey {
    /// Derive the child key at a normal index (CKDpub).
    ///
    /// Hardened indices need the parent scalar and fail with
    /// [`KeyError::InvalidDerivation`] on a public-only key.
    pub fn derive_child(&self, index: u32) -> Result<Self, KeyError> {
        if index >= HARDENED_OFFSET {
            return Err(KeyError::InvalidDerivation(
                "hardened derivation requires the parent private key".to_string(),
            ));
        }
        let depth = self.depth.checked_add(1).ok_or(KeyError::DepthOverflow)?;

        let mut data = Vec::with_capacity(37);
        data.extend_from_slice(&self.point);
        data.extend_from_slice(&index.to_be_bytes());

        let i = sha512_hmac(&self.chain_code, &data);
        let (il, ir) = i.split_at(32);
        let mut tweak = [0u8; 32];
        tweak.copy_from_slice(il);

        // Child point = parent + IL·G; rejected when IL is out of range.
        let point = ec::point_add_scalar_mul(&self.point, &tweak)
            .map_err(|_| KeyError::InvalidChild)?;
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(ExtendedPubKey {
            network: self.network,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_index: index,
            chain_code,
            point,
            compressed: self.compressed,
        })
    }

    /// HASH160 of the compressed public point.
    pub fn identifier(&self) -> [u8; 20] {
        hash160(&self.point)
    }

    /// First four bytes of [`identifier`](Self::identifier).
    pub fn fingerprint(&self) -> [u8; 4] {
        let id = self.identifier();
        let mut fp = [0u8; 4];
        fp.copy_from_slice(&id[..4]);
        fp
    }

    /// The public point, serialized per the key's compression mode:
    /// 33 bytes compressed or 65 bytes uncompressed.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>, KeyError> {
        if self.compressed {
            Ok(self.point.to_vec())
        } else {
            Ok(ec::decompress(&self.point)?.to_vec())
        }
    }

    /// Serialize into the 78-byte wire layout; `key_data` is always the
    /// compressed point.
    pub fn to_bytes(&self) -> [u8; SERIALIZED_LENGTH] {
        let mut out = [0u8; SERIALIZED_LENGTH];
        out[0..4].copy_from_slice(&self.network.xpub_version);
        out[4] = self.depth;
        out[5..9].copy_from_slice(&self.parent_fingerprint);
        out[9..13].copy_from_slice(&self.child_index.to_be_bytes());
        out[13..45].copy_from_slice(&self.chain_code);
        out[45..78].copy_from_slice(&self.point);
        out
    }

    /// Parse the 78-byte wire layout, validating the point against the
    /// curve and the zero-depth consistency rule.
    pub fn from_bytes(data: &[u8]) -> Result<Self, KeyError> {
        let fields = RawFields::parse(data)?;
        let network = KNOWN_NETWORKS
            .iter()
            .copied()
            .find(|n| n.xpub_version == fields.version)
            .ok_or(KeyError::InvalidVersion)?;

        let point = ec::compress(&fields.key_data)
            .map_err(|_| KeyError::InvalidKeyData("not a valid curve point".to_string()))?;

        Ok(ExtendedPubKey {
            network,
            depth: fields.depth,
            parent_fingerprint: fields.parent_fingerprint,
            child_index: fields.child_index,
            chain_code: fields.chain_code,
            point,
            compressed: true,
        })
    }

    /// Serialize to Base58Check text (`xpub...` on mainnet).
    pub fn to_base58(&self) -> String {
        base58::check_encode(&self.to_bytes())
    }

    /// Parse Base58Check text back into a key.
    pub fn from_base58(s: &str) -> Result<Self, KeyError> {
        Self::from_bytes(&base58::check_decode(s)?)
    }

    /// A copy of this key tagged for another network.
    pub fn with_network(&self, network: Network) -> Self {
        let mut key = self.clone();
        key.network = network;
        key
    }

    /// A copy of this key with the serialization mode set.
    pub fn with_compressed(&self, compressed: bool) -> Self {
        let mut key = self.clone();
        key.compressed = compressed;
        key
    }

    /// Tree depth; 0 for a master key.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Index this key was derived at.
    pub fn child_index(&self) -> u32 {
        self.child_index
    }

    /// Fingerprint of the parent key; all zero for a master key.
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// The chain code half of the extended key.
    pub fn chain_code(&self) -> [u8; 32] {
        self.chain_code
    }

    /// The network this key serializes for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Whether [`public_key_bytes`](Self::public_key_bytes) serializes
    /// compressed.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }
}

/// The version-independent fields of the 78-byte layout.
struct RawFields {
    version: [u8; 4],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: u32,
    chain_code: [u8; 32],
    key_data: [u8; 33],
}

impl RawFields {
    fn parse(data: &[u8]) -> Result<Self, KeyError> {
        if data.len() != SERIALIZED_LENGTH {
            return Err(KeyError::InvalidLength {
                expected: SERIALIZED_LENGTH,
                got: data.len(),
            });
        }
        let mut version = [0u8; 4];
        version.copy_from_slice(&data[0..4]);
        let depth = data[4];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&data[5..9]);
        let child_index = u32::from_be_bytes(
            data[9..13].try_into().expect("sliced four bytes"),
        );
        if depth == 0 && (parent_fingerprint != [0u8; 4] || child_index != 0) {
            return Err(KeyError::InvalidKeyData(
                "zero-depth key with nonzero parent fingerprint or index".to_string(),
            ));
        }
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[13..45]);
        let mut key_data = [0u8; 33];
        key_data.copy_from_slice(&data[45..78]);
        Ok(RawFields {
            version,
            depth,
            parent_fingerprint,
            child_index,
            chain_code,
            key_data,
        })
    }
}
