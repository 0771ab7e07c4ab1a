//! Network parameters carried by extended keys.

/// Serialization parameters for one Bitcoin network.
///
/// Derivation math never reads these; they select version bytes and the
/// Bech32 human-readable prefix when keys leave the process. Passed
/// explicitly wherever needed, so there is no process-wide parameter
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    /// Version bytes prefixed to serialized extended private keys.
    pub xprv_version: [u8; 4],
    /// Version bytes prefixed to serialized extended public keys.
    pub xpub_version: [u8; 4],
    /// Human-readable part for Bech32 output on this network.
    pub hrp: &'static str,
}

/// Bitcoin mainnet (`xprv`/`xpub` version bytes, hrp `bc`).
pub const MAINNET: Network = Network {
    xprv_version: [0x04, 0x88, 0xad, 0xe4],
    xpub_version: [0x04, 0x88, 0xb2, 0x1e],
    hrp: "bc",
};

/// Bitcoin testnet (`tprv`/`tpub` version bytes, hrp `tb`).
pub const TESTNET: Network = Network {
    xprv_version: [0x04, 0x35, 0x83, 0x94],
    xpub_version: [0x04, 0x35, 0x87, 0xcf],
    hrp: "tb",
};

/// The networks consulted when parsing serialized keys.
pub(crate) const KNOWN_NETWORKS: [Network; 2] = [MAINNET, TESTNET];
