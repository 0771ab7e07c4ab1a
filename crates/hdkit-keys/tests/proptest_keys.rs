use proptest::prelude::*;

use hdkit_keys::network::MAINNET;
use hdkit_keys::seed;
use hdkit_keys::{DerivationPath, ExtendedPrivKey, ExtendedPubKey, HARDENED_OFFSET};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn wire_layout_roundtrip(
        raw_seed in prop::collection::vec(any::<u8>(), 16..64),
        index in any::<u32>(),
    ) {
        if let Ok(master) = seed::master_from_seed(&raw_seed, MAINNET) {
            if let Ok(child) = master.derive_child(index) {
                let bytes = child.to_bytes();
                let parsed = ExtendedPrivKey::from_bytes(&bytes).unwrap();
                prop_assert_eq!(&parsed, &child);
                prop_assert_eq!(parsed.to_bytes(), bytes);

                let public = child.to_public().unwrap();
                let bytes = public.to_bytes();
                let parsed = ExtendedPubKey::from_bytes(&bytes).unwrap();
                prop_assert_eq!(&parsed, &public);
                prop_assert_eq!(parsed.to_bytes(), bytes);
            }
        }
    }

    #[test]
    fn base58_text_roundtrip(raw_seed in prop::collection::vec(any::<u8>(), 16..64)) {
        if let Ok(master) = seed::master_from_seed(&raw_seed, MAINNET) {
            prop_assert_eq!(
                ExtendedPrivKey::from_base58(&master.to_base58()).unwrap(),
                master.clone()
            );
            let public = master.to_public().unwrap();
            prop_assert_eq!(
                ExtendedPubKey::from_base58(&public.to_base58()).unwrap(),
                public
            );
        }
    }

    #[test]
    fn derivation_is_deterministic(
        raw_seed in prop::collection::vec(any::<u8>(), 16..64),
        index in any::<u32>(),
    ) {
        if let Ok(master) = seed::master_from_seed(&raw_seed, MAINNET) {
            prop_assert_eq!(master.derive_child(index), master.derive_child(index));
        }
    }

    /// CKDpriv followed by projection agrees with CKDpub on every
    /// non-hardened path.
    #[test]
    fn private_and_public_walks_commute(
        raw_seed in prop::collection::vec(any::<u8>(), 16..64),
        indices in prop::collection::vec(0u32..HARDENED_OFFSET, 0..4),
    ) {
        if let Ok(master) = seed::master_from_seed(&raw_seed, MAINNET) {
            let path = DerivationPath::from(indices);
            if let Ok(child) = path.derive_priv(&master) {
                let via_pub = path.derive_pub(&master.to_public().unwrap()).unwrap();
                prop_assert_eq!(child.to_public().unwrap(), via_pub);
            }
        }
    }

    #[test]
    fn path_display_parse_roundtrip(indices in prop::collection::vec(any::<u32>(), 0..8)) {
        let path = DerivationPath::from(indices);
        let reparsed: DerivationPath = path.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, path);
    }
}
