use proptest::prelude::*;

use hdkit_primitives::base58;
use hdkit_primitives::bech32::{self, Bech32Error};

const CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bech32_encode_decode_roundtrip(
        hrp in "[a-z]{1,10}",
        payload in prop::collection::vec(any::<u8>(), 0..40)
    ) {
        let encoded = bech32::encode(&hrp, &payload);
        let (decoded_hrp, decoded) = bech32::decode(&encoded).unwrap();
        prop_assert_eq!(decoded_hrp, hrp);
        prop_assert_eq!(decoded, payload);
    }

    /// The BCH code detects any single-character substitution in the data
    /// part, including the checksum characters themselves.
    #[test]
    fn bech32_single_character_flip_detected(
        hrp in "[a-z]{1,8}",
        payload in prop::collection::vec(any::<u8>(), 1..30),
        pos_seed in any::<usize>(),
        replacement_seed in any::<usize>(),
    ) {
        let encoded = bech32::encode(&hrp, &payload);
        let data_start = hrp.len() + 1;
        let pos = data_start + pos_seed % (encoded.len() - data_start);
        let original = encoded.as_bytes()[pos];
        let mut replacement = CHARSET[replacement_seed % 32];
        if replacement == original {
            replacement = CHARSET[(replacement_seed + 1) % 32];
        }
        let mut corrupted = encoded.into_bytes();
        corrupted[pos] = replacement;
        let corrupted = String::from_utf8(corrupted).unwrap();
        prop_assert_eq!(bech32::split(&corrupted).unwrap_err(), Bech32Error::Checksum);
    }

    #[test]
    fn base58_check_roundtrip(payload in prop::collection::vec(any::<u8>(), 0..64)) {
        let encoded = base58::check_encode(&payload);
        prop_assert_eq!(base58::check_decode(&encoded).unwrap(), payload);
    }
}
