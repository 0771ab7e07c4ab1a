//! Bech32 checksummed text encoding (BIP-173).
//!
//! The checksum layer (polymod, human-readable-part expansion, the
//! 6-character trailer) is bit-for-bit the standard BCH code and
//! interoperates with any other Bech32 implementation. The data part,
//! however, is interpreted as one big-endian integer written in base 32
//! rather than as a re-packed 5-bit stream: each leading zero byte of the
//! payload survives as exactly one leading `q` character, and the rest of
//! the payload is the minimal base-32 rendition of its integer value.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

/// The 32-character Bech32 alphabet; a character's position is its 5-bit
/// value.
const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Generator constants of the BCH code, applied per bit of the group
/// shifted out each round.
const GENERATOR: [u32; 5] = [
    0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3,
];

/// Longest permitted Bech32 string.
const MAX_LENGTH: usize = 90;

/// Longest permitted human-readable part.
const MAX_HRP_LENGTH: usize = 83;

/// Characters occupied by the trailing checksum.
const CHECKSUM_LENGTH: usize = 6;

/// Errors raised by Bech32 parsing and verification.
///
/// Structural violations and checksum mismatches are distinct variants so
/// callers can react to them programmatically; the `Display` prefix
/// carries the same distinction for log consumers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Bech32Error {
    /// The string breaks a structural rule; the payload names which one.
    #[error("bech32_input_format: {0}")]
    Format(&'static str),

    /// The trailing 6-character checksum does not verify.
    #[error("bech32_input_checksum: checksum verification failed")]
    Checksum,
}

fn charset_index(c: char) -> Option<u8> {
    CHARSET.iter().position(|&b| b == c as u8).map(|i| i as u8)
}

/// The BCH checksum accumulator over a sequence of 5-bit groups.
pub fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &v in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ u32::from(v);
        for (i, g) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= g;
            }
        }
    }
    chk
}

/// Expand the human-readable part into checksum input groups: the high
/// bits of each character, a zero separator, then the low 5 bits of each
/// character. Used only as checksum input, never emitted as text.
pub fn hrp_expand(hrp: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(hrp.len() * 2 + 1);
    for b in hrp.bytes() {
        out.push(b >> 5);
    }
    out.push(0);
    for b in hrp.bytes() {
        out.push(b & 31);
    }
    out
}

/// Compute the six checksum groups for `hrp` and the 5-bit `data` values.
pub fn create_checksum(hrp: &str, data: &[u8]) -> [u8; 6] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0u8; CHECKSUM_LENGTH]);
    let chk = polymod(&values) ^ 1;
    let mut out = [0u8; 6];
    for (i, group) in out.iter_mut().enumerate() {
        *group = ((chk >> (5 * (5 - i))) & 31) as u8;
    }
    out
}

/// Verify the checksum over `hrp` and the full data-part values, checksum
/// groups included.
pub fn verify_checksum(hrp: &str, data: &[u8]) -> bool {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    polymod(&values) == 1
}

fn data_values(data: &str) -> Result<Vec<u8>, Bech32Error> {
    data.chars()
        .map(|c| {
            charset_index(c)
                .ok_or(Bech32Error::Format("data part contains a character outside the alphabet"))
        })
        .collect()
}

/// Split a Bech32 string into its human-readable and data parts.
///
/// Runs the validation chain in order, surfacing the first violation.
/// The last `1` is the separator, so the human-readable part may itself
/// contain `1` characters. All-uppercase input is lower-cased before
/// processing; mixed case is rejected. The returned data part still
/// carries its trailing checksum, which has been verified.
pub fn split(s: &str) -> Result<(String, String), Bech32Error> {
    if s.len() > MAX_LENGTH {
        return Err(Bech32Error::Format("overall length exceeds 90 characters"));
    }
    let has_upper = s.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = s.chars().any(|c| c.is_ascii_lowercase());
    if has_upper && has_lower {
        return Err(Bech32Error::Format("mixed-case string"));
    }
    let s = s.to_ascii_lowercase();

    let sep = s
        .rfind('1')
        .ok_or(Bech32Error::Format("separator character missing"))?;
    let (hrp, data) = (&s[..sep], &s[sep + 1..]);

    if hrp.is_empty() {
        return Err(Bech32Error::Format("human-readable part is empty"));
    }
    if hrp.len() > MAX_HRP_LENGTH {
        return Err(Bech32Error::Format("human-readable part exceeds 83 characters"));
    }
    if hrp.bytes().any(|b| !(0x21..=0x7e).contains(&b)) {
        return Err(Bech32Error::Format(
            "human-readable part contains a character outside 0x21..=0x7e",
        ));
    }
    if data.len() < CHECKSUM_LENGTH {
        return Err(Bech32Error::Format("data part shorter than the 6-character checksum"));
    }

    let values = data_values(data)?;
    if !verify_checksum(hrp, &values) {
        return Err(Bech32Error::Checksum);
    }
    Ok((hrp.to_string(), data.to_string()))
}

/// Encode `payload` under `hrp`.
///
/// The payload bytes are treated as a single big-endian unsigned integer
/// and divided down to base-32 digits; leading zero bytes are carried
/// over as leading `q` characters, one each, ahead of the digits.
pub fn encode(hrp: &str, payload: &[u8]) -> String {
    let zeros = payload.iter().take_while(|&&b| b == 0).count();

    let mut digits = Vec::new();
    let mut n = BigUint::from_bytes_be(payload);
    let base = BigUint::from(32u32);
    while !n.is_zero() {
        let rem = (&n % &base).to_u8().expect("remainder below 32");
        digits.push(rem);
        n = &n / &base;
    }

    let mut values = vec![0u8; zeros];
    values.extend(digits.iter().rev());
    let checksum = create_checksum(hrp, &values);

    let mut out = String::with_capacity(hrp.len() + 1 + values.len() + CHECKSUM_LENGTH);
    out.push_str(hrp);
    out.push('1');
    for &v in values.iter().chain(checksum.iter()) {
        out.push(CHARSET[v as usize] as char);
    }
    out
}

/// Decode a Bech32 string into its human-readable part and payload bytes.
///
/// Inverse of [`encode`]: leading `q` characters in the data part become
/// leading zero bytes, the remaining digits are read back as a big-endian
/// integer, and a checksum-only data part decodes to empty bytes.
pub fn decode(s: &str) -> Result<(String, Vec<u8>), Bech32Error> {
    let (hrp, data) = split(s)?;
    let payload = &data[..data.len() - CHECKSUM_LENGTH];

    let zeros = payload.bytes().take_while(|&b| b == b'q').count();
    let mut n = BigUint::zero();
    for c in payload[zeros..].chars() {
        let v = charset_index(c).expect("split validated the alphabet");
        n = n * 32u32 + u32::from(v);
    }

    let mut bytes = vec![0u8; zeros];
    if !n.is_zero() {
        bytes.extend_from_slice(&n.to_bytes_be());
    }
    Ok((hrp, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checksum-valid strings from the BIP-173 test set.
    #[test]
    fn split_accepts_valid_strings() {
        let valid = [
            "A12UEL5L",
            "a12uel5l",
            "an83characterlonghumanreadablepartthatcontainsthenumber1andtheexcludedcharactersbio1tt5tgs",
            "abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw",
            "split1checkupstagehandshakeupstreamerranterredcaperred2y9e3w",
            "?1ezyfcl",
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4",
        ];
        for s in valid {
            assert!(split(s).is_ok(), "{s} should split cleanly");
        }
    }

    #[test]
    fn split_lowercases_uppercase_input() {
        let (hrp, data) = split("A12UEL5L").unwrap();
        assert_eq!(hrp, "a");
        assert_eq!(data, "2uel5l");
    }

    #[test]
    fn split_uses_last_separator() {
        let (hrp, data) =
            split("an83characterlonghumanreadablepartthatcontainsthenumber1andtheexcludedcharactersbio1tt5tgs")
                .unwrap();
        assert!(hrp.contains('1'));
        assert_eq!(data, "tt5tgs");
    }

    #[test]
    fn split_rejects_invalid_strings() {
        let cases: [(&str, Bech32Error); 8] = [
            ("pzry9x0s0muk", Bech32Error::Format("separator character missing")),
            ("1pzry9x0s0muk", Bech32Error::Format("human-readable part is empty")),
            ("10a06t8", Bech32Error::Format("human-readable part is empty")),
            ("1qzzfhee", Bech32Error::Format("human-readable part is empty")),
            (
                "x1b4n0q5v",
                Bech32Error::Format("data part contains a character outside the alphabet"),
            ),
            (
                "li1dgmt3",
                Bech32Error::Format("data part shorter than the 6-character checksum"),
            ),
            ("A12uEL5L", Bech32Error::Format("mixed-case string")),
            ("A1G7SGD8", Bech32Error::Checksum),
        ];
        for (s, expected) in cases {
            assert_eq!(split(s).unwrap_err(), expected, "for input {s:?}");
        }
    }

    #[test]
    fn split_rejects_hrp_character_range() {
        // 0x20 and 0x7f sit just outside the permitted range.
        assert_eq!(
            split("\u{20}1nwldj5").unwrap_err(),
            Bech32Error::Format("human-readable part contains a character outside 0x21..=0x7e")
        );
        assert_eq!(
            split("\u{7f}1axkwrx").unwrap_err(),
            Bech32Error::Format("human-readable part contains a character outside 0x21..=0x7e")
        );
    }

    #[test]
    fn split_rejects_overlong_string() {
        let s = format!("an84characterslonghumanreadablepart1{}", "q".repeat(60));
        assert!(s.len() > 90);
        assert_eq!(
            split(&s).unwrap_err(),
            Bech32Error::Format("overall length exceeds 90 characters")
        );
    }

    #[test]
    fn encode_known_values() {
        assert_eq!(encode("bc", b""), "bc1gmk9yu");
        assert_eq!(encode("bc", &[0x00]), "bc1q9zpgru");
        assert_eq!(encode("bc", &[0x00, 0x00, 0x01, 0x02]), "bc1qqgz3h3a5g");
        assert_eq!(
            encode("tb", &hex::decode("751e76e8199196d454941c45d1b3a323f1433bd6").unwrap()),
            "tb1w508d6qejxtdg4y5r3zarvary0c5xw7kzp034v"
        );
        assert_eq!(
            encode("example", b"hello world"),
            "example1rgv4kxcmeqwahhymryn8lc7p"
        );
    }

    #[test]
    fn decode_inverts_encode() {
        let payloads: [&[u8]; 6] = [
            b"",
            &[0x00],
            &[0x00, 0x00, 0x01, 0x02],
            &[0x20],
            &[0xff; 20],
            b"hello world",
        ];
        for payload in payloads {
            let encoded = encode("bc", payload);
            let (hrp, decoded) = decode(&encoded).unwrap();
            assert_eq!(hrp, "bc");
            assert_eq!(decoded, payload, "payload {payload:02x?}");
        }
    }

    #[test]
    fn decode_checksum_only_data_is_empty() {
        let (hrp, payload) = decode("a12uel5l").unwrap();
        assert_eq!(hrp, "a");
        assert!(payload.is_empty());
    }

    #[test]
    fn checksum_survives_hrp_case_folding() {
        let upper = decode("BC1QQGZ3H3A5G").unwrap();
        let lower = decode("bc1qqgz3h3a5g").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn create_and_verify_agree() {
        let data = [0u8, 1, 2, 3, 30, 31];
        let checksum = create_checksum("hrp", &data);
        let mut full = data.to_vec();
        full.extend_from_slice(&checksum);
        assert!(verify_checksum("hrp", &full));

        // Any corrupted group must fail.
        full[2] ^= 1;
        assert!(!verify_checksum("hrp", &full));
    }

    #[test]
    fn polymod_of_empty_sequence_is_seed() {
        assert_eq!(polymod(&[]), 1);
    }

    #[test]
    fn hrp_expand_layout() {
        // 'b' = 0x62, 'c' = 0x63: high bits 3, separator, low bits 2 and 3.
        assert_eq!(hrp_expand("bc"), vec![3, 3, 0, 2, 3]);
    }
}
