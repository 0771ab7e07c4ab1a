//! BIP-39 mnemonic phrases and seed derivation.
//!
//! Covers phrase generation from entropy, wordlist and checksum
//! validation, and the PBKDF2-HMAC-SHA512 stretch from phrase to 64-byte
//! seed. The randomness source is injectable; [`generate`] is the
//! OS-backed convenience entry point.

mod wordlist;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use unicode_normalization::UnicodeNormalization;

use crate::hash::{pbkdf2_sha512, sha256};
use crate::PrimitivesError;

/// Entropy sizes accepted for mnemonic generation, in bits.
const VALID_ENTROPY_BITS: [usize; 5] = [128, 160, 192, 224, 256];

/// Word counts of well-formed mnemonics, matching the entropy sizes.
const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// PBKDF2 iteration count fixed by BIP-39.
const PBKDF2_ROUNDS: u32 = 2048;

/// Byte length of a derived seed.
pub const SEED_LENGTH: usize = 64;

/// A mnemonic wordlist language, keyed by its short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// The English list, code `"en"`.
    English,
}

impl Language {
    /// Resolve a short language code such as `"en"`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::English),
            _ => None,
        }
    }

    /// The short code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
        }
    }

    /// The 2048-word list for this language.
    pub fn wordlist(&self) -> &'static [&'static str; 2048] {
        match self {
            Language::English => &wordlist::ENGLISH,
        }
    }
}

/// Generate a mnemonic phrase from fresh OS randomness.
///
/// `entropy_bits` must be one of 128, 160, 192, 224 or 256; anything else
/// fails with `InvalidParameter` before any randomness is drawn. The
/// resulting phrase has 12, 15, 18, 21 or 24 words respectively.
pub fn generate(entropy_bits: usize, language: Language) -> Result<String, PrimitivesError> {
    generate_with_rng(entropy_bits, language, &mut OsRng)
}

/// Generate a mnemonic phrase from a caller-supplied CSPRNG.
pub fn generate_with_rng<R>(
    entropy_bits: usize,
    language: Language,
    rng: &mut R,
) -> Result<String, PrimitivesError>
where
    R: RngCore + CryptoRng,
{
    if !VALID_ENTROPY_BITS.contains(&entropy_bits) {
        return Err(PrimitivesError::InvalidParameter(format!(
            "entropy must be 128, 160, 192, 224 or 256 bits, got {entropy_bits}"
        )));
    }
    let mut entropy = vec![0u8; entropy_bits / 8];
    rng.fill_bytes(&mut entropy);
    from_entropy(&entropy, language)
}

/// Build the phrase encoding `entropy` followed by its checksum bits.
///
/// The checksum is the top `entropy_bits / 32` bits of SHA-256(entropy);
/// the concatenated bit stream is cut into 11-bit wordlist indices.
pub fn from_entropy(entropy: &[u8], language: Language) -> Result<String, PrimitivesError> {
    let entropy_bits = entropy.len() * 8;
    if !VALID_ENTROPY_BITS.contains(&entropy_bits) {
        return Err(PrimitivesError::InvalidParameter(format!(
            "entropy must be 16, 20, 24, 28 or 32 bytes, got {}",
            entropy.len()
        )));
    }
    let checksum_bits = entropy_bits / 32;
    let word_count = (entropy_bits + checksum_bits) / 11;
    let digest = sha256(entropy);

    let mut indices = Vec::with_capacity(word_count);
    let mut acc = 0u32;
    let mut bits = 0usize;
    for byte in entropy.iter().copied().chain(std::iter::once(digest[0])) {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= 11 && indices.len() < word_count {
            indices.push(((acc >> (bits - 11)) & 0x7ff) as usize);
            bits -= 11;
        }
    }

    let wordlist = language.wordlist();
    let words: Vec<&str> = indices.iter().map(|&i| wordlist[i]).collect();
    Ok(words.join(" "))
}

/// Check `phrase` against a language's wordlist and its checksum bits.
pub fn validate(phrase: &str, language: Language) -> Result<(), PrimitivesError> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if !VALID_WORD_COUNTS.contains(&words.len()) {
        return Err(PrimitivesError::InvalidMnemonic(format!(
            "{} words; expected 12, 15, 18, 21 or 24",
            words.len()
        )));
    }

    let wordlist = language.wordlist();
    let mut indices = Vec::with_capacity(words.len());
    for word in &words {
        let index = wordlist.iter().position(|w| w == word).ok_or_else(|| {
            PrimitivesError::InvalidMnemonic(format!("word {word:?} is not in the wordlist"))
        })?;
        indices.push(index as u32);
    }

    let total_bits = indices.len() * 11;
    let checksum_bits = total_bits / 33;
    let entropy_bytes = (total_bits - checksum_bits) / 8;

    // Rebuild the entropy from the 11-bit stream; the checksum bits are
    // whatever remains in the accumulator afterwards.
    let mut entropy = Vec::with_capacity(entropy_bytes);
    let mut acc = 0u32;
    let mut bits = 0usize;
    for &index in &indices {
        acc = (acc << 11) | index;
        bits += 11;
        while bits >= 8 && entropy.len() < entropy_bytes {
            entropy.push(((acc >> (bits - 8)) & 0xff) as u8);
            bits -= 8;
        }
    }

    let provided = (acc & ((1u32 << checksum_bits) - 1)) as u8;
    let expected = sha256(&entropy)[0] >> (8 - checksum_bits);
    if provided != expected {
        return Err(PrimitivesError::InvalidMnemonic(
            "checksum bits do not match the entropy".to_string(),
        ));
    }
    Ok(())
}

/// Derive the 64-byte seed for `phrase` and `passphrase`.
///
/// Both strings are NFKD-normalized before hashing, then stretched with
/// PBKDF2-HMAC-SHA512 over the salt `"mnemonic" + passphrase` for 2048
/// rounds. When `language` is supplied the phrase must pass wordlist and
/// checksum validation first; when it is `None` any string is accepted
/// and stretched as-is. The no-verification mode is deliberate, so
/// callers must not treat a successful call as proof of a well-formed
/// mnemonic.
pub fn seed_from_phrase(
    phrase: &str,
    passphrase: &str,
    language: Option<Language>,
) -> Result<[u8; SEED_LENGTH], PrimitivesError> {
    if let Some(language) = language {
        validate(phrase, language)?;
    }
    let phrase: String = phrase.nfkd().collect();
    let passphrase: String = passphrase.nfkd().collect();
    let salt = format!("mnemonic{passphrase}");

    let mut seed = [0u8; SEED_LENGTH];
    pbkdf2_sha512(phrase.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut seed);
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn wordlist_boundaries() {
        let wordlist = Language::English.wordlist();
        assert_eq!(wordlist[0], "abandon");
        assert_eq!(wordlist[2047], "zoo");
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("en"), Some(Language::English));
        assert_eq!(Language::from_code("xx"), None);
        assert_eq!(Language::English.code(), "en");
    }

    #[test]
    fn generate_rejects_bad_entropy_sizes() {
        for bits in [0, 64, 120, 129, 200, 300] {
            assert!(matches!(
                generate(bits, Language::English),
                Err(PrimitivesError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn generate_word_counts() {
        for (bits, words) in [(128, 12), (160, 15), (192, 18), (224, 21), (256, 24)] {
            let phrase = generate(bits, Language::English).unwrap();
            assert_eq!(phrase.split_whitespace().count(), words);
            validate(&phrase, Language::English).unwrap();
        }
    }

    #[test]
    fn generate_is_deterministic_per_rng() {
        let a = generate_with_rng(128, Language::English, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate_with_rng(128, Language::English, &mut StdRng::seed_from_u64(7)).unwrap();
        let c = generate_with_rng(128, Language::English, &mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    /// Reference vectors from the BIP-39 test set (entropy -> phrase).
    #[test]
    fn from_entropy_reference_vectors() {
        let vectors = [
            (
                "00000000000000000000000000000000",
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
            ),
            (
                "7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f",
                "legal winner thank year wave sausage worth useful legal winner thank yellow",
            ),
            (
                "ffffffffffffffffffffffffffffffff",
                "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
            ),
            (
                "8080808080808080808080808080808080808080808080808080808080808080",
                "letter advice cage absurd amount doctor acoustic avoid letter advice cage absurd amount doctor acoustic avoid letter advice cage absurd amount doctor acoustic bless",
            ),
        ];
        for (entropy_hex, expected) in vectors {
            let entropy = hex::decode(entropy_hex).unwrap();
            let phrase = from_entropy(&entropy, Language::English).unwrap();
            assert_eq!(phrase, expected);
            validate(&phrase, Language::English).unwrap();
        }
    }

    #[test]
    fn validate_rejects_bad_phrases() {
        // Too few words.
        assert!(matches!(
            validate("abandon abandon", Language::English),
            Err(PrimitivesError::InvalidMnemonic(_))
        ));
        // Unknown word.
        assert!(matches!(
            validate(
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon zzzz",
                Language::English
            ),
            Err(PrimitivesError::InvalidMnemonic(_))
        ));
        // Checksum failure: all-"abandon" is not a valid 12-word phrase.
        assert!(matches!(
            validate(
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
                Language::English
            ),
            Err(PrimitivesError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn seed_reference_vectors() {
        let phrase =
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        let seed = seed_from_phrase(phrase, "", Some(Language::English)).unwrap();
        assert_eq!(
            hex::encode(seed),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );

        let seed = seed_from_phrase(phrase, "TREZOR", Some(Language::English)).unwrap();
        assert_eq!(
            hex::encode(seed),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553\
             1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn seed_fifteen_word_vector() {
        let phrase = "crisp curve describe escape consider hip toilet fan \
                      range pen sweet plunge mirror brush raise";
        let seed = seed_from_phrase(phrase, "", Some(Language::English)).unwrap();
        assert_eq!(
            hex::encode(seed),
            "92add1b3e9dc4b160db53dac1178f5e4055c23a3007abb5394ea74d27cca6012\
             70c55eab5d7052b36694efa72aa0dca65505ac72edc8aa9b94021e749b000a0a"
        );
    }

    #[test]
    fn seed_without_language_skips_validation() {
        // Not a mnemonic at all, but the no-verification mode stretches it.
        let seed = seed_from_phrase("definitely not a mnemonic", "", None).unwrap();
        assert_eq!(seed.len(), SEED_LENGTH);

        // The same string fails once validation is requested.
        assert!(seed_from_phrase("definitely not a mnemonic", "", Some(Language::English)).is_err());
    }
}
