//! Bech32-Kaspa codec.
//!
//! Text form is `{prefix}:{data}{checksum}` where `data` is the version byte
//! followed by the payload, regrouped into 5-bit words and rendered with the
//! bech32 alphabet. The checksum is 8 words of a 40-bit BCH residue computed
//! over the prefix, a zero separator word and the data words.
//!
//! Bit regrouping on decode does not validate padding bits. Existing
//! addresses in the wild depend on that leniency.

use crate::error::{DecodeError, EncodeError};

/// The 32-symbol bech32 alphabet.
const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Number of 5-bit checksum words at the end of the data part.
pub const CHECKSUM_LENGTH: usize = 8;

/// Maximum length of an encoded address.
pub const MAX_LENGTH: usize = 90;

/// Minimum length of an encoded address: one prefix char, separator, checksum.
const MIN_LENGTH: usize = CHECKSUM_LENGTH + 2;

const GENERATOR: [u64; 5] = [
    0x98_f2bc_8e61,
    0x79_b76d_99e2,
    0xf3_3e5f_b3c4,
    0xae_2eab_e2a8,
    0x1e_4f43_e470,
];

/// Reverse lookup from ASCII byte to 5-bit value; -1 marks bytes outside the alphabet.
const CHARSET_REV: [i8; 128] = {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < CHARSET.len() {
        table[CHARSET[i] as usize] = i as i8;
        i += 1;
    }
    table
};

/// A decoded address before prefix and version are checked against known values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Lower-cased prefix.
    pub prefix: String,
    /// First byte of the data part.
    pub version: u8,
    /// Remaining bytes of the data part.
    pub payload: Vec<u8>,
}

/// Encode `payload` under `prefix` with the given version byte.
pub fn encode(prefix: &str, payload: &[u8], version: u8) -> Result<String, EncodeError> {
    let mut data = Vec::with_capacity(1 + payload.len());
    data.push(version);
    data.extend_from_slice(payload);

    let words = convert_bits(&data, 8, 5, true);

    let total = prefix.len() + 1 + words.len() + CHECKSUM_LENGTH;
    if total > MAX_LENGTH {
        return Err(EncodeError::TooLong(total));
    }
    if !prefix.bytes().all(is_printable) {
        return Err(EncodeError::InvalidPrefix(prefix.to_string()));
    }
    let prefix = prefix.to_ascii_lowercase();

    let checksum = create_checksum(&prefix, &words);

    let mut out = String::with_capacity(total);
    out.push_str(&prefix);
    out.push(':');
    out.extend(words.iter().chain(checksum.iter()).map(|&w| to_char(w)));
    Ok(out)
}

/// Decode an address string into its lower-cased prefix, version byte and payload.
pub fn decode(encoded: &str) -> Result<Decoded, DecodeError> {
    if encoded.len() < MIN_LENGTH {
        return Err(DecodeError::InvalidLength(encoded.len()));
    }
    if let Some(c) = encoded.chars().find(|&c| !(c.is_ascii() && is_printable(c as u8))) {
        return Err(DecodeError::InvalidCharacter(c));
    }

    let has_lower = encoded.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = encoded.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(DecodeError::MixedCase);
    }
    let encoded = encoded.to_ascii_lowercase();

    let colon = match encoded.rfind(':') {
        Some(i) if i >= 1 && i + CHECKSUM_LENGTH + 1 <= encoded.len() => i,
        _ => return Err(DecodeError::InvalidSeparator),
    };

    let prefix = &encoded[..colon];
    let data_part = &encoded[colon + 1..];

    let words = data_part
        .bytes()
        .map(from_char)
        .collect::<Result<Vec<u8>, DecodeError>>()?;

    if !verify_checksum(prefix, &words) {
        let split = words.len() - CHECKSUM_LENGTH;
        let expected = create_checksum(prefix, &words[..split])
            .iter()
            .map(|&w| to_char(w))
            .collect();
        return Err(DecodeError::ChecksumMismatch {
            expected,
            actual: data_part[split..].to_string(),
        });
    }

    let data_words = &words[..words.len() - CHECKSUM_LENGTH];
    let bytes = convert_bits(data_words, 5, 8, false);

    let (&version, payload) = bytes.split_first().ok_or(DecodeError::MissingVersion)?;

    Ok(Decoded {
        prefix: prefix.to_string(),
        version,
        payload: payload.to_vec(),
    })
}

fn is_printable(b: u8) -> bool {
    (33..=126).contains(&b)
}

fn to_char(word: u8) -> char {
    CHARSET[usize::from(word & 31)] as char
}

fn from_char(b: u8) -> Result<u8, DecodeError> {
    match CHARSET_REV.get(usize::from(b)) {
        Some(&v) if v >= 0 => Ok(v as u8),
        _ => Err(DecodeError::InvalidDataCharacter(b as char)),
    }
}

/// Low 5 bits of each prefix byte.
fn prefix_words(prefix: &str) -> impl Iterator<Item = u8> + '_ {
    prefix.bytes().map(|b| b & 31)
}

/// BCH residue over 5-bit values, 40 significant bits kept in a u64.
fn polymod(values: impl IntoIterator<Item = u8>) -> u64 {
    let mut checksum: u64 = 1;
    for value in values {
        let top = checksum >> 35;
        checksum = ((checksum & 0x07_ffff_ffff) << 5) ^ u64::from(value);
        for (i, generator) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                checksum ^= generator;
            }
        }
    }
    checksum ^ 1
}

fn create_checksum(prefix: &str, words: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let residue = polymod(
        prefix_words(prefix)
            .chain(std::iter::once(0))
            .chain(words.iter().copied())
            .chain([0u8; CHECKSUM_LENGTH]),
    );

    let mut out = [0u8; CHECKSUM_LENGTH];
    for (i, word) in out.iter_mut().enumerate() {
        *word = ((residue >> (5 * (CHECKSUM_LENGTH - 1 - i))) & 31) as u8;
    }
    out
}

fn verify_checksum(prefix: &str, words: &[u8]) -> bool {
    polymod(
        prefix_words(prefix)
            .chain(std::iter::once(0))
            .chain(words.iter().copied()),
    ) == 0
}

/// Regroup `data` from `from`-bit values into `to`-bit values.
///
/// With `pad`, leftover bits are flushed as a final zero-padded value.
/// Without it they are dropped silently.
fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Vec<u8> {
    let max = (1u32 << to) - 1;
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for &value in data {
        acc = (acc << from) | (u32::from(value) & ((1 << from) - 1));
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max) as u8);
        }
        acc &= (1 << bits) - 1;
    }

    if pad && bits > 0 {
        out.push(((acc << (to - bits)) & max) as u8);
    }

    out
}
