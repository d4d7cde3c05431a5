//! # Random Population
//!
//! Seedable generation of schema-valid messages for round-trip and property
//! tests. Unless `easy` is set, messages usually also carry synthetic unknown
//! fields, encoded exactly as a marshaler would encode real ones, so the
//! unknown-field path is exercised along with the known one.
//!
//! ## Usage
//! ```rust
//! use protowire::{SizeMessage, WireMessage};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let msg = SizeMessage::new_populated(&mut rng, false);
//! let bytes = msg.marshal().unwrap();
//! assert_eq!(SizeMessage::decode(&bytes).unwrap(), msg);
//! ```

use crate::core::tag::{pack_tag, WireType};
use crate::core::varint::put_varint;
use crate::protocol::message::WireMessage;
use crate::protocol::size_message::SizeMessage;
use rand::Rng;

/// Maximum length of generated text and length-delimited payloads (exclusive)
const MAX_RANDOM_LEN: usize = 100;

/// Maximum number of synthetic unknown fields per message (exclusive)
const MAX_UNKNOWN_FIELDS: usize = 5;

/// Spread of synthetic field numbers above the first unknown number
const UNKNOWN_FIELD_SPREAD: u32 = 100;

impl SizeMessage {
    /// Generate a random message.
    ///
    /// Each field is present with probability 4/5. Without `easy`, unknown
    /// bytes are synthesized with probability 9/10.
    pub fn new_populated<R: Rng + ?Sized>(rng: &mut R, easy: bool) -> Self {
        let mut msg = Self::new();
        if rng.random_range(0..5) != 0 {
            msg.size = Some(random_int63(rng));
        }
        if rng.random_range(0..5) != 0 {
            msg.equal = Some(rng.random_range(0..2) == 0);
        }
        if rng.random_range(0..5) != 0 {
            msg.string = Some(random_string(rng));
        }
        if !easy && rng.random_range(0..10) != 0 {
            let first_unknown = Self::descriptor().max_field_number() + 1;
            msg.unknown_fields = random_unrecognized(rng, first_unknown);
        }
        msg
    }
}

/// A non-negative 63-bit magnitude with a random sign
fn random_int63<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    let v = rng.random_range(0..=i64::MAX);
    if rng.random_range(0..2) == 0 {
        -v
    } else {
        v
    }
}

/// One symbol from `0-9A-Za-z`
fn random_symbol<R: Rng + ?Sized>(rng: &mut R) -> char {
    let n: u8 = rng.random_range(0..62);
    char::from(match n {
        0..=9 => b'0' + n,
        10..=35 => b'A' + (n - 10),
        _ => b'a' + (n - 36),
    })
}

/// Random alphanumeric text shorter than 100 symbols
pub fn random_string<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.random_range(0..MAX_RANDOM_LEN);
    (0..len).map(|_| random_symbol(rng)).collect()
}

/// Up to four synthetic fields numbered from `min_field_number` upward.
///
/// Wire types are drawn from varint, fixed64, length-delimited and fixed32;
/// groups are never produced since a lone start marker would be unterminated.
pub fn random_unrecognized<R: Rng + ?Sized>(rng: &mut R, min_field_number: u32) -> Vec<u8> {
    let count = rng.random_range(0..MAX_UNKNOWN_FIELDS);
    let mut buf = Vec::new();
    for _ in 0..count {
        let wire_type = match rng.random_range(0..4u8) {
            0 => WireType::Varint,
            1 => WireType::Fixed64,
            2 => WireType::LengthDelimited,
            _ => WireType::Fixed32,
        };
        let field_number = min_field_number + rng.random_range(0..UNKNOWN_FIELD_SPREAD);
        random_field(&mut buf, rng, field_number, wire_type);
    }
    buf
}

/// Append one random field with the given number and wire type to `buf`.
///
/// Group wire types are remapped to fixed32, so the output always decodes.
pub fn random_field<R: Rng + ?Sized>(
    buf: &mut Vec<u8>,
    rng: &mut R,
    field_number: u32,
    wire_type: WireType,
) {
    let wire_type = match wire_type {
        WireType::StartGroup | WireType::EndGroup => WireType::Fixed32,
        other => other,
    };
    put_varint(buf, pack_tag(field_number, wire_type));
    match wire_type {
        WireType::Varint => put_varint(buf, random_int63(rng) as u64),
        WireType::Fixed64 => buf.extend_from_slice(&rng.random::<[u8; 8]>()),
        WireType::LengthDelimited => {
            let len = rng.random_range(0..MAX_RANDOM_LEN);
            put_varint(buf, len as u64);
            buf.extend((0..len).map(|_| rng.random::<u8>()));
        }
        _ => buf.extend_from_slice(&rng.random::<[u8; 4]>()),
    }
}
