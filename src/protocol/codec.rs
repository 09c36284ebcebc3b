//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────────────────┬──────────────────────┬──────────────────────┐
//! │ address \0 (pad 4)   │ ,tags \0 (pad 4)     │ args (4 bytes each)  │
//! └──────────────────────┴──────────────────────┴──────────────────────┘
//! ```
//!
//! - Strings are UTF-8, always NUL-terminated, then zero-padded to a
//!   multiple of 4 bytes.
//! - `f` arguments are big-endian IEEE-754 f32, `i` arguments big-endian i32.
//! - No length prefix, no checksum.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::message::{Message, TypedValue, FLOAT_TAG, INT_TAG, TYPE_TAG_PREFIX};
use crate::error::{Result, SliderError};

/// Every string segment is padded to this boundary
pub const ALIGNMENT: usize = 4;

/// Size of every encoded argument
pub const ARG_SIZE: usize = 4;

/// Encoded length of a string of `len` UTF-8 bytes (terminator included)
pub fn padded_len(len: usize) -> usize {
    (len + 1).div_ceil(ALIGNMENT) * ALIGNMENT
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode an address and argument list into a packet
pub fn encode(address: &str, args: &[TypedValue]) -> Result<Bytes> {
    let tags = super::message::type_tags(args);
    let capacity = padded_len(address.len()) + padded_len(tags.len()) + ARG_SIZE * args.len();

    let mut buf = BytesMut::with_capacity(capacity);
    encode_into(address, args, &mut buf)?;
    Ok(buf.freeze())
}

/// Encode a message into a packet
pub fn encode_message(message: &Message) -> Result<Bytes> {
    encode(message.address(), message.args())
}

/// Encode into an existing buffer
///
/// The buffer is left untouched if the address is rejected.
pub fn encode_into(address: &str, args: &[TypedValue], buf: &mut BytesMut) -> Result<()> {
    if address.is_empty() {
        return Err(SliderError::Encoding("address must not be empty".to_string()));
    }
    if address.contains('\0') {
        return Err(SliderError::Encoding(format!(
            "address {:?} contains a NUL byte",
            address
        )));
    }

    put_padded_str(buf, address);
    put_padded_str(buf, &super::message::type_tags(args));

    for arg in args {
        match *arg {
            TypedValue::Float32(v) => buf.put_f32(v),
            TypedValue::Int32(v) => buf.put_i32(v),
        }
    }

    Ok(())
}

/// Write `s`, its NUL terminator and zero padding
fn put_padded_str(buf: &mut BytesMut, s: &str) {
    let total = padded_len(s.len());
    buf.put_slice(s.as_bytes());
    buf.put_bytes(0, total - s.len());
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a packet into a message
pub fn decode(bytes: &[u8]) -> Result<Message> {
    let mut buf = bytes;

    let address = read_padded_str(&mut buf, "address")?;
    if address.is_empty() {
        return Err(SliderError::Format("empty address".to_string()));
    }

    let tags = read_padded_str(&mut buf, "type tag")?;
    let tags = tags.strip_prefix(TYPE_TAG_PREFIX).ok_or_else(|| {
        SliderError::Format(format!(
            "type tag string {:?} does not start with '{}'",
            tags, TYPE_TAG_PREFIX
        ))
    })?;

    let mut args = Vec::with_capacity(tags.len());
    for (index, tag) in tags.chars().enumerate() {
        if tag != FLOAT_TAG && tag != INT_TAG {
            return Err(SliderError::Format(format!(
                "unknown type tag '{}' at position {}",
                tag, index
            )));
        }
        if buf.remaining() < ARG_SIZE {
            return Err(SliderError::Format(format!(
                "truncated argument {}: expected {} bytes, got {}",
                index,
                ARG_SIZE,
                buf.remaining()
            )));
        }
        let value = if tag == FLOAT_TAG {
            TypedValue::Float32(buf.get_f32())
        } else {
            TypedValue::Int32(buf.get_i32())
        };
        args.push(value);
    }

    if buf.has_remaining() {
        return Err(SliderError::Format(format!(
            "{} trailing bytes after arguments",
            buf.remaining()
        )));
    }

    Ok(Message::with_args(address, args))
}

/// Read one NUL-terminated, 4-byte aligned string and advance past it
fn read_padded_str<'a>(buf: &mut &'a [u8], what: &str) -> Result<&'a str> {
    let data: &'a [u8] = *buf;
    let nul = data
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| SliderError::Format(format!("unterminated {} string", what)))?;

    let total = padded_len(nul);
    if total > data.len() {
        return Err(SliderError::Format(format!(
            "{} padding runs past end of packet: need {} bytes, have {}",
            what,
            total,
            data.len()
        )));
    }
    if data[nul..total].iter().any(|&b| b != 0) {
        return Err(SliderError::Format(format!("non-zero padding after {}", what)));
    }

    let (segment, rest) = data.split_at(total);
    let s = std::str::from_utf8(&segment[..nul])
        .map_err(|e| SliderError::Format(format!("{} is not valid UTF-8: {}", what, e)))?;

    *buf = rest;
    Ok(s)
}
