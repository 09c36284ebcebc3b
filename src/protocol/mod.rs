//! Protocol Module
//!
//! Defines the OSC-style wire protocol spoken by the slider firmware.
//!
//! ## Packet Format
//! ```text
//! packet := pad4(address + \0) + pad4(',' + tags + \0) + args
//! ```
//!
//! ### Type Tags
//! - `f`: 32-bit IEEE-754 float, big-endian
//! - `i`: 32-bit two's complement integer, big-endian
//!
//! The codec is pure: no sockets, no logging.

mod codec;
mod message;

pub use codec::{decode, encode, encode_into, encode_message, padded_len, ALIGNMENT, ARG_SIZE};
pub use message::{type_tags, Message, TypedValue, FLOAT_TAG, INT_TAG, TYPE_TAG_PREFIX};
