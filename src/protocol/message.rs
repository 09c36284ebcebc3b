//! Message definitions
//!
//! A protocol message is an address plus an ordered list of typed arguments.

use std::fmt;

use crate::error::{Result, SliderError};

/// Leading character of every type tag string
pub const TYPE_TAG_PREFIX: char = ',';

/// Tag for a 32-bit float argument
pub const FLOAT_TAG: char = 'f';

/// Tag for a 32-bit signed integer argument
pub const INT_TAG: char = 'i';

/// A single wire-representable argument
///
/// Equality compares floats by bit pattern, so a decoded packet compares
/// equal to the message it was encoded from even for NaN payloads.
#[derive(Debug, Clone, Copy)]
pub enum TypedValue {
    Int32(i32),
    Float32(f32),
}

impl TypedValue {
    /// Build an Int32, rejecting values that do not fit in 32 bits
    pub fn int(value: i64) -> Result<Self> {
        i32::try_from(value).map(TypedValue::Int32).map_err(|_| {
            SliderError::Encoding(format!(
                "integer {} is outside the 32-bit signed range [{}, {}]",
                value,
                i32::MIN,
                i32::MAX
            ))
        })
    }

    /// Build a Float32, rejecting finite values beyond the f32 range
    pub fn float(value: f64) -> Result<Self> {
        if value.is_finite() && value.abs() > f32::MAX as f64 {
            return Err(SliderError::Encoding(format!(
                "float {} is too large for a 32-bit float",
                value
            )));
        }
        Ok(TypedValue::Float32(value as f32))
    }

    /// The type tag character for this value
    pub fn tag(&self) -> char {
        match self {
            TypedValue::Int32(_) => INT_TAG,
            TypedValue::Float32(_) => FLOAT_TAG,
        }
    }
}

impl PartialEq for TypedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypedValue::Int32(a), TypedValue::Int32(b)) => a == b,
            (TypedValue::Float32(a), TypedValue::Float32(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for TypedValue {}

impl From<i32> for TypedValue {
    fn from(value: i32) -> Self {
        TypedValue::Int32(value)
    }
}

impl From<f32> for TypedValue {
    fn from(value: f32) -> Self {
        TypedValue::Float32(value)
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Int32(v) => write!(f, "{}", v),
            TypedValue::Float32(v) => write!(f, "{:?}", v),
        }
    }
}

/// An OSC-style message: address plus typed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    address: String,
    args: Vec<TypedValue>,
}

impl Message {
    /// Create a message with no arguments
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            args: Vec::new(),
        }
    }

    /// Create a message with the given arguments
    pub fn with_args(address: impl Into<String>, args: Vec<TypedValue>) -> Self {
        Self {
            address: address.into(),
            args,
        }
    }

    /// Append one argument
    pub fn arg(mut self, value: impl Into<TypedValue>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn args(&self) -> &[TypedValue] {
        &self.args
    }

    /// Type tag string derived from the arguments, e.g. `",ffi"`
    pub fn type_tags(&self) -> String {
        type_tags(&self.args)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.address, self.type_tags())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Build the type tag string for an argument list
pub fn type_tags(args: &[TypedValue]) -> String {
    let mut tags = String::with_capacity(args.len() + 1);
    tags.push(TYPE_TAG_PREFIX);
    tags.extend(args.iter().map(TypedValue::tag));
    tags
}
