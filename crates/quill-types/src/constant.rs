use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Sort;

/// A compile-time constant value attached to an expression by the front end.
///
/// `Char` holds a UTF-16 code unit so that every value in `[0, 65535]` (including lone
/// surrogates produced by numeric narrowing) is representable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Constant {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

impl Constant {
    /// Sort of the primitive (or `String`) type this value naturally belongs to.
    pub fn sort(&self) -> Sort {
        match self {
            Constant::Bool(_) => Sort::Bool,
            Constant::Byte(_) => Sort::Byte,
            Constant::Short(_) => Sort::Short,
            Constant::Char(_) => Sort::Char,
            Constant::Int(_) => Sort::Int,
            Constant::Long(_) => Sort::Long,
            Constant::Float(_) => Sort::Float,
            Constant::Double(_) => Sort::Double,
            Constant::String(_) => Sort::String,
        }
    }

    /// Integral value of the constant, with `char` read as its code unit.
    ///
    /// Returns `None` for booleans, decimals and strings.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Constant::Byte(v) => Some(v.into()),
            Constant::Short(v) => Some(v.into()),
            Constant::Char(v) => Some(v.into()),
            Constant::Int(v) => Some(v.into()),
            Constant::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn char(c: char) -> Option<Self> {
        let mut buf = [0u16; 2];
        match c.encode_utf16(&mut buf) {
            [unit] => Some(Constant::Char(*unit)),
            _ => None,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Bool(v) => write!(f, "{v}"),
            Constant::Byte(v) => write!(f, "{v}"),
            Constant::Short(v) => write!(f, "{v}"),
            Constant::Char(v) => match char::from_u32(u32::from(*v)) {
                Some(c) => write!(f, "'{}'", c.escape_default()),
                None => write!(f, "'\\u{{{v:04x}}}'"),
            },
            Constant::Int(v) => write!(f, "{v}"),
            Constant::Long(v) => write!(f, "{v}L"),
            Constant::Float(v) => write!(f, "{v:?}f"),
            Constant::Double(v) => write!(f, "{v:?}"),
            Constant::String(v) => write!(f, "{v:?}"),
        }
    }
}
