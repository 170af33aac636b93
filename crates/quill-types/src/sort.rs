use std::fmt;

use serde::{Deserialize, Serialize};

/// Category tag of a [`crate::Type`].
///
/// The cast and promotion rules are keyed on sorts rather than on individual types: every
/// primitive, every primitive wrapper and the handful of distinguished reference types get their
/// own sort, and everything else collapses into [`Sort::Reference`] where only host-level
/// assignability matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sort {
    Void,

    Bool,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,

    BoolObj,
    ByteObj,
    ShortObj,
    CharObj,
    IntObj,
    LongObj,
    FloatObj,
    DoubleObj,

    Number,
    String,
    Object,
    Def,
    Reference,
}

impl Sort {
    pub const ALL: [Sort; 22] = [
        Sort::Void,
        Sort::Bool,
        Sort::Byte,
        Sort::Short,
        Sort::Char,
        Sort::Int,
        Sort::Long,
        Sort::Float,
        Sort::Double,
        Sort::BoolObj,
        Sort::ByteObj,
        Sort::ShortObj,
        Sort::CharObj,
        Sort::IntObj,
        Sort::LongObj,
        Sort::FloatObj,
        Sort::DoubleObj,
        Sort::Number,
        Sort::String,
        Sort::Object,
        Sort::Def,
        Sort::Reference,
    ];

    /// The eight value primitives (excludes `void`).
    pub const PRIMITIVES: [Sort; 8] = [
        Sort::Bool,
        Sort::Byte,
        Sort::Short,
        Sort::Char,
        Sort::Int,
        Sort::Long,
        Sort::Float,
        Sort::Double,
    ];

    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            Sort::Void
                | Sort::Bool
                | Sort::Byte
                | Sort::Short
                | Sort::Char
                | Sort::Int
                | Sort::Long
                | Sort::Float
                | Sort::Double
        )
    }

    /// `true` for `boolean` and its wrapper.
    pub fn is_bool(self) -> bool {
        matches!(self, Sort::Bool | Sort::BoolObj)
    }

    /// `true` for numeric primitives, their wrappers and `Number`.
    ///
    /// `char` counts as numeric: arithmetic treats it as its code unit.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Sort::Byte
                | Sort::Short
                | Sort::Char
                | Sort::Int
                | Sort::Long
                | Sort::Float
                | Sort::Double
                | Sort::ByteObj
                | Sort::ShortObj
                | Sort::CharObj
                | Sort::IntObj
                | Sort::LongObj
                | Sort::FloatObj
                | Sort::DoubleObj
                | Sort::Number
        )
    }

    /// `true` for the eight primitive wrapper sorts.
    pub fn is_boxed(self) -> bool {
        self.unboxed().is_some()
    }

    /// Wrapper sort of a primitive, e.g. `Int -> IntObj`.
    pub fn boxed(self) -> Option<Sort> {
        Some(match self {
            Sort::Bool => Sort::BoolObj,
            Sort::Byte => Sort::ByteObj,
            Sort::Short => Sort::ShortObj,
            Sort::Char => Sort::CharObj,
            Sort::Int => Sort::IntObj,
            Sort::Long => Sort::LongObj,
            Sort::Float => Sort::FloatObj,
            Sort::Double => Sort::DoubleObj,
            _ => return None,
        })
    }

    /// Primitive sort wrapped by a wrapper sort, e.g. `IntObj -> Int`.
    pub fn unboxed(self) -> Option<Sort> {
        Some(match self {
            Sort::BoolObj => Sort::Bool,
            Sort::ByteObj => Sort::Byte,
            Sort::ShortObj => Sort::Short,
            Sort::CharObj => Sort::Char,
            Sort::IntObj => Sort::Int,
            Sort::LongObj => Sort::Long,
            Sort::FloatObj => Sort::Float,
            Sort::DoubleObj => Sort::Double,
            _ => return None,
        })
    }

    /// Name under which the canonical type of a primitive or wrapper sort is registered in the
    /// catalog.
    pub fn canonical_type_name(self) -> Option<&'static str> {
        Some(match self {
            Sort::Void => "void",
            Sort::Bool => "boolean",
            Sort::Byte => "byte",
            Sort::Short => "short",
            Sort::Char => "char",
            Sort::Int => "int",
            Sort::Long => "long",
            Sort::Float => "float",
            Sort::Double => "double",
            Sort::BoolObj => "Boolean",
            Sort::ByteObj => "Byte",
            Sort::ShortObj => "Short",
            Sort::CharObj => "Character",
            Sort::IntObj => "Integer",
            Sort::LongObj => "Long",
            Sort::FloatObj => "Float",
            Sort::DoubleObj => "Double",
            Sort::Number => "Number",
            Sort::String => "String",
            Sort::Object => "Object",
            Sort::Def => "def",
            Sort::Reference => return None,
        })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical_type_name() {
            Some(name) => f.write_str(name),
            None => f.write_str("reference"),
        }
    }
}
