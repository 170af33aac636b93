use std::fmt;

use quill_types::Type;
use serde::Serialize;

/// The conversion a [`Cast`] asks the code generator to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion<'env> {
    /// Source and target are the same type.
    None,
    /// Implicit primitive widening.
    Widen,
    /// Primitive narrowing or cross-family conversion (e.g. `byte` to `char`).
    Narrow,
    /// Convert the primitive source to `primitive`, then box it. The target is the wrapper of
    /// `primitive`, or `Object`/`Number`.
    Box { primitive: &'env Type },
    /// Unbox through the wrapper type `boxed`, then convert the primitive to the target. When
    /// the source is `Object` or `Number` a checked downcast to `boxed` comes first.
    Unbox { boxed: &'env Type },
    /// Wrap a primitive as `def`.
    ToDynamic,
    /// Unwrap `def` to a primitive; checked at runtime.
    FromDynamic,
    CharToString,
    StringToChar,
    /// Up- or downcast along the host class hierarchy.
    Reference,
}

/// Fieldless view of [`Conversion`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CastKind {
    None,
    Widen,
    Narrow,
    Box,
    Unbox,
    ToDynamic,
    FromDynamic,
    CharToString,
    StringToChar,
    Reference,
}

impl<'env> Conversion<'env> {
    pub fn kind(&self) -> CastKind {
        match self {
            Conversion::None => CastKind::None,
            Conversion::Widen => CastKind::Widen,
            Conversion::Narrow => CastKind::Narrow,
            Conversion::Box { .. } => CastKind::Box,
            Conversion::Unbox { .. } => CastKind::Unbox,
            Conversion::ToDynamic => CastKind::ToDynamic,
            Conversion::FromDynamic => CastKind::FromDynamic,
            Conversion::CharToString => CastKind::CharToString,
            Conversion::StringToChar => CastKind::StringToChar,
            Conversion::Reference => CastKind::Reference,
        }
    }

    /// Wrapper or primitive type the value passes through, if any.
    pub fn via(&self) -> Option<&'env Type> {
        match *self {
            Conversion::Box { primitive } => Some(primitive),
            Conversion::Unbox { boxed } => Some(boxed),
            _ => None,
        }
    }
}

impl fmt::Display for CastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CastKind::None => "none",
            CastKind::Widen => "widen",
            CastKind::Narrow => "narrow",
            CastKind::Box => "box",
            CastKind::Unbox => "unbox",
            CastKind::ToDynamic => "to_dynamic",
            CastKind::FromDynamic => "from_dynamic",
            CastKind::CharToString => "char_to_string",
            CastKind::StringToChar => "string_to_char",
            CastKind::Reference => "reference",
        })
    }
}

/// A conversion the decision engine has validated as legal.
///
/// Only [`crate::decide_cast`] constructs casts, so holding one is proof that the pair was
/// checked; [`crate::apply_cast`] relies on that.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cast<'env> {
    from: &'env Type,
    to: &'env Type,
    explicit: bool,
    conversion: Conversion<'env>,
}

impl<'env> Cast<'env> {
    pub(crate) fn new(
        from: &'env Type,
        to: &'env Type,
        explicit: bool,
        conversion: Conversion<'env>,
    ) -> Self {
        Self {
            from,
            to,
            explicit,
            conversion,
        }
    }

    pub fn from(&self) -> &'env Type {
        self.from
    }

    pub fn to(&self) -> &'env Type {
        self.to
    }

    /// Whether the conversion is treated as explicit.
    ///
    /// This can be `true` even when the caller asked for an implicit cast: unwrapping `def`
    /// always carries a runtime check.
    pub fn explicit(&self) -> bool {
        self.explicit
    }

    pub fn conversion(&self) -> Conversion<'env> {
        self.conversion
    }

    pub fn kind(&self) -> CastKind {
        self.conversion.kind()
    }
}

impl fmt::Display for Cast<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({}", self.from, self.to, self.kind())?;
        if let Some(via) = self.conversion.via() {
            write!(f, " via {via}")?;
        }
        if self.explicit {
            f.write_str(", explicit")?;
        }
        f.write_str(")")
    }
}
