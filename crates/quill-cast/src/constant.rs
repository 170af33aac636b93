use quill_types::{Constant, Sort};

use crate::{Cast, ConstantCastError, InternalConsistencyError};

/// Fold a compile-time constant through a cast produced by [`crate::decide_cast`].
///
/// The cast is trusted, not re-validated. `STRING -> CHAR` requires a single UTF-16 unit. A
/// constant that is not a value of the cast source, or a pair outside the applier's contract, is
/// reported as [`ConstantCastError::Internal`].
pub fn apply_cast(
    location: &str,
    constant: Constant,
    cast: &Cast<'_>,
) -> Result<Constant, ConstantCastError> {
    let from = cast.from().sort;
    let to = cast.to().sort;

    if from == to {
        if constant.sort() != from {
            return Err(internal(location, cast).into());
        }
        return Ok(constant);
    }

    match (from, to, constant) {
        (Sort::String, Sort::Char, Constant::String(value)) => string_to_char(location, &value),
        (Sort::Char, Sort::String, Constant::Char(unit)) => {
            Ok(Constant::String(String::from_utf16_lossy(&[unit])))
        }
        (from, to, constant) if from.is_numeric() && to.is_numeric() => {
            let folded = Numeric::read(from, &constant).and_then(|value| value.convert(to));
            folded.ok_or_else(|| internal(location, cast).into())
        }
        _ => Err(internal(location, cast).into()),
    }
}

fn string_to_char(location: &str, value: &str) -> Result<Constant, ConstantCastError> {
    let mut units = value.encode_utf16();
    match (units.next(), units.next()) {
        (Some(unit), None) => Ok(Constant::Char(unit)),
        (None, _) => Err(ConstantCastError::EmptyString {
            location: location.to_string(),
        }),
        (Some(_), Some(_)) => Err(ConstantCastError::StringLength {
            location: location.to_string(),
        }),
    }
}

fn internal(location: &str, cast: &Cast<'_>) -> InternalConsistencyError {
    tracing::error!(
        target: "quill.cast",
        location,
        from = %cast.from(),
        to = %cast.to(),
        "constant folded through a cast outside the applier contract"
    );
    InternalConsistencyError {
        location: location.to_string(),
        from: cast.from().name.clone(),
        to: cast.to().name.clone(),
    }
}

/// A numeric constant widened to the widest representation of its family.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Numeric {
    Integral(i64),
    Decimal(f64),
}

impl Numeric {
    /// The value must be of exactly the cast source sort.
    fn read(from: Sort, constant: &Constant) -> Option<Self> {
        match (from, constant) {
            (Sort::Byte, Constant::Byte(v)) => Some(Numeric::Integral((*v).into())),
            (Sort::Short, Constant::Short(v)) => Some(Numeric::Integral((*v).into())),
            (Sort::Char, Constant::Char(unit)) => Some(Numeric::Integral((*unit).into())),
            (Sort::Int, Constant::Int(v)) => Some(Numeric::Integral((*v).into())),
            (Sort::Long, Constant::Long(v)) => Some(Numeric::Integral(*v)),
            (Sort::Float, Constant::Float(v)) => Some(Numeric::Decimal((*v).into())),
            (Sort::Double, Constant::Double(v)) => Some(Numeric::Decimal(*v)),
            _ => None,
        }
    }

    /// Narrow to `to` with host conversion semantics: integral targets wrap, decimal sources
    /// saturate to `int` (NaN to zero) before dropping to `byte`/`short`/`char`.
    fn convert(self, to: Sort) -> Option<Constant> {
        Some(match (to, self) {
            (Sort::Byte, Numeric::Integral(v)) => Constant::Byte(v as i8),
            (Sort::Byte, Numeric::Decimal(v)) => Constant::Byte(v as i32 as i8),
            (Sort::Short, Numeric::Integral(v)) => Constant::Short(v as i16),
            (Sort::Short, Numeric::Decimal(v)) => Constant::Short(v as i32 as i16),
            (Sort::Char, Numeric::Integral(v)) => Constant::Char(v as u16),
            (Sort::Char, Numeric::Decimal(v)) => Constant::Char(v as i32 as u16),
            (Sort::Int, Numeric::Integral(v)) => Constant::Int(v as i32),
            (Sort::Int, Numeric::Decimal(v)) => Constant::Int(v as i32),
            (Sort::Long, Numeric::Integral(v)) => Constant::Long(v),
            (Sort::Long, Numeric::Decimal(v)) => Constant::Long(v as i64),
            (Sort::Float, Numeric::Integral(v)) => Constant::Float(v as f32),
            (Sort::Float, Numeric::Decimal(v)) => Constant::Float(v as f32),
            (Sort::Double, Numeric::Integral(v)) => Constant::Double(v as f64),
            (Sort::Double, Numeric::Decimal(v)) => Constant::Double(v),
            _ => return None,
        })
    }
}
