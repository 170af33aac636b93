//! Common operand types for unary, binary and conditional expressions.
//!
//! Every function returns `None` when the operands have no common type for the operator family;
//! callers turn that into a diagnostic naming both operands (see [`crate::promote_binary`]).
//! `def` is checked first everywhere: an operand of the dynamic type makes the whole operation
//! dynamic.

use std::ops::RangeInclusive;

use quill_types::{Constant, Sort, Type, TypeEnv};

const BYTE_RANGE: RangeInclusive<i64> = (i8::MIN as i64)..=(i8::MAX as i64);
const SHORT_RANGE: RangeInclusive<i64> = (i16::MIN as i64)..=(i16::MAX as i64);
const CHAR_RANGE: RangeInclusive<i64> = (u16::MIN as i64)..=(u16::MAX as i64);

/// Working type of a single numeric operand. Sub-`int` integrals promote to `int`; `float` and
/// `double` are only accepted when `decimal` is set.
pub fn promote_numeric_unary<'env>(
    env: &'env dyn TypeEnv,
    from: &'env Type,
    decimal: bool,
) -> Option<&'env Type> {
    let sort = match from.sort {
        Sort::Def => Sort::Def,
        Sort::Double if decimal => Sort::Double,
        Sort::Float if decimal => Sort::Float,
        Sort::Long => Sort::Long,
        Sort::Int | Sort::Char | Sort::Short | Sort::Byte => Sort::Int,
        _ => return None,
    };
    env.canonical(sort)
}

/// Binary numeric promotion.
pub fn promote_numeric_binary<'env>(
    env: &'env dyn TypeEnv,
    from0: &'env Type,
    from1: &'env Type,
    decimal: bool,
) -> Option<&'env Type> {
    let either = |sort: Sort| from0.sort == sort || from1.sort == sort;

    let sort = if either(Sort::Def) {
        Sort::Def
    } else if decimal && either(Sort::Double) {
        Sort::Double
    } else if decimal && either(Sort::Float) {
        Sort::Float
    } else if either(Sort::Long) {
        Sort::Long
    } else if either(Sort::Int) || either(Sort::Char) || either(Sort::Short) || either(Sort::Byte)
    {
        Sort::Int
    } else {
        return None;
    };
    env.canonical(sort)
}

/// `+`: string concatenation when either side is a `String`, numeric addition otherwise.
pub fn promote_add<'env>(
    env: &'env dyn TypeEnv,
    from0: &'env Type,
    from1: &'env Type,
) -> Option<&'env Type> {
    if from0.sort == Sort::String || from1.sort == Sort::String {
        return env.canonical(Sort::String);
    }
    promote_numeric_binary(env, from0, from1, true)
}

/// `^`: logical xor for booleans (boxed included), integral xor otherwise.
pub fn promote_xor<'env>(
    env: &'env dyn TypeEnv,
    from0: &'env Type,
    from1: &'env Type,
) -> Option<&'env Type> {
    if from0.sort.is_bool() || from1.sort.is_bool() {
        return env.canonical(Sort::Bool);
    }
    promote_numeric_binary(env, from0, from1, false)
}

/// `==` / `!=`: booleans and numerics compare as primitives, anything else as `Object`.
pub fn promote_equality<'env>(
    env: &'env dyn TypeEnv,
    from0: &'env Type,
    from1: &'env Type,
) -> Option<&'env Type> {
    let (sort0, sort1) = (from0.sort, from1.sort);

    if sort0 == Sort::Def || sort1 == Sort::Def {
        return env.canonical(Sort::Def);
    }

    if sort0.is_primitive() && sort1.is_primitive() {
        if sort0.is_bool() && sort1.is_bool() {
            return env.canonical(Sort::Bool);
        }
        if sort0.is_numeric() && sort1.is_numeric() {
            return promote_numeric_binary(env, from0, from1, true);
        }
    }

    env.canonical(Sort::Object)
}

/// Result type of `cond ? e0 : e1`, where `const0`/`const1` are the branch values when known at
/// compile time.
///
/// Integral branches narrower than `int` keep the narrow type when the wider branch is a
/// constant that fits it. Combinations outside the primitive table fall back to `Object`.
pub fn promote_conditional<'env>(
    env: &'env dyn TypeEnv,
    from0: &'env Type,
    from1: &'env Type,
    const0: Option<&Constant>,
    const1: Option<&Constant>,
) -> Option<&'env Type> {
    if from0 == from1 {
        return Some(from0);
    }

    let (sort0, sort1) = (from0.sort, from1.sort);

    if sort0 == Sort::Def || sort1 == Sort::Def {
        return env.canonical(Sort::Def);
    }

    if sort0.is_primitive() && sort1.is_primitive() {
        if sort0.is_bool() && sort1.is_bool() {
            return env.canonical(Sort::Bool);
        }

        let either = |sort: Sort| sort0 == sort || sort1 == sort;
        if either(Sort::Double) {
            return env.canonical(Sort::Double);
        } else if either(Sort::Float) {
            return env.canonical(Sort::Float);
        } else if either(Sort::Long) {
            return env.canonical(Sort::Long);
        }

        if let Some(sort) = conditional_integral(sort0, sort1, const0, const1) {
            return env.canonical(sort);
        }
    }

    // TODO: compute the least upper bound of two reference branches instead of `Object`.
    env.canonical(Sort::Object)
}

/// `narrow` when `constant` is known and inside `range`, `wide` otherwise.
fn narrowed(
    constant: Option<&Constant>,
    range: RangeInclusive<i64>,
    narrow: Sort,
    wide: Sort,
) -> Sort {
    let fits = constant
        .and_then(Constant::as_i64)
        .is_some_and(|value| range.contains(&value));
    if fits {
        narrow
    } else {
        wide
    }
}

/// Pairwise table for `byte`/`short`/`char`/`int` branches.
fn conditional_integral(
    sort0: Sort,
    sort1: Sort,
    const0: Option<&Constant>,
    const1: Option<&Constant>,
) -> Option<Sort> {
    use Sort::{Byte, Char, Int, Short};

    Some(match (sort0, sort1) {
        (Byte, Byte) => Byte,
        (Byte, Short) => narrowed(const1, BYTE_RANGE, Byte, Short),
        (Byte, Char) => Int,
        (Byte, Int) => narrowed(const1, BYTE_RANGE, Byte, Int),

        (Short, Byte) => narrowed(const0, BYTE_RANGE, Byte, Short),
        (Short, Short) => Short,
        (Short, Char) => Int,
        (Short, Int) => narrowed(const1, SHORT_RANGE, Short, Int),

        (Char, Byte) | (Char, Short) => Int,
        (Char, Char) => Char,
        // Known gap: a constant in `char` range yields `byte`, not `char`.
        (Char, Int) => narrowed(const1, CHAR_RANGE, Byte, Int),

        (Int, Byte) => narrowed(const0, BYTE_RANGE, Byte, Int),
        // Known gap: constants in `short`/`char` range yield `byte` as well.
        (Int, Short) => narrowed(const0, SHORT_RANGE, Byte, Int),
        (Int, Char) => narrowed(const0, CHAR_RANGE, Byte, Int),
        (Int, Int) => Int,

        _ => return None,
    })
}
