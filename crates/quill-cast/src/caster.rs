use quill_types::{Sort, Type, TypeEnv};

use crate::{Cast, CastError, Conversion};

/// How a sort takes part in the conversion matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    /// One of the eight value primitives.
    Value(Sort),
    /// A primitive wrapper; carries the wrapped primitive sort.
    Boxed(Sort),
    /// `Object` or `Number`: a generic home for boxed values.
    Supertype,
    Str,
    Dynamic,
    Void,
    Other,
}

// Every sort is listed so a new one cannot slip through the matrix unclassified.
fn role(sort: Sort) -> Role {
    match sort {
        Sort::Bool
        | Sort::Byte
        | Sort::Short
        | Sort::Char
        | Sort::Int
        | Sort::Long
        | Sort::Float
        | Sort::Double => Role::Value(sort),
        Sort::BoolObj => Role::Boxed(Sort::Bool),
        Sort::ByteObj => Role::Boxed(Sort::Byte),
        Sort::ShortObj => Role::Boxed(Sort::Short),
        Sort::CharObj => Role::Boxed(Sort::Char),
        Sort::IntObj => Role::Boxed(Sort::Int),
        Sort::LongObj => Role::Boxed(Sort::Long),
        Sort::FloatObj => Role::Boxed(Sort::Float),
        Sort::DoubleObj => Role::Boxed(Sort::Double),
        Sort::Object | Sort::Number => Role::Supertype,
        Sort::String => Role::Str,
        Sort::Def => Role::Dynamic,
        Sort::Void => Role::Void,
        Sort::Reference => Role::Other,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Relation {
    Same,
    Widening,
    Narrowing,
    Unrelated,
}

/// Relation between two value primitives.
///
/// `char` is unsigned, so it never widens to `byte` or `short` and neither of those widens to
/// it. `boolean` relates only to itself.
pub(crate) fn primitive_relation(from: Sort, to: Sort) -> Relation {
    use Sort::*;

    if from == to {
        return Relation::Same;
    }

    match (from, to) {
        (Byte, Short | Int | Long | Float | Double)
        | (Short, Int | Long | Float | Double)
        | (Char, Int | Long | Float | Double)
        | (Int, Long | Float | Double)
        | (Long, Float | Double)
        | (Float, Double) => Relation::Widening,
        (
            Byte | Short | Char | Int | Long | Float | Double,
            Byte | Short | Char | Int | Long | Float | Double,
        ) => Relation::Narrowing,
        _ => Relation::Unrelated,
    }
}

/// Decide whether `actual` may be converted to `expected` and how.
///
/// `explicit` is set for user-written casts. `internal` is a compiler-only privilege that
/// unlocks boxing and unboxing; it is never derived from user source. A request that needs a
/// privilege the caller does not hold falls through to the reference rules and normally ends in
/// a [`CastError`].
pub fn decide_cast<'env>(
    env: &'env dyn TypeEnv,
    location: &str,
    actual: &'env Type,
    expected: &'env Type,
    explicit: bool,
    internal: bool,
) -> Result<Cast<'env>, CastError> {
    if actual == expected {
        tracing::trace!(target: "quill.cast", ty = %actual, "identity cast");
        return Ok(Cast::new(actual, expected, explicit, Conversion::None));
    }

    if let Some((conversion, explicit)) = sort_rule(env, actual, expected, explicit, internal) {
        let cast = Cast::new(actual, expected, explicit, conversion);
        tracing::trace!(
            target: "quill.cast",
            from = %actual,
            to = %expected,
            internal,
            kind = %cast.kind(),
            explicit = cast.explicit(),
            "legal cast"
        );
        return Ok(cast);
    }

    let upcast = env.is_assignable_from(expected.class, actual.class);
    let downcast = (explicit || expected.sort == Sort::Def)
        && env.is_assignable_from(actual.class, expected.class);
    if upcast || downcast {
        tracing::trace!(
            target: "quill.cast",
            from = %actual,
            to = %expected,
            explicit,
            upcast,
            "legal reference cast"
        );
        return Ok(Cast::new(actual, expected, explicit, Conversion::Reference));
    }

    tracing::debug!(
        target: "quill.cast",
        location,
        from = %actual,
        to = %expected,
        explicit,
        internal,
        "illegal cast"
    );
    Err(CastError {
        location: location.to_string(),
        actual: actual.name.clone(),
        expected: expected.name.clone(),
    })
}

/// The sort-driven part of the matrix. `None` means "not decided here"; the caller then tries
/// host assignability.
fn sort_rule<'env>(
    env: &'env dyn TypeEnv,
    actual: &'env Type,
    expected: &'env Type,
    explicit: bool,
    internal: bool,
) -> Option<(Conversion<'env>, bool)> {
    match (role(actual.sort), role(expected.sort)) {
        (Role::Value(_), Role::Dynamic) => Some((Conversion::ToDynamic, false)),

        (Role::Value(from), Role::Value(to)) => match primitive_relation(from, to) {
            Relation::Widening => Some((Conversion::Widen, explicit)),
            Relation::Narrowing if explicit => Some((Conversion::Narrow, true)),
            _ => None,
        },

        (Role::Value(from), Role::Supertype) => {
            // `boolean` boxes into `Object` but is not a `Number`.
            let fits = expected.sort == Sort::Object || from.is_numeric();
            (internal && fits).then_some((Conversion::Box { primitive: actual }, explicit))
        }

        (Role::Value(from), Role::Boxed(to)) => {
            if !internal {
                return None;
            }
            let primitive = env.canonical(to)?;
            match primitive_relation(from, to) {
                Relation::Same | Relation::Widening => {
                    Some((Conversion::Box { primitive }, explicit))
                }
                Relation::Narrowing if explicit => Some((Conversion::Box { primitive }, true)),
                _ => None,
            }
        }

        (Role::Value(Sort::Char), Role::Str) => Some((Conversion::CharToString, explicit)),

        (Role::Str, Role::Value(Sort::Char)) => {
            explicit.then_some((Conversion::StringToChar, true))
        }

        (Role::Supertype, Role::Value(to)) => {
            if !(internal && explicit && to.is_numeric()) {
                return None;
            }
            let boxed = env.canonical(to.boxed()?)?;
            Some((Conversion::Unbox { boxed }, true))
        }

        (Role::Boxed(from), Role::Value(to)) => {
            if !internal {
                return None;
            }
            match primitive_relation(from, to) {
                Relation::Same | Relation::Widening => {
                    Some((Conversion::Unbox { boxed: actual }, explicit))
                }
                Relation::Narrowing if explicit => Some((Conversion::Unbox { boxed: actual }, true)),
                _ => None,
            }
        }

        (Role::Dynamic, Role::Value(_)) => Some((Conversion::FromDynamic, true)),

        _ => None,
    }
}
