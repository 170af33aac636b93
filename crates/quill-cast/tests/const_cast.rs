use quill_cast::{apply_cast, decide_cast, Cast, ConstantCastError};
use quill_types::{Constant, TypeEnv, TypeStore};

use pretty_assertions::assert_eq;

const LOC: &str = "[1:1]";

fn cast<'a>(env: &'a TypeStore, from: &str, to: &str) -> Cast<'a> {
    let from = env.type_by_name(from).unwrap();
    let to = env.type_by_name(to).unwrap();
    decide_cast(env, LOC, from, to, true, false)
        .unwrap_or_else(|err| panic!("expected a legal cast: {err}"))
}

fn fold(env: &TypeStore, from: &str, to: &str, value: Constant) -> Constant {
    apply_cast(LOC, value, &cast(env, from, to)).unwrap()
}

#[test]
fn identity_returns_the_constant_unchanged() {
    let env = TypeStore::default();
    assert_eq!(fold(&env, "int", "int", Constant::Int(5)), Constant::Int(5));
    assert_eq!(
        fold(&env, "String", "String", Constant::String("x".into())),
        Constant::String("x".into())
    );
}

#[test]
fn integral_narrowing_wraps() {
    let env = TypeStore::default();
    assert_eq!(fold(&env, "int", "byte", Constant::Int(300)), Constant::Byte(44));
    assert_eq!(fold(&env, "int", "short", Constant::Int(70_000)), Constant::Short(4464));
    assert_eq!(fold(&env, "int", "char", Constant::Int(-1)), Constant::Char(0xFFFF));
    assert_eq!(
        fold(&env, "long", "int", Constant::Long(i64::from(i32::MAX) + 1)),
        Constant::Int(i32::MIN)
    );
    assert_eq!(fold(&env, "char", "byte", Constant::Char(0x1FF)), Constant::Byte(-1));
}

#[test]
fn widening_preserves_the_value() {
    let env = TypeStore::default();
    assert_eq!(fold(&env, "byte", "long", Constant::Byte(-7)), Constant::Long(-7));
    assert_eq!(fold(&env, "char", "int", Constant::Char(65)), Constant::Int(65));
    assert_eq!(fold(&env, "float", "double", Constant::Float(0.5)), Constant::Double(0.5));
    // `int -> float` is widening but may round.
    assert_eq!(
        fold(&env, "int", "float", Constant::Int(16_777_217)),
        Constant::Float(16_777_216.0)
    );
}

#[test]
fn decimals_truncate_toward_zero() {
    let env = TypeStore::default();
    assert_eq!(fold(&env, "double", "int", Constant::Double(3.9)), Constant::Int(3));
    assert_eq!(fold(&env, "double", "int", Constant::Double(-3.9)), Constant::Int(-3));
    assert_eq!(fold(&env, "float", "long", Constant::Float(1.5)), Constant::Long(1));
    assert_eq!(fold(&env, "double", "byte", Constant::Double(300.7)), Constant::Byte(44));
    assert_eq!(fold(&env, "double", "int", Constant::Double(f64::NAN)), Constant::Int(0));
}

#[test]
fn char_and_string_fold_both_ways() {
    let env = TypeStore::default();
    assert_eq!(
        fold(&env, "char", "String", Constant::Char(u16::from(b'A'))),
        Constant::String("A".to_string())
    );
    assert_eq!(
        fold(&env, "String", "char", Constant::String("A".to_string())),
        Constant::Char(u16::from(b'A'))
    );
    assert_eq!(
        fold(&env, "String", "char", Constant::String("é".to_string())),
        Constant::Char(0xE9)
    );
}

#[test]
fn string_to_char_requires_exactly_one_unit() {
    let env = TypeStore::default();
    let to_char = cast(&env, "String", "char");

    for value in ["AB", "😀"] {
        let err = apply_cast(LOC, Constant::String(value.to_string()), &to_char).unwrap_err();
        assert_eq!(
            err,
            ConstantCastError::StringLength {
                location: LOC.to_string()
            },
            "{value:?}"
        );
        assert!(!err.is_internal());
    }

    let err = apply_cast(LOC, Constant::String("AB".into()), &to_char).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error[1:1]: Cannot cast [String] with length greater than one to [char]."
    );
}

#[test]
fn empty_string_does_not_fold_to_char() {
    let env = TypeStore::default();
    let err = apply_cast(LOC, Constant::String(String::new()), &cast(&env, "String", "char"))
        .unwrap_err();
    assert_eq!(
        err,
        ConstantCastError::EmptyString {
            location: LOC.to_string()
        }
    );
    assert!(!err.is_internal());
    assert_eq!(err.to_string(), "Error[1:1]: Cannot cast empty [String] to [char].");
}

#[test]
fn constants_outside_the_cast_contract_are_internal_errors() {
    let env = TypeStore::default();

    // A value that does not belong to the cast source.
    let err = apply_cast(LOC, Constant::String("x".into()), &cast(&env, "int", "long")).unwrap_err();
    assert!(err.is_internal());
    assert_eq!(err.to_string(), "Error[1:1]: Cannot cast from [int] to [long].");

    let err = apply_cast(LOC, Constant::Bool(true), &cast(&env, "char", "String")).unwrap_err();
    assert!(err.is_internal());

    // Numeric values of another sort than the cast source.
    let to_byte = cast(&env, "int", "byte");
    for value in [Constant::Double(300.7), Constant::Long(i64::MAX), Constant::Char(65)] {
        let err = apply_cast(LOC, value.clone(), &to_byte).unwrap_err();
        assert!(err.is_internal(), "{value:?}");
        assert_eq!(err.to_string(), "Error[1:1]: Cannot cast from [int] to [byte].");
    }
    let err = apply_cast(LOC, Constant::Byte(-1), &cast(&env, "char", "int")).unwrap_err();
    assert!(err.is_internal());
    let err = apply_cast(LOC, Constant::Float(1.5), &cast(&env, "double", "float")).unwrap_err();
    assert!(err.is_internal());

    // Identity casts still check the value.
    let err = apply_cast(LOC, Constant::Long(1), &cast(&env, "int", "int")).unwrap_err();
    assert!(err.is_internal());

    // Reference casts never carry constants.
    let err = apply_cast(LOC, Constant::String("x".into()), &cast(&env, "String", "Object"))
        .unwrap_err();
    assert!(err.is_internal());
}

#[test]
fn boxing_and_dynamic_casts_are_not_folded() {
    let env = TypeStore::default();
    let int = env.type_by_name("int").unwrap();

    let boxing = decide_cast(&env, LOC, int, env.type_by_name("Integer").unwrap(), false, true)
        .unwrap();
    assert!(apply_cast(LOC, Constant::Int(1), &boxing).unwrap_err().is_internal());

    let to_def = decide_cast(&env, LOC, int, env.type_by_name("def").unwrap(), false, false)
        .unwrap();
    assert!(apply_cast(LOC, Constant::Int(1), &to_def).unwrap_err().is_internal());
}
