use quill_config::{CatalogConfig, ClassConfig, ConfigError, LoggingConfig, QuillConfig};
use quill_types::{ClassKind, Sort, TypeEnv, TypeStore};

use pretty_assertions::assert_eq;

#[test]
fn empty_config_uses_defaults() {
    let config = QuillConfig::load_from_str("").unwrap();
    assert_eq!(config, QuillConfig::default());
    assert_eq!(config.logging.level, "warn");
    assert!(config.logging.stderr);
    assert!(!config.logging.json);
    assert!(config.catalog.classes.is_empty());
}

#[test]
fn loads_logging_and_catalog_from_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quill.toml");
    std::fs::write(
        &path,
        r#"
[logging]
level = "debug"
json = true

[[catalog.classes]]
name = "Shape"
kind = "interface"

[[catalog.classes]]
name = "Circle"
super_class = "Object"
interfaces = ["Shape"]
"#,
    )
    .unwrap();

    let config = QuillConfig::load_from_path(&path).unwrap();
    assert_eq!(
        config.logging,
        LoggingConfig {
            level: "debug".to_string(),
            json: true,
            stderr: true,
        }
    );
    assert_eq!(
        config.catalog.classes,
        vec![
            ClassConfig {
                name: "Shape".to_string(),
                kind: ClassKind::Interface,
                super_class: None,
                interfaces: vec![],
            },
            ClassConfig {
                name: "Circle".to_string(),
                kind: ClassKind::Class,
                super_class: Some("Object".to_string()),
                interfaces: vec!["Shape".to_string()],
            },
        ]
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = QuillConfig::load_from_path(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "{err:?}");
}

#[test]
fn unknown_keys_are_rejected() {
    let err = QuillConfig::load_from_str("[logging]\ncolour = true\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err:?}");

    let err = QuillConfig::load_from_str("[[catalog.classes]]\nname = \"A\"\nparent = \"B\"\n")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err:?}");
}

#[test]
fn install_registers_classes_in_order() {
    let config = QuillConfig::load_from_str(
        r#"
[[catalog.classes]]
name = "Shape"
kind = "interface"
interfaces = ["Comparable"]

[[catalog.classes]]
name = "Circle"
interfaces = ["Shape"]

[[catalog.classes]]
name = "Disk"
super_class = "Circle"
"#,
    )
    .unwrap();

    let mut store = TypeStore::default();
    let ids = config.catalog.install(&mut store).unwrap();
    assert_eq!(ids.len(), 3);

    let shape = store.class_id("Shape").unwrap();
    let circle = store.class_id("Circle").unwrap();
    let disk = store.class_id("Disk").unwrap();
    let comparable = store.class_id("Comparable").unwrap();
    assert_eq!(ids, vec![shape, circle, disk]);

    assert_eq!(store.class(circle).unwrap().super_class, Some(store.well_known().object_class));
    assert_eq!(store.class(shape).unwrap().super_class, None);
    assert!(store.is_assignable_from(shape, disk));
    assert!(store.is_assignable_from(comparable, disk));
    assert!(!store.is_assignable_from(disk, circle));

    let disk_ty = store.type_by_name("Disk").unwrap();
    assert_eq!(disk_ty.sort, Sort::Reference);
    assert_eq!(disk_ty.class, disk);
}

fn install_error(classes: Vec<ClassConfig>) -> (String, String) {
    let mut store = TypeStore::default();
    let catalog = CatalogConfig { classes };
    match catalog.install(&mut store) {
        Err(ConfigError::Catalog { class, reason }) => (class, reason),
        other => panic!("expected a catalog error, got {other:?}"),
    }
}

fn class(name: &str, super_class: Option<&str>, interfaces: &[&str]) -> ClassConfig {
    ClassConfig {
        name: name.to_string(),
        kind: ClassKind::Class,
        super_class: super_class.map(str::to_string),
        interfaces: interfaces.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn install_rejects_bad_declarations() {
    assert_eq!(
        install_error(vec![class("Circle", Some("Shape"), &[])]),
        ("Circle".to_string(), "unknown class `Shape`".to_string())
    );
    assert_eq!(
        install_error(vec![class("Circle", None, &["Number"])]),
        ("Circle".to_string(), "`Number` is not an interface".to_string())
    );
    assert_eq!(
        install_error(vec![class("Circle", Some("List"), &[])]),
        ("Circle".to_string(), "`List` is not a class".to_string())
    );
    assert_eq!(
        install_error(vec![class("Wide", Some("int"), &[])]),
        ("Wide".to_string(), "`int` is not a class".to_string())
    );
    assert_eq!(
        install_error(vec![class("String", None, &[])]).1,
        "type `String` is already defined"
    );
    assert_eq!(
        install_error(vec![ClassConfig {
            kind: ClassKind::Primitive,
            ..class("u8", None, &[])
        }])
        .1,
        "primitive classes cannot be declared"
    );
    assert_eq!(
        install_error(vec![ClassConfig {
            kind: ClassKind::Interface,
            ..class("Shape", Some("Object"), &[])
        }])
        .1,
        "an interface cannot have a super class"
    );
}

#[test]
fn catalog_error_names_the_class() {
    let err = ConfigError::Catalog {
        class: "Circle".to_string(),
        reason: "unknown class `Shape`".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "invalid catalog class `Circle`: unknown class `Shape`"
    );
}
