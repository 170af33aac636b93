use quill_types::{CatalogError, ClassDef, ClassKind, Sort, TypeEnv, TypeStore};

use pretty_assertions::assert_eq;

#[test]
fn default_store_defines_a_canonical_type_for_every_named_sort() {
    let env = TypeStore::default();

    for sort in Sort::ALL {
        if sort == Sort::Reference {
            assert!(env.canonical(sort).is_none());
            continue;
        }
        let ty = env
            .canonical(sort)
            .unwrap_or_else(|| panic!("missing canonical type for {sort:?}"));
        assert_eq!(ty.sort, sort);
        assert_eq!(Some(ty.name.as_str()), sort.canonical_type_name());
        assert_eq!(env.type_by_name(&ty.name), Some(ty));
    }
}

#[test]
fn wrappers_are_numbers_and_everything_reaches_object() {
    let env = TypeStore::with_minimal_runtime();
    let object = env.well_known().object_class;
    let number = env.class_id("Number").unwrap();

    for name in ["Byte", "Short", "Integer", "Long", "Float", "Double"] {
        let class = env.class_id(name).unwrap();
        assert!(env.is_assignable_from(number, class), "{name} should extend Number");
        assert!(env.is_assignable_from(object, class));
        assert!(!env.is_assignable_from(class, number));
    }

    let character = env.class_id("Character").unwrap();
    let boolean = env.class_id("Boolean").unwrap();
    assert!(!env.is_assignable_from(number, character));
    assert!(!env.is_assignable_from(number, boolean));

    let list = env.class_id("List").unwrap();
    assert!(env.is_assignable_from(object, list), "interfaces are assignable to Object");
}

#[test]
fn primitive_classes_are_only_assignable_to_themselves() {
    let env = TypeStore::default();
    let int = env.type_by_name("int").unwrap().class;
    let long = env.type_by_name("long").unwrap().class;
    let object = env.well_known().object_class;

    assert!(env.is_assignable_from(int, int));
    assert!(!env.is_assignable_from(long, int));
    assert!(!env.is_assignable_from(object, int));
    assert!(!env.is_assignable_from(int, object));
}

#[test]
fn def_shares_the_object_host_class() {
    let env = TypeStore::default();
    let def = env.type_by_name("def").unwrap();
    let object = env.type_by_name("Object").unwrap();

    assert_eq!(def.class, object.class);
    assert_eq!(def.sort, Sort::Def);
    assert_ne!(def, object);
}

#[test]
fn collection_hierarchy_is_transitive() {
    let env = TypeStore::default();
    let array_list = env.class_id("ArrayList").unwrap();
    let iterable = env.class_id("Iterable").unwrap();
    let map = env.class_id("Map").unwrap();

    assert!(env.is_assignable_from(iterable, array_list));
    assert!(!env.is_assignable_from(map, array_list));
    assert_eq!(env.class(iterable).unwrap().kind, ClassKind::Interface);
}

#[test]
fn collection_interfaces_have_reference_types() {
    let env = TypeStore::default();
    for name in ["Iterable", "Collection", "List", "Map"] {
        let class = env.class_id(name).unwrap();
        let ty = env.type_by_name(name).unwrap();
        assert_eq!(ty.class, class, "{name}");
        assert_eq!(ty.sort, Sort::Reference, "{name}");
        assert_eq!(env.class(class).unwrap().kind, ClassKind::Interface, "{name}");
        assert_eq!(env.class(class).unwrap().super_class, None, "{name}");
    }

    let list = env.class_id("List").unwrap();
    let collection = env.class_id("Collection").unwrap();
    let hash_map = env.class_id("HashMap").unwrap();
    let map = env.class_id("Map").unwrap();
    assert_eq!(env.class(list).unwrap().interfaces, vec![collection]);
    assert!(env.is_assignable_from(map, hash_map));
}

#[test]
fn add_class_registers_a_reference_type() {
    let mut store = TypeStore::default();
    let object = store.well_known().object_class;
    let list = store.class_id("List").unwrap();

    let id = store
        .add_class(ClassDef {
            name: "LinkedList".to_string(),
            kind: ClassKind::Class,
            super_class: Some(object),
            interfaces: vec![list],
        })
        .expect("fresh class name");

    let ty = store.type_by_name("LinkedList").unwrap();
    assert_eq!(ty.class, id);
    assert_eq!(ty.sort, Sort::Reference);
    assert!(store.is_assignable_from(list, id));
}

#[test]
fn add_class_rejects_duplicates() {
    let mut store = TypeStore::default();
    let err = store
        .add_class(ClassDef {
            name: "String".to_string(),
            kind: ClassKind::Class,
            super_class: None,
            interfaces: vec![],
        })
        .unwrap_err();
    assert_eq!(err, CatalogError::DuplicateType("String".to_string()));
}
