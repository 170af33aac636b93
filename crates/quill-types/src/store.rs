use std::collections::HashMap;

use crate::{CatalogError, ClassDef, ClassId, ClassKind, Sort, Type, TypeEnv, TypeId, WellKnownTypes};

/// In-memory type catalog.
///
/// [`TypeStore::default`] is the minimal runtime: primitives, wrappers, `def`, `String` and a few
/// collection interfaces, enough to exercise every sort the analysis phase knows about. Extra
/// classes are registered with [`TypeStore::add_class`] before the store is shared.
#[derive(Clone, Debug)]
pub struct TypeStore {
    classes: Vec<ClassDef>,
    class_by_name: HashMap<String, ClassId>,
    types: Vec<Type>,
    type_by_name: HashMap<String, TypeId>,
    well_known: WellKnownTypes,
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::with_minimal_runtime()
    }
}

impl TypeStore {
    pub fn with_minimal_runtime() -> Self {
        let mut b = Builder::default();

        let object = b.class("Object", ClassKind::Class, None, &[]);
        let serializable = b.class("Serializable", ClassKind::Interface, None, &[]);
        let comparable = b.class("Comparable", ClassKind::Interface, None, &[]);
        let char_sequence = b.class("CharSequence", ClassKind::Interface, None, &[]);
        let number = b.class("Number", ClassKind::Class, Some(object), &[serializable]);
        let boxed_ifaces = [serializable, comparable];

        let void = b.primitive("void", Sort::Void);
        let boolean = b.primitive("boolean", Sort::Bool);
        let byte = b.primitive("byte", Sort::Byte);
        let short = b.primitive("short", Sort::Short);
        let char = b.primitive("char", Sort::Char);
        let int = b.primitive("int", Sort::Int);
        let long = b.primitive("long", Sort::Long);
        let float = b.primitive("float", Sort::Float);
        let double = b.primitive("double", Sort::Double);

        let boolean_obj = b.reference("Boolean", Sort::BoolObj, Some(object), &boxed_ifaces);
        let byte_obj = b.reference("Byte", Sort::ByteObj, Some(number), &[comparable]);
        let short_obj = b.reference("Short", Sort::ShortObj, Some(number), &[comparable]);
        let char_obj = b.reference("Character", Sort::CharObj, Some(object), &boxed_ifaces);
        let int_obj = b.reference("Integer", Sort::IntObj, Some(number), &[comparable]);
        let long_obj = b.reference("Long", Sort::LongObj, Some(number), &[comparable]);
        let float_obj = b.reference("Float", Sort::FloatObj, Some(number), &[comparable]);
        let double_obj = b.reference("Double", Sort::DoubleObj, Some(number), &[comparable]);

        let string = b.reference(
            "String",
            Sort::String,
            Some(object),
            &[serializable, comparable, char_sequence],
        );

        let object_ty = b.ty("Object", Sort::Object, object);
        let number_ty = b.ty("Number", Sort::Number, number);
        let def = b.ty("def", Sort::Def, object);
        b.ty("Serializable", Sort::Reference, serializable);
        b.ty("Comparable", Sort::Reference, comparable);
        b.ty("CharSequence", Sort::Reference, char_sequence);

        let iterable = b.interface("Iterable", &[]);
        let collection = b.interface("Collection", &[iterable]);
        let list = b.interface("List", &[collection]);
        b.reference("ArrayList", Sort::Reference, Some(object), &[list, serializable]);
        let map = b.interface("Map", &[]);
        b.reference("HashMap", Sort::Reference, Some(object), &[map, serializable]);

        let well_known = WellKnownTypes {
            void,
            boolean,
            byte,
            short,
            char,
            int,
            long,
            float,
            double,
            boolean_obj,
            byte_obj,
            short_obj,
            char_obj,
            int_obj,
            long_obj,
            float_obj,
            double_obj,
            number: number_ty,
            string,
            object: object_ty,
            def,
            object_class: object,
        };

        TypeStore {
            classes: b.classes,
            class_by_name: b.class_by_name,
            types: b.types,
            type_by_name: b.type_by_name,
            well_known,
        }
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_by_name.get(name).copied()
    }

    pub fn type_id(&self, name: &str) -> Option<TypeId> {
        self.type_by_name.get(name).copied()
    }

    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.types.iter()
    }

    /// Register a user class together with its reference type (sort [`Sort::Reference`]).
    pub fn add_class(&mut self, def: ClassDef) -> Result<ClassId, CatalogError> {
        if self.type_by_name.contains_key(&def.name) || self.class_by_name.contains_key(&def.name)
        {
            return Err(CatalogError::DuplicateType(def.name));
        }
        for parent in def.super_class.iter().chain(def.interfaces.iter()) {
            if parent.index() >= self.classes.len() {
                return Err(CatalogError::UnknownClass(*parent));
            }
        }

        let id = ClassId::from_index(self.classes.len());
        let type_id = TypeId::from_index(self.types.len());
        tracing::debug!(target: "quill.types", name = %def.name, ?id, "registering class");

        self.class_by_name.insert(def.name.clone(), id);
        self.type_by_name.insert(def.name.clone(), type_id);
        self.types.push(Type {
            id: type_id,
            name: def.name.clone(),
            sort: Sort::Reference,
            class: id,
        });
        self.classes.push(def);
        Ok(id)
    }
}

impl TypeEnv for TypeStore {
    fn ty(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    fn type_by_name(&self, name: &str) -> Option<&Type> {
        self.type_id(name).map(|id| self.ty(id))
    }

    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.index())
    }

    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        self.class_id(name)
    }

    fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }
}

#[derive(Default)]
struct Builder {
    classes: Vec<ClassDef>,
    class_by_name: HashMap<String, ClassId>,
    types: Vec<Type>,
    type_by_name: HashMap<String, TypeId>,
}

impl Builder {
    fn class(
        &mut self,
        name: &str,
        kind: ClassKind,
        super_class: Option<ClassId>,
        interfaces: &[ClassId],
    ) -> ClassId {
        let id = ClassId::from_index(self.classes.len());
        self.classes.push(ClassDef {
            name: name.to_string(),
            kind,
            super_class,
            interfaces: interfaces.to_vec(),
        });
        self.class_by_name.insert(name.to_string(), id);
        id
    }

    fn ty(&mut self, name: &str, sort: Sort, class: ClassId) -> TypeId {
        let id = TypeId::from_index(self.types.len());
        self.types.push(Type {
            id,
            name: name.to_string(),
            sort,
            class,
        });
        self.type_by_name.insert(name.to_string(), id);
        id
    }

    fn primitive(&mut self, name: &str, sort: Sort) -> TypeId {
        let class = self.class(name, ClassKind::Primitive, None, &[]);
        self.ty(name, sort, class)
    }

    fn reference(
        &mut self,
        name: &str,
        sort: Sort,
        super_class: Option<ClassId>,
        interfaces: &[ClassId],
    ) -> TypeId {
        let class = self.class(name, ClassKind::Class, super_class, interfaces);
        self.ty(name, sort, class)
    }

    /// Interface class plus its reference type; returns the class so it can be implemented.
    fn interface(&mut self, name: &str, extends: &[ClassId]) -> ClassId {
        let class = self.class(name, ClassKind::Interface, None, extends);
        self.ty(name, Sort::Reference, class);
        class
    }
}
