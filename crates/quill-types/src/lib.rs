//! Type catalog shared by the Quill analysis crates.
//!
//! Types are created once when a [`TypeStore`] is built and never mutated afterwards. Analysis
//! code only ever borrows them through the [`TypeEnv`] trait, which also answers host-level
//! assignability questions ("is `sub` usable where `sup` is expected").

use std::collections::{HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

mod constant;
mod sort;
mod store;

pub use crate::constant::Constant;
pub use crate::sort::Sort;
pub use crate::store::TypeStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(u32);

impl ClassId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("class table overflow"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(u32);

impl TypeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("type table overflow"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
    /// Host class of a primitive value; only assignable to itself.
    Primitive,
}

/// Host-level shape backing one or more [`Type`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDef {
    pub name: String,
    pub kind: ClassKind,
    pub super_class: Option<ClassId>,
    pub interfaces: Vec<ClassId>,
}

/// Canonical type descriptor.
///
/// Several types may share a host class: `def` is backed by `Object`, which is what lets any
/// reference flow into and out of it through plain assignability.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Type {
    pub id: TypeId,
    pub name: String,
    pub sort: Sort,
    pub class: ClassId,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Handles to the types the analysis phase refers to by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WellKnownTypes {
    pub void: TypeId,
    pub boolean: TypeId,
    pub byte: TypeId,
    pub short: TypeId,
    pub char: TypeId,
    pub int: TypeId,
    pub long: TypeId,
    pub float: TypeId,
    pub double: TypeId,

    pub boolean_obj: TypeId,
    pub byte_obj: TypeId,
    pub short_obj: TypeId,
    pub char_obj: TypeId,
    pub int_obj: TypeId,
    pub long_obj: TypeId,
    pub float_obj: TypeId,
    pub double_obj: TypeId,

    pub number: TypeId,
    pub string: TypeId,
    pub object: TypeId,
    pub def: TypeId,

    pub object_class: ClassId,
}

impl WellKnownTypes {
    /// The canonical type of a sort. `Sort::Reference` has no single canonical type.
    pub fn for_sort(&self, sort: Sort) -> Option<TypeId> {
        Some(match sort {
            Sort::Void => self.void,
            Sort::Bool => self.boolean,
            Sort::Byte => self.byte,
            Sort::Short => self.short,
            Sort::Char => self.char,
            Sort::Int => self.int,
            Sort::Long => self.long,
            Sort::Float => self.float,
            Sort::Double => self.double,
            Sort::BoolObj => self.boolean_obj,
            Sort::ByteObj => self.byte_obj,
            Sort::ShortObj => self.short_obj,
            Sort::CharObj => self.char_obj,
            Sort::IntObj => self.int_obj,
            Sort::LongObj => self.long_obj,
            Sort::FloatObj => self.float_obj,
            Sort::DoubleObj => self.double_obj,
            Sort::Number => self.number,
            Sort::String => self.string,
            Sort::Object => self.object,
            Sort::Def => self.def,
            Sort::Reference => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("type `{0}` is already defined")]
    DuplicateType(String),

    #[error("unknown class id {0:?}")]
    UnknownClass(ClassId),
}

/// Read-only view of a type catalog.
pub trait TypeEnv {
    fn ty(&self, id: TypeId) -> &Type;

    fn type_by_name(&self, name: &str) -> Option<&Type>;

    fn class(&self, id: ClassId) -> Option<&ClassDef>;

    fn lookup_class(&self, name: &str) -> Option<ClassId>;

    fn well_known(&self) -> &WellKnownTypes;

    /// Canonical type for `sort`, e.g. `Sort::Int -> int`.
    fn canonical(&self, sort: Sort) -> Option<&Type> {
        self.well_known().for_sort(sort).map(|id| self.ty(id))
    }

    /// Host-level assignability: can a value whose class is `sub` be used where `sup` is
    /// expected?
    ///
    /// Primitive host classes are assignable only to themselves. Every other class is assignable
    /// to `Object`, including interfaces that do not list it.
    fn is_assignable_from(&self, sup: ClassId, sub: ClassId) -> bool {
        if sup == sub {
            return true;
        }

        let Some(sub_def) = self.class(sub) else {
            return false;
        };
        if sub_def.kind == ClassKind::Primitive {
            return false;
        }
        if sup == self.well_known().object_class {
            return true;
        }

        let mut queue: VecDeque<ClassId> = VecDeque::new();
        let mut seen: HashSet<ClassId> = HashSet::new();
        queue.push_back(sub);

        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            if current == sup {
                return true;
            }
            let Some(def) = self.class(current) else {
                continue;
            };
            queue.extend(def.super_class);
            queue.extend(def.interfaces.iter().copied());
        }

        false
    }
}
