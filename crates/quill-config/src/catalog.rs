use quill_types::{ClassDef, ClassId, ClassKind, TypeEnv, TypeStore};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Classes declared in the `[catalog]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default)]
    pub classes: Vec<ClassConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassConfig {
    pub name: String,

    #[serde(default = "ClassConfig::default_kind")]
    pub kind: ClassKind,

    /// Defaults to `Object` for classes; interfaces have no super class.
    #[serde(default)]
    pub super_class: Option<String>,

    #[serde(default)]
    pub interfaces: Vec<String>,
}

impl CatalogConfig {
    /// Register every declared class in `store`, in declaration order.
    ///
    /// A class may only refer to classes that already exist, either in the runtime or earlier in
    /// the list. Classes registered before a failing entry stay registered.
    pub fn install(&self, store: &mut TypeStore) -> Result<Vec<ClassId>, ConfigError> {
        let mut installed = Vec::with_capacity(self.classes.len());
        for class in &self.classes {
            let def = class.resolve(store)?;
            let id = store.add_class(def).map_err(|err| ConfigError::Catalog {
                class: class.name.clone(),
                reason: err.to_string(),
            })?;
            installed.push(id);
        }
        tracing::debug!(target: "quill.config", count = installed.len(), "installed catalog classes");
        Ok(installed)
    }
}

impl ClassConfig {
    fn default_kind() -> ClassKind {
        ClassKind::Class
    }

    fn resolve(&self, store: &TypeStore) -> Result<ClassDef, ConfigError> {
        let invalid = |reason: String| ConfigError::Catalog {
            class: self.name.clone(),
            reason,
        };

        if self.kind == ClassKind::Primitive {
            return Err(invalid("primitive classes cannot be declared".to_owned()));
        }

        let super_class = match (&self.super_class, self.kind) {
            (Some(_), ClassKind::Interface) => {
                return Err(invalid("an interface cannot have a super class".to_owned()));
            }
            (Some(name), _) => Some(self.parent(store, name, ClassKind::Class)?),
            (None, ClassKind::Interface) => None,
            (None, _) => store.class_id("Object"),
        };

        let interfaces = self
            .interfaces
            .iter()
            .map(|name| self.parent(store, name, ClassKind::Interface))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClassDef {
            name: self.name.clone(),
            kind: self.kind,
            super_class,
            interfaces,
        })
    }

    fn parent(
        &self,
        store: &TypeStore,
        name: &str,
        expected: ClassKind,
    ) -> Result<ClassId, ConfigError> {
        let invalid = |reason: String| ConfigError::Catalog {
            class: self.name.clone(),
            reason,
        };

        let id = store
            .class_id(name)
            .ok_or_else(|| invalid(format!("unknown class `{name}`")))?;
        let kind = store.class(id).map(|def| def.kind);
        if kind != Some(expected) {
            let what = match expected {
                ClassKind::Interface => "an interface",
                _ => "a class",
            };
            return Err(invalid(format!("`{name}` is not {what}")));
        }
        Ok(id)
    }
}
