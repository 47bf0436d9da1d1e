//! Keyed constructor table for one plugin category

use super::{PluginError, PluginTuple};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Constructor producing a fresh runtime instance of a plugin
pub type Factory<T> = Arc<dyn Fn() -> Result<T, PluginError> + Send + Sync>;

/// A registration that replaced an earlier one for the same type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub type_name: String,
    pub previous: PluginTuple,
    pub replacement: PluginTuple,
}

struct Entry<T> {
    tuple: PluginTuple,
    factory: Factory<T>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            tuple: self.tuple.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

/// Registry of plugin constructors keyed by type name.
///
/// `T` is the category's runtime handle (`Box<dyn App>`, `Box<dyn Foundation>`,
/// ...), so registries of different categories cannot be merged into each
/// other. Within a registry a type is unique: re-registering it keeps the
/// newer constructor and records an [`Override`].
pub struct FactoryRegistry<T> {
    entries: BTreeMap<String, Entry<T>>,
    overrides: Vec<Override>,
}

impl<T> FactoryRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            overrides: Vec::new(),
        }
    }

    /// Adds `factory` under `tuple.type_name`. The tuple must belong to this
    /// registry's category.
    pub fn register(&mut self, tuple: PluginTuple, factory: Factory<T>)
    where
        T: PluginHandle,
    {
        debug_assert_eq!(
            tuple.category,
            T::CATEGORY,
            "tuple {} registered in the {} registry",
            tuple,
            T::CATEGORY
        );
        let type_name = tuple.type_name.clone();
        let entry = Entry { tuple, factory };

        if let Some(previous) = self.entries.insert(type_name.clone(), entry) {
            let replacement = self.entries[&type_name].tuple.clone();
            warn!(
                category = %replacement.category,
                plugin_type = %type_name,
                previous = %previous.tuple,
                replacement = %replacement,
                "Plugin registration overridden"
            );
            self.overrides.push(Override {
                type_name,
                previous: previous.tuple,
                replacement,
            });
        } else {
            debug!(plugin_type = %type_name, "Plugin registered");
        }
    }

    /// Folds `other` into this registry; entries from `other` win on conflict.
    pub fn add(&mut self, other: FactoryRegistry<T>)
    where
        T: PluginHandle,
    {
        let FactoryRegistry { entries, overrides } = other;
        self.overrides.extend(overrides);
        for (_, entry) in entries {
            self.register(entry.tuple, entry.factory);
        }
    }

    pub fn merge(mut self, other: FactoryRegistry<T>) -> FactoryRegistry<T>
    where
        T: PluginHandle,
    {
        self.add(other);
        self
    }

    pub fn lookup(&self, type_name: &str) -> Option<&Factory<T>> {
        self.entries.get(type_name).map(|e| &e.factory)
    }

    pub fn tuple(&self, type_name: &str) -> Option<&PluginTuple> {
        self.entries.get(type_name).map(|e| &e.tuple)
    }

    /// Looks up `type_name` and invokes its constructor
    pub fn build(&self, type_name: &str) -> Result<T, PluginError>
    where
        T: PluginHandle,
    {
        match self.entries.get(type_name) {
            Some(entry) => (entry.factory)(),
            None => Err(PluginError::NotRegistered {
                category: T::CATEGORY,
                type_name: type_name.to_string(),
            }),
        }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// Registered type names, sorted
    pub fn types(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn tuples(&self) -> Vec<&PluginTuple> {
        self.entries.values().map(|e| &e.tuple).collect()
    }

    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for FactoryRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FactoryRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            overrides: self.overrides.clone(),
        }
    }
}

impl<T> fmt::Debug for FactoryRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("types", &self.types())
            .field("overrides", &self.overrides.len())
            .finish()
    }
}

/// Runtime handle type of a plugin category
pub trait PluginHandle {
    const CATEGORY: super::PluginCategory;
}
