//! Pluggable implementations and the registries that hold them
//!
//! Plugins come in three independent categories: application runtimes,
//! foundation services and infrastructure providers. Each category keeps its
//! own [`FactoryRegistry`], keyed by plugin type name. Registries built from
//! independent sources are merged into one per category at startup.

pub mod app;
pub mod foundation;
pub mod infrastructure;
pub mod map;
pub mod registry;

pub use app::{App, AppAction, AppContext};
pub use foundation::{Foundation, FoundationContext};
pub use infrastructure::{Infrastructure, InfraContext};
pub use map::{PluginBinary, PluginMap};
pub use registry::{Factory, FactoryRegistry, Override, PluginHandle};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Plugin namespace. Types never collide across categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginCategory {
    App,
    Foundation,
    Infrastructure,
}

impl PluginCategory {
    pub fn all() -> &'static [PluginCategory] {
        &[
            PluginCategory::App,
            PluginCategory::Foundation,
            PluginCategory::Infrastructure,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PluginCategory::App => "app",
            PluginCategory::Foundation => "foundation",
            PluginCategory::Infrastructure => "infrastructure",
        }
    }
}

impl fmt::Display for PluginCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluginCategory {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "app" => Ok(PluginCategory::App),
            "foundation" => Ok(PluginCategory::Foundation),
            "infra" | "infrastructure" => Ok(PluginCategory::Infrastructure),
            _ => Err(PluginError::UnknownCategory(s.to_string())),
        }
    }
}

/// Identifies one pluggable implementation within a category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PluginTuple {
    pub category: PluginCategory,
    #[serde(rename = "type")]
    pub type_name: String,
    pub version: String,
}

impl PluginTuple {
    pub fn new(
        category: PluginCategory,
        type_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            category,
            type_name: type_name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PluginTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.category, self.type_name, self.version)
    }
}

/// Ordered list of tuples published by one plugin source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tuples(Vec<PluginTuple>);

impl Tuples {
    pub fn new(tuples: Vec<PluginTuple>) -> Self {
        Self(tuples)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginTuple> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Binds every tuple to the same constructor.
    ///
    /// A later tuple with a type already seen in this list replaces the
    /// earlier one, the same way a merge would.
    pub fn map<T: PluginHandle>(&self, factory: Factory<T>) -> FactoryRegistry<T> {
        let mut registry = FactoryRegistry::new();
        for tuple in &self.0 {
            registry.register(tuple.clone(), factory.clone());
        }
        registry
    }
}

impl From<Vec<PluginTuple>> for Tuples {
    fn from(tuples: Vec<PluginTuple>) -> Self {
        Self(tuples)
    }
}

/// Errors raised while looking up or constructing plugins
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("No {category} plugin registered for type '{type_name}'")]
    NotRegistered {
        category: PluginCategory,
        type_name: String,
    },

    #[error("Unknown plugin category: {0}. Valid options: app, foundation, infrastructure")]
    UnknownCategory(String),

    #[error("Plugin {tuple} requires '{binary}' on PATH")]
    MissingBinary { tuple: PluginTuple, binary: String },

    #[error("Plugin {tuple} failed: {message}")]
    Failed { tuple: PluginTuple, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_names() {
        for category in PluginCategory::all() {
            assert_eq!(category.as_str().parse::<PluginCategory>().unwrap(), *category);
        }
        assert_eq!(
            "infra".parse::<PluginCategory>().unwrap(),
            PluginCategory::Infrastructure
        );
        assert!(matches!(
            "compiler".parse::<PluginCategory>(),
            Err(PluginError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_tuple_display() {
        let tuple = PluginTuple::new(PluginCategory::App, "go", "0.1.0");
        assert_eq!(tuple.to_string(), "app/go@0.1.0");
    }

    #[test]
    fn test_tuple_serializes_type_field() {
        let tuple = PluginTuple::new(PluginCategory::Foundation, "consul", "0.1.0");
        let json = serde_json::to_value(&tuple).unwrap();
        assert_eq!(json["category"], "foundation");
        assert_eq!(json["type"], "consul");
        assert_eq!(json["version"], "0.1.0");
    }
}
