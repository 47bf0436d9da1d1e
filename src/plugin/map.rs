//! Launch table for out-of-process plugins

use super::{PluginCategory, PluginTuple};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// How a host process would launch one plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginBinary {
    pub path: PathBuf,
    pub args: Vec<String>,
}

/// Maps `(category, type)` to the binary implementing it
#[derive(Debug, Clone, Default)]
pub struct PluginMap {
    entries: BTreeMap<(PluginCategory, String), PluginBinary>,
}

impl PluginMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points every tuple at `executable`, which serves builtins through
    /// `plugin-builtin <category> <type>`.
    pub fn builtin<'a>(
        executable: &Path,
        tuples: impl IntoIterator<Item = &'a PluginTuple>,
    ) -> Self {
        let mut map = Self::new();
        for tuple in tuples {
            map.insert(
                tuple.category,
                &tuple.type_name,
                PluginBinary {
                    path: executable.to_path_buf(),
                    args: vec![
                        "plugin-builtin".to_string(),
                        tuple.category.to_string(),
                        tuple.type_name.clone(),
                    ],
                },
            );
        }
        map
    }

    pub fn insert(&mut self, category: PluginCategory, type_name: &str, binary: PluginBinary) {
        self.entries.insert((category, type_name.to_string()), binary);
    }

    pub fn lookup(&self, category: PluginCategory, type_name: &str) -> Option<&PluginBinary> {
        self.entries.get(&(category, type_name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PluginCategory, &str, &PluginBinary)> {
        self.entries
            .iter()
            .map(|((category, type_name), binary)| (*category, type_name.as_str(), binary))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_map_points_at_executable() {
        let tuples = vec![
            PluginTuple::new(PluginCategory::App, "go", "0.1.0"),
            PluginTuple::new(PluginCategory::Infrastructure, "aws", "0.1.0"),
        ];
        let map = PluginMap::builtin(Path::new("/usr/bin/deckhand"), &tuples);

        assert_eq!(map.len(), 2);
        let aws = map.lookup(PluginCategory::Infrastructure, "aws").unwrap();
        assert_eq!(aws.path, PathBuf::from("/usr/bin/deckhand"));
        assert_eq!(aws.args, vec!["plugin-builtin", "infrastructure", "aws"]);
        assert!(map.lookup(PluginCategory::App, "aws").is_none());
    }

    #[test]
    fn test_iter_is_ordered_by_category_then_type() {
        let tuples = vec![
            PluginTuple::new(PluginCategory::Foundation, "consul", "0.1.0"),
            PluginTuple::new(PluginCategory::App, "ruby", "0.1.0"),
            PluginTuple::new(PluginCategory::App, "go", "0.1.0"),
        ];
        let map = PluginMap::builtin(Path::new("deckhand"), &tuples);
        let keys: Vec<_> = map.iter().map(|(c, t, _)| (c, t.to_string())).collect();
        assert_eq!(
            keys,
            vec![
                (PluginCategory::App, "go".to_string()),
                (PluginCategory::App, "ruby".to_string()),
                (PluginCategory::Foundation, "consul".to_string()),
            ]
        );
    }
}
