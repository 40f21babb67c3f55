use std::collections::BTreeMap;

use serde::Serialize;

/// Workflow variables attached to a feedback entity.
///
/// Keys are kept sorted so every serialized variable map comes out in
/// ascending key order no matter how it was filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Variables {
    entries: BTreeMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut variables = Self::new();
        for (key, value) in iter {
            variables.set(key, value);
        }
        variables
    }
}

/// Read-only view over a chain of variable stores, nearest first.
///
/// A modifier's scope is `[modifier, item, feedback]`; lookups fall through
/// to the parent stores without copying anything into the child.
#[derive(Debug, Clone)]
pub struct VarScope<'a> {
    layers: Vec<&'a Variables>,
}

impl<'a> VarScope<'a> {
    pub fn root(own: &'a Variables) -> Self {
        Self { layers: vec![own] }
    }

    /// Scope for a child entity whose own store shadows this one.
    pub fn child(&self, own: &'a Variables) -> Self {
        let mut layers = Vec::with_capacity(self.layers.len() + 1);
        layers.push(own);
        layers.extend(self.layers.iter().copied());
        Self { layers }
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.layers.iter().copied().find_map(|layer| layer.get(key))
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.is_empty())
    }

    /// Merged view: own entries plus every inherited key not shadowed.
    pub fn resolve(&self) -> Variables {
        let mut merged = Variables::new();
        for layer in self.layers.iter().rev() {
            for (key, value) in layer.iter() {
                merged.set(key, value);
            }
        }
        merged
    }
}
