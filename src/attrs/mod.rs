//! Attribute key/value descriptors and the merged attribute set.
//!
//! `Attr` is a single call-site descriptor; `AttributeSet` is the
//! deduplicated mapping a handler accumulates through derivation.

pub mod value;

pub use value::Value;

use std::collections::HashMap;

/// A single key/value descriptor attached to a log call or bound to a
/// handler. Immutable once constructed; uniqueness is enforced only when
/// merged into an [`AttributeSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    key: String,
    value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// An unordered mapping from attribute key to value, keys unique.
///
/// Iteration order is unspecified; rendering order of bound attributes is
/// explicitly not part of the output contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    entries: HashMap<String, Value>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `additions` into a copy of this set.
    ///
    /// On key collision the addition wins; for duplicate keys within
    /// `additions` itself the last one wins. Pure, no side effects.
    pub fn merged(&self, additions: &[Attr]) -> AttributeSet {
        let mut entries = self.entries.clone();
        for attr in additions {
            entries.insert(attr.key.clone(), attr.value.clone());
        }
        AttributeSet { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
