//! Projection of flat records onto form parameters.
//!
//! Each record type exposes a static table of `(wire name, accessor)` pairs. The mapper walks
//! the table and adds every non-empty field to an accumulating [`FormParams`] set, so card and
//! transaction fields compose into one request.

use serde::Serialize;

/// One entry of a record's wire table.
#[derive(Clone, Copy)]
pub struct WireField<T> {
    /// Form parameter name sent to the gateway.
    pub wire_name: &'static str,
    /// Reads the field's string value from the record.
    pub get: fn(&T) -> &str,
}

impl<T> std::fmt::Debug for WireField<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WireField").field("wire_name", &self.wire_name).finish_non_exhaustive()
    }
}

/// Records that map onto gateway form parameters.
///
/// Implementors own their data, so the table can live in a `'static` slice.
pub trait WireRecord: Sized + 'static {
    /// The fixed, total field table for this record type.
    const WIRE_FIELDS: &'static [WireField<Self>];
}

/// Insertion-ordered set of form parameters.
///
/// Setting a key that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormParams(Vec<(String, String)>);

impl FormParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets `key` to `value`, replacing an existing entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Adds every non-empty field of `record` to `params` under its wire name.
///
/// Returns the number of parameters contributed.
pub fn map_fields<T: WireRecord>(record: &T, params: &mut FormParams) -> usize {
    let mut added = 0;
    for field in T::WIRE_FIELDS {
        let value = (field.get)(record);
        if !value.is_empty() {
            params.set(field.wire_name, value);
            added += 1;
        }
    }
    added
}
