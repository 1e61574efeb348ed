//! Ordered, case-insensitive attribute storage.
//!
//! Attributes arrive as loosely typed strings. Translators parse the ones they
//! need exactly once through the typed helpers here and treat any failure as a
//! reason to delegate, never as a partial success.

use crate::errors::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an attribute, keeping first-insertion order
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let existing = self
            .0
            .keys()
            .find(|k| k.eq_ignore_ascii_case(&name))
            .cloned();
        match existing {
            Some(key) => {
                self.0.insert(key, value.into());
            }
            None => {
                self.0.insert(name, value.into());
            }
        }
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .or_else(|| {
                self.0
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(name))
                    .map(|(_, v)| v)
            })
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Boolean marker check. A bare attribute (empty value) counts as set.
    pub fn flag(&self, name: &str) -> bool {
        match self.get(name) {
            Some(value) => {
                let value = value.trim();
                value.is_empty() || value.eq_ignore_ascii_case("true")
            }
            None => false,
        }
    }

    /// Parse a required attribute into `T`.
    pub fn parse<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self
            .get(name)
            .ok_or_else(|| Error::invalid_attribute(name, "", "attribute is not present"))?;
        raw.trim()
            .parse::<T>()
            .map_err(|e| Error::invalid_attribute(name, raw, e.to_string()))
    }

    /// Parse an optional attribute; absence is `Ok(None)`, garbage is an error
    pub fn parse_opt<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        if self.contains(name) {
            self.parse(name).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Parse a boolean written as `true`/`false` in any case
    pub fn parse_bool(&self, name: &str) -> Result<bool> {
        let raw = self
            .get(name)
            .ok_or_else(|| Error::invalid_attribute(name, "", "attribute is not present"))?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(Error::invalid_attribute(name, raw, "expected true or false")),
        }
    }

    /// Parse an attribute that must hold exactly one character
    pub fn parse_char(&self, name: &str) -> Result<char> {
        let raw = self
            .get(name)
            .ok_or_else(|| Error::invalid_attribute(name, "", "attribute is not present"))?;
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::invalid_attribute(
                name,
                raw,
                "expected exactly one character",
            )),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (k, v) in iter {
            attributes.insert(k, v);
        }
        attributes
    }
}
