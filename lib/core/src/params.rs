//! Ordered name/value parameter storage
//!
//! A [`ParameterSet`] is the flat, untyped form of one configuration group,
//! typically the parameters given to one method instance on the command line.

use crate::error::{ParamError, Result};
use ahash::AHashSet;
use std::fmt;
use tracing::{debug, error};

/// Parallel name/value strings in input order.
///
/// Sets built with [`ParameterSet::from_tokens`] have unique names. Sets built
/// with [`ParameterSet::from_parts`] are trusted as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    names: Vec<String>,
    values: Vec<String>,
}

impl ParameterSet {
    /// Create an empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `<name>=<value>` tokens.
    ///
    /// Fails on the first token that does not split into exactly a non-empty
    /// name and a value, or whose name already appeared earlier in `tokens`.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = AHashSet::new();
        let mut set = Self::new();

        for token in tokens {
            let token = token.as_ref();
            let mut parts = token.split('=');
            let (name, value) = match (parts.next(), parts.next(), parts.next()) {
                (Some(name), Some(value), None) if !name.is_empty() => (name, value),
                _ => {
                    error!("Wrong format of the method argument: '{}' should be in the format: <Name>=<Value>", token);
                    return Err(ParamError::Malformed(token.to_string()));
                }
            };

            if !seen.insert(name.to_string()) {
                error!("Duplicate parameter: {}", name);
                return Err(ParamError::Duplicate(name.to_string()));
            }

            set.names.push(name.to_string());
            set.values.push(value.to_string());
        }

        debug!("Parsed parameter set: {}", set);
        Ok(set)
    }

    /// Build a set from already separated names and values without any checks.
    ///
    /// Mismatched lengths are caught when a [`ParameterManager`](crate::ParameterManager)
    /// is created over the set.
    #[inline]
    #[must_use]
    pub fn from_parts(names: Vec<String>, values: Vec<String>) -> Self {
        Self { names, values }
    }

    /// Replace the value of an existing parameter with the text form of `value`.
    pub fn change_param<T: fmt::Display>(&mut self, name: &str, value: T) -> Result<()> {
        match self.names.iter().position(|n| n == name) {
            Some(idx) => {
                self.values[idx] = value.to_string();
                Ok(())
            }
            None => {
                error!("Parameter not found: {}", name);
                Err(ParamError::NotFound(name.to_string()))
            }
        }
    }

    /// Raw text of the first entry named `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names
            .iter()
            .zip(self.values.iter())
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Formats as the method descriptor tail: `a=1,b=2`.
impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}
