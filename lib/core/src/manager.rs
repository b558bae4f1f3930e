//! Consumption-tracking access to a [`ParameterSet`]
//!
//! A [`ParameterManager`] wraps one set for a single consumption pass. Typed
//! getters and [`ParameterManager::extract_except`] record which names were
//! consumed; when the pass ends every name in the set must have been consumed,
//! otherwise the leftovers are reported together as
//! [`ParamError::UnknownParameters`]. This is what catches misspelled or
//! stale options.
//!
//! The end-of-pass check runs exactly once: through [`ParameterManager::finish`],
//! at the end of [`ParameterManager::scope`], or when the manager is dropped.
//! Dropping a manager with leftovers panics, unless its most recent lookup
//! returned an error (the consumer is propagating that one) or the thread is
//! unwinding. A consumer that recovers from an error and keeps reading gets
//! the panic again.
//!
//! ```rust
//! use simbench_core::{ParameterManager, ParameterSet};
//!
//! let params = ParameterSet::from_tokens(["NN=10", "efSearch=40"]).unwrap();
//! let (nn, ef) = ParameterManager::scope(&params, |pm| {
//!     let nn: usize = pm.get_required("NN")?;
//!     let ef: usize = pm.get_optional("efSearch", 20)?;
//!     Ok::<_, simbench_core::ParamError>((nn, ef))
//! })
//! .unwrap();
//! assert_eq!((nn, ef), (10, 40));
//! ```

use crate::error::{ParamError, Result};
use crate::params::ParameterSet;
use crate::value::{convert, ParamValue};
use ahash::AHashSet;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManagerState {
    Active,
    Finalizing,
    Closed,
}

/// Typed, consumption-tracking view over a borrowed [`ParameterSet`].
#[derive(Debug)]
pub struct ParameterManager<'a> {
    params: &'a ParameterSet,
    seen: AHashSet<&'a str>,
    state: ManagerState,
    // The most recent lookup returned an error the consumer may still be propagating.
    failed: bool,
}

impl<'a> ParameterManager<'a> {
    pub fn new(params: &'a ParameterSet) -> Result<Self> {
        let (names, values) = (params.names().len(), params.values().len());
        if names != values {
            error!("Bug: different # of parameters ({}) and values ({})", names, values);
            return Err(ParamError::LengthMismatch { names, values });
        }

        Ok(Self {
            params,
            seen: AHashSet::new(),
            state: ManagerState::Active,
            failed: false,
        })
    }

    /// Run one consumption pass over `params` and validate it afterwards.
    ///
    /// Validation happens whether `consume` succeeds or not. An error from
    /// `consume` wins over the validation error, but unknown names are still logged.
    pub fn scope<T, E, F>(params: &'a ParameterSet, consume: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut ParameterManager<'a>) -> std::result::Result<T, E>,
        E: From<ParamError>,
    {
        let mut manager = Self::new(params)?;
        let outcome = consume(&mut manager);
        let validation = manager.finish();

        let value = outcome?;
        validation?;
        Ok(value)
    }

    /// Value of a parameter that must be present.
    pub fn get_required<T: ParamValue>(&mut self, name: &str) -> Result<T> {
        match self.resolve(name)? {
            Some(value) => Ok(value),
            None => {
                error!("Mandatory parameter: {} is missing!", name);
                self.failed = true;
                Err(ParamError::MissingRequired(name.to_string()))
            }
        }
    }

    /// Value of a parameter, or `default` unchanged when it is absent.
    pub fn get_optional<T: ParamValue>(&mut self, name: &str, default: T) -> Result<T> {
        match self.resolve(name)? {
            Some(value) => Ok(value),
            None => {
                info!("Parameter: {}={} (default)", name, default);
                self.failed = false;
                Ok(default)
            }
        }
    }

    /// Hand off every parameter not listed in `except` as a new set.
    ///
    /// The extracted names count as consumed by this manager. The managed set
    /// itself is left untouched.
    pub fn extract_except<I, S>(&mut self, except: I) -> ParameterSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let except: AHashSet<String> = except
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();

        let params = self.params;
        let mut names = Vec::new();
        let mut values = Vec::new();
        for (name, value) in params.iter() {
            if !except.contains(name) {
                names.push(name.to_string());
                values.push(value.to_string());
                self.seen.insert(name);
            }
        }
        self.failed = false;

        let extracted = ParameterSet::from_parts(names, values);
        debug!("Extracted parameters: {}", extracted);
        extracted
    }

    /// Whether `name` has been consumed in this pass
    #[inline]
    pub fn is_seen(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// The managed set
    #[inline]
    pub fn params(&self) -> &'a ParameterSet {
        self.params
    }

    /// End the pass, reporting every parameter that was never consumed.
    pub fn finish(mut self) -> Result<()> {
        self.finalize()
    }

    fn resolve<T: ParamValue>(&mut self, name: &str) -> Result<Option<T>> {
        let params = self.params;
        let Some((stored, text)) = params.iter().find(|(n, _)| *n == name) else {
            return Ok(None);
        };

        let value = match convert::<T>(name, text) {
            Ok(value) => value,
            Err(e) => {
                error!("{}", e);
                self.failed = true;
                return Err(e);
            }
        };
        info!("Parameter: {}={}", name, value);
        self.seen.insert(stored);
        self.failed = false;
        Ok(Some(value))
    }

    fn finalize(&mut self) -> Result<()> {
        if self.state != ManagerState::Active {
            return Ok(());
        }
        self.state = ManagerState::Finalizing;

        let unknown: Vec<String> = self
            .params
            .names()
            .iter()
            .filter(|name| !self.seen.contains(name.as_str()))
            .cloned()
            .collect();
        for name in &unknown {
            error!("Unknown parameter: {}", name);
        }

        self.state = ManagerState::Closed;
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(ParamError::UnknownParameters(unknown))
        }
    }
}

impl Drop for ParameterManager<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.finalize() {
            // The leftovers are logged either way. Unwinding or an error still
            // on its way to the caller must not be replaced by a panic here.
            if !self.failed && !std::thread::panicking() {
                panic!("{}, aborting!", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn vptree_params() -> ParameterSet {
        ParameterSet::from_tokens(["alphaLeft=2.0", "bucketSize=50", "chunkBucket=1"]).unwrap()
    }

    #[test]
    fn test_required_and_optional() {
        let params = vptree_params();
        let mut pm = ParameterManager::new(&params).unwrap();

        let alpha: f64 = pm.get_required("alphaLeft").unwrap();
        let bucket: u32 = pm.get_optional("bucketSize", 10).unwrap();
        let chunk: bool = pm.get_required("chunkBucket").unwrap();
        let right: f64 = pm.get_optional("alphaRight", 1.5).unwrap();

        assert!((alpha - 2.0).abs() < f64::EPSILON);
        assert_eq!(bucket, 50);
        assert!(chunk);
        assert!((right - 1.5).abs() < f64::EPSILON);
        assert!(pm.finish().is_ok());
    }

    #[test]
    fn test_missing_required() {
        let params = vptree_params();
        let mut pm = ParameterManager::new(&params).unwrap();
        assert_eq!(
            pm.get_required::<f64>("alphaRight"),
            Err(ParamError::MissingRequired("alphaRight".to_string()))
        );
        assert!(!pm.is_seen("alphaRight"));
    }

    #[test]
    fn test_propagated_error_does_not_panic_on_drop() {
        fn consume(params: &ParameterSet) -> Result<u32> {
            let mut pm = ParameterManager::new(params)?;
            let bucket: u32 = pm.get_required("bucketSize")?;
            let missing: u32 = pm.get_required("leafSize")?;
            pm.finish()?;
            Ok(bucket + missing)
        }

        let params = vptree_params();
        assert_eq!(consume(&params), Err(ParamError::MissingRequired("leafSize".to_string())));
    }

    #[test]
    fn test_optional_keeps_default() {
        let params = ParameterSet::new();
        let mut pm = ParameterManager::new(&params).unwrap();
        assert_eq!(pm.get_optional("name", "hnsw".to_string()).unwrap(), "hnsw");
        assert_eq!(pm.get_optional("efSearch", 7u64).unwrap(), 7);
        assert!(pm.finish().is_ok());
    }

    #[test]
    fn test_conversion_error() {
        let params = ParameterSet::from_tokens(["bucketSize=42x"]).unwrap();
        let mut pm = ParameterManager::new(&params).unwrap();
        assert_eq!(
            pm.get_required::<u32>("bucketSize"),
            Err(ParamError::Conversion {
                name: "bucketSize".to_string(),
                value: "42x".to_string(),
                type_name: "u32",
            })
        );
        // Still readable as text.
        assert_eq!(pm.get_required::<String>("bucketSize").unwrap(), "42x");
        assert!(pm.finish().is_ok());
    }

    #[test]
    fn test_extract_except() {
        let params = ParameterSet::from_tokens(["a=1", "b=2", "c=3"]).unwrap();
        let mut pm = ParameterManager::new(&params).unwrap();

        let rest = pm.extract_except(["a"]);
        assert_eq!(rest.names(), ["b", "c"]);
        assert_eq!(rest.values(), ["2", "3"]);
        assert!(rest.get("a").is_none());
        assert!(pm.is_seen("b"));
        assert!(pm.is_seen("c"));
        assert_eq!(params.len(), 3);

        let a: i32 = pm.get_required("a").unwrap();
        assert_eq!(a, 1);
        assert!(pm.finish().is_ok());
    }

    #[test]
    fn test_unknown_parameters_aggregated() {
        let params = ParameterSet::from_tokens(["NN=10", "efSerch=40", "initIndexAttempt=2"]).unwrap();
        let mut pm = ParameterManager::new(&params).unwrap();
        let _: usize = pm.get_required("NN").unwrap();

        assert_eq!(
            pm.finish(),
            Err(ParamError::UnknownParameters(vec![
                "efSerch".to_string(),
                "initIndexAttempt".to_string(),
            ]))
        );
    }

    #[test]
    #[should_panic(expected = "Unknown parameters: b, c")]
    fn test_drop_with_unknown_parameters_panics() {
        let params = ParameterSet::from_tokens(["a=1", "b=2", "c=3"]).unwrap();
        let mut pm = ParameterManager::new(&params).unwrap();
        let _: i32 = pm.get_required("a").unwrap();
    }

    #[test]
    #[should_panic(expected = "Unknown parameters: bucketSise")]
    fn test_recovered_error_still_reports_leftovers() {
        let params = ParameterSet::from_tokens(["bucketSize=10x", "bucketSise=20"]).unwrap();
        let mut pm = ParameterManager::new(&params).unwrap();

        let bucket = pm.get_optional::<u32>("bucketSize", 50).unwrap_or(50);
        assert_eq!(bucket, 50);
        let raw: String = pm.get_required("bucketSize").unwrap();
        assert_eq!(raw, "10x");
    }

    #[test]
    #[should_panic(expected = "Unknown parameters: bucketSise")]
    fn test_recovered_missing_required_still_reports_leftovers() {
        let params = ParameterSet::from_tokens(["NN=10", "bucketSise=20"]).unwrap();
        let mut pm = ParameterManager::new(&params).unwrap();

        assert!(pm.get_required::<u32>("bucketSize").is_err());
        let nn: usize = pm.get_optional("NN", 5).unwrap();
        assert_eq!(nn, 10);
    }

    #[test]
    fn test_recovered_error_fails_finish() {
        let params = ParameterSet::from_tokens(["bucketSize=10x", "bucketSise=20"]).unwrap();
        let mut pm = ParameterManager::new(&params).unwrap();

        assert!(pm.get_required::<u32>("bucketSize").is_err());
        let _: String = pm.get_required("bucketSize").unwrap();
        assert_eq!(
            pm.finish(),
            Err(ParamError::UnknownParameters(vec!["bucketSise".to_string()]))
        );
    }

    #[test]
    fn test_drop_after_full_consumption() {
        let params = vptree_params();
        let mut pm = ParameterManager::new(&params).unwrap();
        let _ = pm.extract_except(["alphaLeft"]);
        let _: f32 = pm.get_required("alphaLeft").unwrap();
        drop(pm);
    }

    #[test]
    fn test_drop_while_unwinding_does_not_abort() {
        let params = vptree_params();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _pm = ParameterManager::new(&params).unwrap();
            panic!("consumer failed");
        }));

        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"consumer failed"));
    }

    #[test]
    fn test_scope_validates() {
        let params = vptree_params();
        let result = ParameterManager::scope(&params, |pm| pm.get_required::<f64>("alphaLeft"));
        assert_eq!(
            result,
            Err(ParamError::UnknownParameters(vec![
                "bucketSize".to_string(),
                "chunkBucket".to_string(),
            ]))
        );
    }

    #[test]
    fn test_scope_prefers_consumer_error() {
        let params = vptree_params();
        let result = ParameterManager::scope(&params, |pm| pm.get_required::<f64>("alphaRight"));
        assert_eq!(result, Err(ParamError::MissingRequired("alphaRight".to_string())));
    }

    #[test]
    fn test_length_mismatch() {
        let params = ParameterSet::from_parts(vec!["a".to_string()], Vec::new());
        assert!(matches!(
            ParameterManager::new(&params),
            Err(ParamError::LengthMismatch { names: 1, values: 0 })
        ));
    }

    #[test]
    fn test_independent_managers_across_threads() {
        let sets: Vec<ParameterSet> = (0..4)
            .map(|i| ParameterSet::from_tokens([format!("NN={}", i), "efSearch=10".to_string()]).unwrap())
            .collect();

        let totals: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = sets
                .iter()
                .map(|params| {
                    s.spawn(move || {
                        ParameterManager::scope(params, |pm| {
                            let nn: usize = pm.get_required("NN")?;
                            let ef: usize = pm.get_required("efSearch")?;
                            Ok::<_, ParamError>(nn + ef)
                        })
                        .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(totals, vec![10, 11, 12, 13]);
    }
}
