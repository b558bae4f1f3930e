//! # simbench Core
//!
//! Typed, string-backed method parameters for the simbench benchmark driver.
//!
//! This crate provides:
//!
//! - [`ParameterSet`] - ordered `name=value` pairs describing one method instance
//! - [`ParameterManager`] - typed getters that track which parameters were consumed
//!   and reject any left over at the end of the pass
//! - [`ParamValue`] - the conversion from stored text into a requested type
//!
//! ## Example
//!
//! ```rust
//! use simbench_core::{ParameterManager, ParameterSet, ParamError};
//!
//! let params = ParameterSet::from_tokens(["M=16", "efConstruction=200", "post=2"]).unwrap();
//!
//! let mut pm = ParameterManager::new(&params).unwrap();
//! let m: usize = pm.get_required("M").unwrap();
//! let ef: usize = pm.get_optional("efConstruction", 100).unwrap();
//! assert_eq!((m, ef), (16, 200));
//!
//! // `post` was never read
//! assert_eq!(pm.finish(), Err(ParamError::UnknownParameters(vec!["post".to_string()])));
//! ```

pub mod error;
pub mod manager;
pub mod params;
pub mod value;

pub use error::{ParamError, Result};
pub use manager::ParameterManager;
pub use params::ParameterSet;
pub use value::ParamValue;
