//! # simbench
//!
//! Configuration core of a benchmark driver for similarity search methods.
//!
//! Methods are configured with flat `name=value` parameters. simbench parses
//! them into ordered [`ParameterSet`]s and hands them to consumers through a
//! [`ParameterManager`], which converts values to the types the consumer asks
//! for and fails the pass if any parameter was never consumed.
//!
//! ## Quick Start
//!
//! ### As a Binary
//!
//! ```bash
//! simbench -s l2 -i data.txt -b 5 -k 1,10 \
//!     -m vptree:alphaLeft=2.0,bucketSize=50 -m seq_search
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use simbench::prelude::*;
//!
//! let config = parse_command_line([
//!     "simbench", "-s", "l2", "-i", "data.txt", "-b", "5", "-k", "10",
//!     "-m", "vptree:alphaLeft=2.0,bucketSize=50",
//! ]).unwrap();
//!
//! for (name, params) in config.methods.iter() {
//!     let (alpha, bucket) = ParameterManager::scope(params, |pm| {
//!         let alpha: f64 = pm.get_optional("alphaLeft", 1.0)?;
//!         let bucket: usize = pm.get_optional("bucketSize", 50)?;
//!         Ok::<_, ParamError>((alpha, bucket))
//!     }).unwrap();
//!     assert_eq!(name, "vptree");
//!     assert_eq!(bucket, 50);
//!     assert!(alpha > 1.0);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `simbench-core` - ParameterSet, ParameterManager, typed conversion, errors
//! - `simbench-cli` - command-line adapter producing an experiment configuration

// Re-export core types
pub use simbench_core::{ParamError, ParamValue, ParameterManager, ParameterSet, Result};

// Re-export the command-line adapter
pub use simbench_cli::{parse_command_line, Args, CliError, ExperimentConfig, MethodMap};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ParamError, ParamValue, ParameterManager, ParameterSet,
        parse_command_line, CliError, ExperimentConfig, MethodMap,
    };
}
