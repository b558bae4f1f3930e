//! # simbench CLI
//!
//! Command-line adapter of the simbench benchmark driver.
//!
//! [`parse_command_line`] reads the process arguments and yields an
//! [`ExperimentConfig`]: the data and query sources, the search types to
//! evaluate and a [`MethodMap`] with one [`ParameterSet`](simbench_core::ParameterSet)
//! per `--method` occurrence. The parameter sets are owned by the returned
//! config; each consumer checks its own set with a
//! [`ParameterManager`](simbench_core::ParameterManager).
//!
//! ```rust
//! use simbench_cli::parse_command_line;
//!
//! let config = parse_command_line([
//!     "simbench", "-s", "l2", "-i", "data.txt", "-b", "5", "-k", "10",
//!     "-m", "vptree:bucketSize=50", "-m", "seq_search",
//! ]).unwrap();
//!
//! assert_eq!(config.knn, vec![10]);
//! assert_eq!(config.methods.len(), 2);
//! ```

pub mod args;
pub mod config;
pub mod error;

pub use args::Args;
pub use config::{parse_method, ExperimentConfig, MethodMap};
pub use error::{CliError, Result};

use clap::Parser;
use std::ffi::OsString;

/// Parse process-style arguments (program name first) into an experiment configuration.
pub fn parse_command_line<I, T>(args: I) -> Result<ExperimentConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(args)?;
    ExperimentConfig::try_from(args)
}
