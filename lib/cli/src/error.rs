use simbench_core::ParamError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Clap(#[from] clap::Error),

    #[error("Invalid method parameters: {0}")]
    Params(#[from] ParamError),

    #[error("Wrong format of the method specification: '{0}' should be in the format: <MethodName>[:<Name1>=<Value1>,<Name2>=<Value2>,...]")]
    MalformedMethod(String),

    #[error("Invalid value in --{option}: '{value}'")]
    InvalidList { option: &'static str, value: String },

    #[error("Data file is not specified")]
    MissingDataFile,

    #[error("Either a query file or a number of test sets must be specified")]
    MissingQueries,

    #[error("A query file and a number of test sets cannot be specified together")]
    ConflictingQueries,

    #[error("At least one method must be specified")]
    NoMethods,

    #[error("Either knn or range search must be specified")]
    NoSearchType,
}
