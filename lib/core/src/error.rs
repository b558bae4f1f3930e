use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParamError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("Wrong format of the method argument: '{0}' should be in the format: <Name>=<Value>")]
    Malformed(String),

    #[error("Duplicate parameter: {0}")]
    Duplicate(String),

    #[error("Parameter not found: {0}")]
    NotFound(String),

    #[error("Mandatory parameter: {0} is missing")]
    MissingRequired(String),

    #[error("Failed to convert value '{value}' of parameter {name} to type: {type_name}")]
    Conversion {
        name: String,
        value: String,
        type_name: &'static str,
    },

    #[error("Unknown parameters: {}", .0.join(", "))]
    UnknownParameters(Vec<String>),

    #[error("Different number of parameters and values: {names} names, {values} values")]
    LengthMismatch { names: usize, values: usize },
}

impl ParamError {
    /// Names the parameter(s) this error is about.
    pub fn names(&self) -> Vec<&str> {
        match self {
            ParamError::Malformed(token) => vec![token.as_str()],
            ParamError::Duplicate(name)
            | ParamError::NotFound(name)
            | ParamError::MissingRequired(name) => vec![name.as_str()],
            ParamError::Conversion { name, .. } => vec![name.as_str()],
            ParamError::UnknownParameters(names) => names.iter().map(String::as_str).collect(),
            ParamError::LengthMismatch { .. } => Vec::new(),
        }
    }
}
