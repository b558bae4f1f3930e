use clap::Parser;
use simbench_core::ParamValue;

/// Benchmark driver options for similarity search methods
#[derive(Parser, Debug, Clone)]
#[command(name = "simbench")]
#[command(about = "Evaluate similarity search methods on a data set", long_about = None)]
pub struct Args {
    /// Distance value type
    #[arg(long = "distType", default_value = "float")]
    pub dist_type: String,

    /// Space type, e.g. l2, cosinesimil, kldivgenfast
    #[arg(short = 's', long = "spaceType")]
    pub space_type: String,

    /// Dimensionality, required only by some spaces
    #[arg(short = 'd', long = "dimension", default_value_t = 0)]
    pub dimension: u32,

    /// Number of threads used to run queries
    #[arg(long = "threadTestQty", default_value_t = 1)]
    pub thread_test_qty: u32,

    /// Append to the output files instead of overwriting them
    #[arg(short = 'a', long = "appendToResFile")]
    pub append_to_res_file: bool,

    /// Prefix of the output files
    #[arg(short = 'o', long = "outFilePrefix", default_value = "")]
    pub out_file_prefix: String,

    /// Number of test sets carved out of the data file
    #[arg(short = 'b', long = "testSetQty", default_value_t = 0)]
    pub test_set_qty: u32,

    /// Input data file
    #[arg(short = 'i', long = "dataFile", default_value = "")]
    pub data_file: String,

    /// Query file
    #[arg(short = 'q', long = "queryFile", default_value = "")]
    pub query_file: String,

    /// Maximum number of data points to load (0 loads everything)
    #[arg(long = "maxNumData", default_value_t = 0)]
    pub max_num_data: u32,

    /// Maximum number of queries
    #[arg(long = "maxNumQuery", default_value_t = 1000)]
    pub max_num_query: u32,

    /// Comma-separated values of k for k-NN search
    #[arg(short = 'k', long = "knn", default_value = "")]
    pub knn: String,

    /// Approximation parameter of eps-approximate k-NN search
    #[arg(long = "eps", default_value_t = 0.0, value_parser = parse_param::<f32>)]
    pub eps: f32,

    /// Comma-separated radii for range search
    #[arg(short = 'r', long = "range", default_value = "")]
    pub range: String,

    /// Method with parameters: <MethodName>[:<Name1>=<Value1>,...]; may be repeated
    #[arg(short = 'm', long = "method")]
    pub methods: Vec<String>,

    /// Log level
    #[arg(long = "logLevel", default_value = "info")]
    pub log_level: String,
}

/// Option values follow the method parameter grammar.
fn parse_param<T: ParamValue>(text: &str) -> Result<T, String> {
    T::parse_param(text).ok_or_else(|| format!("'{}' is not a valid {}", text, T::TYPE_NAME))
}
