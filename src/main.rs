use clap::Parser;
use simbench::{Args, ExperimentConfig};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting simbench v{}", env!("CARGO_PKG_VERSION"));

    let config = ExperimentConfig::try_from(args)?;
    debug!("Experiment configuration: {}", serde_json::to_string_pretty(&config)?);

    info!("Space: {} (distance type: {}, dimension: {})", config.space_type, config.dist_type, config.dimension);
    info!("Data file: {} (max points: {})", config.data_file, config.max_num_data);
    if config.query_file.is_empty() {
        info!("Test sets: {}", config.test_set_qty);
    } else {
        info!("Query file: {} (max queries: {})", config.query_file, config.max_num_query);
    }
    if !config.knn.is_empty() {
        info!("k-NN search: k = {:?}, eps = {}", config.knn, config.eps);
    }
    let radii = config.range_radii()?;
    if !radii.is_empty() {
        info!("Range search: radii = {:?}", radii);
    }
    info!("Query threads: {}", config.thread_test_qty);

    for (name, params) in config.methods.iter() {
        info!("Method {}: {} parameter(s) [{}]", name, params.len(), params);
    }

    if !config.res_file_prefix.is_empty() {
        let mode = if config.append_to_res_file { "append" } else { "overwrite" };
        info!("Results: {}* ({})", config.res_file_prefix, mode);
    }

    info!("Configuration is valid: {} method instance(s)", config.methods.len());
    Ok(())
}
