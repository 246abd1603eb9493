//! Main entry point for the orderflow service.
//!
//! Runs the two-actor demonstration: a customer context and a fulfillment
//! context drive orders through their lifecycle concurrently against one
//! shared service, then every order is printed as JSON.

use clap::Parser;
use orderflow_config::Config;
use orderflow_core::OrderService;
use std::path::PathBuf;

mod driver;

/// Command-line arguments for the orderflow service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file (defaults apply when omitted)
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.with_writer(std::io::stderr)
		.init();

	let config = load_config(args.config.as_deref()).await?;
	tracing::info!("Loaded configuration [{}]", config.service.id);

	let service = OrderService::from_config(&config);
	let report = driver::run(service, &config.driver).await?;

	tracing::info!(
		orders = report.orders.len(),
		rejections = report.rejections.len(),
		"Driver finished"
	);
	println!("{}", serde_json::to_string_pretty(&report.orders)?);

	Ok(())
}

/// Loads the configuration file, or the defaults when no path is given.
async fn load_config(
	path: Option<&std::path::Path>,
) -> Result<Config, orderflow_config::ConfigError> {
	match path {
		Some(path) => Config::from_file(path).await,
		None => Ok(Config::default()),
	}
}
