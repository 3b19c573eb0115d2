use std::sync::Arc;

use clap::Parser;
use cli::Args;
use config::{Config, Settings};
use error::Result;
use sift_client::{ClientConfig, HttpClient};
use sift_events::{EventSinkHandle, NullSink};
use session::Session;
use tracing::{error, info};

mod cli;
mod config;
mod error;
mod logging;
mod repl;
mod session;

fn main() {
    let args = Args::parse();
    logging::setup_logging(&args);

    if let Err(err) = run(&args) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?;
    let settings = Settings::resolve(args, config)?;

    let mut client_config = ClientConfig::new(&settings.domain, settings.token.clone())?;
    client_config.timeout = Some(settings.timeout);
    let client = HttpClient::new(client_config);

    let events: EventSinkHandle = Arc::new(NullSink);
    let mut session = Session::new(
        Box::new(client),
        settings.slots,
        settings.policy.clone(),
        events,
    );

    info!("querying {}", settings.domain);
    repl::run(&mut session)
}
