mod cli;
mod config;
mod errors;
mod field;
mod listener;
mod model;
mod processor;
mod sound;
mod tone;

use crate::config::Config;
use crate::errors::AppError;
use crate::listener::Listener;
use crate::processor::DatagramProcessor;
use env_logger::Env;
use log::{error, info};

fn setup_logging(level: &str) {
    let env = Env::default().filter_or("RUST_LOG", match level {
        "essential" => "info",
        "debug" => "debug",
        "trace" => "trace",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    });
    env_logger::Builder::from_env(env).init();
}

fn main() -> Result<(), AppError> {
    let args = cli::parse_cli();
    setup_logging(&args.log_level);

    let cfg = Config::from_cli(&args).inspect_err(|e| error!("{}", e))?;
    let player = cfg.build_player().inspect_err(|e| error!("{}", e))?;
    let mut processor = DatagramProcessor::new(player)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    listener::write_banner(&mut out, &cfg, &processor)?;

    let mut udp = Listener::bind(cfg.port).inspect_err(|e| error!("{}", e))?;
    info!("bound {}", udp.local_addr()?);
    listener::write_listening(&mut out, cfg.port)?;

    udp.run(&mut processor, &mut out)
}
