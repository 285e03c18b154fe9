//! # LEMMI Server
//!
//! Serves the runner backend until Ctrl+C.
//!
//! ## Usage
//!
//! ```bash
//! lemmi_server --config server.toml --bind 127.0.0.1:5000 --seed 42
//! ```
//!
//! Precedence: defaults, then `--config`, then `LEMMI_BIND`, then flags.

use std::process::ExitCode;

use lemmi_server::ServerConfig;
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!("Usage: lemmi_server [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>    TOML config file");
    println!("  -b, --bind <ADDR>      Listen address (default: 0.0.0.0:5000)");
    println!("  -s, --seed <SEED>      Fixed referral code seed");
    println!("  -h, --help             Show this help");
    println!();
    println!("Environment:");
    println!("  LEMMI_BIND             Listen address, overridden by --bind");
    println!("  RUST_LOG               Log filter (default: info)");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut bind: Option<String> = None;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    bind = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            other => tracing::warn!(arg = %other, "ignoring unknown argument"),
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => match ServerConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(%path, error = %e, "cannot load config");
                return ExitCode::FAILURE;
            }
        },
        None => ServerConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(bind) = bind {
        config.bind = bind;
    }
    if seed.is_some() {
        config.referral_seed = seed;
    }
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration");
        return ExitCode::FAILURE;
    }

    match lemmi_server::serve(&config, shutdown_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}
