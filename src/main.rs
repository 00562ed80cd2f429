// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Entry point: logging, configuration and command dispatch.

mod app;
mod backend;
mod cli;
mod config;
mod constant;
mod domain;
mod error;

use std::path::PathBuf;

use clap::Parser;

use crate::cli::Command;
use crate::config::AppConfig;

/// Face-matching workflow client.
#[derive(Debug, Clone, Parser)]
#[command(name = "facematch", version, about)]
pub struct Args {
    /// Backend base URL (overrides the config file).
    #[arg(long, env = "FACEMATCH_BACKEND")]
    pub backend: Option<String>,

    /// Config file to use instead of the default location.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref());
    if let Some(url) = args.backend {
        config.backend_url = url;
    }
    log::debug!("backend at {}", config.backend_url);

    cli::run(args.command, config, args.config).await
}
