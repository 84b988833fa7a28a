//! folio - renders a personal single-page site from a JSON content document.

mod cli;
mod config;
mod content;
mod core;
mod dom;
mod embed;
mod logger;
mod render;
mod theme;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{ToolConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    // init runs before config loading: the site root may not exist yet
    if let Commands::Init { name, author } = &cli.command {
        return cli::init::new_site(name.as_deref(), author);
    }

    let root = cli.root.as_deref().map(utils::fs::expand_root);
    let mut config = ToolConfig::load(root.as_deref())?;

    match &cli.command {
        Commands::Build { theme, clean } => {
            if *clean {
                config.build.clean = true;
            }
            let config = init_config(config);
            cli::build::build_site(&config, theme.clone())
        }
        Commands::Serve {
            interface,
            port,
            watch,
        } => {
            if let Some(interface) = interface {
                config.serve.interface = *interface;
            }
            if let Some(port) = port {
                config.serve.port = *port;
            }
            if let Some(watch) = watch {
                config.serve.watch = *watch;
            }
            init_config(config);
            cli::serve::serve_site()
        }
        Commands::Check => {
            let config = init_config(config);
            cli::check::check_site(&config)
        }
        Commands::Init { .. } => unreachable!("handled before config loading"),
    }
}
