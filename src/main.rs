use clap::Parser;
use cli::{Cli, Cmd};
use eyre::WrapErr;
use iconrc_core::Config;
use std::path::PathBuf;

mod cli;
mod commands;

/// The executable is expected to live one level below the project root,
/// e.g. in `<project>/scripts/`.
fn default_project_root() -> eyre::Result<PathBuf> {
    let exe = std::env::current_exe().wrap_err("failed to get path to iconrc executable")?;
    exe.parent()
        .and_then(|dir| dir.parent())
        .map(|root| root.to_owned())
        .ok_or_else(|| eyre::eyre!("can't determine project root from {}", exe.display()))
}

fn setup_logger(verbose: bool) -> eyre::Result<()> {
    use tracing::Level;
    use tracing_subscriber::{
        filter::LevelFilter, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry,
    };

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    Registry::default()
        .with(LevelFilter::from(level))
        .with(
            layer()
                .with_ansi(true)
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    setup_logger(args.verbose)?;

    let project_root = match args.project_root {
        Some(project_root) => project_root,
        None => default_project_root()?,
    };
    let config = Config::load(&project_root, args.config_file.as_deref())?;
    if let Some(source) = &config.source {
        tracing::debug!("using configuration {}", source.display());
    }

    match args.subcommand.unwrap_or_default() {
        Cmd::Generate => commands::generate(&config.resolve(&project_root))
            .wrap_err("failed to generate icon resources"),
        Cmd::List => commands::list(&config.resolve(&project_root)),
        Cmd::Config => commands::config(&config),
    }
}
