use iconrc_core::{discovery, header, Config};

pub fn generate(config: &Config) -> eyre::Result<()> {
    tracing::info!("icon directory: {}", config.icon_root.display());
    tracing::info!("resource manifest: {}", config.manifest.display());
    tracing::info!("constant header: {}", config.header.display());

    let summary = iconrc_core::generate(config)?;
    for warning in &summary.report.warnings {
        tracing::warn!("{}", warning);
    }
    tracing::info!("wrote {}", summary.manifest.display());
    tracing::info!("wrote {}", summary.header.display());
    tracing::info!(
        "generated {} constants for {} icons",
        summary.report.constants,
        summary.icons
    );
    Ok(())
}

pub fn list(config: &Config) -> eyre::Result<()> {
    let icons = discovery::discover(&config.icon_root, &config.extension)?;
    let (document, report) = header::build_header(&icons, config)?;
    for block in &document.blocks {
        for constant in &block.constants {
            println!(
                "{}::{}\t{}",
                block.namespace,
                constant.identifier,
                config.resource_uri(&constant.alias)
            );
        }
    }
    for warning in &report.warnings {
        tracing::warn!("{}", warning);
    }
    Ok(())
}

pub fn config(config: &Config) -> eyre::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
