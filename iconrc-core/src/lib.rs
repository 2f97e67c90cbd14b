use std::path::PathBuf;

pub mod config;
pub mod discovery;
pub mod header;
pub mod icon;
pub mod identifier;
pub mod manifest;
mod output;

pub use config::{CollisionPolicy, Config, ConfigLoadError};
pub use header::{HeaderReport, HeaderWarning};
pub use icon::IconEntry;

/// The pipeline stage that produced an output error.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Stage {
    Manifest,
    Header,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Manifest => write!(f, "resource manifest"),
            Stage::Header => write!(f, "constant header"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("icon directory {} does not exist", .0.display())]
    MissingIconRoot(PathBuf),
    #[error("failed to scan icon directory at {}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to create directory {} for the {stage}", .path.display())]
    CreateDir {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {stage} {}", .path.display())]
    Write {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize resource manifest")]
    Serialize(#[source] std::io::Error),
    #[error("identifier {namespace}::{identifier} is derived from both '{first}' and '{second}'")]
    IdentifierCollision {
        namespace: String,
        identifier: String,
        first: String,
        second: String,
    },
}

/// Outcome of a full generator run.
#[derive(Debug)]
pub struct Summary {
    pub icons: usize,
    pub manifest: PathBuf,
    pub header: PathBuf,
    pub report: HeaderReport,
}

/// Runs discovery, then writes the manifest, then the header.
///
/// Both documents are built before anything is written, so a missing icon
/// root or an identifier collision leaves no output files behind. A failed
/// manifest write stops the run before the header is touched.
pub fn generate(config: &Config) -> Result<Summary, Error> {
    let icons = discovery::discover(&config.icon_root, &config.extension)?;
    tracing::info!("found {} icon files", icons.len());

    let manifest = manifest::Manifest::from_config(config, &icons);
    let (document, report) = header::build_header(&icons, config)?;

    manifest::write_manifest(&config.manifest, &manifest)?;
    tracing::debug!("wrote {} manifest entries", manifest.entries.len());

    header::write_header(&config.header, &document)?;
    tracing::debug!("wrote {} namespace blocks", document.blocks.len());

    Ok(Summary {
        icons: icons.len(),
        manifest: config.manifest.clone(),
        header: config.header.clone(),
        report,
    })
}
