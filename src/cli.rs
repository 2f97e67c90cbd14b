use std::path::PathBuf;

/// Generates a Qt resource manifest and a header of icon path constants from
/// a directory of SVG icons.
#[derive(clap::Parser)]
#[command(name = "iconrc", version)]
pub struct Cli {
    /// Sets the directory configured paths are relative to [default: parent
    /// of the directory containing this executable]
    #[arg(short, long, env = "ICONRC_PROJECT_ROOT", value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Sets a custom configuration file path [default: <DIR>/iconrc.toml]
    #[arg(short, long, env = "ICONRC_CONFIG_FILE", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Prints debug output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub subcommand: Option<Cmd>,
}

#[derive(clap::Subcommand, Clone, Copy, Default)]
pub enum Cmd {
    /// Writes the resource manifest and the constant header (default)
    #[default]
    Generate,

    /// Lists the discovered icons and their constant names without writing anything
    List,

    /// Prints the active configuration
    Config,
}
