use crate::identifier;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// File name of the configuration looked up in the project root.
pub const DEFAULT_CONFIG_FILE: &str = "iconrc.toml";

/// What to do when two icons of one namespace derive the same constant name.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Append `_2`, `_3`, ... to later occurrences.
    #[default]
    Suffix,
    /// Abort the run.
    Error,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub icon_root: PathBuf,
    pub manifest: PathBuf,
    pub header: PathBuf,
    pub extension: String,
    pub prefix: String,
    /// path from the manifest's directory to the icon root; derived from
    /// `manifest` and `icon-root` if unset
    pub source_prefix: Option<String>,
    pub default_category: String,
    pub namespace: String,
    pub leading_digit_prefix: String,
    pub string_type: String,
    pub include: String,
    pub on_collision: CollisionPolicy,

    /// path of the configuration file, if the configuration was loaded from a file
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            icon_root: PathBuf::from("Icon"),
            manifest: ["resources", "icons.qrc"].iter().collect(),
            header: ["include", "QWinUI", "QWinUIIconPaths.h"].iter().collect(),
            extension: "svg".to_owned(),
            prefix: "/icons".to_owned(),
            source_prefix: None,
            default_category: "general".to_owned(),
            namespace: "QWinUIIcons".to_owned(),
            leading_digit_prefix: "ICON_".to_owned(),
            string_type: "QString".to_owned(),
            include: "<QString>".to_owned(),
            on_collision: CollisionPolicy::default(),
            source: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("invalid configuration string")]
    InvalidConfigString(#[source] toml::de::Error),
    #[error("invalid configuration file {}", .0.display())]
    InvalidConfigFile(PathBuf, #[source] toml::de::Error),
    #[error("i/o error reading configuration file {}", .0.display())]
    IoError(PathBuf, #[source] std::io::Error),
    #[error("invalid value for '{0}': {1}")]
    InvalidValue(&'static str, String),
}

/// The resource URI an icon is loaded from at runtime, e.g. `:/icons/solid/home`.
pub fn resource_uri(prefix: &str, alias: &str) -> String {
    format!(":{}/{}", prefix.trim_end_matches('/'), alias)
}

/// Relative path from directory `from` to `to`, with `/` separators.
fn relative_path(from: &Path, to: &Path) -> Option<String> {
    let from = from
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect::<Vec<_>>();
    let to = to
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect::<Vec<_>>();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut segments = Vec::new();
    for component in &from[common..] {
        match component {
            Component::Normal(_) => segments.push(".."),
            _ => return None,
        }
    }
    for component in &to[common..] {
        match component {
            Component::Normal(segment) => segments.push(segment.to_str()?),
            _ => return None,
        }
    }
    if segments.is_empty() {
        Some(".".to_owned())
    } else {
        Some(segments.join("/"))
    }
}

impl Config {
    pub fn parse(s: &str) -> Result<Config, ConfigLoadError> {
        let config: Config = toml::from_str(s).map_err(ConfigLoadError::InvalidConfigString)?;
        config.validate()?;
        Ok(config)
    }

    pub fn parse_file(p: &Path) -> Result<Config, ConfigLoadError> {
        let config_string =
            std::fs::read_to_string(p).map_err(|e| ConfigLoadError::IoError(p.to_owned(), e))?;
        let mut config: Config = toml::from_str(&config_string)
            .map_err(|e| ConfigLoadError::InvalidConfigFile(p.to_owned(), e))?;
        config.validate()?;
        config.source = Some(p.to_owned());
        Ok(config)
    }

    /// Loads `config_file` if given, otherwise `iconrc.toml` in the project
    /// root if it exists, otherwise the defaults.
    pub fn load(project_root: &Path, config_file: Option<&Path>) -> Result<Config, ConfigLoadError> {
        match config_file {
            Some(path) => Config::parse_file(path),
            None => {
                let path = project_root.join(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Config::parse_file(&path)
                } else {
                    tracing::debug!("no configuration at {}, using defaults", path.display());
                    Ok(Config::default())
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.extension.is_empty() || self.extension.contains(['/', '\\']) {
            return Err(ConfigLoadError::InvalidValue(
                "extension",
                "must be a non-empty file extension".to_owned(),
            ));
        }
        if !self.prefix.starts_with('/') {
            return Err(ConfigLoadError::InvalidValue(
                "prefix",
                "must start with '/'".to_owned(),
            ));
        }
        if !identifier::is_namespace_path(&self.namespace) {
            return Err(ConfigLoadError::InvalidValue(
                "namespace",
                format!("'{}' is not a valid namespace name", self.namespace),
            ));
        }
        if !identifier::is_constant_name(self.leading_digit_prefix.trim_end_matches('_')) {
            return Err(ConfigLoadError::InvalidValue(
                "leading-digit-prefix",
                format!("'{}' would not form a valid identifier", self.leading_digit_prefix),
            ));
        }
        if self.leading_digit_prefix.contains("__") {
            return Err(ConfigLoadError::InvalidValue(
                "leading-digit-prefix",
                "must not contain repeated underscores".to_owned(),
            ));
        }
        if self.default_category.is_empty() || self.default_category.contains('/') {
            return Err(ConfigLoadError::InvalidValue(
                "default-category",
                "must be a non-empty name without '/'".to_owned(),
            ));
        }
        Ok(())
    }

    /// Resolves the configured paths against `project_root`. Absolute paths
    /// are kept as they are.
    pub fn resolve(mut self, project_root: &Path) -> Config {
        self.icon_root = project_root.join(&self.icon_root);
        self.manifest = project_root.join(&self.manifest);
        self.header = project_root.join(&self.header);
        self
    }

    /// The path manifest entries use to reach the icon root.
    pub fn source_prefix(&self) -> String {
        if let Some(source_prefix) = &self.source_prefix {
            return source_prefix.trim_end_matches('/').to_owned();
        }
        let manifest_dir = self.manifest.parent().unwrap_or_else(|| Path::new(""));
        relative_path(manifest_dir, &self.icon_root).unwrap_or_else(|| {
            let fallback = self.icon_root.to_string_lossy().replace('\\', "/");
            tracing::warn!(
                "cannot express icon root relative to {}, using {}",
                manifest_dir.display(),
                fallback
            );
            fallback
        })
    }

    pub fn resource_uri(&self, alias: &str) -> String {
        resource_uri(&self.prefix, alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_get_default_config() {
        let config = Config::parse("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.icon_root, PathBuf::from("Icon"));
        assert_eq!(config.prefix, "/icons");
        assert_eq!(config.on_collision, CollisionPolicy::Suffix);
    }

    #[test]
    fn should_parse_partial_config() {
        let config = Config::parse(
            //language=TOML
            r#"
            icon-root = "assets/svg"
            namespace = "app::icons"
            on-collision = "error"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            Config {
                icon_root: PathBuf::from("assets/svg"),
                namespace: "app::icons".to_owned(),
                on_collision: CollisionPolicy::Error,
                ..Config::default()
            }
        );
    }

    #[test]
    fn should_reject_unknown_collision_policy() {
        let result = Config::parse(r#"on-collision = "ignore""#);

        assert!(matches!(result, Err(ConfigLoadError::InvalidConfigString(_))));
    }

    #[test]
    fn should_reject_invalid_values() {
        for input in [
            r#"namespace = "my-icons""#,
            r#"leading-digit-prefix = "1_""#,
            r#"leading-digit-prefix = "I__""#,
            r#"leading-digit-prefix = """#,
            r#"prefix = "icons""#,
            r#"extension = """#,
            r#"default-category = "a/b""#,
        ] {
            let result = Config::parse(input);
            assert!(
                matches!(result, Err(ConfigLoadError::InvalidValue(..))),
                "{} was accepted",
                input
            );
        }
    }

    #[test]
    fn should_load_file_and_remember_source() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "prefix = \"/img\"\n").unwrap();

        let config = Config::load(tmp.path(), None).unwrap();

        assert_eq!(config.prefix, "/img");
        assert_eq!(config.source, Some(path));
    }

    #[test]
    fn should_use_defaults_without_config_file() {
        let tmp = tempfile::TempDir::new().unwrap();

        let config = Config::load(tmp.path(), None).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn should_fail_for_missing_explicit_config_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");

        let result = Config::load(tmp.path(), Some(&path));

        assert!(matches!(result, Err(ConfigLoadError::IoError(p, _)) if p == path));
    }

    #[test]
    fn should_resolve_paths_against_project_root() {
        let root = Path::new("/project");

        let config = Config::default().resolve(root);

        assert_eq!(config.icon_root, root.join("Icon"));
        assert_eq!(config.manifest, root.join("resources").join("icons.qrc"));
        assert_eq!(
            config.header,
            root.join("include").join("QWinUI").join("QWinUIIconPaths.h")
        );
    }

    #[test]
    fn should_derive_source_prefix() {
        let config = Config::default().resolve(Path::new("/project"));
        assert_eq!(config.source_prefix(), "../Icon");

        let config = Config {
            icon_root: PathBuf::from("assets/icons/svg"),
            manifest: PathBuf::from("build/qrc/icons.qrc"),
            ..Config::default()
        }
        .resolve(Path::new("."));
        assert_eq!(config.source_prefix(), "../../assets/icons/svg");

        let config = Config {
            icon_root: PathBuf::from("icons"),
            manifest: PathBuf::from("icons.qrc"),
            ..Config::default()
        };
        assert_eq!(config.source_prefix(), "icons");
    }

    #[test]
    fn should_prefer_explicit_source_prefix() {
        let config = Config {
            source_prefix: Some("../Icon/".to_owned()),
            ..Config::default()
        };

        assert_eq!(config.source_prefix(), "../Icon");
    }

    #[test]
    fn should_build_resource_uri() {
        let config = Config::default();
        assert_eq!(config.resource_uri("solid/home"), ":/icons/solid/home");

        let config = Config {
            prefix: "/".to_owned(),
            ..Config::default()
        };
        assert_eq!(config.resource_uri("home"), ":/home");
    }

    #[test]
    fn should_print_config_as_toml() {
        let printed = toml::to_string_pretty(&Config::default()).unwrap();

        assert_eq!(Config::parse(&printed).unwrap(), Config::default());
    }
}
