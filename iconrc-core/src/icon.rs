/// One icon file, identified by its `/`-separated path relative to the icon
/// root.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct IconEntry {
    path: String,
    alias: String,
}

impl IconEntry {
    /// Returns `None` if `path` does not end in `.<extension>`.
    pub fn new(path: impl Into<String>, extension: &str) -> Option<IconEntry> {
        let path = path.into();
        let alias = path
            .strip_suffix(extension)?
            .strip_suffix('.')?
            .to_owned();
        Some(IconEntry { path, alias })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path without its extension, used as the resource name.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The first path segment, or `default` for icons directly in the root.
    pub fn category<'a>(&'a self, default: &'a str) -> &'a str {
        match self.path.split_once('/') {
            Some((first, _)) => first,
            None => default,
        }
    }

    /// The file name without its extension.
    pub fn file_stem(&self) -> &str {
        match self.alias.rsplit_once('/') {
            Some((_, stem)) => stem,
            None => &self.alias,
        }
    }
}

impl std::fmt::Display for IconEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}
