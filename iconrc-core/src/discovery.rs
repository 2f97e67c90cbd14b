use crate::{icon::IconEntry, Error};
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Joins the normal components of a relative path with `/`.
fn normalize(relative: &Path) -> Option<String> {
    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(segments.join("/"))
}

/// Finds every file below `icon_root` whose name ends in `.<extension>` and
/// returns them sorted by their normalized relative path. Symbolic links to
/// files are included.
pub fn discover(icon_root: &Path, extension: &str) -> Result<Vec<IconEntry>, Error> {
    if !icon_root.is_dir() {
        return Err(Error::MissingIconRoot(icon_root.to_owned()));
    }

    let mut icons = Vec::new();
    for entry in WalkDir::new(icon_root).follow_links(false) {
        let entry = entry.map_err(|source| Error::Walk {
            path: source
                .path()
                .map(Path::to_owned)
                .unwrap_or_else(|| icon_root.to_owned()),
            source,
        })?;
        // symlinked files count, symlinked directories are not descended into
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let Some(path) = entry
            .path()
            .strip_prefix(icon_root)
            .ok()
            .and_then(normalize)
        else {
            tracing::warn!("skipping non-UTF-8 path {}", entry.path().display());
            continue;
        };
        if let Some(icon) = IconEntry::new(path, extension) {
            tracing::debug!("found icon {}", icon);
            icons.push(icon);
        }
    }

    icons.sort();
    icons.dedup();
    Ok(icons)
}
