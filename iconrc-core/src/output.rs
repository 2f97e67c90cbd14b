use crate::{Error, Stage};
use std::{io::Write, path::Path};

#[cfg(not(unix))]
fn update_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn update_permissions(path: &Path) -> std::io::Result<()> {
    use std::{fs::Permissions, os::unix::fs::PermissionsExt};
    std::fs::set_permissions(path, Permissions::from_mode(0o644))
}

fn persist(dir: &Path, path: &Path, contents: &str) -> std::io::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    update_permissions(path)
}

/// Writes `contents` to `path`, creating missing parent directories. The
/// data goes to a temporary file next to `path` first, so the destination is
/// either replaced completely or left untouched.
pub(crate) fn write_output(stage: Stage, path: &Path, contents: &str) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
        stage,
        path: dir.to_owned(),
        source,
    })?;
    persist(dir, path, contents).map_err(|source| Error::Write {
        stage,
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_parent_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("1").join("2").join("out.h");

        write_output(Stage::Header, &path, "contents").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "contents");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = std::fs::metadata(&path).unwrap();
            assert_eq!(metadata.permissions().mode() & 0o777, 0o644);
        }
    }

    #[test]
    fn should_replace_existing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("icons.qrc");
        std::fs::write(&path, "a much longer previous version of the file").unwrap();

        write_output(Stage::Manifest, &path, "new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn should_report_write_error_with_stage_and_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        // a directory cannot be replaced by a file
        let path = tmp.path().join("taken");
        std::fs::create_dir_all(path.join("inner")).unwrap();

        let result = write_output(Stage::Manifest, &path, "contents");

        match result {
            Err(Error::Write { stage, path: p, .. }) => {
                assert_eq!(stage, Stage::Manifest);
                assert_eq!(p, path);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
