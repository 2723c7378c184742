use crate::error::LevelError;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of level files.
pub const LEVEL_EXT: &str = "xml";

/// Level files in `dir`, sorted by path. The directory is created when it
/// does not exist yet.
pub fn list_levels(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, LevelError> {
    let dir = dir.as_ref();
    let io_err = |source| LevelError::Io {
        path: dir.to_path_buf(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_err)?;

    let mut levels = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !entry.file_type().map_err(io_err)?.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(LEVEL_EXT) {
            levels.push(path);
        }
    }
    levels.sort();
    Ok(levels)
}

/// The level after `current`, wrapping around. With no current level (or
/// one that is no longer listed) the first level is returned.
pub fn next_level<'a>(levels: &'a [PathBuf], current: Option<&Path>) -> Option<&'a PathBuf> {
    let idx = current
        .and_then(|cur| levels.iter().position(|p| p == cur))
        .map_or(0, |i| (i + 1) % levels.len());
    levels.get(idx)
}

/// First unused `level_NN.xml` name in `dir`.
pub fn new_level_path(dir: impl AsRef<Path>) -> PathBuf {
    let dir = dir.as_ref();
    (0u32..)
        .map(|n| dir.join(format!("level_{n:02}.{LEVEL_EXT}")))
        .find(|p| !p.exists())
        .unwrap_or_else(|| dir.join(format!("level.{LEVEL_EXT}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_only_xml_files_sorted() {
        let dir = tempdir().expect("tempdir");
        for name in ["b.xml", "a.xml", "notes.txt"] {
            fs::write(dir.path().join(name), "<level/>").expect("write");
        }
        fs::create_dir(dir.path().join("nested.xml")).expect("mkdir");

        let levels = list_levels(dir.path()).expect("list");
        let names: Vec<_> = levels
            .iter()
            .filter_map(|p| p.file_name()?.to_str())
            .collect();
        assert_eq!(names, vec!["a.xml", "b.xml"]);
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tempdir().expect("tempdir");
        let levels_dir = dir.path().join("levels");
        assert!(list_levels(&levels_dir).expect("list").is_empty());
        assert!(levels_dir.is_dir());
    }

    #[test]
    fn next_level_wraps() {
        let levels = vec![PathBuf::from("a.xml"), PathBuf::from("b.xml")];
        assert_eq!(next_level(&levels, None), Some(&levels[0]));
        assert_eq!(next_level(&levels, Some(Path::new("a.xml"))), Some(&levels[1]));
        assert_eq!(next_level(&levels, Some(Path::new("b.xml"))), Some(&levels[0]));
        assert_eq!(next_level(&[], None), None);
    }

    #[test]
    fn new_level_path_skips_taken_names() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("level_00.xml"), "").expect("write");
        assert_eq!(new_level_path(dir.path()), dir.path().join("level_01.xml"));
    }
}
