//! Whole-file JSON persistence shared by the account registry and the
//! per-user diaries.

use crate::error::DiaryResult;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads `path` as JSON, or returns `T::default()` when the file does not
/// exist yet.
pub fn load_json_or_default<T>(path: &Path) -> DiaryResult<T>
where
    T: DeserializeOwned + Default,
{
    match fs::read_to_string(path) {
        Ok(serialized) => Ok(serde_json::from_str(&serialized)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

/// Writes `value` as 4-space indented JSON. The file is replaced by rename
/// so readers never observe a half-written document.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> DiaryResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&buf)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_default() {
        let dir = tempdir().unwrap();
        let loaded: BTreeMap<String, u32> =
            load_json_or_default(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn saves_indented_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("map.json");
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), 1u32);

        save_json(&path, &map).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n    \"a\": 1\n}");
        let back: BTreeMap<String, u32> = load_json_or_default(&path).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let loaded: DiaryResult<BTreeMap<String, u32>> = load_json_or_default(&path);
        assert!(loaded.is_err());
    }
}
