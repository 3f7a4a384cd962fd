use super::StateBackend;
use crate::error::{LicenPrepError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores each namespace as `<root>/<key>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(LicenPrepError::Io)?;
        }
        Ok(())
    }
}

impl StateBackend for FsBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let blob = fs::read_to_string(path).map_err(LicenPrepError::Io)?;
        Ok(Some(blob))
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        self.ensure_dir()?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, blob).map_err(LicenPrepError::Io)?;
        fs::rename(&tmp_path, self.blob_path(key)).map_err(LicenPrepError::Io)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());
        assert_eq!(backend.load("licenprep-storage").unwrap(), None);
    }

    #[test]
    fn save_creates_root_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("data");
        let backend = FsBackend::new(root.clone());

        backend.save("ns", "first").unwrap();
        backend.save("ns", "second").unwrap();

        assert_eq!(backend.load("ns").unwrap(), Some("second".to_string()));
        assert!(root.join("ns.json").exists());
    }

    #[test]
    fn save_leaves_no_tmp_files() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());
        backend.save("ns", "{}").unwrap();

        for entry in fs::read_dir(dir.path()).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_str().unwrap().to_string();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn namespaces_are_separate_files() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());
        backend.save("a", "1").unwrap();
        backend.save("b", "2").unwrap();
        assert_eq!(backend.load("a").unwrap(), Some("1".to_string()));
        assert_eq!(backend.load("b").unwrap(), Some("2".to_string()));
    }
}
