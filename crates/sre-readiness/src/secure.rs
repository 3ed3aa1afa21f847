use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use readiness_spec::{SideChannel, SideChannelError};
use sha2::{Digest, Sha256};

/// Hex prefix of `sha256(origin)`; keeps per-origin files apart without
/// putting the origin itself in a file name.
pub fn origin_slug(origin: &str) -> String {
    let digest = Sha256::digest(origin.as_bytes());
    hex::encode(&digest[..8])
}

pub fn secure_path(state_dir: &Path, origin: &str) -> PathBuf {
    state_dir.join(format!("secure-{}.json", origin_slug(origin)))
}

pub fn link_path(state_dir: &Path, origin: &str) -> PathBuf {
    state_dir.join(format!("link-{}.txt", origin_slug(origin)))
}

/// Side channel backed by one JSON object on disk.
///
/// The file is rewritten on every change and removed once it holds nothing.
/// Neither the file nor its directory is created until a value is stored.
#[derive(Debug, Clone)]
pub struct FileSideChannel {
    path: PathBuf,
}

impl FileSideChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_origin(state_dir: &Path, origin: &str) -> Self {
        Self::new(secure_path(state_dir, origin))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, SideChannelError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), SideChannelError> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
                _ => Ok(()),
            };
        }
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }
}

impl SideChannel for FileSideChannel {
    fn get(&self, key: &str) -> Result<Option<String>, SideChannelError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SideChannelError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), SideChannelError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    /// Checks the file, or the closest existing ancestor directory, for write
    /// permission without touching the disk.
    fn probe(&mut self) -> bool {
        if self.path.exists() {
            return writable(&self.path) && self.load().is_ok();
        }
        self.path
            .ancestors()
            .skip(1)
            .map(|dir| if dir.as_os_str().is_empty() { Path::new(".") } else { dir })
            .find(|dir| dir.exists())
            .is_some_and(|dir| dir.is_dir() && writable(dir))
    }
}

fn writable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| !meta.permissions().readonly())
}
