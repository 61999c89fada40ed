//! Directory-backed key-value store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{CacheError, KeyValueStore};

const EXTENSION: &str = "json";

/// Persistent store keeping one file per key under a root directory.
///
/// Keys map to `<root>/<key>.json`. Path separators, `:` and `%` in keys
/// are percent-escaped, so `cart:guest` lives in `cart%3Aguest.json` and
/// never collides with `cart_guest`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, CacheError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            CacheError::OpenError(format!("{}: {}", root.display(), e))
        })?;
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", escape_key(key), EXTENSION))
    }
}

fn escape_key(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '%' | ':' | '/' | '\\' => name.push_str(&format!("%{:02X}", c as u32)),
            c => name.push(c),
        }
    }
    name
}

/// Inverse of [`escape_key`]. `None` for names this store did not write.
fn unescape_key(name: &str) -> Option<String> {
    let mut key = String::with_capacity(name.len());
    let mut chars = name.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            key.push(c);
            continue;
        }
        let hex: String = chars.by_ref().take(2).collect();
        let byte = u8::from_str_radix(&hex, 16).ok().filter(|_| hex.len() == 2)?;
        key.push(char::from(byte));
    }
    Some(key)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::trace!(path = %path.display(), bytes = value.len(), "wrote key");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key).is_file())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == EXTENSION) {
                if let Some(key) = path.file_stem().and_then(|s| unescape_key(&s.to_string_lossy())) {
                    keys.push(key);
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
