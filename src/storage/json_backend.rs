use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::{LedgerError, Result};

use super::KeyValueStore;

const TMP_SUFFIX: &str = "tmp";

/// Persistence surface kept in one JSON object file, key to string value.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            LedgerError::Serialization(format!(
                "`{}` is not a key-value document: {}",
                self.path.display(),
                err
            ))
        })
    }

    /// Current document, or an empty one if the file is corrupt; the caller
    /// is about to overwrite it either way.
    fn document_for_write(&self) -> Result<BTreeMap<String, String>> {
        match self.read_document() {
            Ok(document) => Ok(document),
            Err(LedgerError::Serialization(message)) => {
                tracing::warn!(path = %self.path.display(), %message, "replacing corrupt store file");
                Ok(BTreeMap::new())
            }
            Err(err) => Err(err),
        }
    }

    fn write_document(&self, document: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), keys = document.len(), "store file written");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_document()?.remove(key))
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        let mut document = self.document_for_write()?;
        for (key, value) in entries {
            document.insert(key.to_string(), value.clone());
        }
        self.write_document(&document)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut document = self.document_for_write()?;
        if document.remove(key).is_some() {
            self.write_document(&document)?;
        }
        Ok(())
    }
}

pub(crate) fn ensure_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
