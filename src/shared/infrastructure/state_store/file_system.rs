// File backed implementation of the StateStore port: one `<owner_key>.json` per owner.
//
// Writes go to a temporary sibling first and are renamed into place, so a crash mid-write
// leaves the previous document intact.

use crate::shared::infrastructure::state_store::{StateStore, StateStoreError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct FileSystemStateStore {
    root: PathBuf,
}

impl FileSystemStateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, owner_key: &str) -> Result<PathBuf, StateStoreError> {
        let valid = !owner_key.is_empty()
            && owner_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
            && !owner_key.starts_with('.');
        if !valid {
            return Err(StateStoreError::InvalidKey(owner_key.to_string()));
        }
        Ok(self.root.join(format!("{owner_key}.json")))
    }
}

#[async_trait::async_trait]
impl StateStore for FileSystemStateStore {
    async fn read(&self, owner_key: &str) -> Result<Option<String>, StateStoreError> {
        let path = self.document_path(owner_key)?;
        match fs::read_to_string(&path).await {
            Ok(document) => Ok(Some(document)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn write(&self, owner_key: &str, document: &str) -> Result<(), StateStoreError> {
        let path = self.document_path(owner_key)?;
        fs::create_dir_all(&self.root).await?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, document).await?;
        fs::rename(&staging, &path).await?;
        Ok(())
    }
}
