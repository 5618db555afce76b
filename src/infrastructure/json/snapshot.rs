use crate::domain::entities::vector_record::{timestamp, VectorRecord};
use crate::domain::error::VectorDbError;
use crate::domain::values::cosine::ensure_finite;
use crate::domain::values::metadata_value::ensure_finite_metadata;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// On-disk form of a store, borrowed from the live store for writing.
#[derive(Serialize)]
pub struct SnapshotRef<'a> {
    pub name: &'a str,
    pub dimension: Option<usize>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub vectors: &'a IndexMap<String, VectorRecord>,
}

/// On-disk form of a store as read back. `created_at` is optional so files
/// written without it still load.
#[derive(Debug, Deserialize)]
pub struct StoreSnapshot {
    pub name: String,
    pub dimension: Option<usize>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub vectors: IndexMap<String, VectorRecord>,
}

impl StoreSnapshot {
    /// Every vector must be finite and match the declared dimension.
    pub fn validate(&self) -> Result<(), VectorDbError> {
        check_finite(&self.vectors)?;
        match self.dimension {
            Some(0) => Err(VectorDbError::Validation(
                "declared dimension must be positive".into(),
            )),
            Some(dim) => {
                for (id, record) in &self.vectors {
                    if record.dimension() != dim {
                        return Err(VectorDbError::Validation(format!(
                            "vector '{id}' has length {} but store dimension is {dim}",
                            record.dimension()
                        )));
                    }
                }
                Ok(())
            }
            None if self.vectors.is_empty() => Ok(()),
            None => Err(VectorDbError::Validation(
                "store holds vectors but declares no dimension".into(),
            )),
        }
    }
}

impl SnapshotRef<'_> {
    /// JSON has no encoding for NaN or infinity, so a snapshot holding one
    /// would not read back.
    pub fn validate(&self) -> Result<(), VectorDbError> {
        check_finite(self.vectors)
    }
}

fn check_finite(vectors: &IndexMap<String, VectorRecord>) -> Result<(), VectorDbError> {
    for (id, record) in vectors {
        ensure_finite(&record.vector)
            .and_then(|_| ensure_finite_metadata(&record.metadata))
            .map_err(|e| VectorDbError::Validation(format!("record '{id}': {e}")))?;
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Writes the snapshot next to `path` and renames it into place, so an
/// existing file is either fully replaced or left as it was.
pub fn write(path: &Path, snapshot: &SnapshotRef<'_>) -> Result<(), VectorDbError> {
    snapshot.validate()?;
    let payload = serde_json::to_vec_pretty(snapshot)
        .map_err(|e| VectorDbError::Io(format!("Failed to serialize store: {e}")))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            VectorDbError::Io(format!("Failed to create directory {}: {e}", parent.display()))
        })?;
    }

    let tmp_path = temp_path(path);
    let write_tmp = || -> std::io::Result<()> {
        let mut file = File::create(&tmp_path)?;
        file.write_all(&payload)?;
        file.sync_all()
    };
    if let Err(e) = write_tmp() {
        let _ = fs::remove_file(&tmp_path);
        return Err(VectorDbError::Io(format!(
            "Failed to write {}: {e}",
            tmp_path.display()
        )));
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        VectorDbError::Io(format!(
            "Failed to rename {} -> {}: {e}",
            tmp_path.display(),
            path.display()
        ))
    })
}

/// Reads and validates a snapshot without touching any live store.
pub fn read(path: &Path) -> Result<StoreSnapshot, VectorDbError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => VectorDbError::FileNotFound(path.display().to_string()),
        _ => VectorDbError::Io(format!("Failed to read {}: {e}", path.display())),
    })?;
    let snapshot: StoreSnapshot = serde_json::from_slice(&bytes)
        .map_err(|e| VectorDbError::Parse(format!("{}: {e}", path.display())))?;
    snapshot.validate()?;
    Ok(snapshot)
}
