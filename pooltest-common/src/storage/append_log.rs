//! Append-only newline-delimited JSON log
//!
//! Each measurement becomes one compact JSON line. The file is opened in
//! append mode for every write and closed afterwards; a mutex serializes
//! writers so lines from concurrent requests never interleave.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::MeasurementStore;
use crate::error::StorageError;
use crate::models::Measurement;

#[derive(Debug)]
pub struct AppendLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AppendLog {
    /// Prepare the log at `path`, creating the file and its parent directory
    ///
    /// Fails if the location is not writable.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serialize a measurement as one `\n`-terminated line
pub fn encode_line(measurement: &Measurement) -> Result<Vec<u8>, serde_json::Error> {
    let mut line = serde_json::to_vec(measurement)?;
    line.push(b'\n');
    Ok(line)
}

#[async_trait]
impl MeasurementStore for AppendLog {
    fn backend_name(&self) -> &'static str {
        "append-log"
    }

    async fn store(&self, measurement: &Measurement) -> Result<(), StorageError> {
        // Encode before taking the lock so a bad record never opens the file
        let line = encode_line(measurement)?;

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;

        Ok(())
    }
}
