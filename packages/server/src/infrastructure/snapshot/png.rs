//! PNG-backed snapshot store.
//!
//! Persists the raster as a single PNG at a configured path, overwritten
//! wholesale on every save. Encoding and file I/O run on the blocking
//! thread pool so a save never stalls update processing.

use std::path::PathBuf;

use async_trait::async_trait;
use image::{ImageBuffer, RgbaImage};

use crate::domain::{Canvas, SnapshotError, SnapshotStore};

#[derive(Clone)]
pub struct PngSnapshotStore {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl PngSnapshotStore {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    fn load_sync(&self) -> Result<Option<Canvas>, SnapshotError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let image = image::open(&self.path).map_err(|e| SnapshotError::Read(e.to_string()))?;
        let rgba = image.to_rgba8();
        if rgba.width() != self.width || rgba.height() != self.height {
            return Err(SnapshotError::Read(format!(
                "snapshot is {}x{}, expected {}x{}",
                rgba.width(),
                rgba.height(),
                self.width,
                self.height
            )));
        }

        let canvas = Canvas::from_raw(self.width, self.height, rgba.into_raw())
            .ok_or_else(|| SnapshotError::Read("snapshot byte length mismatch".to_string()))?;
        Ok(Some(canvas))
    }

    fn save_sync(&self, raster: &[u8]) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SnapshotError::Write(e.to_string()))?;
            }
        }

        let image: RgbaImage =
            ImageBuffer::from_raw(self.width, self.height, raster.to_vec())
                .ok_or_else(|| SnapshotError::Write("raster byte length mismatch".to_string()))?;
        image
            .save(&self.path)
            .map_err(|e| SnapshotError::Write(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for PngSnapshotStore {
    async fn load(&self) -> Result<Option<Canvas>, SnapshotError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.load_sync())
            .await
            .map_err(|e| SnapshotError::Read(e.to_string()))?
    }

    async fn save(&self, raster: &[u8]) -> Result<(), SnapshotError> {
        let store = self.clone();
        let raster = raster.to_vec();
        tokio::task::spawn_blocking(move || store.save_sync(&raster))
            .await
            .map_err(|e| SnapshotError::Write(e.to_string()))?
    }
}
