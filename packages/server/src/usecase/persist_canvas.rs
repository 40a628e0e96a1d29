//! UseCase: canvas persistence.
//!
//! Takes a snapshot of the canvas and writes it to the snapshot store. Runs
//! on the persistence loop's timer, once at startup to materialize the file,
//! and once more at shutdown. A failure never affects the in-memory canvas.

use std::sync::Arc;

use crate::domain::{CanvasRepository, SnapshotError, SnapshotStore};

pub struct PersistCanvasUseCase {
    canvas: Arc<dyn CanvasRepository>,
    store: Arc<dyn SnapshotStore>,
}

impl PersistCanvasUseCase {
    pub fn new(canvas: Arc<dyn CanvasRepository>, store: Arc<dyn SnapshotStore>) -> Self {
        Self { canvas, store }
    }

    pub async fn execute(&self) -> Result<(), SnapshotError> {
        let raster = self.canvas.snapshot().await;
        self.store.save(&raster).await
    }
}
