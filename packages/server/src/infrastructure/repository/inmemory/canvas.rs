//! In-memory canvas repository.
//!
//! Holds the canvas behind a `tokio::sync::Mutex`: the mutex is the single
//! serialization point for all pixel mutations, so writes from different
//! clients never interleave below pixel granularity and `snapshot` never
//! observes a torn pixel.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Canvas, CanvasError, CanvasRepository, PixelUpdate};

pub struct InMemoryCanvasRepository {
    canvas: Arc<Mutex<Canvas>>,
}

impl InMemoryCanvasRepository {
    pub fn new(canvas: Arc<Mutex<Canvas>>) -> Self {
        Self { canvas }
    }
}

#[async_trait]
impl CanvasRepository for InMemoryCanvasRepository {
    async fn dimensions(&self) -> (u32, u32) {
        let canvas = self.canvas.lock().await;
        (canvas.width(), canvas.height())
    }

    async fn get_pixel(&self, x: u32, y: u32) -> Result<(u8, u8, u8, u8), CanvasError> {
        let canvas = self.canvas.lock().await;
        canvas.get(x, y)
    }

    async fn set_pixel(&self, update: PixelUpdate) -> Result<bool, CanvasError> {
        let mut canvas = self.canvas.lock().await;
        canvas.set(update.x, update.y, update.color)
    }

    async fn snapshot(&self) -> Vec<u8> {
        let canvas = self.canvas.lock().await;
        canvas.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PixelColor;

    fn create_repository() -> InMemoryCanvasRepository {
        InMemoryCanvasRepository::new(Arc::new(Mutex::new(Canvas::blank(
            8,
            8,
            PixelColor::WHITE,
        ))))
    }

    #[tokio::test]
    async fn test_set_then_get_through_the_trait() {
        // given:
        let repo = create_repository();

        // when:
        let changed = repo
            .set_pixel(PixelUpdate {
                x: 3,
                y: 4,
                color: PixelColor::new(1, 2, 3),
            })
            .await
            .unwrap();

        // then:
        assert!(changed);
        assert_eq!(repo.get_pixel(3, 4).await.unwrap(), (1, 2, 3, 255));
        assert_eq!(repo.dimensions().await, (8, 8));
    }

    #[tokio::test]
    async fn test_out_of_bounds_is_propagated() {
        // given:
        let repo = create_repository();

        // when:
        let result = repo.get_pixel(8, 0).await;

        // then:
        assert!(matches!(result, Err(CanvasError::OutOfBounds { .. })));
    }

    #[tokio::test]
    async fn test_snapshot_copies_the_full_raster() {
        // given:
        let repo = create_repository();

        // when:
        let snapshot = repo.snapshot().await;

        // then:
        assert_eq!(snapshot.len(), 8 * 8 * 4);
    }
}
