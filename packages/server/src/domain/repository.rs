//! Repository trait definitions.
//!
//! The domain layer defines the data-access interfaces it needs; the
//! infrastructure layer provides the implementations.

use async_trait::async_trait;
use thiserror::Error;

use super::canvas::{Canvas, CanvasError};
use super::session::{ClientSession, SocketId};
use super::update::PixelUpdate;

/// Access to the shared canvas raster.
///
/// Implementations serialize all mutations: two `set_pixel` calls never
/// interleave below pixel granularity, and `snapshot` never observes a
/// partially-written pixel.
#[async_trait]
pub trait CanvasRepository: Send + Sync {
    /// Canvas dimensions as (width, height).
    async fn dimensions(&self) -> (u32, u32);

    /// Read the pixel at (x, y) as (r, g, b, a).
    async fn get_pixel(&self, x: u32, y: u32) -> Result<(u8, u8, u8, u8), CanvasError>;

    /// Apply the update; returns whether the stored color changed.
    async fn set_pixel(&self, update: PixelUpdate) -> Result<bool, CanvasError>;

    /// A consistent copy of the raw RGBA buffer.
    async fn snapshot(&self) -> Vec<u8>;
}

/// The connection registry: who is connected right now.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn add_session(&self, session: ClientSession);

    /// Remove and return the session, if it was registered.
    async fn remove_session(&self, socket_id: &SocketId) -> Option<ClientSession>;

    async fn list_sessions(&self) -> Vec<ClientSession>;

    async fn all_socket_ids(&self) -> Vec<SocketId>;

    async fn count(&self) -> usize;

    /// Whether any connected session reports the given remote address.
    async fn any_with_address(&self, address: &str) -> bool;
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Read(String),
    #[error("failed to write snapshot: {0}")]
    Write(String),
}

/// Durable storage for canvas snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the persisted canvas. `Ok(None)` means no file exists yet; a
    /// present-but-unusable file is an error so the caller can decide the
    /// fallback.
    async fn load(&self) -> Result<Option<Canvas>, SnapshotError>;

    /// Overwrite the persisted canvas wholesale with the given raw RGBA
    /// buffer.
    async fn save(&self, raster: &[u8]) -> Result<(), SnapshotError>;
}
