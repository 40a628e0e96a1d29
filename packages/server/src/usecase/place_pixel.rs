//! UseCase: pixel placement — validate, admit, apply, fan out.
//!
//! The state machine for one inbound update:
//!
//! 1. Validate the 5-tuple against canvas dimensions and channel ranges.
//! 2. Consult the admission policy for the client's identity.
//! 3. Apply to the canvas; a write that does not change the pixel is not
//!    broadcast.
//! 4. Fan out the accepted change to every client except the originator.
//!
//! Steps 3-4 run under an update lock: broadcasts leave in canvas apply
//! order, so every client observes accepted updates in the same relative
//! order.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    Admission, CanvasRepository, MessagePusher, PixelUpdate, RateLimiter, SessionRepository,
    SocketId,
};

use super::error::PlacePixelError;

/// What happened to an accepted update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// The pixel changed and the update was fanned out.
    Applied,
    /// The pixel already had that color; nothing was broadcast.
    Unchanged,
}

pub struct PlacePixelUseCase {
    canvas: Arc<dyn CanvasRepository>,
    sessions: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    rate_limiter: Arc<RateLimiter>,
    /// Serializes apply + fan-out so broadcast order equals apply order.
    update_lock: Mutex<()>,
}

impl PlacePixelUseCase {
    pub fn new(
        canvas: Arc<dyn CanvasRepository>,
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            canvas,
            sessions,
            message_pusher,
            rate_limiter,
            update_lock: Mutex::new(()),
        }
    }

    /// Run the update state machine for one inbound 5-tuple.
    ///
    /// # Arguments
    ///
    /// * `origin` - socket id of the sending client, excluded from fan-out
    /// * `identity` - rate-limiting identity of the sending client
    /// * `data` - the raw `[x, y, r, g, b]` tuple
    /// * `frame_json` - the serialized outbound frame, broadcast verbatim
    pub async fn execute(
        &self,
        origin: SocketId,
        identity: &str,
        data: &[i64],
        frame_json: String,
    ) -> Result<PlaceOutcome, PlacePixelError> {
        // 1. Validate before consuming any rate-limit budget.
        let (width, height) = self.canvas.dimensions().await;
        let update = PixelUpdate::from_tuple(data, width, height)?;

        // 2. Admission check; a rejection is terminal for the connection.
        if self.rate_limiter.consume(identity).await == Admission::Rejected {
            return Err(PlacePixelError::RateLimitExceeded(identity.to_string()));
        }

        // 3-4. Apply and fan out atomically relative to other updates.
        let _guard = self.update_lock.lock().await;

        let changed = self.canvas.set_pixel(update).await?;
        if !changed {
            return Ok(PlaceOutcome::Unchanged);
        }

        let targets: Vec<SocketId> = self
            .sessions
            .all_socket_ids()
            .await
            .into_iter()
            .filter(|id| *id != origin)
            .collect();
        self.message_pusher.broadcast(targets, &frame_json).await;

        Ok(PlaceOutcome::Applied)
    }
}
