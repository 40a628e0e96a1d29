//! Domain layer: the canvas model, admission policy, client sessions, and
//! the traits the use cases depend on.

pub mod canvas;
pub mod pusher;
pub mod rate_limit;
pub mod repository;
pub mod session;
pub mod update;

pub use canvas::{Canvas, CanvasError, ParseColorError, PixelColor};
pub use pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use rate_limit::{Admission, RateLimitConfig, RateLimiter};
pub use repository::{CanvasRepository, SessionRepository, SnapshotError, SnapshotStore};
pub use session::{ClientSession, SocketId, Timestamp};
pub use update::{InvalidUpdate, PixelUpdate};
