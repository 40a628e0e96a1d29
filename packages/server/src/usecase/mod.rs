//! UseCase layer: one type per application operation, depending only on the
//! domain traits.

pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod get_sockets;
pub mod persist_canvas;
pub mod place_pixel;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::PlacePixelError;
pub use get_sockets::{GetSocketsUseCase, SocketsOverview};
pub use persist_canvas::PersistCanvasUseCase;
pub use place_pixel::{PlaceOutcome, PlacePixelUseCase};
