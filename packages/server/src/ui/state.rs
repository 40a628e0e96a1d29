//! Shared handler state.

use std::sync::Arc;

use crate::domain::CanvasRepository;
use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetSocketsUseCase, PlacePixelUseCase,
};

pub struct AppState {
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub place_pixel_usecase: Arc<PlacePixelUseCase>,
    pub get_sockets_usecase: Arc<GetSocketsUseCase>,
    /// Direct canvas access for the live PNG endpoint.
    pub canvas: Arc<dyn CanvasRepository>,
    /// RFC 3339 process start time, served by the liveness endpoint.
    pub started_at: String,
}
