//! Collaborative pixel canvas server library.
//!
//! Clients connect over WebSocket and place pixels on a shared fixed-size
//! raster. Every accepted change is broadcast to all other connected clients
//! and the raster is periodically persisted as a PNG snapshot.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
