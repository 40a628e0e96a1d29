//! Client session domain model.

use std::fmt;

use uuid::Uuid;

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Stable identifier of one WebSocket connection, assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketId(Uuid);

impl SocketId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SocketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One connected client as tracked by the connection registry.
///
/// `address` is the remote identity used for rate limiting; several sessions
/// may share it (multiple tabs behind one IP).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSession {
    pub id: SocketId,
    pub address: String,
    pub connected_at: Timestamp,
}

impl ClientSession {
    pub fn new(id: SocketId, address: String, connected_at: Timestamp) -> Self {
        Self {
            id,
            address,
            connected_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_socket_ids_are_unique() {
        // given / when:
        let a = SocketId::generate();
        let b = SocketId::generate();

        // then:
        assert_ne!(a, b);
    }

    #[test]
    fn test_socket_id_display_is_uuid_formatted() {
        // given:
        let id = SocketId::generate();

        // when:
        let rendered = id.to_string();

        // then: 8-4-4-4-12 hyphenated form
        assert_eq!(rendered.len(), 36);
        assert_eq!(rendered.matches('-').count(), 4);
    }

    #[test]
    fn test_timestamps_order_by_value() {
        // given:
        let earlier = Timestamp::new(1000);
        let later = Timestamp::new(2000);

        // then:
        assert!(earlier < later);
        assert_eq!(earlier.value(), 1000);
    }
}
