//! HTTP introspection payloads.

use serde::{Deserialize, Serialize};

use oekaki_shared::time::timestamp_to_rfc3339;

use crate::domain::ClientSession;
use crate::usecase::SocketsOverview;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketDto {
    pub socket_id: String,
    pub client_ip_address: String,
    pub connected_on: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketsDto {
    pub count: usize,
    pub sockets: Vec<SocketDto>,
}

impl From<&ClientSession> for SocketDto {
    fn from(session: &ClientSession) -> Self {
        Self {
            socket_id: session.id.to_string(),
            client_ip_address: session.address.clone(),
            connected_on: timestamp_to_rfc3339(session.connected_at.value()),
        }
    }
}

impl From<SocketsOverview> for SocketsDto {
    fn from(overview: SocketsOverview) -> Self {
        Self {
            count: overview.count,
            sockets: overview.sessions.iter().map(SocketDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SocketId, Timestamp};

    #[test]
    fn test_session_converts_to_dto_with_rfc3339_timestamp() {
        // given: 2023-01-01 00:00:00 UTC
        let session = ClientSession::new(
            SocketId::generate(),
            "10.0.0.1".to_string(),
            Timestamp::new(1672531200000),
        );

        // when:
        let dto = SocketDto::from(&session);

        // then:
        assert_eq!(dto.socket_id, session.id.to_string());
        assert_eq!(dto.client_ip_address, "10.0.0.1");
        assert!(dto.connected_on.starts_with("2023-01-01T00:00:00"));
    }

    #[test]
    fn test_overview_converts_to_dto() {
        // given:
        let session = ClientSession::new(
            SocketId::generate(),
            "10.0.0.1".to_string(),
            Timestamp::new(1672531200000),
        );
        let overview = SocketsOverview {
            count: 1,
            sessions: vec![session],
        };

        // when:
        let dto = SocketsDto::from(overview);

        // then:
        assert_eq!(dto.count, 1);
        assert_eq!(dto.sockets.len(), 1);
    }
}
