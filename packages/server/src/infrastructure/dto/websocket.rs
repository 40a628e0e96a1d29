//! WebSocket wire format.
//!
//! Both directions carry the same shape: `{"type":"pixel","data":[x,y,r,g,b]}`.
//! `data` stays a plain integer vector here; range and arity validation is
//! the domain's job (`PixelUpdate::from_tuple`).

use serde::{Deserialize, Serialize};

use crate::domain::PixelUpdate;

/// Message type tags on the realtime channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "pixel")]
    Pixel,
}

/// A pixel event as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelFrame {
    pub r#type: MessageType,
    pub data: Vec<i64>,
}

impl PixelFrame {
    pub fn new(data: Vec<i64>) -> Self {
        Self {
            r#type: MessageType::Pixel,
            data,
        }
    }

    pub fn from_update(update: &PixelUpdate) -> Self {
        Self::new(update.to_tuple().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PixelColor;

    #[test]
    fn test_frame_serializes_to_the_wire_shape() {
        // given:
        let frame = PixelFrame::new(vec![2, 2, 10, 20, 30]);

        // when:
        let json = serde_json::to_string(&frame).unwrap();

        // then:
        assert_eq!(json, r#"{"type":"pixel","data":[2,2,10,20,30]}"#);
    }

    #[test]
    fn test_frame_deserializes_from_the_wire_shape() {
        // given:
        let json = r#"{"type":"pixel","data":[1,2,3,4,5]}"#;

        // when:
        let frame: PixelFrame = serde_json::from_str(json).unwrap();

        // then:
        assert_eq!(frame, PixelFrame::new(vec![1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_unknown_type_tag_is_rejected() {
        // given:
        let json = r#"{"type":"chat","data":[1,2,3,4,5]}"#;

        // when:
        let result = serde_json::from_str::<PixelFrame>(json);

        // then:
        assert!(result.is_err());
    }

    #[test]
    fn test_non_integer_data_is_rejected() {
        // given:
        let json = r#"{"type":"pixel","data":[1.5,2,3,4,5]}"#;

        // when:
        let result = serde_json::from_str::<PixelFrame>(json);

        // then:
        assert!(result.is_err());
    }

    #[test]
    fn test_from_update_matches_the_tuple() {
        // given:
        let update = PixelUpdate {
            x: 7,
            y: 9,
            color: PixelColor::new(1, 2, 3),
        };

        // when:
        let frame = PixelFrame::from_update(&update);

        // then:
        assert_eq!(frame.data, vec![7, 9, 1, 2, 3]);
    }
}
