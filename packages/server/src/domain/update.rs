//! Pixel update validation.
//!
//! A raw wire tuple only becomes a `PixelUpdate` after every field has been
//! checked against the canvas dimensions and the 0-255 channel range, so the
//! rest of the pipeline never sees an unvalidated coordinate.

use thiserror::Error;

use super::canvas::PixelColor;

/// Why an inbound update was dropped. None of these disconnect the client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidUpdate {
    #[error("expected 5 values (x, y, r, g, b), got {0}")]
    WrongArity(usize),
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} canvas")]
    CoordinateOutOfRange {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
    #[error("{channel} channel value {value} is outside 0-255")]
    ChannelOutOfRange { channel: &'static str, value: i64 },
}

/// A single validated (x, y, color) change request from one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelUpdate {
    pub x: u32,
    pub y: u32,
    pub color: PixelColor,
}

impl PixelUpdate {
    /// Validate a wire 5-tuple `[x, y, r, g, b]` against the canvas
    /// dimensions.
    pub fn from_tuple(data: &[i64], width: u32, height: u32) -> Result<Self, InvalidUpdate> {
        let [x, y, r, g, b] = match data {
            [x, y, r, g, b] => [*x, *y, *r, *g, *b],
            _ => return Err(InvalidUpdate::WrongArity(data.len())),
        };

        if x < 0 || x >= i64::from(width) || y < 0 || y >= i64::from(height) {
            return Err(InvalidUpdate::CoordinateOutOfRange {
                x,
                y,
                width,
                height,
            });
        }

        let channel = |channel: &'static str, value: i64| {
            u8::try_from(value).map_err(|_| InvalidUpdate::ChannelOutOfRange { channel, value })
        };

        Ok(Self {
            x: x as u32,
            y: y as u32,
            color: PixelColor {
                r: channel("red", r)?,
                g: channel("green", g)?,
                b: channel("blue", b)?,
            },
        })
    }

    /// The wire representation, `[x, y, r, g, b]`.
    pub fn to_tuple(&self) -> [i64; 5] {
        [
            i64::from(self.x),
            i64::from(self.y),
            i64::from(self.color.r),
            i64::from(self.color.g),
            i64::from(self.color.b),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tuple_is_accepted() {
        // given:
        let data = [2, 3, 10, 20, 30];

        // when:
        let update = PixelUpdate::from_tuple(&data, 16, 16).unwrap();

        // then:
        assert_eq!(update.x, 2);
        assert_eq!(update.y, 3);
        assert_eq!(update.color, PixelColor::new(10, 20, 30));
        assert_eq!(update.to_tuple(), data);
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        // given / when:
        let too_short = PixelUpdate::from_tuple(&[1, 2, 3], 16, 16);
        let too_long = PixelUpdate::from_tuple(&[1, 2, 3, 4, 5, 6], 16, 16);

        // then:
        assert_eq!(too_short, Err(InvalidUpdate::WrongArity(3)));
        assert_eq!(too_long, Err(InvalidUpdate::WrongArity(6)));
    }

    #[test]
    fn test_out_of_range_coordinates_are_rejected() {
        // given / when / then:
        assert!(matches!(
            PixelUpdate::from_tuple(&[16, 0, 0, 0, 0], 16, 16),
            Err(InvalidUpdate::CoordinateOutOfRange { .. })
        ));
        assert!(matches!(
            PixelUpdate::from_tuple(&[0, 16, 0, 0, 0], 16, 16),
            Err(InvalidUpdate::CoordinateOutOfRange { .. })
        ));
        assert!(matches!(
            PixelUpdate::from_tuple(&[-1, 0, 0, 0, 0], 16, 16),
            Err(InvalidUpdate::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_out_of_range_channels_are_rejected() {
        // given / when / then:
        assert_eq!(
            PixelUpdate::from_tuple(&[0, 0, 256, 0, 0], 16, 16),
            Err(InvalidUpdate::ChannelOutOfRange {
                channel: "red",
                value: 256
            })
        );
        assert_eq!(
            PixelUpdate::from_tuple(&[0, 0, 0, -1, 0], 16, 16),
            Err(InvalidUpdate::ChannelOutOfRange {
                channel: "green",
                value: -1
            })
        );
    }

    #[test]
    fn test_boundary_values_are_accepted() {
        // given: the far corner with extreme channel values
        let data = [15, 15, 0, 255, 0];

        // when:
        let update = PixelUpdate::from_tuple(&data, 16, 16);

        // then:
        assert!(update.is_ok());
    }
}
