// Fixed-size frame streamed by the meter's HID interface
// No delimiter, checksum or length prefix: a frame is exactly FRAME_LEN bytes.

use std::fmt;
use thiserror::Error;

/// Number of bytes in one frame
pub const FRAME_LEN: usize = 8;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrameError {
    #[error("Frame must be exactly 8 bytes, got {0}")]
    InvalidLength(usize),
}

/// One raw frame, indices 0-7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Get a single byte. Panics if `index >= FRAME_LEN`.
    pub fn byte(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// Check whether any bit of `mask` is set in byte `index`
    pub fn has(&self, index: usize, mask: u8) -> bool {
        self.0[index] & mask != 0
    }

    /// Check whether every bit of `mask` is set in byte `index`
    pub fn has_all(&self, index: usize, mask: u8) -> bool {
        self.0[index] & mask == mask
    }
}

impl From<[u8; FRAME_LEN]> for Frame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = FrameError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; FRAME_LEN] = data
            .try_into()
            .map_err(|_| FrameError::InvalidLength(data.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_access() {
        let frame = Frame::new([0x41, 0x12, 0x34, 0x10, 0x02, 0x00, 0x80, 0x3D]);
        assert_eq!(frame.byte(1), 0x12);
        assert!(frame.has(0, 0x40));
        assert!(frame.has(0, 0x01));
        assert!(!frame.has(0, 0x02));

        assert!(frame.has_all(7, 0x3D));
        assert!(!frame.has_all(7, 0x3F));
        assert!(frame.has(7, 0x3F));
    }

    #[test]
    fn test_try_from_slice() {
        let data = [0u8, 1, 2, 3, 4, 5, 6, 7];
        let frame = Frame::try_from(&data[..]).unwrap();
        assert_eq!(frame.bytes(), &data);

        assert_eq!(
            Frame::try_from(&data[..7]),
            Err(FrameError::InvalidLength(7))
        );
        assert_eq!(
            Frame::try_from(&[0u8; 9][..]),
            Err(FrameError::InvalidLength(9))
        );
    }

    #[test]
    fn test_display() {
        let frame = Frame::from([0x00, 0x12, 0x34, 0x10, 0x00, 0x00, 0x80, 0xAB]);
        assert_eq!(frame.to_string(), "00 12 34 10 00 00 80 AB");
    }
}
