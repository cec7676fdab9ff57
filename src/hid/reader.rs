// Blocking frame reader over an already-open byte stream

use crate::protocol::{Frame, FRAME_LEN};
use std::io::{self, Read};
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Short read: stream ended after {received} of 8 frame bytes")]
    ShortRead { received: usize },
}

impl ReadError {
    /// True when the stream ended cleanly between two frames
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ReadError::ShortRead { received: 0 })
    }
}

pub type Result<T> = std::result::Result<T, ReadError>;

/// Read exactly one frame from `stream`.
///
/// Blocks until 8 bytes have arrived. Fails with `ShortRead` if the stream
/// reports end of data first; any other read failure is returned as `Io`
/// without retrying. Partial data is discarded on failure.
pub fn next_frame<R: Read + ?Sized>(stream: &mut R) -> Result<Frame> {
    let mut buf = [0u8; FRAME_LEN];
    let mut total_read = 0;

    while total_read < FRAME_LEN {
        match stream.read(&mut buf[total_read..]) {
            Ok(0) => return Err(ReadError::ShortRead { received: total_read }),
            Ok(n) => total_read += n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ReadError::Io(e)),
        }
    }

    let frame = Frame::new(buf);
    trace!(%frame, "read frame");
    Ok(frame)
}

/// Owns a byte stream and hands out one frame per call
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read the next frame, see [`next_frame`]
    pub fn next_frame(&mut self) -> Result<Frame> {
        next_frame(&mut self.inner)
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Give back the stream
    pub fn into_inner(self) -> R {
        self.inner
    }
}
