// Async frame reader for tokio byte streams
// Same contract as the blocking reader; timeouts are left to the caller,
// e.g. by wrapping next_frame() in tokio::time::timeout.

use super::reader::{ReadError, Result};
use crate::protocol::{Frame, FRAME_LEN};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

#[derive(Debug)]
pub struct AsyncFrameReader<R> {
    inner: R,
}

impl<R: AsyncRead + Unpin> AsyncFrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read exactly one frame
    pub async fn next_frame(&mut self) -> Result<Frame> {
        let mut buf = [0u8; FRAME_LEN];
        let mut total_read = 0;

        while total_read < FRAME_LEN {
            match self.inner.read(&mut buf[total_read..]).await {
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

    pub fn into_inner(self) -> R {
        self.inner
    }
}
