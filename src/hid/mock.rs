// Mock HID stream for testing without hardware

use std::collections::VecDeque;
use std::io::{self, Read};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

/// Mock byte stream standing in for an opened hidraw node
#[derive(Debug, Clone)]
pub struct MockHidStream {
    /// Data to be read (simulates frames sent by the meter)
    read_buffer: VecDeque<u8>,

    /// Most bytes handed out per read call
    chunk_size: usize,

    /// Error returned once the buffer is drained, instead of end of data
    fail_with: Option<io::ErrorKind>,

    /// Return `Interrupted` from the next read
    interrupt: bool,

    /// Block forever once the buffer is drained, like a silent device
    stall: bool,
}

impl MockHidStream {
    pub fn new() -> Self {
        Self {
            read_buffer: VecDeque::new(),
            chunk_size: usize::MAX,
            fail_with: None,
            interrupt: false,
            stall: false,
        }
    }

    /// Deliver at most `chunk_size` bytes per read
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Fail with `kind` after the buffered data has been read
    pub fn fail_with(mut self, kind: io::ErrorKind) -> Self {
        self.fail_with = Some(kind);
        self
    }

    /// Interrupt the first read
    pub fn with_interrupt(mut self) -> Self {
        self.interrupt = true;
        self
    }

    /// Block the reading thread once the buffered data has been read.
    /// Only meaningful for blocking reads.
    pub fn with_stall(mut self) -> Self {
        self.stall = true;
        self
    }

    /// Push data to be read
    pub fn push_read_data(&mut self, data: &[u8]) {
        self.read_buffer.extend(data.iter().copied());
    }

    /// Push one complete frame
    pub fn push_frame(&mut self, frame: &[u8; 8]) {
        self.push_read_data(frame);
    }

    /// Get number of bytes left to read
    pub fn bytes_available(&self) -> usize {
        self.read_buffer.len()
    }
}

impl Default for MockHidStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Read for MockHidStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt {
            self.interrupt = false;
            return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
        }

        if self.read_buffer.is_empty() && self.stall {
            loop {
                std::thread::park();
            }
        }

        if self.read_buffer.is_empty() {
            return match self.fail_with {
                Some(kind) => Err(io::Error::new(kind, "mock device failure")),
                None => Ok(0),
            };
        }

        let count = buf.len().min(self.chunk_size).min(self.read_buffer.len());
        for (slot, byte) in buf.iter_mut().zip(self.read_buffer.drain(..count)) {
            *slot = byte;
        }
        Ok(count)
    }
}

impl AsyncRead for MockHidStream {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let mut scratch = vec![0u8; buf.remaining()];
        let n = Read::read(this, &mut scratch)?;
        buf.put_slice(&scratch[..n]);
        Poll::Ready(Ok(()))
    }
}

/// Helper to create a mock stream pre-loaded with frames
pub fn mock_stream_with_frames(frames: &[[u8; 8]]) -> MockHidStream {
    let mut stream = MockHidStream::new();
    for frame in frames {
        stream.push_frame(frame);
    }
    stream
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_chunked_read() {
        let mut stream = MockHidStream::new().with_chunk_size(2);
        stream.push_read_data(b"Hello");

        let mut buf = [0u8; 8];
        assert_eq!(stream.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"He");
        assert_eq!(stream.bytes_available(), 3);
    }

    #[test]
    fn test_mock_end_of_data() {
        let mut stream = MockHidStream::new();
        let mut buf = [0u8; 4];
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_mock_failure_after_data() {
        let mut stream = MockHidStream::new().fail_with(io::ErrorKind::NotConnected);
        stream.push_read_data(&[1, 2]);

        let mut buf = [0u8; 4];
        assert_eq!(stream.read(&mut buf).unwrap(), 2);
        let err = stream.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
    }

    #[tokio::test]
    async fn test_mock_async_read() {
        use tokio::io::AsyncReadExt;

        let mut stream = mock_stream_with_frames(&[[1, 2, 3, 4, 5, 6, 7, 8]]);

        let mut buf = [0u8; 8];
        AsyncReadExt::read_exact(&mut stream, &mut buf).await.unwrap();
        assert_eq!(buf, [1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
