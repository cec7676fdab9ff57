// PeakTech 2025 driver
// The meter streams one 8-byte frame per display update over USB HID.

use super::traits::{MeterError, MeterResult, Multimeter};
use crate::core::Measurement;
use crate::hid::{DeviceResolver, FrameReader, UsbId};
use crate::protocol::{decode, Frame};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const VENDOR: &str = "PeakTech";
const MODEL: &str = "2025";

/// An open session with the meter.
///
/// The session owns the device handle; it is closed when the session is
/// dropped or [`close`](Self::close)d, whichever comes first.
#[derive(Debug)]
pub struct PeakTech2025<R = File> {
    reader: FrameReader<R>,
    source: Option<PathBuf>,
}

impl PeakTech2025<File> {
    /// Find the attached meter and open it
    pub fn open(resolver: &dyn DeviceResolver, id: &UsbId) -> MeterResult<Self> {
        let path = resolver
            .resolve(id)?
            .ok_or_else(|| MeterError::NotFound(id.clone()))?;
        Self::open_path(path)
    }

    /// Open a known device node
    pub fn open_path(path: impl AsRef<Path>) -> MeterResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| MeterError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "opened {} {}", VENDOR, MODEL);

        Ok(Self {
            reader: FrameReader::new(file),
            source: Some(path.to_path_buf()),
        })
    }
}

impl<R: Read> PeakTech2025<R> {
    /// Use an already-open stream
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: FrameReader::new(reader),
            source: None,
        }
    }

    /// Device node this session was opened from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Read the next raw frame
    pub fn read_frame(&mut self) -> MeterResult<Frame> {
        Ok(self.reader.next_frame()?)
    }

    /// Read and decode the next frame
    pub fn read_measurement(&mut self) -> MeterResult<Measurement> {
        let frame = self.read_frame()?;
        Ok(decode(&frame))
    }

    /// Close the device
    pub fn close(self) {
        debug!(source = ?self.source, "closing {} {}", VENDOR, MODEL);
    }

    /// Give back the underlying stream
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R: Read + Send> Multimeter for PeakTech2025<R> {
    fn vendor(&self) -> &str {
        VENDOR
    }

    fn model(&self) -> &str {
        MODEL
    }

    fn read_measurement(&mut self) -> MeterResult<Measurement> {
        PeakTech2025::read_measurement(self)
    }
}
