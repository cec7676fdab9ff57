// Multimeter driver traits

use crate::core::Measurement;
use crate::hid::{DiscoveryError, ReadError, UsbId};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeterError {
    #[error("No device matching {0} found")]
    NotFound(UsbId),

    #[error("Device discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Read failed: {0}")]
    Read(#[from] ReadError),
}

pub type MeterResult<T> = std::result::Result<T, MeterError>;

/// Base trait for all multimeter drivers
pub trait Multimeter: Send {
    /// Get the meter vendor name
    fn vendor(&self) -> &str;

    /// Get the meter model name
    fn model(&self) -> &str;

    /// Get a printable name for this meter
    fn get_name(&self) -> String {
        format!("{} {}", self.vendor(), self.model())
    }

    /// Block until the meter sends its next reading
    fn read_measurement(&mut self) -> MeterResult<Measurement>;
}
