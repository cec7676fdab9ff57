// HID transport: device discovery and frame reads
pub mod async_reader;
pub mod discovery;
pub mod reader;

#[cfg(test)]
pub mod mock;

pub use async_reader::AsyncFrameReader;
pub use discovery::{
    DeviceResolver, DiscoveryError, FixedPathResolver, HidrawDevice, SysfsResolver, UsbId,
};
pub use reader::{next_frame, FrameReader, ReadError};
