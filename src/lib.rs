// PEAKTECH-DMM: reader and frame decoder for the PeakTech 2025 multimeter
// USB HID interface

pub mod core;
pub mod drivers;
pub mod formats;
pub mod hid;
pub mod protocol;

// Re-export commonly used types
pub use self::core::{BaseUnit, Coupling, Measurement, MonitorConfig, OutputFormat};
pub use drivers::{MeasurementStream, MeterError, Multimeter, PeakTech2025};
pub use hid::{next_frame, AsyncFrameReader, DeviceResolver, FrameReader, ReadError, SysfsResolver, UsbId};
pub use protocol::{decode, decode_unit, decode_value, Frame, FRAME_LEN};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_values_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Frame>();
        assert_send_sync::<Measurement>();

        let frame = Frame::new([0x02, 0x12, 0x34, 0x08, 0x00, 0x00, 0x40, 0x00]);
        let decoded = std::thread::spawn(move || decode(&frame)).join().unwrap();
        assert_eq!(decoded, decode(&frame));
        assert_eq!(decoded.to_string(), "12.34 AAC");
    }

    #[test]
    fn test_read_and_decode() {
        let data: &[u8] = &[0x00, 0x12, 0x34, 0x10, 0x00, 0x00, 0x80, 0x00];
        let mut reader = FrameReader::new(data);
        let measurement = decode(&reader.next_frame().unwrap());
        assert_eq!(measurement, Measurement::new(1234.0, "VDC"));
    }
}
