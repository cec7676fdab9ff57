// Multimeter driver framework
pub mod stream;
pub mod traits;

// Drivers
pub mod peaktech_2025;

pub use peaktech_2025::PeakTech2025;
pub use stream::{MeasurementStream, StreamError};
pub use traits::{MeterError, MeterResult, Multimeter};
