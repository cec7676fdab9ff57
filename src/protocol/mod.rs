// PeakTech 2025 HID wire format

pub mod bcd;
pub mod decoder;
pub mod frame;

pub use decoder::{decode, decode_base_unit, decode_coupling, decode_unit, decode_value};
pub use frame::{Frame, FrameError, FRAME_LEN};
