// Capture file formats
pub mod capture;

pub use capture::{
    format_frame_line, load_binary_capture, load_text_capture, parse_frame_line,
    parse_text_capture, read_binary_capture, CaptureError,
};
