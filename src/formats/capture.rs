// Recorded frame captures for offline decoding
//
// Text captures hold one frame per line as eight hex bytes, e.g.
//   00 12 34 10 00 00 80 00   # 1234 VDC
// Binary captures are raw frames back to back, as read from the device.

use crate::hid::{next_frame, ReadError};
use crate::protocol::{Frame, FRAME_LEN};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{space0, space1},
    combinator::{all_consuming, map_res, opt},
    multi::separated_list1,
    sequence::{delimited, preceded},
    IResult, Parser,
};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Frame read error: {0}")]
    Read(#[from] ReadError),
}

pub type Result<T> = std::result::Result<T, CaptureError>;

/// One hex byte, optionally prefixed with 0x
fn hex_byte(input: &str) -> IResult<&str, u8> {
    preceded(
        opt(alt((tag("0x"), tag("0X")))),
        map_res(
            take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
            |digits: &str| u8::from_str_radix(digits, 16),
        ),
    )
    .parse(input)
}

/// Whitespace separated hex bytes filling the whole line
fn hex_bytes(input: &str) -> IResult<&str, Vec<u8>> {
    all_consuming(delimited(space0, separated_list1(space1, hex_byte), space0)).parse(input)
}

/// Parse a single capture line. Comments and blank lines yield `Ok(None)`.
pub fn parse_frame_line(line: &str) -> std::result::Result<Option<Frame>, String> {
    let content = line.split('#').next().unwrap_or("").trim();
    if content.is_empty() {
        return Ok(None);
    }

    let (_, bytes) = hex_bytes(content).map_err(|e| format!("invalid hex bytes: {}", e))?;
    Frame::try_from(bytes.as_slice())
        .map(Some)
        .map_err(|e| e.to_string())
}

/// Parse a text capture
pub fn parse_text_capture(text: &str) -> Result<Vec<Frame>> {
    let mut frames = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let frame = parse_frame_line(line).map_err(|message| CaptureError::Parse {
            line: index + 1,
            message,
        })?;
        frames.extend(frame);
    }

    Ok(frames)
}

/// Read a binary capture to the end. Data must end on a frame boundary.
pub fn read_binary_capture<R: Read>(mut reader: R) -> Result<Vec<Frame>> {
    let mut frames = Vec::new();

    loop {
        match next_frame(&mut reader) {
            Ok(frame) => frames.push(frame),
            Err(e) if e.is_end_of_stream() => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(frames)
}

pub fn load_text_capture(path: impl AsRef<Path>) -> Result<Vec<Frame>> {
    let text = std::fs::read_to_string(path)?;
    parse_text_capture(&text)
}

pub fn load_binary_capture(path: impl AsRef<Path>) -> Result<Vec<Frame>> {
    let file = File::open(path)?;
    read_binary_capture(BufReader::with_capacity(FRAME_LEN * 64, file))
}

/// Format a frame as a text capture line
pub fn format_frame_line(frame: &Frame) -> String {
    frame.to_string()
}
