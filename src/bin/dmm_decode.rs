//! Capture decode utility
//! Decodes a recorded frame capture without the meter attached

use anyhow::bail;
use peaktech_dmm::formats::{load_binary_capture, load_text_capture};
use peaktech_dmm::protocol::decode;
use peaktech_dmm::Measurement;
use serde::Serialize;
use std::env;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Serialize)]
struct DecodedFrame {
    index: usize,
    frame: String,
    #[serde(flatten)]
    measurement: Measurement,
}

#[derive(Debug, PartialEq)]
struct Options {
    capture: String,
    binary: bool,
    json: bool,
}

fn parse_args(args: &[String]) -> anyhow::Result<Options> {
    let mut capture = None;
    let mut binary = false;
    let mut json = false;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--binary" => binary = true,
            "--json" => json = true,
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            path => {
                if let Some(first) = capture.replace(path.to_string()) {
                    bail!("Only one capture file may be given (got {} and {})", first, path);
                }
            }
        }
    }

    let Some(capture) = capture else {
        bail!("No capture file given");
    };

    Ok(Options {
        capture,
        binary,
        json,
    })
}

fn main() -> anyhow::Result<()> {
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <capture> [--binary] [--json]", args[0]);
        eprintln!("\nExamples:");
        eprintln!(
            "  {} session.txt              # Hex text, one frame per line",
            args[0]
        );
        eprintln!(
            "  {} session.bin --binary     # Raw frames as read from hidraw",
            args[0]
        );
        std::process::exit(1);
    }

    let Options {
        capture,
        binary,
        json,
    } = parse_args(&args)?;

    let frames = if binary {
        load_binary_capture(&capture)?
    } else {
        load_text_capture(&capture)?
    };

    if !json {
        println!("Loaded {} frames from {}\n", frames.len(), capture);
    }

    for (index, frame) in frames.iter().enumerate() {
        let measurement = decode(frame);
        if json {
            let decoded = DecodedFrame {
                index,
                frame: frame.to_string(),
                measurement,
            };
            println!("{}", serde_json::to_string(&decoded)?);
        } else {
            println!("{:5}  {}  {}", index, frame, measurement);
        }
    }

    Ok(())
}
