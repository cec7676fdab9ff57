//! Multimeter monitor
//! Finds the attached PeakTech 2025, reads measurements and logs them

use anyhow::{anyhow, bail, Context};
use peaktech_dmm::drivers::{MeasurementStream, MeterError, PeakTech2025};
use peaktech_dmm::hid::{SysfsResolver, UsbId};
use peaktech_dmm::{MonitorConfig, OutputFormat};
use std::env;
use std::time::Duration;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

fn print_usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!("\nOptions:");
    eprintln!("  --count N          Number of readings to take (default 5)");
    eprintln!("  --forever          Read until interrupted");
    eprintln!("  --device VID:PID   USB id to look for (default 2571:4100)");
    eprintln!("  --path DEVICE      Open this hidraw node instead of scanning");
    eprintln!("  --timeout-ms MS    Longest wait for one frame (default 2000)");
    eprintln!("  --json             Print one JSON object per reading");
    eprintln!("  --config FILE      Load settings from a JSON file");
    eprintln!("\nExample: {} --count 10 --json", program);
}

fn next_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> anyhow::Result<&'a str> {
    iter.next()
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow!("{} needs a value", flag))
}

fn parse_args(args: &[String]) -> anyhow::Result<MonitorConfig> {
    // Load the config file first so flags override it
    let mut config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = args
                .get(i + 1)
                .ok_or_else(|| anyhow!("--config needs a value"))?;
            MonitorConfig::load(path).with_context(|| format!("Failed to load {}", path))?
        }
        None => MonitorConfig::default(),
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                iter.next();
            }
            "--count" => {
                let count: usize = next_value(&mut iter, arg)?.parse()?;
                config = config.with_count(count);
            }
            "--forever" => config = config.forever(),
            "--device" => config = config.with_device(UsbId::parse(next_value(&mut iter, arg)?)?),
            "--path" => config = config.with_device_path(next_value(&mut iter, arg)?),
            "--timeout-ms" => {
                let ms: u64 = next_value(&mut iter, arg)?.parse()?;
                config = config.with_timeout(Duration::from_millis(ms));
            }
            "--json" => config = config.with_output(OutputFormat::Json),
            other => bail!("Unknown argument: {}", other),
        }
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage(&args[0]);
        return Ok(());
    }

    let config = parse_args(&args)?;

    // Locate and open the meter
    let meter = match PeakTech2025::open(&*config.resolver(), &config.device) {
        Ok(meter) => meter,
        Err(MeterError::NotFound(id)) => {
            if config.device_path.is_none() {
                for device in SysfsResolver::default().list_devices()? {
                    tracing::info!("Attached: {} ({})", device.node.display(), device.id);
                }
            }
            bail!("Could not find PeakTech 2025 ({})", id);
        }
        Err(e) => return Err(e.into()),
    };

    // The reader thread owns the session; a stuck read is abandoned on exit
    let mut readings = MeasurementStream::spawn(meter, config.frame_timeout);

    let mut taken = 0usize;
    while config.count.map_or(true, |count| taken < count) {
        let measurement = tokio::select! {
            result = readings.next() => result?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        };

        match config.output {
            OutputFormat::Text => tracing::info!("Measurement: {}", measurement),
            OutputFormat::Json => println!("{}", serde_json::to_string(&measurement)?),
        }
        taken += 1;
    }

    tracing::info!("Read {} measurements", taken);
    Ok(())
}
