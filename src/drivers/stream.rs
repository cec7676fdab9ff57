// Measurements from a meter read on its own thread
//
// Blocking reads on a silent device never return, so they run on a plain
// thread that owns the session. The consumer waits on a channel with a
// deadline and can walk away from a stuck read at any time.

use super::traits::{MeterError, MeterResult, Multimeter};
use crate::core::Measurement;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("No frame received within {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Meter(#[from] MeterError),

    #[error("Meter reader stopped")]
    Closed,
}

pub type Result<T> = std::result::Result<T, StreamError>;

/// Receiving end of a meter running on a background thread
#[derive(Debug)]
pub struct MeasurementStream {
    rx: mpsc::Receiver<MeterResult<Measurement>>,
    timeout: Duration,
}

impl MeasurementStream {
    /// Move `meter` onto a reader thread.
    ///
    /// The thread stops after the first read error or once the stream is
    /// dropped, and the meter is dropped with it. A read that never returns
    /// keeps the thread parked but does not hold up the consumer.
    pub fn spawn<M: Multimeter + 'static>(mut meter: M, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let name = meter.get_name();

        thread::spawn(move || loop {
            let result = meter.read_measurement();
            let failed = result.is_err();
            if tx.blocking_send(result).is_err() || failed {
                debug!("{} reader finished", name);
                break;
            }
        });

        Self { rx, timeout }
    }

    /// Wait for the next measurement, at most the configured timeout
    pub async fn next(&mut self) -> Result<Measurement> {
        match tokio::time::timeout(self.timeout, self.rx.recv()).await {
            Err(_) => Err(StreamError::Timeout(self.timeout)),
            Ok(None) => Err(StreamError::Closed),
            Ok(Some(result)) => Ok(result?),
        }
    }
}
