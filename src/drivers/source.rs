use std::io::{BufRead, ErrorKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::drivers::StripchartError;
use crate::types::Sample;
/// Something that hands out temperature samples one at a time, blocking until the next is ready.
///
/// Errors are terminal: after a source returns `Err`, callers must not ask it for more samples.
pub trait SampleSource {
    fn next_sample(&mut self) -> Result<Sample, StripchartError>;
    /// Human readable origin, used in log lines.
    fn describe(&self) -> String;
}
/// Decodes one newline-terminated text line into a temperature value.
pub fn decode_line(raw: &[u8]) -> Result<f64, StripchartError> {
    let text = std::str::from_utf8(raw).map_err(|_| StripchartError::MalformedSample {
        line: String::from_utf8_lossy(raw).into_owned(),
        reason: "not valid UTF-8".into(),
    })?;
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .map_err(|err| StripchartError::MalformedSample {
            line: trimmed.to_owned(),
            reason: err.to_string(),
        })
}
/// Reads samples from any buffered byte stream, one float per line.
///
/// The serial port is the production reader; tests feed a `Cursor`.
pub struct LineSource<R: BufRead> {
    reader: R,
    label: String,
    next_index: u64,
}
impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, label: impl Into<String>) -> Self {
        Self {
            reader,
            label: label.into(),
            next_index: 0,
        }
    }
    /// Blocks until a full line arrives. Driver timeouts are retried, so this never gives up on
    /// a quiet device; the partial line read so far is kept across retries.
    fn read_line(&mut self) -> Result<Vec<u8>, StripchartError> {
        let mut line = Vec::new();
        loop {
            match self.reader.read_until(b'\n', &mut line) {
                Ok(0) if line.is_empty() => return Err(StripchartError::StreamClosed),
                Ok(0) => return Ok(line),
                Ok(_) if line.ends_with(b"\n") => return Ok(line),
                Ok(_) => continue,
                Err(err) if err.kind() == ErrorKind::TimedOut => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }
}
impl<R: BufRead> SampleSource for LineSource<R> {
    fn next_sample(&mut self) -> Result<Sample, StripchartError> {
        let line = self.read_line()?;
        let value = decode_line(&line)?;
        let sample = Sample {
            index: self.next_index,
            value,
        };
        self.next_index += 1;
        log::trace!("{}: sample {} = {}", self.label, sample.index, sample.value);
        Ok(sample)
    }
    fn describe(&self) -> String {
        self.label.clone()
    }
}
/// In-memory source useful for tests and deterministic playback.
#[cfg(test)]
pub struct ManualSource {
    queue: std::collections::VecDeque<f64>,
    next_index: u64,
}
#[cfg(test)]
impl ManualSource {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            queue: values.into_iter().collect(),
            next_index: 0,
        }
    }
}
#[cfg(test)]
impl SampleSource for ManualSource {
    fn next_sample(&mut self) -> Result<Sample, StripchartError> {
        let value = self.queue.pop_front().ok_or(StripchartError::StreamClosed)?;
        let sample = Sample {
            index: self.next_index,
            value,
        };
        self.next_index += 1;
        Ok(sample)
    }
    fn describe(&self) -> String {
        "manual".into()
    }
}
/// Synthetic room temperature: slow drift plus a little sensor noise.
pub struct SimulatedSource {
    rng: StdRng,
    phase: f64,
    next_index: u64,
}
impl SimulatedSource {
    const BASE_CELSIUS: f64 = 22.0;
    const SWING_CELSIUS: f64 = 3.0;
    const NOISE_CELSIUS: f64 = 0.25;
    const PHASE_STEP: f64 = 0.05;
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
    #[cfg(test)]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            phase: 0.0,
            next_index: 0,
        }
    }
}
impl SampleSource for SimulatedSource {
    fn next_sample(&mut self) -> Result<Sample, StripchartError> {
        let noise = self
            .rng
            .gen_range(-Self::NOISE_CELSIUS..Self::NOISE_CELSIUS);
        let value = Self::BASE_CELSIUS + self.phase.sin() * Self::SWING_CELSIUS + noise;
        self.phase += Self::PHASE_STEP;
        let sample = Sample {
            index: self.next_index,
            value,
        };
        self.next_index += 1;
        Ok(sample)
    }
    fn describe(&self) -> String {
        "simulation".into()
    }
}
