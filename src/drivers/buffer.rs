use crate::drivers::StripchartError;
use crate::types::Sample;
/// Append-only store of every sample received so far.
#[derive(Clone, Debug, Default)]
pub struct Series {
    indices: Vec<u64>,
    values: Vec<f64>,
}
impl Series {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, sample: Sample) -> Result<(), StripchartError> {
        let expected = self.indices.len() as u64;
        if sample.index != expected {
            return Err(StripchartError::OutOfSequence {
                expected,
                actual: sample.index,
            });
        }
        self.indices.push(sample.index);
        self.values.push(sample.value);
        Ok(())
    }
    pub fn len(&self) -> usize {
        self.indices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
    pub fn indices(&self) -> &[u64] {
        &self.indices
    }
    pub fn values(&self) -> &[f64] {
        &self.values
    }
    pub fn latest(&self) -> Option<Sample> {
        let index = *self.indices.last()?;
        let value = *self.values.last()?;
        Some(Sample { index, value })
    }
    /// Points whose index falls inside `window`, ready for plotting.
    pub fn visible_points(&self, window: &ViewWindow) -> Vec<[f64; 2]> {
        // indices start at 0 and grow by one, so they double as slice offsets
        let start = (window.low as usize).min(self.len());
        let end = (window.high as usize + 1).min(self.len());
        self.indices()[start..end]
            .iter()
            .zip(&self.values()[start..end])
            .map(|(&i, &v)| [i as f64, v])
            .collect()
    }
}
/// Currently displayed x-axis range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewWindow {
    pub low: u64,
    pub high: u64,
    width: u64,
}
impl ViewWindow {
    pub fn new(width: u64) -> Self {
        Self {
            low: 0,
            high: width,
            width,
        }
    }
    /// Scrolls so that `index` is the right edge once it passes the initial width.
    pub fn follow(&mut self, index: u64) {
        if index > self.width {
            self.low = index - self.width;
            self.high = index;
        }
    }
    pub fn as_f64(&self) -> (f64, f64) {
        (self.low as f64, self.high as f64)
    }
}
