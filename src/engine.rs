// src/engine.rs
use crate::drivers::{SampleSource, Series, StripchartError, ViewWindow};
use crate::types::*;

/// Owns the sample source, the stored series and the scrolling x window.
///
/// One `tick` pulls exactly one sample. There is no buffering between the source and the
/// series, so a slow device slows the chart down instead of queueing data.
pub struct Stripchart {
    source: Option<Box<dyn SampleSource>>,
    series: Series,
    window: ViewWindow,
    settings: ChartSettings,
    state: ChartState,
}

impl Stripchart {
    pub fn new(source: Box<dyn SampleSource>, settings: ChartSettings) -> Self {
        log::info!("stripchart running on {}", source.describe());
        Self {
            source: Some(source),
            series: Series::new(),
            window: ViewWindow::new(settings.width),
            settings,
            state: ChartState::Running,
        }
    }

    pub fn state(&self) -> ChartState {
        self.state
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn window(&self) -> &ViewWindow {
        &self.window
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn y_range(&self) -> (f64, f64) {
        (self.settings.y_min, self.settings.y_max)
    }

    /// Pull one sample, store it and scroll. Returns `Ok(None)` once closed.
    ///
    /// Any source error is terminal: the chart closes and releases the source before the
    /// error is handed back.
    pub fn tick(&mut self) -> Result<Option<Sample>, StripchartError> {
        let Some(source) = self.source.as_mut() else {
            return Ok(None);
        };
        let sample = match source.next_sample() {
            Ok(sample) => sample,
            Err(err) => {
                log::error!("sample stream halted: {err}");
                self.close();
                return Err(err);
            }
        };
        if let Err(err) = self.series.push(sample) {
            self.close();
            return Err(err);
        }
        self.window.follow(sample.index);
        Ok(Some(sample))
    }

    /// Enter the terminal state and drop the source, which closes the serial handle.
    pub fn close(&mut self) {
        if let Some(source) = self.source.take() {
            log::info!(
                "closing {} after {} samples",
                source.describe(),
                self.series.len()
            );
        }
        self.state = ChartState::Closed;
    }
}
