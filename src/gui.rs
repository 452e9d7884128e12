// src/gui.rs
use eframe::egui;
use egui::Color32;
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};
use crate::drivers::{save_snapshot, PlotStyle, StripchartError};
use crate::engine::Stripchart;
use crate::types::*;

const LINE_COLOR: Color32 = Color32::from_rgb(128, 0, 128);

/// Slot the window uses to hand a fatal stream error back to `main` after it closes.
pub type FatalSlot = Rc<RefCell<Option<StripchartError>>>;

pub struct StripchartApp {
    chart: Stripchart,
    interval: Duration,
    last_tick: Option<Instant>,
    fatal: FatalSlot,
    status: String,
}

impl StripchartApp {
    pub fn new(chart: Stripchart, fatal: FatalSlot) -> Self {
        let interval = Duration::from_millis(chart.settings().tick_interval_ms);
        Self {
            chart,
            interval,
            last_tick: None,
            fatal,
            status: "waiting for first sample...".to_owned(),
        }
    }

    // 定时器: 到点才取下一个采样 (同一线程, 不会重叠)
    fn tick_if_due(&mut self, ctx: &egui::Context) {
        if self.chart.state() == ChartState::Closed {
            return;
        }
        let due = self
            .last_tick
            .map_or(true, |t| t.elapsed() >= self.interval);
        if !due {
            return;
        }
        self.last_tick = Some(Instant::now());
        match self.chart.tick() {
            Ok(_) => {
                if let Some(latest) = self.chart.series().latest() {
                    self.status = format!(
                        "latest: {:.3} °C   samples: {}",
                        latest.value,
                        latest.index + 1
                    );
                }
            }
            Err(err) => {
                *self.fatal.borrow_mut() = Some(err);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn save_png(&mut self) {
        let (series, window) = (self.chart.series(), self.chart.window());
        match save_snapshot(
            Path::new("."),
            series,
            window,
            self.chart.y_range(),
            &PlotStyle::default(),
        ) {
            Ok(path) => {
                log::info!("saved snapshot to {}", path.display());
                self.status = format!("saved {}", path.display());
            }
            Err(err) => {
                log::warn!("snapshot failed: {err}");
                self.status = format!("snapshot failed: {err}");
            }
        }
    }

    fn next_repaint_delay(&self) -> Duration {
        self.last_tick
            .map(|t| self.interval.saturating_sub(t.elapsed()))
            .unwrap_or_default()
    }
}

impl eframe::App for StripchartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick_if_due(ctx);

        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let can_save = !self.chart.series().is_empty();
                    if ui.add_enabled(can_save, egui::Button::new("Save PNG")).clicked() {
                        self.save_png();
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (x_min, x_max) = self.chart.window().as_f64();
            let (y_min, y_max) = self.chart.y_range();
            let points = self.chart.series().visible_points(self.chart.window());
            Plot::new("stripchart")
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .allow_boxed_zoom(false)
                .show(ui, |plot_ui| {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                        [x_min, y_min],
                        [x_max, y_max],
                    ));
                    plot_ui.line(
                        Line::new(PlotPoints::new(points))
                            .name("temperature")
                            .color(LINE_COLOR)
                            .width(2.0),
                    );
                });
        });

        if self.chart.state() == ChartState::Running {
            ctx.request_repaint_after(self.next_repaint_delay());
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.chart.close();
    }
}

// eframe drops the app once the window is closed
impl Drop for StripchartApp {
    fn drop(&mut self) {
        self.chart.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::LineSource;
    use eframe::App;
    use std::io::Cursor;

    fn app_over(text: &'static str, tick_interval_ms: u64) -> (StripchartApp, FatalSlot) {
        let settings = ChartSettings {
            tick_interval_ms,
            ..ChartSettings::default()
        };
        let source = Box::new(LineSource::new(Cursor::new(text), "test"));
        let fatal = FatalSlot::default();
        let app = StripchartApp::new(Stripchart::new(source, settings), fatal.clone());
        (app, fatal)
    }

    #[test]
    fn back_to_back_frames_read_one_sample() {
        let (mut app, fatal) = app_over("20.0\n21.0\n", 60_000);
        let ctx = egui::Context::default();
        app.tick_if_due(&ctx);
        app.tick_if_due(&ctx);
        assert_eq!(app.chart.series().len(), 1);
        assert!(app.status.starts_with("latest: 20.000"));
        assert!(fatal.borrow().is_none());
    }

    #[test]
    fn malformed_line_is_handed_to_main() {
        let (mut app, fatal) = app_over("20.0\nbad\n", 1);
        let ctx = egui::Context::default();
        app.tick_if_due(&ctx);
        std::thread::sleep(Duration::from_millis(10));
        app.tick_if_due(&ctx);
        assert!(matches!(
            *fatal.borrow(),
            Some(StripchartError::MalformedSample { .. })
        ));
        assert_eq!(app.chart.state(), ChartState::Closed);
        assert_eq!(app.chart.series().len(), 1);

        std::thread::sleep(Duration::from_millis(10));
        app.tick_if_due(&ctx);
        assert_eq!(app.chart.series().len(), 1);
    }

    #[test]
    fn exit_closes_the_chart() {
        let (mut app, _fatal) = app_over("20.0\n", 60_000);
        app.tick_if_due(&egui::Context::default());
        assert_eq!(app.chart.state(), ChartState::Running);
        app.on_exit(None);
        assert_eq!(app.chart.state(), ChartState::Closed);
        app.chart.close();
        assert_eq!(app.chart.state(), ChartState::Closed);
    }
}
