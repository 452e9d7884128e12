use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::error::StripchartError;
use crate::drivers::{Series, ViewWindow};
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub line: RGBColor,
    pub line_width: u32,
    /// Caption, grid and tick labels. Text needs a system font.
    pub decorations: bool,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: WHITE,
            line: RGBColor(128, 0, 128),
            line_width: 2,
            decorations: true,
        }
    }
}
/// Renders the visible part of `series` with the same fixed axes as the live chart.
pub fn render_stripchart_png(
    series: &Series,
    window: &ViewWindow,
    y_range: (f64, f64),
    style: &PlotStyle,
) -> Result<Vec<u8>, StripchartError> {
    if series.is_empty() {
        return Err(StripchartError::Plot("series has no samples yet".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let (x_min, x_max) = window.as_f64();
        let mut builder = ChartBuilder::on(&root);
        builder.margin(10);
        if style.decorations {
            builder
                .caption("Temperature", ("sans-serif", 20).into_font().color(&BLACK))
                .set_label_area_size(LabelAreaPosition::Left, 45)
                .set_label_area_size(LabelAreaPosition::Bottom, 40);
        }
        let mut chart = builder.build_cartesian_2d(x_min..x_max, y_range.0..y_range.1)?;
        if style.decorations {
            chart
                .configure_mesh()
                .light_line_style(&BLACK.mix(0.1))
                .draw()?;
        }
        let points = series
            .visible_points(window)
            .into_iter()
            .map(|[x, y]| (x, y.clamp(y_range.0, y_range.1)));
        chart.draw_series(LineSeries::new(
            points,
            style.line.stroke_width(style.line_width),
        ))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Writes a snapshot into `dir` and returns its path. Existing files are never overwritten.
pub fn save_snapshot(
    dir: &Path,
    series: &Series,
    window: &ViewWindow,
    y_range: (f64, f64),
    style: &PlotStyle,
) -> Result<PathBuf, StripchartError> {
    let png = render_stripchart_png(series, window, y_range, style)?;
    let path = snapshot_path(dir);
    std::fs::write(&path, png)?;
    Ok(path)
}
// stripchart_<unix-millis>.png, then _1, _2... if that name is taken
fn snapshot_path(dir: &Path) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let mut path = dir.join(format!("stripchart_{millis}.png"));
    let mut suffix = 1u32;
    while path.exists() {
        path = dir.join(format!("stripchart_{millis}_{suffix}.png"));
        suffix += 1;
    }
    path
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, StripchartError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| StripchartError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sample;
    fn series_of(n: u64) -> (Series, ViewWindow) {
        let mut series = Series::new();
        let mut window = ViewWindow::new(100);
        for index in 0..n {
            series
                .push(Sample {
                    index,
                    value: 20.0 + (index as f64 * 0.1).sin(),
                })
                .unwrap();
            window.follow(index);
        }
        (series, window)
    }
    fn bare_style() -> PlotStyle {
        PlotStyle {
            decorations: false,
            ..PlotStyle::default()
        }
    }
    #[test]
    fn snapshot_is_png() {
        let (series, window) = series_of(150);
        let png = render_stripchart_png(&series, &window, (-45.0, 105.0), &bare_style()).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }
    #[test]
    fn empty_series_is_refused() {
        let (series, window) = series_of(0);
        assert!(matches!(
            render_stripchart_png(&series, &window, (-45.0, 105.0), &bare_style()),
            Err(StripchartError::Plot(_))
        ));
    }
    #[test]
    fn quick_saves_do_not_overwrite_each_other() {
        let dir = std::env::temp_dir().join(format!("tempchart-snapshots-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let (series, window) = series_of(20);
        let first = save_snapshot(&dir, &series, &window, (-45.0, 105.0), &bare_style()).unwrap();
        let second = save_snapshot(&dir, &series, &window, (-45.0, 105.0), &bare_style()).unwrap();
        assert_ne!(first, second);
        assert!(first.exists() && second.exists());
        assert!(first
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("stripchart_") && name.ends_with(".png")));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
