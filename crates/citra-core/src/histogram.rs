//! Luminance histogram computation and chart rendering.
//!
//! The histogram counts pixels per luminance level of the edited image.
//! The chart is a line plot of those counts over levels 0..=255, drawn
//! into an RGB raster so the presentation layer can show it as an image.

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::luminance::calculate_luminance_u8;
use crate::{LuminanceHistogram, RasterImage};

/// Compute the luminance histogram of an RGB image.
///
/// The sum of all bins equals `width * height`.
///
/// # Performance
/// Single pass, O(n) in the number of pixels. Memory usage is constant
/// (1KB for bins).
pub fn compute_luminance_histogram(image: &RasterImage) -> LuminanceHistogram {
    let mut hist = LuminanceHistogram::new();

    if image.is_empty() {
        return hist;
    }

    debug_assert!(
        image.pixels.len() == (image.width as usize) * (image.height as usize) * 3,
        "Pixel data size mismatch. Expected {}, got {}",
        (image.width as usize) * (image.height as usize) * 3,
        image.pixels.len()
    );

    for chunk in image.pixels.chunks_exact(3) {
        let lum = calculate_luminance_u8(chunk[0], chunk[1], chunk[2]);
        hist.bins[lum as usize] += 1;
    }

    hist
}

/// Appearance of the rendered histogram chart.
///
/// The default is a 400x200 chart (a 4x2 inch figure at 100 DPI). Title
/// and axis labels are not rasterized; the presentation layer captions
/// the chart with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub background: [u8; 3],
    pub axis_color: [u8; 3],
    pub line_color: [u8; 3],
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 400,
            height: 200,
            title: "Histogram".to_string(),
            x_label: "Pixel Intensity".to_string(),
            y_label: "Jumlah".to_string(),
            background: [255, 255, 255],
            axis_color: [0, 0, 0],
            line_color: [0, 0, 0],
        }
    }
}

const MIN_CHART_WIDTH: u32 = 64;
const MIN_CHART_HEIGHT: u32 = 32;
const TICK_LEN: i64 = 4;
const X_TICKS: [usize; 5] = [0, 64, 128, 192, 255];

/// Pixel rectangle the histogram line is drawn into.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: i64,
    right: i64,
    top: i64,
    bottom: i64,
}

impl PlotArea {
    fn for_canvas(width: u32, height: u32) -> Self {
        let (w, h) = (width as i64, height as i64);
        Self {
            left: w / 10,
            right: w - 1 - w / 40,
            top: h / 10,
            bottom: h - 1 - h / 8,
        }
    }

    /// Canvas x of a luminance level.
    fn level_x(&self, level: usize) -> i64 {
        self.left + (level as i64 * (self.right - self.left)) / 255
    }

    /// Canvas y of a bin count, scaled so `max` touches the top.
    fn count_y(&self, count: u32, max: u32) -> i64 {
        if max == 0 {
            return self.bottom;
        }
        let span = (self.bottom - self.top) as f64;
        self.bottom - (count as f64 / max as f64 * span).round() as i64
    }
}

/// Render the histogram as a line chart with axes and tick marks.
pub fn render_histogram_chart(hist: &LuminanceHistogram, style: &ChartStyle) -> RasterImage {
    let width = style.width.max(MIN_CHART_WIDTH);
    let height = style.height.max(MIN_CHART_HEIGHT);
    let mut canvas = RgbImage::from_pixel(width, height, Rgb(style.background));
    let area = PlotArea::for_canvas(width, height);

    let axis = Rgb(style.axis_color);
    draw_line(&mut canvas, (area.left, area.top), (area.left, area.bottom), axis);
    draw_line(&mut canvas, (area.left, area.bottom), (area.right, area.bottom), axis);

    for level in X_TICKS {
        let x = area.level_x(level);
        draw_line(&mut canvas, (x, area.bottom), (x, area.bottom + TICK_LEN), axis);
    }
    let mid = (area.top + area.bottom) / 2;
    for y in [area.top, mid] {
        draw_line(&mut canvas, (area.left - TICK_LEN, y), (area.left, y), axis);
    }

    let max = hist.max_count();
    let line = Rgb(style.line_color);
    let points: Vec<(i64, i64)> = hist
        .bins()
        .iter()
        .enumerate()
        .map(|(level, &count)| (area.level_x(level), area.count_y(count, max)))
        .collect();
    for pair in points.windows(2) {
        draw_line(&mut canvas, pair[0], pair[1], line);
    }

    RasterImage::from_rgb_image(canvas)
}

/// Bresenham line between two points, clipped to the canvas.
fn draw_line(canvas: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x >= 0 && y >= 0 && x < canvas.width() as i64 && y < canvas.height() as i64 {
            canvas.put_pixel(x as u32, y as u32, color);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
