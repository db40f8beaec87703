use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::{
    domain::entities::sentiment::{
        Sentiment, MAX_POLARITY, MAX_SUBJECTIVITY, MIN_POLARITY, MIN_SUBJECTIVITY,
    },
    ports::chart_renderer::{ChartRenderer, ChartRendererError},
};

/// Smallest width and height accepted for a chart, in pixels
pub const MIN_CHART_SIZE: u32 = 64;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([60, 60, 60]);
const GRID: Rgb<u8> = Rgb([220, 220, 220]);
const POSITIVE: Rgb<u8> = Rgb([46, 160, 67]);
const NEGATIVE: Rgb<u8> = Rgb([215, 58, 73]);
const NEUTRAL: Rgb<u8> = Rgb([150, 150, 150]);
const SUBJECTIVITY: Rgb<u8> = Rgb([245, 140, 30]);
const POLARITY_TREND: Rgb<u8> = Rgb([31, 119, 180]);

const GRID_VALUES: [f64; 5] = [-1.0, -0.5, 0.0, 0.5, 1.0];
const HISTOGRAM_BINS: usize = 10;

/// Renders sentiment charts as PNG images
///
/// Charts carry no text: series are told apart by their colors.
/// - single sentiment: a polarity bar (green if positive, red if negative) and an orange
///   subjectivity bar, both starting from the zero baseline
/// - dashboard: polarity (blue) and subjectivity (orange) trends across records on top,
///   a polarity histogram bottom left and a subjectivity histogram bottom right.
///   Polarity bins within 0.2 of zero hold neutral texts and are grey.
#[derive(Debug, Clone)]
pub struct PngChartRenderer {
    width: u32,
    height: u32,
}

impl PngChartRenderer {
    pub fn new(width: u32, height: u32) -> Result<Self, ChartRendererError> {
        if width < MIN_CHART_SIZE || height < MIN_CHART_SIZE {
            return Err(ChartRendererError::InvalidDimensions { width, height });
        }

        Ok(Self { width, height })
    }

    fn plot_area(&self) -> Rect {
        let margin_x = self.width / 10;
        let margin_y = self.height / 10;

        Rect {
            left: margin_x,
            top: margin_y,
            right: self.width - margin_x,
            bottom: self.height - margin_y,
        }
    }

    /// Splits the plot area into the trend panel and the two histogram panels
    fn dashboard_panels(&self) -> (Rect, Rect, Rect) {
        let plot = self.plot_area();
        let gap = plot.height() / 10;

        let trend = Rect {
            bottom: plot.top + (plot.height() - gap) / 2,
            ..plot
        };

        let histogram_top = trend.bottom + gap;
        let histogram_width = (plot.width() - gap) / 2;

        let polarity_histogram = Rect {
            left: plot.left,
            top: histogram_top,
            right: plot.left + histogram_width,
            bottom: plot.bottom,
        };
        let subjectivity_histogram = Rect {
            left: plot.right - histogram_width,
            top: histogram_top,
            right: plot.right,
            bottom: plot.bottom,
        };

        (trend, polarity_histogram, subjectivity_histogram)
    }
}

impl ChartRenderer for PngChartRenderer {
    #[tracing::instrument(name = "Rendering sentiment chart", skip(self))]
    fn render_sentiment(&self, sentiment: &Sentiment) -> Result<Vec<u8>, ChartRendererError> {
        let mut canvas = Canvas::new(self.width, self.height);
        let plot = self.plot_area();

        draw_grid(&mut canvas, &plot);

        let zero = plot.y_of(0.0, MIN_POLARITY, MAX_POLARITY);
        let bars = [
            (sentiment.polarity(), polarity_color(sentiment.polarity())),
            (sentiment.subjectivity(), SUBJECTIVITY),
        ];

        for (slot, (value, color)) in bars.into_iter().enumerate() {
            let (left, right) = bar_span(&plot, slot, bars.len());
            let top = plot.y_of(value, MIN_POLARITY, MAX_POLARITY);
            canvas.fill_rect(left, zero, right, top, color);
        }

        canvas.hline(plot.left, plot.right - 1, zero, AXIS);
        draw_frame(&mut canvas, &plot);

        Ok(canvas.encode_png()?)
    }

    #[tracing::instrument(
        name = "Rendering dashboard chart",
        skip(self, sentiments),
        fields(nb_sentiments = sentiments.len())
    )]
    fn render_dashboard(&self, sentiments: &[Sentiment]) -> Result<Vec<u8>, ChartRendererError> {
        if sentiments.is_empty() {
            return Err(ChartRendererError::NoData);
        }

        let mut canvas = Canvas::new(self.width, self.height);
        let (trend, polarity_histogram, subjectivity_histogram) = self.dashboard_panels();

        draw_grid(&mut canvas, &trend);
        canvas.hline(
            trend.left,
            trend.right - 1,
            trend.y_of(0.0, MIN_POLARITY, MAX_POLARITY),
            AXIS,
        );
        draw_trend(
            &mut canvas,
            &trend,
            sentiments.iter().map(Sentiment::subjectivity),
            SUBJECTIVITY,
        );
        draw_trend(
            &mut canvas,
            &trend,
            sentiments.iter().map(Sentiment::polarity),
            POLARITY_TREND,
        );
        draw_frame(&mut canvas, &trend);

        let polarity_counts = histogram(
            sentiments.iter().map(Sentiment::polarity),
            MIN_POLARITY,
            MAX_POLARITY,
            HISTOGRAM_BINS,
        );
        draw_histogram(
            &mut canvas,
            &polarity_histogram,
            &polarity_counts,
            polarity_bin_color,
        );
        draw_frame(&mut canvas, &polarity_histogram);

        let subjectivity_counts = histogram(
            sentiments.iter().map(Sentiment::subjectivity),
            MIN_SUBJECTIVITY,
            MAX_SUBJECTIVITY,
            HISTOGRAM_BINS,
        );
        draw_histogram(
            &mut canvas,
            &subjectivity_histogram,
            &subjectivity_counts,
            |_| SUBJECTIVITY,
        );
        draw_frame(&mut canvas, &subjectivity_histogram);

        Ok(canvas.encode_png()?)
    }

    fn content_type(&self) -> &'static str {
        "image/png"
    }
}

fn polarity_color(polarity: f64) -> Rgb<u8> {
    if polarity < 0.0 {
        NEGATIVE
    } else {
        POSITIVE
    }
}

fn polarity_bin_color(bin: usize) -> Rgb<u8> {
    match bin {
        bin if bin + 1 < HISTOGRAM_BINS / 2 => NEGATIVE,
        bin if bin > HISTOGRAM_BINS / 2 => POSITIVE,
        _ => NEUTRAL,
    }
}

/// Pixel area of a panel. `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy)]
struct Rect {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

impl Rect {
    fn width(&self) -> u32 {
        self.right - self.left
    }

    fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Row of `value` on a vertical axis going from `min` (bottom row) to `max` (top row)
    fn y_of(&self, value: f64, min: f64, max: f64) -> u32 {
        let ratio = ((value - min) / (max - min)).clamp(0.0, 1.0);
        let span = (self.height() - 1) as f64;
        self.bottom - 1 - (ratio * span).round() as u32
    }

    /// Column at `ratio` of the width, from the left
    fn x_at(&self, ratio: f64) -> u32 {
        let span = (self.width() - 1) as f64;
        self.left + (ratio.clamp(0.0, 1.0) * span).round() as u32
    }
}

/// Columns (inclusive) of the bar in `slot`, when `nb_slots` bars share the panel width
fn bar_span(panel: &Rect, slot: usize, nb_slots: usize) -> (u32, u32) {
    let slot_width = panel.width() / nb_slots as u32;
    let left = panel.left + slot as u32 * slot_width + slot_width / 4;
    let right = left + (slot_width / 2).saturating_sub(1);
    (left, right)
}

/// Counts `values` into `bins` equal-width bins over [min, max]
///
/// Values equal to `max` fall into the last bin.
fn histogram(values: impl Iterator<Item = f64>, min: f64, max: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0; bins];

    for value in values {
        let ratio = ((value - min) / (max - min)).clamp(0.0, 1.0);
        let bin = ((ratio * bins as f64) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    counts
}

fn draw_grid(canvas: &mut Canvas, panel: &Rect) {
    for value in GRID_VALUES {
        let y = panel.y_of(value, MIN_POLARITY, MAX_POLARITY);
        canvas.hline(panel.left, panel.right - 1, y, GRID);
    }
}

fn draw_frame(canvas: &mut Canvas, panel: &Rect) {
    canvas.vline(panel.left, panel.top, panel.bottom - 1, AXIS);
    canvas.hline(panel.left, panel.right - 1, panel.bottom - 1, AXIS);
}

fn draw_trend(
    canvas: &mut Canvas,
    panel: &Rect,
    values: impl ExactSizeIterator<Item = f64>,
    color: Rgb<u8>,
) {
    let nb_values = values.len();

    let points: Vec<(u32, u32)> = values
        .enumerate()
        .map(|(index, value)| {
            let ratio = if nb_values == 1 {
                0.5
            } else {
                index as f64 / (nb_values - 1) as f64
            };
            (
                panel.x_at(ratio),
                panel.y_of(value, MIN_POLARITY, MAX_POLARITY),
            )
        })
        .collect();

    for segment in points.windows(2) {
        canvas.line(segment[0], segment[1], color);
    }

    let marker_radius = if nb_values == 1 { 2 } else { 1 };
    for (x, y) in points {
        canvas.marker(x, y, marker_radius, color);
    }
}

fn draw_histogram(
    canvas: &mut Canvas,
    panel: &Rect,
    counts: &[usize],
    color_of_bin: impl Fn(usize) -> Rgb<u8>,
) {
    let max_count = counts.iter().copied().max().unwrap_or(0);
    if max_count == 0 {
        return;
    }

    let slot_width = panel.width() / counts.len() as u32;

    for (bin, count) in counts.iter().enumerate() {
        if *count == 0 {
            continue;
        }

        let left = panel.left + bin as u32 * slot_width;
        // One blank column between two bars
        let right = left + slot_width.saturating_sub(2);
        let top = panel.y_of(*count as f64, 0.0, max_count as f64);

        canvas.fill_rect(left, panel.bottom - 1, right, top, color_of_bin(bin));
    }
}

/// Drawing primitives over an RGB image, clipped to the image bounds
struct Canvas {
    image: RgbImage,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, BACKGROUND),
        }
    }

    /// Fills the rectangle between two corners, both included, in any order
    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
        let (left, right) = (x0.min(x1), x0.max(x1).min(self.image.width() - 1));
        let (top, bottom) = (y0.min(y1), y0.max(y1).min(self.image.height() - 1));

        for y in top..=bottom {
            for x in left..=right {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    fn hline(&mut self, x0: u32, x1: u32, y: u32, color: Rgb<u8>) {
        self.fill_rect(x0, y, x1, y, color);
    }

    fn vline(&mut self, x: u32, y0: u32, y1: u32, color: Rgb<u8>) {
        self.fill_rect(x, y0, x, y1, color);
    }

    fn marker(&mut self, x: u32, y: u32, radius: u32, color: Rgb<u8>) {
        self.fill_rect(
            x.saturating_sub(radius),
            y.saturating_sub(radius),
            x + radius,
            y + radius,
            color,
        );
    }

    /// Bresenham line between two points, both included
    fn line(&mut self, from: (u32, u32), to: (u32, u32), color: Rgb<u8>) {
        let (mut x, mut y) = (from.0 as i64, from.1 as i64);
        let (x1, y1) = (to.0 as i64, to.1 as i64);

        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let step_x = if x < x1 { 1 } else { -1 };
        let step_y = if y < y1 { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            self.fill_rect(x as u32, y as u32, x as u32, y as u32, color);

            if x == x1 && y == y1 {
                break;
            }

            let doubled_error = 2 * error;
            if doubled_error >= dy {
                error += dy;
                x += step_x;
            }
            if doubled_error <= dx {
                error += dx;
                y += step_y;
            }
        }
    }

    fn encode_png(self) -> Result<Vec<u8>, image::ImageError> {
        let mut bytes: Vec<u8> = Vec::new();
        DynamicImage::ImageRgb8(self.image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}
