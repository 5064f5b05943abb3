//! Bar chart rendering.
//!
//! Charts are drawn straight into an RGB buffer and encoded as JPEG: bars,
//! error bars, gridlines and axes, with a title, value ticks, one label per
//! category and a legend when more than one series is shown. Text uses the
//! bundled DejaVu Sans face so no system fonts are needed.

use fontdue::{Font, FontSettings};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use once_cell::sync::Lazy;

use crate::aggregation::{Metric, ResultTable};
use crate::core::error::Result;
use crate::reporting::pairing::BoosterPairs;

static FONT: Lazy<Font> = Lazy::new(|| {
    Font::from_bytes(
        include_bytes!("../../assets/DejaVuSans.ttf") as &[u8],
        FontSettings::default(),
    )
    .expect("Failed to parse bundled chart font")
});

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([221, 221, 221]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
pub const GREEN: Rgb<u8> = Rgb([0, 128, 0]);

const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 30;
const MARGIN_BOTTOM: u32 = 60;
const GRID_LINES: u32 = 5;
/// Share of a category slot covered by its bars
const GROUP_FILL: f64 = 0.8;
/// Headroom above the tallest bar or error bar
const HEADROOM: f64 = 1.1;

const TITLE_PX: f32 = 16.0;
const TICK_PX: f32 = 10.0;
const LABEL_PX: f32 = 12.0;
/// Category labels shrink down to this size to fit their slot
const MIN_LABEL_PX: f32 = 7.0;
const LEGEND_SWATCH: u32 = 10;

/// Height of one bar and the half-length of its error bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub value: f64,
    pub error: Option<f64>,
}

/// One bar per category, all in the same color. `None` leaves a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: Rgb<u8>,
    pub bars: Vec<Option<Bar>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl BarChart {
    /// One bar per algorithm that has `metric`, largest first.
    pub fn for_metric(title: &str, table: &ResultTable, metric: Metric) -> Self {
        let rows = table.sorted_by(metric);
        let categories = rows.iter().map(|row| row.method.clone()).collect();
        let bars = rows
            .iter()
            .map(|row| {
                metric.value(row).map(|value| Bar {
                    value,
                    error: metric.error(row),
                })
            })
            .collect();

        Self {
            title: title.to_string(),
            categories,
            series: vec![Series {
                name: title.to_string(),
                color: BLUE,
                bars,
            }],
        }
    }

    /// Inflate time of every base algorithm next to its boosted variant.
    pub fn booster(table: &ResultTable, pairs: &BoosterPairs) -> Self {
        let inflate_bar = |method: &str| {
            table.get(method).and_then(|row| {
                Metric::Inflate.value(row).map(|value| Bar {
                    value,
                    error: Metric::Inflate.error(row),
                })
            })
        };

        let mut categories = Vec::new();
        let mut plain = Vec::new();
        let mut boosted = Vec::new();
        for (base, booster) in pairs.iter() {
            let (Some(base_bar), Some(booster_bar)) = (inflate_bar(base), inflate_bar(booster))
            else {
                log::debug!("Skipping {base}/{booster}: missing inflate time");
                continue;
            };
            categories.push(base.to_string());
            plain.push(Some(base_bar));
            boosted.push(Some(booster_bar));
        }

        Self {
            title: "SFS is a restore booster".to_string(),
            categories,
            series: vec![
                Series {
                    name: "no sfs".to_string(),
                    color: BLUE,
                    bars: plain,
                },
                Series {
                    name: "sfs".to_string(),
                    color: GREEN,
                    bars: boosted,
                },
            ],
        }
    }

    /// Top of the value axis.
    pub fn y_max(&self) -> f64 {
        let highest = self
            .series
            .iter()
            .flat_map(|series| series.bars.iter().flatten())
            .map(|bar| bar.value + bar.error.unwrap_or(0.0))
            .filter(|top| top.is_finite())
            .fold(0.0_f64, f64::max);

        if highest > 0.0 { highest * HEADROOM } else { 1.0 }
    }

    pub fn render(&self, width: u32, height: u32) -> RgbImage {
        let mut canvas = Canvas::new(width, height);
        let y_max = self.y_max();

        let title_x = (width as f32 - text_width(&self.title, TITLE_PX)) / 2.0;
        canvas.text(&self.title, title_x, MARGIN_TOP as f32 - 10.0, TITLE_PX, INK);

        for step in 0..=GRID_LINES {
            let value = y_max * f64::from(step) / f64::from(GRID_LINES);
            let y = canvas.y_for(value, y_max);
            if step > 0 {
                canvas.hline(canvas.left(), canvas.right(), y, GRID);
            }
            let tick = format_tick(value);
            let tick_x = canvas.left() as f32 - 4.0 - text_width(&tick, TICK_PX);
            canvas.text(&tick, tick_x, y as f32 + TICK_PX / 3.0, TICK_PX, INK);
        }

        let slot = canvas.plot_width() / self.categories.len().max(1) as f64;
        let bar_width = slot * GROUP_FILL / self.series.len().max(1) as f64;
        let label_px = self.label_size(slot);

        for (category, label) in self.categories.iter().enumerate() {
            let group_start = f64::from(canvas.left()) + category as f64 * slot
                + slot * (1.0 - GROUP_FILL) / 2.0;

            let tick_x = (group_start + slot * GROUP_FILL / 2.0).round() as u32;
            canvas.vline(tick_x, canvas.bottom(), canvas.bottom() + 4, INK);
            let label_x = tick_x as f32 - text_width(label, label_px) / 2.0;
            canvas.text(label, label_x, (canvas.bottom() + 6) as f32 + label_px, label_px, INK);

            for (index, series) in self.series.iter().enumerate() {
                let Some(Some(bar)) = series.bars.get(category) else {
                    continue;
                };
                let x0 = group_start + index as f64 * bar_width;
                let x1 = x0 + bar_width;
                let top = canvas.y_for(bar.value, y_max);
                canvas.fill_rect(
                    x0.round() as u32,
                    top,
                    (x1.round() as u32).saturating_sub(1),
                    canvas.bottom(),
                    series.color,
                );

                if let Some(error) = bar.error.filter(|e| *e > 0.0) {
                    let center = ((x0 + x1) / 2.0).round() as u32;
                    let cap = (bar_width / 4.0).round() as u32;
                    let high = canvas.y_for(bar.value + error, y_max);
                    let low = canvas.y_for((bar.value - error).max(0.0), y_max);
                    canvas.vline(center, high, low, INK);
                    canvas.hline(center.saturating_sub(cap), center + cap, high, INK);
                    canvas.hline(center.saturating_sub(cap), center + cap, low, INK);
                }
            }
        }

        if self.series.len() > 1 {
            self.draw_legend(&mut canvas);
        }

        canvas.vline(canvas.left(), canvas.top(), canvas.bottom(), INK);
        canvas.hline(canvas.left(), canvas.right(), canvas.bottom(), INK);

        canvas.image
    }

    /// Largest label size, up to [`LABEL_PX`], at which every category fits its slot.
    fn label_size(&self, slot: f64) -> f32 {
        let widest = self
            .categories
            .iter()
            .map(|label| text_width(label, LABEL_PX))
            .fold(0.0_f32, f32::max);
        let room = (slot * 0.95) as f32;

        if widest <= room {
            LABEL_PX
        } else {
            (LABEL_PX * room / widest).max(MIN_LABEL_PX)
        }
    }

    /// One swatch and name per series, centered in the bottom margin.
    fn draw_legend(&self, canvas: &mut Canvas) {
        let entries: Vec<(f32, &Series)> = self
            .series
            .iter()
            .map(|series| (text_width(&series.name, LABEL_PX), series))
            .collect();
        let entry_width = |name_width: f32| LEGEND_SWATCH as f32 + 4.0 + name_width + 16.0;
        let total: f32 = entries.iter().map(|(name_width, _)| entry_width(*name_width)).sum();

        let baseline = canvas.bottom() + 44;
        let mut x = (canvas.image.width() as f32 - total) / 2.0;
        for (name_width, series) in entries {
            let left = x.max(0.0).round() as u32;
            canvas.fill_rect(
                left,
                baseline.saturating_sub(LEGEND_SWATCH),
                left + LEGEND_SWATCH - 1,
                baseline.saturating_sub(1),
                series.color,
            );
            canvas.text(&series.name, x + LEGEND_SWATCH as f32 + 4.0, baseline as f32, LABEL_PX, INK);
            x += entry_width(name_width);
        }
    }
}

/// Value axis label: fewer decimals as values grow.
fn format_tick(value: f64) -> String {
    if value >= 100.0 {
        format!("{value:.0}")
    } else if value >= 10.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

/// Horizontal advance of `text` at `px`.
fn text_width(text: &str, px: f32) -> f32 {
    text.chars()
        .map(|ch| FONT.metrics(ch, px).advance_width)
        .sum()
}

/// Encode a rendered chart as JPEG.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality).encode_image(image)?;
    Ok(bytes)
}

struct Canvas {
    image: RgbImage,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, BACKGROUND),
        }
    }

    fn left(&self) -> u32 {
        MARGIN_LEFT.min(self.image.width().saturating_sub(1))
    }

    fn right(&self) -> u32 {
        self.image
            .width()
            .saturating_sub(MARGIN_RIGHT)
            .max(self.left())
    }

    fn top(&self) -> u32 {
        MARGIN_TOP.min(self.image.height().saturating_sub(1))
    }

    fn bottom(&self) -> u32 {
        self.image
            .height()
            .saturating_sub(MARGIN_BOTTOM)
            .max(self.top())
    }

    fn plot_width(&self) -> f64 {
        f64::from(self.right() - self.left())
    }

    /// Pixel row for `value` on an axis running from 0 to `y_max`.
    fn y_for(&self, value: f64, y_max: f64) -> u32 {
        let span = f64::from(self.bottom() - self.top());
        let fraction = (value / y_max).clamp(0.0, 1.0);
        self.bottom() - (fraction * span).round() as u32
    }

    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
        let x_end = x1.min(self.image.width().saturating_sub(1));
        let y_end = y1.min(self.image.height().saturating_sub(1));
        for y in y0.min(y1)..=y_end {
            for x in x0.min(x1)..=x_end {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    /// Anti-aliased `text` with its left edge at `x` and its baseline at `baseline`.
    /// Glyphs falling outside the image are clipped.
    fn text(&mut self, text: &str, x: f32, baseline: f32, px: f32, color: Rgb<u8>) {
        let mut pen = x;
        for ch in text.chars() {
            let (metrics, coverage) = FONT.rasterize(ch, px);
            let left = pen.round() as i64 + i64::from(metrics.xmin);
            let top = baseline.round() as i64 - i64::from(metrics.ymin) - metrics.height as i64;
            for (index, alpha) in coverage.iter().enumerate() {
                if *alpha > 0 {
                    let x = left + (index % metrics.width) as i64;
                    let y = top + (index / metrics.width) as i64;
                    self.blend(x, y, color, *alpha);
                }
            }
            pen += metrics.advance_width;
        }
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgb<u8>, alpha: u8) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.image.width() || y >= self.image.height() {
            return;
        }

        let alpha = u16::from(alpha);
        let pixel = self.image.get_pixel_mut(x, y);
        for (channel, ink) in pixel.0.iter_mut().zip(color.0) {
            *channel = ((u16::from(*channel) * (255 - alpha) + u16::from(ink) * alpha) / 255) as u8;
        }
    }

    fn hline(&mut self, x0: u32, x1: u32, y: u32, color: Rgb<u8>) {
        self.fill_rect(x0, y, x1, y, color);
    }

    fn vline(&mut self, x: u32, y0: u32, y1: u32, color: Rgb<u8>) {
        self.fill_rect(x, y0, x, y1, color);
    }
}
