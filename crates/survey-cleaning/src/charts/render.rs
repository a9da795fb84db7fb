// Four-panel dashboard rendered on a tiny-skia pixmap.
use super::{ChartData, HistogramBin};
use crate::config::CleaningConfig;
use crate::error::{CleaningError, Result};
use std::f32::consts::PI;
use std::fs;
use std::path::Path;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::{debug, info};

/// Named RGB colors used by the panels.
pub struct Palette;

impl Palette {
    pub const SKY_BLUE: (u8, u8, u8) = (135, 206, 235);
    pub const LIGHT_GREEN: (u8, u8, u8) = (144, 238, 144);
    pub const LIGHT_CORAL: (u8, u8, u8) = (240, 128, 128);
    pub const LIGHT_SALMON: (u8, u8, u8) = (255, 160, 122);
    pub const LIGHT_BLUE: (u8, u8, u8) = (173, 216, 230);

    pub const PIE: [(u8, u8, u8); 4] = [
        Self::LIGHT_CORAL,
        Self::LIGHT_SALMON,
        Self::LIGHT_BLUE,
        Self::LIGHT_GREEN,
    ];
    pub const RECOMMEND: [(u8, u8, u8); 2] = [Self::LIGHT_CORAL, Self::LIGHT_GREEN];
}

fn color((r, g, b): (u8, u8, u8), alpha: u8) -> Color {
    Color::from_rgba8(r, g, b, alpha)
}

fn solid(rgb: (u8, u8, u8), alpha: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color(rgb, alpha));
    paint.anti_alias = true;
    paint
}

/// Plot area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Area {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Area {
    fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Renders [`ChartData`] as a 2x2 grid of panels.
#[derive(Debug, Clone)]
pub struct DashboardRenderer {
    width: u32,
    height: u32,
}

impl DashboardRenderer {
    const MARGIN: f32 = 20.0;
    const BAR_FILL: f32 = 0.8;
    const HEADROOM: f32 = 0.95;

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn from_config(config: &CleaningConfig) -> Self {
        Self::new(config.chart_width, config.chart_height)
    }

    /// Plot area of panel `index` (0..4, row-major), inside its axis margins.
    pub(crate) fn plot_area(&self, index: usize) -> Area {
        let cell_w = (self.width as f32 - Self::MARGIN * 3.0) / 2.0;
        let cell_h = (self.height as f32 - Self::MARGIN * 3.0) / 2.0;
        let col = (index % 2) as f32;
        let row = (index / 2) as f32;
        let cell_x = Self::MARGIN + col * (cell_w + Self::MARGIN);
        let cell_y = Self::MARGIN + row * (cell_h + Self::MARGIN);

        Area {
            x: cell_x + cell_w * 0.12,
            y: cell_y + cell_h * 0.10,
            w: cell_w * 0.83,
            h: cell_h * 0.75,
        }
    }

    pub fn render(&self, data: &ChartData) -> Result<Pixmap> {
        let mut pixmap = Pixmap::new(self.width, self.height).ok_or_else(|| {
            CleaningError::ChartRenderFailed(format!(
                "cannot allocate {}x{} pixmap",
                self.width, self.height
            ))
        })?;
        pixmap.fill(Color::WHITE);

        self.draw_histogram(&mut pixmap, self.plot_area(0), &data.age_bins);

        let ratings: Vec<usize> = data.rating_counts.iter().map(|(_, c)| *c).collect();
        self.draw_bars(
            &mut pixmap,
            self.plot_area(1),
            &ratings,
            &[Palette::LIGHT_GREEN],
        );

        let shares: Vec<usize> = data.category_counts.iter().map(|c| c.count).collect();
        self.draw_pie(&mut pixmap, self.plot_area(2), &shares);

        let answers: Vec<usize> = data.recommendation_counts.iter().map(|c| c.count).collect();
        self.draw_bars(&mut pixmap, self.plot_area(3), &answers, &Palette::RECOMMEND);

        debug!("Rendered dashboard {}x{}", self.width, self.height);
        Ok(pixmap)
    }

    /// Render and save as PNG, creating the parent directory if needed.
    pub fn render_to_file(&self, data: &ChartData, path: &Path) -> Result<()> {
        let pixmap = self.render(data)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        pixmap
            .save_png(path)
            .map_err(|e| CleaningError::ChartRenderFailed(e.to_string()))?;

        info!("Visualization saved: {}", path.display());
        Ok(())
    }

    fn draw_axes(&self, pixmap: &mut Pixmap, area: Area) {
        let mut pb = PathBuilder::new();
        pb.move_to(area.x, area.y);
        pb.line_to(area.x, area.bottom());
        pb.line_to(area.x + area.w, area.bottom());
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width: 1.5,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &solid((0, 0, 0), 255), &stroke, Transform::identity(), None);
        }
    }

    fn draw_box(&self, pixmap: &mut Pixmap, rect: Rect, fill: &Paint) {
        pixmap.fill_rect(rect, fill, Transform::identity(), None);
        let edge = PathBuilder::from_rect(rect);
        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };
        pixmap.stroke_path(&edge, &solid((0, 0, 0), 255), &stroke, Transform::identity(), None);
    }

    fn bar_height(area: Area, count: usize, max: usize) -> f32 {
        count as f32 / max.max(1) as f32 * area.h * Self::HEADROOM
    }

    fn draw_histogram(&self, pixmap: &mut Pixmap, area: Area, bins: &[HistogramBin]) {
        let max = bins.iter().map(|b| b.count).max().unwrap_or(0);
        let slot = area.w / bins.len().max(1) as f32;
        let fill = solid(Palette::SKY_BLUE, 179);

        for (i, bin) in bins.iter().enumerate() {
            if bin.count == 0 {
                continue;
            }
            let h = Self::bar_height(area, bin.count, max);
            if let Some(rect) = Rect::from_xywh(area.x + slot * i as f32, area.bottom() - h, slot, h) {
                self.draw_box(pixmap, rect, &fill);
            }
        }
        self.draw_axes(pixmap, area);
    }

    /// Evenly spaced bars; colors cycle through `colors`.
    pub(crate) fn draw_bars(
        &self,
        pixmap: &mut Pixmap,
        area: Area,
        counts: &[usize],
        colors: &[(u8, u8, u8)],
    ) {
        let max = counts.iter().copied().max().unwrap_or(0);
        let slot = area.w / counts.len().max(1) as f32;
        let bar_w = slot * Self::BAR_FILL;

        for (i, &count) in counts.iter().enumerate() {
            if count == 0 || colors.is_empty() {
                continue;
            }
            let h = Self::bar_height(area, count, max);
            let x = area.x + slot * i as f32 + (slot - bar_w) / 2.0;
            if let Some(rect) = Rect::from_xywh(x, area.bottom() - h, bar_w, h) {
                let fill = solid(colors[i % colors.len()], 255);
                self.draw_box(pixmap, rect, &fill);
            }
        }
        self.draw_axes(pixmap, area);
    }

    /// Pie slices starting at 12 o'clock and running clockwise.
    fn draw_pie(&self, pixmap: &mut Pixmap, area: Area, shares: &[usize]) {
        let total: usize = shares.iter().sum();
        if total == 0 {
            return;
        }

        let cx = area.x + area.w / 2.0;
        let cy = area.y + area.h / 2.0;
        let radius = area.w.min(area.h) * 0.5;
        let edge = Stroke {
            width: 1.5,
            ..Stroke::default()
        };

        let mut start = -PI / 2.0;
        for (i, &share) in shares.iter().enumerate() {
            if share == 0 {
                continue;
            }
            let sweep = share as f32 / total as f32 * 2.0 * PI;
            let segments = ((sweep.to_degrees() / 2.0).ceil() as usize).max(2);

            let mut pb = PathBuilder::new();
            pb.move_to(cx, cy);
            for step in 0..=segments {
                let angle = start + sweep * step as f32 / segments as f32;
                pb.line_to(cx + radius * angle.cos(), cy + radius * angle.sin());
            }
            pb.close();

            if let Some(path) = pb.finish() {
                let fill = solid(Palette::PIE[i % Palette::PIE.len()], 255);
                pixmap.fill_path(&path, &fill, FillRule::Winding, Transform::identity(), None);
                pixmap.stroke_path(&path, &solid((255, 255, 255), 255), &edge, Transform::identity(), None);
            }
            start += sweep;
        }
    }
}
