use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::application::session::DashboardSnapshot;
use crate::domain::{
    chart::{ChartProjector, ScenePoint, TrackAnimator, TrackLoop},
    errors::{AppError, RenderingError, RenderingResult},
    logging::LogComponent,
    market_data::{InstrumentColor, SeriesWindow},
};
use crate::log_trace;

const BACKGROUND: &str = "#0b1020";
const TRACK_COLOR: &str = "rgba(160, 174, 192, 0.45)";
const POD_COLOR: &str = "#e2e8f0";
const CAR_COLOR: &str = "#f6ad55";
/// Side of one voxel in pixels.
const VOXEL: f64 = 6.0;
/// Fraction of the canvas height kept free above and below the area chart.
const CHART_MARGIN: f64 = 0.12;

/// Canvas pixel coordinates of every sample, oldest on the left.
/// `points` are normalized `t` values (0 = window min, 1 = window max).
pub fn overlay_polyline(points: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
    let usable = height * (1.0 - 2.0 * CHART_MARGIN);
    let top = height * CHART_MARGIN;
    let count = points.len();
    points
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let x = if count > 1 { width * i as f64 / (count - 1) as f64 } else { width / 2.0 };
            (x, top + usable * (1.0 - t))
        })
        .collect()
}

/// Scene point to canvas pixels.
pub fn scene_to_pixels(point: ScenePoint, width: f64, height: f64) -> (f64, f64) {
    (point.x * width, point.y * height)
}

fn draw_failed(error: JsValue) -> AppError {
    AppError::Rendering(RenderingError::DrawFailed(format!("{:?}", error)))
}

/// Canvas 2D overlay: area chart of the active series plus the looping scene.
pub struct CanvasRenderer {
    canvas_id: String,
    width: u32,
    height: u32,
    projector: ChartProjector,
}

impl CanvasRenderer {
    pub fn new(canvas_id: impl Into<String>, width: u32, height: u32) -> Self {
        Self { canvas_id: canvas_id.into(), width, height, projector: ChartProjector::new() }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    fn context(&self) -> RenderingResult<CanvasRenderingContext2d> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| RenderingError::ContextUnavailable("no document".to_string()))?;
        let canvas = document
            .get_element_by_id(&self.canvas_id)
            .ok_or_else(|| RenderingError::CanvasNotFound(self.canvas_id.clone()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| RenderingError::CanvasNotFound(self.canvas_id.clone()))?;

        // Assigning the size clears the canvas, so only do it on change.
        if canvas.width() != self.width {
            canvas.set_width(self.width);
        }
        if canvas.height() != self.height {
            canvas.set_height(self.height);
        }

        let context = canvas
            .get_context("2d")
            .map_err(|e| RenderingError::ContextUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| RenderingError::ContextUnavailable("2d".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderingError::ContextUnavailable("not a 2D context".to_string()))?;
        Ok(context)
    }

    /// Draw one frame. Reads the snapshot, never mutates it.
    pub fn render_frame(&self, snapshot: &DashboardSnapshot, animator: &TrackAnimator) -> RenderingResult<()> {
        let context = self.context()?;
        let (width, height) = (self.width as f64, self.height as f64);

        context.set_fill_style_str(BACKGROUND);
        context.fill_rect(0.0, 0.0, width, height);

        self.draw_track(&context, &animator.outer)?;
        self.draw_track(&context, &animator.inner)?;
        self.draw_area(&context, snapshot)?;

        let pod = scene_to_pixels(animator.pod_position(), width, height);
        let car = scene_to_pixels(animator.car_position(), width, height);
        self.draw_voxels(&context, pod, 3, 2, POD_COLOR);
        self.draw_voxels(&context, car, 2, 1, CAR_COLOR);

        self.draw_label(&context, snapshot)?;

        log_trace!(
            LogComponent::Infrastructure("CanvasRenderer"),
            "frame {} tick {} ({} samples)",
            snapshot.instrument.symbol,
            snapshot.tick,
            snapshot.samples.len()
        );
        Ok(())
    }

    fn draw_track(&self, context: &CanvasRenderingContext2d, track: &TrackLoop) -> RenderingResult<()> {
        let (width, height) = (self.width as f64, self.height as f64);
        context.set_stroke_style_str(TRACK_COLOR);
        context.set_line_width(2.0);
        context.begin_path();
        context
            .ellipse(width / 2.0, height / 2.0, track.radius_x * width, track.radius_y * height, 0.0, 0.0, TAU)
            .map_err(draw_failed)?;
        context.stroke();
        Ok(())
    }

    fn draw_area(&self, context: &CanvasRenderingContext2d, snapshot: &DashboardSnapshot) -> RenderingResult<()> {
        let (width, height) = (self.width as f64, self.height as f64);
        let window = SeriesWindow::from_samples(
            snapshot.samples.len(),
            snapshot.samples.iter().copied(),
        );
        let points = self
            .projector
            .normalized_points(&window, snapshot.instrument.base_price.value());
        let polyline = overlay_polyline(&points, width, height);
        let (Some(first), Some(last)) = (polyline.first(), polyline.last()) else {
            return Ok(());
        };

        let color: InstrumentColor = snapshot.instrument.color;
        context.begin_path();
        context.move_to(first.0, first.1);
        for (x, y) in polyline.iter().skip(1) {
            context.line_to(*x, *y);
        }
        context.set_stroke_style_str(&color.to_css());
        context.set_line_width(2.0);
        context.stroke();

        context.line_to(last.0, height);
        context.line_to(first.0, height);
        context.close_path();
        context.set_fill_style_str(&color.to_css_alpha(0.18));
        context.fill();
        Ok(())
    }

    /// A small block of voxels centred on `at`, with a lighter top row.
    fn draw_voxels(&self, context: &CanvasRenderingContext2d, at: (f64, f64), cols: u32, rows: u32, color: &str) {
        let left = at.0 - cols as f64 * VOXEL / 2.0;
        let top = at.1 - rows as f64 * VOXEL / 2.0;
        for row in 0..rows {
            for col in 0..cols {
                let fill = if row == 0 { "rgba(255, 255, 255, 0.85)" } else { color };
                context.set_fill_style_str(fill);
                context.fill_rect(left + col as f64 * VOXEL, top + row as f64 * VOXEL, VOXEL - 1.0, VOXEL - 1.0);
            }
        }
        context.set_fill_style_str(color);
        context.fill_rect(left, top + rows as f64 * VOXEL, cols as f64 * VOXEL - 1.0, VOXEL - 1.0);
    }

    fn draw_label(&self, context: &CanvasRenderingContext2d, snapshot: &DashboardSnapshot) -> RenderingResult<()> {
        let display = &snapshot.display;
        context.set_font("14px 'Courier New', monospace");
        context.set_fill_style_str(&snapshot.instrument.color.to_css());
        context
            .fill_text(
                &format!(
                    "{} ${} {} {}",
                    snapshot.instrument.symbol, display.formatted_price, display.trend, display.formatted_percent
                ),
                12.0,
                22.0,
            )
            .map_err(draw_failed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_spans_full_width() {
        let points = overlay_polyline(&[0.0, 0.5, 1.0], 200.0, 100.0);
        assert_eq!(points[0].0, 0.0);
        assert_eq!(points[2].0, 200.0);
        // t = 1 sits at the top margin, t = 0 at the bottom margin.
        assert!((points[2].1 - 12.0).abs() < 1e-9);
        assert!((points[0].1 - 88.0).abs() < 1e-9);
    }

    #[test]
    fn single_point_is_centred() {
        let points = overlay_polyline(&[0.5], 200.0, 100.0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].0, 100.0);
        assert!((points[0].1 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn scene_point_scales_to_canvas() {
        let (x, y) = scene_to_pixels(ScenePoint { x: 0.25, y: 0.5 }, 800.0, 400.0);
        assert_eq!((x, y), (200.0, 200.0));
    }
}
