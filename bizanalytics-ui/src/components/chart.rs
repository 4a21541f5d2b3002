//! Chart Component
//!
//! Draws dashboard chart specs onto HTML5 canvases and fills the outlet
//! table. Geometry lives in plain functions so it can be tested natively.

use std::f64::consts::{FRAC_PI_2, TAU};

use bizanalytics::dashboard::{
    colors, ChartKind, ChartSpec, ChartSurface, LegendPosition, Scale, TableSpec, TickFormat,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// Value-axis intervals
const TICK_COUNT: u32 = 5;
/// Share of a category slot covered by its bars
const BAR_FILL: f64 = 0.72;
const LEGEND_ROW: f64 = 20.0;
const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Shrink by the given margins; never below zero size
    pub fn inset(&self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            x: self.x + left,
            y: self.y + top,
            w: (self.w - left - right).max(0.0),
            h: (self.h - top - bottom).max(0.0),
        }
    }
}

/// Round `max` up to 1, 2, 2.5 or 5 times a power of ten
pub fn nice_ceiling(max: f64) -> f64 {
    if max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powi(max.log10().floor() as i32);
    let fraction = max / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 2.5 {
        2.5
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Start and end angle of each slice, clockwise from twelve o'clock
pub fn slice_angles(values: &[u64]) -> Vec<(f64, f64)> {
    let total: u64 = values.iter().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = -FRAC_PI_2;
    values
        .iter()
        .map(|v| {
            let end = start + (*v as f64 / total as f64) * TAU;
            let slice = (start, end);
            start = end;
            slice
        })
        .collect()
}

/// `"68%"` -> `0.68`; a doughnut without a cutout gets half
pub fn cutout_ratio(cutout: Option<&str>) -> f64 {
    cutout
        .and_then(|c| c.trim().trim_end_matches('%').parse::<f64>().ok())
        .map(|pct| (pct / 100.0).clamp(0.0, 0.95))
        .unwrap_or(0.5)
}

/// Offset and thickness of bar `index` of `count` along an axis
pub fn band(index: usize, count: usize, start: f64, extent: f64) -> (f64, f64) {
    if count == 0 {
        return (start, 0.0);
    }
    let slot = extent / count as f64;
    let bar = slot * BAR_FILL;
    (start + index as f64 * slot + (slot - bar) / 2.0, bar)
}

/// Legend swatches: slice labels for a doughnut, dataset labels otherwise
pub fn legend_entries(chart: &ChartSpec) -> Vec<(String, String)> {
    match (chart.kind, chart.data.datasets.as_slice()) {
        (ChartKind::Doughnut, [dataset]) => chart
            .data
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), dataset.background_color.at(i).to_string()))
            .collect(),
        (_, datasets) => datasets
            .iter()
            .filter_map(|d| {
                d.label
                    .as_ref()
                    .map(|label| (label.clone(), d.background_color.at(0).to_string()))
            })
            .collect(),
    }
}

/// Bezier control points before and after each point of a smoothed line
///
/// `tension` 0 gives straight segments.
pub fn control_points(points: &[(f64, f64)], tension: f64) -> Vec<((f64, f64), (f64, f64))> {
    (0..points.len())
        .map(|i| {
            let current = points[i];
            let prev = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(points.len() - 1)];

            let d01 = distance(prev, current);
            let d12 = distance(current, next);
            let sum = d01 + d12;
            if sum == 0.0 || tension == 0.0 {
                return (current, current);
            }

            let fa = tension * d01 / sum;
            let fb = tension * d12 / sum;
            let dx = next.0 - prev.0;
            let dy = next.1 - prev.1;
            (
                (current.0 - fa * dx, current.1 - fa * dy),
                (current.0 + fb * dx, current.1 + fb * dy),
            )
        })
        .collect()
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

/// Tick text for a value axis
pub fn tick_label(value: f64, format: Option<TickFormat>) -> String {
    match format {
        Some(format) => format.format(value),
        None => format!("{}", value.round()),
    }
}

fn font(size: u32) -> String {
    format!("{}px {}", size, FONT_FAMILY)
}

fn js_error(e: JsValue) -> String {
    format!("{:?}", e)
}

/// Canvas elements and the table, looked up by id in the live document
pub struct CanvasSurface {
    document: Document,
}

impl CanvasSurface {
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    fn canvas(&self, anchor: &str) -> Result<HtmlCanvasElement, String> {
        self.document
            .get_element_by_id(anchor)
            .ok_or_else(|| format!("#{} not found", anchor))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| format!("#{} is not a canvas", anchor))
    }
}

impl ChartSurface for CanvasSurface {
    type Error = String;

    fn draw_chart(&mut self, anchor: &str, chart: &ChartSpec) -> Result<(), String> {
        let canvas = self.canvas(anchor)?;

        // Match the backing store to the laid-out size
        let (w, h) = (canvas.client_width(), canvas.client_height());
        if w > 0 && h > 0 {
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
        }

        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| format!("#{} has no 2d context", anchor))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| format!("#{} returned a foreign context", anchor))?;

        let area = Rect::new(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        ctx.clear_rect(area.x, area.y, area.w, area.h);

        let plot = draw_legend(&ctx, chart, area).map_err(js_error)?;
        let drawn = match chart.kind {
            ChartKind::Doughnut => draw_doughnut(&ctx, chart, plot),
            ChartKind::Bar => draw_bars(&ctx, chart, plot),
            ChartKind::Line => draw_line(&ctx, chart, plot),
        };
        drawn.map_err(js_error)
    }

    fn fill_table(&mut self, anchor: &str, table: &TableSpec) -> Result<(), String> {
        let element = self
            .document
            .get_element_by_id(anchor)
            .ok_or_else(|| format!("#{} not found", anchor))?;
        element.set_inner_html(&table.to_html());
        Ok(())
    }
}

/// Draw the legend row and return the area left for the chart
fn draw_legend(ctx: &CanvasRenderingContext2d, chart: &ChartSpec, area: Rect) -> Result<Rect, JsValue> {
    let legend = &chart.options.plugins.legend;
    let entries = legend_entries(chart);
    if !legend.display || entries.is_empty() {
        return Ok(area);
    }

    let text_color = legend
        .labels
        .as_ref()
        .map(|l| l.color.as_str())
        .unwrap_or(colors::MUTED);
    let padding = legend.labels.as_ref().and_then(|l| l.padding).unwrap_or(10) as f64;
    let box_w = legend.labels.as_ref().and_then(|l| l.box_width).unwrap_or(12) as f64;
    let box_h = box_w.min(12.0);

    ctx.set_font(&font(12));
    let mut widths = Vec::with_capacity(entries.len());
    for (label, _) in &entries {
        widths.push(box_w + 6.0 + ctx.measure_text(label)?.width());
    }
    let total = widths.iter().sum::<f64>() + padding * (entries.len() - 1) as f64;

    let row_y = match legend.position {
        LegendPosition::Top => area.y,
        LegendPosition::Bottom => area.bottom() - LEGEND_ROW,
    };
    let mut x = area.x + ((area.w - total) / 2.0).max(0.0);

    ctx.set_text_baseline("middle");
    ctx.set_text_align("left");
    for ((label, color), width) in entries.iter().zip(&widths) {
        ctx.set_fill_style(&color.as_str().into());
        ctx.fill_rect(x, row_y + (LEGEND_ROW - box_h) / 2.0, box_w, box_h);
        ctx.set_fill_style(&text_color.into());
        ctx.fill_text(label, x + box_w + 6.0, row_y + LEGEND_ROW / 2.0)?;
        x += width + padding;
    }

    Ok(match legend.position {
        LegendPosition::Top => area.inset(0.0, LEGEND_ROW + padding, 0.0, 0.0),
        LegendPosition::Bottom => area.inset(0.0, 0.0, 0.0, LEGEND_ROW + padding),
    })
}

fn draw_doughnut(ctx: &CanvasRenderingContext2d, chart: &ChartSpec, plot: Rect) -> Result<(), JsValue> {
    let Some(dataset) = chart.data.datasets.first() else {
        return Ok(());
    };

    let cx = plot.x + plot.w / 2.0;
    let cy = plot.y + plot.h / 2.0;
    let outer = (plot.w.min(plot.h) / 2.0 - 4.0).max(0.0);
    let inner = outer * cutout_ratio(chart.options.cutout.as_deref());

    for (i, (start, end)) in slice_angles(&dataset.data).into_iter().enumerate() {
        ctx.begin_path();
        ctx.arc(cx, cy, outer, start, end)?;
        ctx.arc_with_anticlockwise(cx, cy, inner, end, start, true)?;
        ctx.close_path();
        ctx.set_fill_style(&dataset.background_color.at(i).into());
        ctx.fill();

        if let (Some(width), Some(color)) = (dataset.border_width, &dataset.border_color) {
            ctx.set_stroke_style(&color.as_str().into());
            ctx.set_line_width(width);
            ctx.stroke();
        }
    }
    Ok(())
}

/// Grid lines and tick labels along the value axis
fn draw_value_axis(
    ctx: &CanvasRenderingContext2d,
    plot: Rect,
    max: f64,
    scale: Option<&Scale>,
    horizontal: bool,
) -> Result<(), JsValue> {
    let format = scale.and_then(|s| s.ticks.format);
    let grid_color = scale.and_then(|s| s.grid.color.as_deref()).unwrap_or(colors::GRID);
    let show_grid = scale.map_or(true, |s| s.grid.is_visible());

    ctx.set_font(&font(11));
    ctx.set_fill_style(&colors::MUTED.into());
    ctx.set_stroke_style(&grid_color.into());
    ctx.set_line_width(1.0);

    for k in 0..=TICK_COUNT {
        let share = k as f64 / TICK_COUNT as f64;
        let label = tick_label(max * share, format);

        if horizontal {
            let x = plot.x + plot.w * share;
            if show_grid {
                ctx.begin_path();
                ctx.move_to(x, plot.y);
                ctx.line_to(x, plot.bottom());
                ctx.stroke();
            }
            ctx.set_text_align("center");
            ctx.set_text_baseline("top");
            ctx.fill_text(&label, x, plot.bottom() + 6.0)?;
        } else {
            let y = plot.bottom() - plot.h * share;
            if show_grid {
                ctx.begin_path();
                ctx.move_to(plot.x, y);
                ctx.line_to(plot.right(), y);
                ctx.stroke();
            }
            ctx.set_text_align("right");
            ctx.set_text_baseline("middle");
            ctx.fill_text(&label, plot.x - 6.0, y)?;
        }
    }
    Ok(())
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, r: Rect, radius: f64) -> Result<(), JsValue> {
    let radius = radius.min(r.w / 2.0).min(r.h / 2.0).max(0.0);
    ctx.begin_path();
    ctx.move_to(r.x + radius, r.y);
    ctx.arc_to(r.right(), r.y, r.right(), r.bottom(), radius)?;
    ctx.arc_to(r.right(), r.bottom(), r.x, r.bottom(), radius)?;
    ctx.arc_to(r.x, r.bottom(), r.x, r.y, radius)?;
    ctx.arc_to(r.x, r.y, r.right(), r.y, radius)?;
    ctx.close_path();
    ctx.fill();
    Ok(())
}

fn draw_bars(ctx: &CanvasRenderingContext2d, chart: &ChartSpec, area: Rect) -> Result<(), JsValue> {
    let horizontal = chart.is_horizontal();
    let scales = chart.options.scales.as_ref();
    let (category_scale, value_scale) = match scales {
        Some(s) if horizontal => (Some(&s.y), Some(&s.x)),
        Some(s) => (Some(&s.x), Some(&s.y)),
        None => (None, None),
    };
    let label_size = category_scale
        .and_then(|s| s.ticks.font)
        .map(|f| f.size)
        .unwrap_or(12);

    ctx.set_font(&font(label_size));
    let plot = if horizontal {
        let mut gutter: f64 = 0.0;
        for label in &chart.data.labels {
            gutter = gutter.max(ctx.measure_text(label)?.width());
        }
        area.inset(gutter + 10.0, 4.0, 12.0, 22.0)
    } else {
        area.inset(52.0, 8.0, 8.0, 24.0)
    };

    let max = nice_ceiling(chart.max_value() as f64);
    draw_value_axis(ctx, plot, max, value_scale, horizontal)?;

    let count = chart.data.labels.len();
    let groups = chart.data.datasets.len().max(1);

    for (i, label) in chart.data.labels.iter().enumerate() {
        let (offset, thickness) = if horizontal {
            band(i, count, plot.y, plot.h)
        } else {
            band(i, count, plot.x, plot.w)
        };
        let sub = thickness / groups as f64;

        for (j, dataset) in chart.data.datasets.iter().enumerate() {
            let value = dataset.data.get(i).copied().unwrap_or(0) as f64;
            let rect = if horizontal {
                Rect::new(plot.x, offset + j as f64 * sub, plot.w * value / max, sub)
            } else {
                let len = plot.h * value / max;
                Rect::new(offset + j as f64 * sub, plot.bottom() - len, sub, len)
            };
            ctx.set_fill_style(&dataset.background_color.at(i).into());
            rounded_rect(ctx, rect, dataset.border_radius.unwrap_or(0.0))?;
        }

        ctx.set_font(&font(label_size));
        ctx.set_fill_style(&colors::MUTED.into());
        if horizontal {
            ctx.set_text_align("right");
            ctx.set_text_baseline("middle");
            ctx.fill_text(label, plot.x - 8.0, offset + thickness / 2.0)?;
        } else {
            ctx.set_text_align("center");
            ctx.set_text_baseline("top");
            ctx.fill_text(label, offset + thickness / 2.0, plot.bottom() + 6.0)?;
        }
    }
    Ok(())
}

fn draw_line(ctx: &CanvasRenderingContext2d, chart: &ChartSpec, area: Rect) -> Result<(), JsValue> {
    let plot = area.inset(52.0, 8.0, 16.0, 24.0);
    let scales = chart.options.scales.as_ref();
    let max = nice_ceiling(chart.max_value() as f64);
    draw_value_axis(ctx, plot, max, scales.map(|s| &s.y), false)?;

    let count = chart.data.labels.len();
    let step = if count > 1 { plot.w / (count - 1) as f64 } else { 0.0 };
    let x_at = |i: usize| if count > 1 { plot.x + i as f64 * step } else { plot.x + plot.w / 2.0 };

    // Category grid and labels
    let x_grid = scales.map_or(true, |s| s.x.grid.is_visible());
    ctx.set_font(&font(12));
    ctx.set_text_align("center");
    ctx.set_text_baseline("top");
    for (i, label) in chart.data.labels.iter().enumerate() {
        let x = x_at(i);
        if x_grid {
            ctx.set_stroke_style(&colors::GRID.into());
            ctx.set_line_width(1.0);
            ctx.begin_path();
            ctx.move_to(x, plot.y);
            ctx.line_to(x, plot.bottom());
            ctx.stroke();
        }
        ctx.set_fill_style(&colors::MUTED.into());
        ctx.fill_text(label, x, plot.bottom() + 6.0)?;
    }

    for dataset in &chart.data.datasets {
        let points: Vec<(f64, f64)> = dataset
            .data
            .iter()
            .enumerate()
            .map(|(i, v)| (x_at(i), plot.bottom() - plot.h * (*v as f64) / max))
            .collect();
        let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) else {
            continue;
        };
        let controls = control_points(&points, dataset.tension.unwrap_or(0.0));

        let trace = || {
            ctx.begin_path();
            ctx.move_to(first.0, first.1);
            for i in 1..points.len() {
                let (_, out) = controls[i - 1];
                let (into, _) = controls[i];
                ctx.bezier_curve_to(out.0, out.1, into.0, into.1, points[i].0, points[i].1);
            }
        };

        if dataset.fill == Some(true) {
            trace();
            ctx.line_to(last.0, plot.bottom());
            ctx.line_to(first.0, plot.bottom());
            ctx.close_path();
            ctx.set_fill_style(&dataset.background_color.at(0).into());
            ctx.fill();
        }

        trace();
        let stroke = dataset.border_color.as_deref().unwrap_or(colors::ACCENT);
        ctx.set_stroke_style(&stroke.into());
        ctx.set_line_width(dataset.border_width.unwrap_or(2.0));
        ctx.stroke();

        let radius = dataset.point_radius.unwrap_or(0.0);
        if radius > 0.0 {
            let dot = dataset.point_background_color.as_deref().unwrap_or(stroke);
            ctx.set_fill_style(&dot.into());
            for (x, y) in &points {
                ctx.begin_path();
                ctx.arc(*x, *y, radius, 0.0, TAU)?;
                ctx.fill();
            }
        }
    }
    Ok(())
}
