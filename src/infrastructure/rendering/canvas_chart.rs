use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::chart_surface::{ChartKind, ChartOptions};
use crate::domain::catalog::ChartDataset;
use crate::domain::errors::{AppError, RenderingResult};

const BACKGROUND: &str = "#1e1e2f";
const TEXT_COLOR: &str = "#e5e7eb";
const MUTED_TEXT_COLOR: &str = "#9ca3af";
const AXIS_COLOR: &str = "#52525b";
const SERIES_COLORS: [&str; 6] = [
    "#6366f1", "#10b981", "#ef4444", "#f59e0b", "#3b82f6", "#8b5cf6",
];
const PADDING: f64 = 40.0;
const TITLE_SPACE: f64 = 36.0;
const LEGEND_SPACE: f64 = 28.0;
const DOUGHNUT_HOLE_RATIO: f64 = 0.6;

/// Look up the drawing target. `Ok(None)` means the id is not in the DOM
/// (or there is no DOM at all), which callers treat as a successful no-op.
pub(super) fn context_for(
    target_id: &str,
) -> RenderingResult<Option<(HtmlCanvasElement, CanvasRenderingContext2d)>> {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    let Some(document) = window.document() else {
        return Ok(None);
    };
    let Some(element) = document.get_element_by_id(target_id) else {
        return Ok(None);
    };
    let canvas: HtmlCanvasElement = element
        .dyn_into()
        .map_err(|_| AppError::RenderingError(format!("Element '{target_id}' is not a canvas")))?;
    let context = canvas
        .get_context("2d")
        .map_err(|_| {
            AppError::RenderingError(format!("2D context unavailable for '{target_id}'"))
        })?
        .ok_or_else(|| {
            AppError::RenderingError(format!("2D context unavailable for '{target_id}'"))
        })?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| {
            AppError::RenderingError(format!("2D context cast failed for '{target_id}'"))
        })?;
    Ok(Some((canvas, context)))
}

pub(super) fn clear_canvas(canvas: &HtmlCanvasElement, context: &CanvasRenderingContext2d) {
    context.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
}

/// Paint one chart over the full canvas
pub(super) fn draw_chart(
    canvas: &HtmlCanvasElement,
    context: &CanvasRenderingContext2d,
    kind: ChartKind,
    dataset: &ChartDataset,
    options: &ChartOptions,
) -> RenderingResult<()> {
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    context.clear_rect(0.0, 0.0, width, height);
    context.set_fill_style(&JsValue::from(BACKGROUND));
    context.fill_rect(0.0, 0.0, width, height);

    draw_title(context, &options.title)?;

    match kind {
        ChartKind::Bar => draw_bar_chart(context, width, height, dataset),
        ChartKind::Doughnut => draw_doughnut_chart(context, width, height, dataset, options),
    }
}

fn draw_title(context: &CanvasRenderingContext2d, title: &str) -> RenderingResult<()> {
    if title.is_empty() {
        return Ok(());
    }
    context.set_fill_style(&JsValue::from(TEXT_COLOR));
    context.set_font("16px Arial");
    context.set_text_align("left");
    fill_text(context, title, PADDING / 2.0, 24.0)
}

fn draw_bar_chart(
    context: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    dataset: &ChartDataset,
) -> RenderingResult<()> {
    if dataset.is_empty() {
        return draw_no_data_message(context, width, height);
    }

    // Leave room above each bar for its value label
    let plot_left = PADDING;
    let plot_top = TITLE_SPACE + 16.0;
    let plot_width = width - PADDING * 2.0;
    let plot_height = height - plot_top - PADDING;
    let baseline = plot_top + plot_height;

    let max_value = dataset.max_value();
    let scale = if max_value > 0.0 {
        plot_height / max_value
    } else {
        0.0
    };
    let slot = plot_width / dataset.len() as f64;
    let bar_width = slot * 0.6;

    context.set_font("12px Arial");
    context.set_text_align("center");
    for (i, (label, value)) in dataset
        .labels()
        .iter()
        .zip(dataset.values().iter())
        .enumerate()
    {
        let x = plot_left + slot * i as f64 + (slot - bar_width) / 2.0;
        let bar_height = value * scale;
        let center = x + bar_width / 2.0;

        context.set_fill_style(&JsValue::from(SERIES_COLORS[i % SERIES_COLORS.len()]));
        context.fill_rect(x, baseline - bar_height, bar_width, bar_height);

        context.set_fill_style(&JsValue::from(TEXT_COLOR));
        fill_text(context, &format_value(*value), center, baseline - bar_height - 6.0)?;
        context.set_fill_style(&JsValue::from(MUTED_TEXT_COLOR));
        fill_text(context, label, center, baseline + 16.0)?;
    }

    context.set_stroke_style(&JsValue::from(AXIS_COLOR));
    context.set_line_width(1.0);
    context.begin_path();
    context.move_to(plot_left, baseline);
    context.line_to(plot_left + plot_width, baseline);
    context.stroke();

    Ok(())
}

fn draw_doughnut_chart(
    context: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    dataset: &ChartDataset,
    options: &ChartOptions,
) -> RenderingResult<()> {
    let total = dataset.total();
    if total <= 0.0 {
        return draw_no_data_message(context, width, height);
    }

    let center_x = width / 2.0;
    let center_y = TITLE_SPACE + (height - TITLE_SPACE - LEGEND_SPACE) / 2.0;
    let radius = ((height - TITLE_SPACE - LEGEND_SPACE) / 2.0 - 8.0)
        .min(width / 2.0 - PADDING)
        .max(10.0);

    let mut start_angle = -PI / 2.0;
    for (i, value) in dataset.values().iter().enumerate() {
        if *value <= 0.0 {
            continue;
        }
        let end_angle = start_angle + value / total * PI * 2.0;
        context.set_fill_style(&JsValue::from(SERIES_COLORS[i % SERIES_COLORS.len()]));
        context.begin_path();
        context.move_to(center_x, center_y);
        context
            .arc(center_x, center_y, radius, start_angle, end_angle)
            .map_err(|_| AppError::RenderingError("Failed to draw doughnut segment".to_string()))?;
        context.close_path();
        context.fill();
        start_angle = end_angle;
    }

    // Punch the hole so the pie reads as a doughnut
    context.set_fill_style(&JsValue::from(BACKGROUND));
    context.begin_path();
    context
        .arc(
            center_x,
            center_y,
            radius * DOUGHNUT_HOLE_RATIO,
            0.0,
            PI * 2.0,
        )
        .map_err(|_| AppError::RenderingError("Failed to draw doughnut hole".to_string()))?;
    context.fill();

    if let Some(label) = &options.center_label {
        context.set_fill_style(&JsValue::from(TEXT_COLOR));
        context.set_font("16px Arial");
        context.set_text_align("center");
        fill_text(context, label, center_x, center_y + 5.0)?;
    }

    draw_legend(context, height, dataset)
}

fn draw_legend(
    context: &CanvasRenderingContext2d,
    height: f64,
    dataset: &ChartDataset,
) -> RenderingResult<()> {
    let y = height - LEGEND_SPACE / 2.0;
    let mut x = PADDING / 2.0;
    context.set_font("12px Arial");
    context.set_text_align("left");
    for (i, (label, value)) in dataset
        .labels()
        .iter()
        .zip(dataset.values().iter())
        .enumerate()
    {
        context.set_fill_style(&JsValue::from(SERIES_COLORS[i % SERIES_COLORS.len()]));
        context.fill_rect(x, y - 8.0, 10.0, 10.0);
        x += 16.0;

        let text = format!("{label}: {}", format_value(*value));
        context.set_fill_style(&JsValue::from(TEXT_COLOR));
        fill_text(context, &text, x, y)?;
        // Rough per-glyph advance, good enough for short legend rows
        x += text.chars().count() as f64 * 7.0 + 18.0;
    }
    Ok(())
}

fn draw_no_data_message(
    context: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
) -> RenderingResult<()> {
    context.set_fill_style(&JsValue::from(MUTED_TEXT_COLOR));
    context.set_font("14px Arial");
    context.set_text_align("center");
    fill_text(context, "No data to display", width / 2.0, height / 2.0)
}

fn fill_text(
    context: &CanvasRenderingContext2d,
    text: &str,
    x: f64,
    y: f64,
) -> RenderingResult<()> {
    context
        .fill_text(text, x, y)
        .map_err(|_| AppError::RenderingError(format!("Failed to draw text '{text}'")))
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
