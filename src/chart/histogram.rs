use super::canvas::{Canvas, CURVE, INK, ORIGIN_X};
use super::{Chart, LABEL_SIZE, PLOT_HEIGHT, PLOT_WIDTH, TITLE_ORIGIN, TITLE_SIZE};
use crate::error::TransformError;
use crate::histogram::Histogram;

/// Render a histogram as a polyline over the default plot area
pub fn render(histogram: &Histogram, title: &str) -> Result<Chart, TransformError> {
    render_sized(histogram, title, PLOT_WIDTH, PLOT_HEIGHT)
}

/// Render a histogram as a polyline through consecutive bin tops
///
/// Bar heights are rescaled per chart so the fullest bin touches the top of
/// the plot area. The histogram itself is left untouched.
pub fn render_sized(
    histogram: &Histogram,
    title: &str,
    plot_width: u32,
    plot_height: u32,
) -> Result<Chart, TransformError> {
    let mut canvas = Canvas::new(plot_width, plot_height)?;
    let heights = normalize_to_height(histogram.counts(), plot_height as f32);
    let bin_w = (plot_width as f32 / heights.len() as f32).round() as i32;
    let h = plot_height as i32;

    for (i, pair) in heights.windows(2).enumerate() {
        let x = bin_w * i as i32 + ORIGIN_X;
        canvas.line(
            (x, h - pair[0].round() as i32),
            (x + bin_w, h - pair[1].round() as i32),
            CURVE,
            1,
        );
    }

    canvas.axes();

    for i in (0..=256).step_by(64) {
        canvas.text(&i.to_string(), (bin_w * i + 20, h + 20), LABEL_SIZE, INK, 1);
    }
    for i in (0..=h).step_by(100) {
        canvas.text(&(h - i).to_string(), (5, i + 5), LABEL_SIZE, INK, 1);
    }

    canvas.text(title, TITLE_ORIGIN, TITLE_SIZE, INK, 2);
    Ok(canvas.finish())
}

/// Min-max normalized copy of `counts` scaled to [0, height].
/// A flat histogram maps to all zeros.
fn normalize_to_height(counts: &[u32], height: f32) -> Vec<f32> {
    let min = counts.iter().copied().min().unwrap_or(0) as f32;
    let max = counts.iter().copied().max().unwrap_or(0) as f32;
    let range = max - min;

    counts
        .iter()
        .map(|&c| {
            if range > 0.0 {
                (c as f32 - min) / range * height
            } else {
                0.0
            }
        })
        .collect()
}
