use super::canvas::{Canvas, CURVE, INK, ORIGIN_X};
use super::{Chart, LABEL_SIZE, PLOT_HEIGHT, PLOT_WIDTH, TITLE_ORIGIN, TITLE_SIZE};
use crate::error::TransformError;
use crate::histogram::{TransferFunction, BINS};

/// Render a transfer function over the default plot area
pub fn render(transfer: &TransferFunction, title: &str) -> Result<Chart, TransformError> {
    render_sized(transfer, title, PLOT_WIDTH, PLOT_HEIGHT)
}

/// Plot input intensity (x) against output intensity (y)
///
/// Output values are drawn as-is, one pixel per intensity level, with higher
/// outputs higher on the canvas.
pub fn render_sized(
    transfer: &TransferFunction,
    title: &str,
    plot_width: u32,
    plot_height: u32,
) -> Result<Chart, TransformError> {
    let mut canvas = Canvas::new(plot_width, plot_height)?;
    let table = transfer.table();
    let bin_w = (plot_width as f32 / BINS as f32).round() as i32;
    let h = plot_height as i32;

    for i in 1..BINS {
        let from = ((i as i32 - 1) * bin_w + ORIGIN_X, h - table[i - 1] as i32);
        let to = (i as i32 * bin_w + ORIGIN_X, h - table[i] as i32);
        canvas.line(from, to, CURVE, 2);
    }

    canvas.axes();

    for i in (0..BINS as i32).step_by(64) {
        let label = i.to_string();
        canvas.text(&label, (i * bin_w + 20, h + 20), LABEL_SIZE, INK, 1);

        // Right-aligned against the y axis, level with the intensity
        let x = ORIGIN_X - 3 - canvas.text_width(&label, LABEL_SIZE);
        canvas.text(&label, (x, h - i + 4), LABEL_SIZE, INK, 1);
    }

    canvas.text(title, TITLE_ORIGIN, TITLE_SIZE, INK, 2);
    Ok(canvas.finish())
}
