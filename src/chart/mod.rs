//! Chart rendering for histograms and transfer functions
//!
//! Both chart kinds share one layout: a 512x400 plot area on a canvas 50 px
//! larger in each direction, axes meeting at (25, plot height), tick labels
//! in a small font and a title near the top left.

pub mod canvas;
pub mod histogram;
pub mod transfer;

use crate::error::TransformError;
use ab_glyph::FontRef;
use image::{ImageFormat, RgbImage};
use std::path::Path;

/// Embedded label font
static FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSansMono.ttf");

/// Default plot area
pub const PLOT_WIDTH: u32 = 512;
pub const PLOT_HEIGHT: u32 = 400;

const TITLE_ORIGIN: (i32, i32) = (50, 30);
/// Title and tick label heights in pixels
const TITLE_SIZE: f32 = 24.0;
const LABEL_SIZE: f32 = 12.0;

pub fn load_font() -> Result<FontRef<'static>, TransformError> {
    Ok(FontRef::try_from_slice(FONT_DATA)?)
}

/// A rendered chart ready to be written out
pub struct Chart {
    image: RgbImage,
}

impl Chart {
    fn new(image: RgbImage) -> Self {
        Self { image }
    }

    #[cfg(test)]
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Write the chart as PNG, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<(), TransformError> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| TransformError::Encode {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_glyph::Font;

    #[test]
    fn test_embedded_font_covers_labels() {
        let font = load_font().unwrap();
        for c in "0123456789 Funcao de Transformacao Equalizacao".chars().filter(|c| *c != ' ') {
            assert_ne!(font.glyph_id(c).0, 0, "missing glyph for {:?}", c);
        }
    }
}
