use super::ensure_positive;
use crate::error::TransformError;
use crate::histogram::{Histogram, BINS};
use image::{imageops, GrayImage, Luma};

/// CLAHE parameters used by the batch pipeline
pub const CLIP_LIMIT: f32 = 2.0;
pub const TILES_X: u32 = 3;
pub const TILES_Y: u32 = 3;

/// Apply contrast-limited adaptive histogram equalization with the
/// pipeline's fixed clip limit and tile grid
pub fn apply(image: &GrayImage) -> Result<GrayImage, TransformError> {
    clahe(image, CLIP_LIMIT, TILES_X, TILES_Y)
}

/// Contrast-limited adaptive histogram equalization
///
/// The image is split into a `tiles_x` x `tiles_y` grid. Each tile gets its
/// own equalization table from a histogram clipped at
/// `clip_limit * tile_area / 256` (at least 1), with the clipped excess
/// spread back over all bins. Every pixel is then remapped by bilinear
/// interpolation between the tables of the four nearest tile centers.
/// Images that do not divide evenly are padded by mirroring (without
/// repeating the edge sample) for the table computation only. Images
/// smaller than the grid end up with 1-pixel tiles.
pub fn clahe(
    image: &GrayImage,
    clip_limit: f32,
    tiles_x: u32,
    tiles_y: u32,
) -> Result<GrayImage, TransformError> {
    ensure_positive("clip limit", clip_limit)?;
    if tiles_x == 0 || tiles_y == 0 {
        return Err(TransformError::InvalidParameter(format!(
            "tile grid must be at least 1x1, got {}x{}",
            tiles_x, tiles_y
        )));
    }

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Ok(image.clone());
    }

    let padded = pad_reflect101(image, tiles_x, tiles_y);
    let tile_w = padded.width() / tiles_x;
    let tile_h = padded.height() / tiles_y;
    let tile_area = tile_w * tile_h;
    let clip = ((clip_limit * tile_area as f32 / BINS as f32) as u32).max(1);

    let mut luts = Vec::with_capacity((tiles_x * tiles_y) as usize);
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let tile = imageops::crop_imm(&padded, tx * tile_w, ty * tile_h, tile_w, tile_h).to_image();
            luts.push(tile_lut(&tile, clip));
        }
    }

    let lut_at = |tx: u32, ty: u32| &luts[(ty * tiles_x + tx) as usize];
    let inv_tile_w = 1.0 / tile_w as f32;
    let inv_tile_h = 1.0 / tile_h as f32;

    Ok(GrayImage::from_fn(width, height, |x, y| {
        let (ty1, ty2, ya) = neighbours(y as f32 * inv_tile_h - 0.5, tiles_y);
        let (tx1, tx2, xa) = neighbours(x as f32 * inv_tile_w - 0.5, tiles_x);
        let value = image.get_pixel(x, y).0[0] as usize;

        let top = lut_at(tx1, ty1)[value] as f32 * (1.0 - xa) + lut_at(tx2, ty1)[value] as f32 * xa;
        let bottom =
            lut_at(tx1, ty2)[value] as f32 * (1.0 - xa) + lut_at(tx2, ty2)[value] as f32 * xa;
        let mapped = top * (1.0 - ya) + bottom * ya;

        Luma([mapped.round().clamp(0.0, 255.0) as u8])
    }))
}

/// Resolve a fractional tile coordinate into the two tiles to blend and the
/// weight of the second one. Tiles beyond the grid edge collapse onto the
/// border tile.
fn neighbours(position: f32, tiles: u32) -> (u32, u32, f32) {
    let first = position.floor();
    let weight = position - first;
    let last = tiles as i64 - 1;
    let t1 = (first as i64).clamp(0, last) as u32;
    let t2 = (first as i64 + 1).clamp(0, last) as u32;
    (t1, t2, weight)
}

/// Equalization table for one tile with a clipped histogram
fn tile_lut(tile: &GrayImage, clip: u32) -> [u8; BINS] {
    let mut counts = *Histogram::of(tile).counts();
    clip_histogram(&mut counts, clip);

    let scale = (BINS - 1) as f32 / (tile.width() * tile.height()) as f32;
    let mut lut = [0u8; BINS];
    let mut sum = 0u32;
    for (entry, &count) in lut.iter_mut().zip(counts.iter()) {
        sum += count;
        *entry = (sum as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Clip bins at `limit` and redistribute the excess: an equal share to
/// every bin, then the remainder one at a time at an even stride.
fn clip_histogram(counts: &mut [u32; BINS], limit: u32) {
    let mut clipped = 0u32;
    for count in counts.iter_mut() {
        if *count > limit {
            clipped += *count - limit;
            *count = limit;
        }
    }

    let batch = clipped / BINS as u32;
    let mut residual = (clipped % BINS as u32) as usize;
    for count in counts.iter_mut() {
        *count += batch;
    }

    if residual > 0 {
        let step = (BINS / residual).max(1);
        let mut i = 0;
        while i < BINS && residual > 0 {
            counts[i] += 1;
            residual -= 1;
            i += step;
        }
    }
}

/// Pad so both dimensions divide evenly by the grid, mirroring around the
/// last row/column without repeating it
fn pad_reflect101(image: &GrayImage, tiles_x: u32, tiles_y: u32) -> GrayImage {
    let (width, height) = image.dimensions();
    let padded_w = width.div_ceil(tiles_x) * tiles_x;
    let padded_h = height.div_ceil(tiles_y) * tiles_y;

    if padded_w == width && padded_h == height {
        return image.clone();
    }

    GrayImage::from_fn(padded_w, padded_h, |x, y| {
        *image.get_pixel(reflect101(x, width), reflect101(y, height))
    })
}

fn reflect101(pos: u32, len: u32) -> u32 {
    if len <= 1 {
        return 0;
    }
    let period = 2 * len - 2;
    let r = pos % period;
    if r >= len {
        period - r
    } else {
        r
    }
}
