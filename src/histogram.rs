//! Intensity histograms and the equalization transfer function
//!
//! Bin counting is delegated to `imageproc::stats::histogram`; this module
//! only derives the cumulative remapping table from it.

use image::GrayImage;
use imageproc::stats::histogram;

/// Number of intensity bins for 8-bit samples
pub const BINS: usize = 256;

/// Occurrence counts of each 8-bit intensity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u32; BINS],
}

impl Histogram {
    /// Count the intensities of every pixel in `image`
    pub fn of(image: &GrayImage) -> Self {
        Self {
            counts: histogram(image).channels[0],
        }
    }

    #[cfg(test)]
    pub fn from_counts(counts: [u32; BINS]) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[u32; BINS] {
        &self.counts
    }

    /// Total number of samples counted
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }
}

/// 256-entry intensity remapping table built from a normalized cumulative
/// histogram. Entries never decrease and always lie in 0-255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFunction {
    table: [u8; BINS],
}

impl TransferFunction {
    /// Equalization transfer function of `image`
    pub fn of(image: &GrayImage) -> Self {
        Self::from_histogram(&Histogram::of(image))
    }

    /// Divide each bin by the sample count, accumulate in ascending intensity
    /// order and scale the running sum to 0-255 with rounding.
    ///
    /// An empty histogram has no distribution to follow and yields the
    /// identity mapping.
    pub fn from_histogram(histogram: &Histogram) -> Self {
        let total = histogram.total();
        if total == 0 {
            return Self::identity();
        }

        let mut table = [0u8; BINS];
        let mut cdf = 0.0f32;
        for (entry, &count) in table.iter_mut().zip(histogram.counts().iter()) {
            cdf += count as f32 / total as f32;
            *entry = (cdf * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { table }
    }

    pub fn identity() -> Self {
        let mut table = [0u8; BINS];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = i as u8;
        }
        Self { table }
    }

    pub fn table(&self) -> &[u8; BINS] {
        &self.table
    }
}
