use crate::error::TransformError;
use image::GrayImage;
use std::time::Instant;

use super::steps;

/// The images produced for every input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Decoded input, untouched
    Original,
    /// Logarithmic transform, c = 1.0
    Log,
    /// Power-law transform, c = 1.0, gamma = 0.4
    Gamma,
    /// Global histogram equalization
    GlobalEqualization,
    /// Contrast-limited adaptive equalization, 3x3 tiles, clip limit 2.0
    LocalEqualization,
}

impl Variant {
    /// Variants produced for every input, in output order
    pub const STANDARD: [Variant; 4] = [
        Self::Original,
        Self::Log,
        Self::Gamma,
        Self::GlobalEqualization,
    ];

    /// Get the step name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Log => "log",
            Self::Gamma => "gamma",
            Self::GlobalEqualization => "global_equalization",
            Self::LocalEqualization => "local_equalization",
        }
    }

    /// Suffix of the transformed image file
    pub fn image_suffix(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Log => "log_transform",
            Self::Gamma => "gamma_transform",
            Self::GlobalEqualization => "global_equalization",
            Self::LocalEqualization => "local_equalization",
        }
    }

    /// Suffix of the histogram chart file. Local equalization has no chart.
    pub fn histogram_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Original => Some("hist_original"),
            Self::Log => Some("hist_log"),
            Self::Gamma => Some("hist_gamma"),
            Self::GlobalEqualization => Some("hist_eq"),
            Self::LocalEqualization => None,
        }
    }

    /// Title drawn on the histogram chart
    pub fn title(&self) -> &'static str {
        match self {
            Self::Original => "Original",
            Self::Log => "Log Transformation",
            Self::Gamma => "Gamma Transformation",
            Self::GlobalEqualization => "Global Equalization",
            Self::LocalEqualization => "Local Equalization",
        }
    }
}

/// Timing information for a single transform step
#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// One transformed image
#[derive(Debug, Clone)]
pub struct VariantImage {
    pub variant: Variant,
    pub image: GrayImage,
}

/// Result of running the pipeline on one image
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Variants in output order, starting with the original
    pub variants: Vec<VariantImage>,
    /// Total transform time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

impl PipelineResult {
    pub fn get(&self, variant: Variant) -> Option<&GrayImage> {
        self.variants
            .iter()
            .find(|v| v.variant == variant)
            .map(|v| &v.image)
    }
}

/// Fixed transform sequence applied to each input
pub struct Pipeline {
    local_equalization: bool,
}

impl Pipeline {
    pub fn new(local_equalization: bool) -> Self {
        Self { local_equalization }
    }

    /// Produce every variant of `image`. The input becomes the original
    /// variant; each step reads it and returns a new image.
    pub fn process(&self, image: GrayImage) -> Result<PipelineResult, TransformError> {
        let start = Instant::now();
        let mut steps_timing = Vec::new();

        let log = self.run_step(Variant::Log, &image, &mut steps_timing, steps::log::apply)?;
        let gamma = self.run_step(Variant::Gamma, &image, &mut steps_timing, steps::gamma::apply)?;
        let equalized = self.run_step(
            Variant::GlobalEqualization,
            &image,
            &mut steps_timing,
            steps::equalize::apply,
        )?;

        // Only requested inputs pay for the tiled equalization
        let local = if self.local_equalization {
            Some(self.run_step(
                Variant::LocalEqualization,
                &image,
                &mut steps_timing,
                steps::clahe::apply,
            )?)
        } else {
            None
        };

        let mut variants = vec![
            VariantImage {
                variant: Variant::Original,
                image,
            },
            log,
            gamma,
            equalized,
        ];
        variants.extend(local);

        Ok(PipelineResult {
            variants,
            total_time_ms: start.elapsed().as_millis() as u64,
            steps: steps_timing,
        })
    }

    fn run_step<F>(
        &self,
        variant: Variant,
        img: &GrayImage,
        timings: &mut Vec<StepTiming>,
        step_fn: F,
    ) -> Result<VariantImage, TransformError>
    where
        F: FnOnce(&GrayImage) -> Result<GrayImage, TransformError>,
    {
        let step_start = Instant::now();
        let result = step_fn(img)?;
        timings.push(StepTiming {
            name: variant.as_str().to_string(),
            time_ms: step_start.elapsed().as_millis() as u64,
        });
        Ok(VariantImage {
            variant,
            image: result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient() -> GrayImage {
        GrayImage::from_fn(24, 18, |x, y| Luma([(x * 5 + y * 3) as u8]))
    }

    #[test]
    fn test_pipeline_produces_standard_variants_in_order() {
        let result = Pipeline::new(false).process(gradient()).unwrap();

        let order: Vec<Variant> = result.variants.iter().map(|v| v.variant).collect();
        assert_eq!(order, Variant::STANDARD.to_vec());
        assert!(result.get(Variant::LocalEqualization).is_none());
    }

    #[test]
    fn test_pipeline_adds_local_equalization_when_requested() {
        let result = Pipeline::new(true).process(gradient()).unwrap();

        assert_eq!(result.variants.len(), 5);
        assert_eq!(
            result.variants.last().map(|v| v.variant),
            Some(Variant::LocalEqualization)
        );
    }

    #[test]
    fn test_pipeline_keeps_original_untouched() {
        let img = gradient();
        let result = Pipeline::new(false).process(img.clone()).unwrap();
        assert_eq!(result.get(Variant::Original), Some(&img));
    }

    #[test]
    fn test_pipeline_records_step_timings() {
        let result = Pipeline::new(true).process(gradient()).unwrap();

        let names: Vec<&str> = result.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["log", "gamma", "global_equalization", "local_equalization"]
        );
    }

    #[test]
    fn test_variants_preserve_dimensions() {
        let result = Pipeline::new(true).process(gradient()).unwrap();
        for variant in &result.variants {
            assert_eq!(variant.image.dimensions(), (24, 18), "{:?}", variant.variant);
        }
    }

    #[test]
    fn test_only_local_equalization_lacks_histogram_chart() {
        for variant in Variant::STANDARD {
            assert!(variant.histogram_suffix().is_some());
        }
        assert!(Variant::LocalEqualization.histogram_suffix().is_none());
    }
}
