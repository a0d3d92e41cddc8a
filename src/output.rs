//! Output directory tree and file naming
//!
//! Every file is named `<stem>_<suffix>.png` and lands in one of four fixed
//! subdirectories of the base output directory.

use crate::error::TransformError;
use crate::processing::Variant;
use image::{GrayImage, ImageFormat};
use std::fs;
use std::path::{Path, PathBuf};

pub const HISTOGRAM_DIR: &str = "Histogramas";
pub const IMAGE_DIR: &str = "Imagens_transformadas";
pub const TRANSFER_DIR: &str = "Funcoes_Transformacao";
pub const LOCAL_EQUALIZATION_DIR: &str = "EqualizacaoLocal";

/// Suffix of the equalization transfer-function chart
pub const TRANSFER_SUFFIX: &str = "funcao_transformacao_eq";

/// Paths of the output tree under one base directory
#[derive(Debug, Clone)]
pub struct OutputLayout {
    base: PathBuf,
}

impl OutputLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn histogram_dir(&self) -> PathBuf {
        self.base.join(HISTOGRAM_DIR)
    }

    pub fn image_dir(&self) -> PathBuf {
        self.base.join(IMAGE_DIR)
    }

    pub fn transfer_dir(&self) -> PathBuf {
        self.base.join(TRANSFER_DIR)
    }

    pub fn local_equalization_dir(&self) -> PathBuf {
        self.base.join(LOCAL_EQUALIZATION_DIR)
    }

    /// Create the base, histogram, image and transfer directories.
    /// Existing directories are left as they are.
    pub fn ensure_standard_dirs(&self) -> Result<(), TransformError> {
        for dir in [self.histogram_dir(), self.image_dir(), self.transfer_dir()] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn ensure_local_equalization_dir(&self) -> Result<(), TransformError> {
        fs::create_dir_all(self.local_equalization_dir())?;
        Ok(())
    }

    /// Where a transformed image is written. Local equalization results get
    /// their own directory.
    pub fn image_path(&self, stem: &str, variant: Variant) -> PathBuf {
        let dir = match variant {
            Variant::LocalEqualization => self.local_equalization_dir(),
            _ => self.image_dir(),
        };
        dir.join(file_name(stem, variant.image_suffix()))
    }

    pub fn histogram_path(&self, stem: &str, suffix: &str) -> PathBuf {
        self.histogram_dir().join(file_name(stem, suffix))
    }

    pub fn transfer_path(&self, stem: &str) -> PathBuf {
        self.transfer_dir().join(file_name(stem, TRANSFER_SUFFIX))
    }
}

pub fn file_name(stem: &str, suffix: &str) -> String {
    format!("{stem}_{suffix}.png")
}

/// File name without directory and extension. Bytes that are not valid
/// UTF-8 become U+FFFD.
pub fn file_stem(path: &Path) -> Result<String, TransformError> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| {
            TransformError::InvalidPath(format!(
                "{} has no valid file stem",
                path.display()
            ))
        })
}

/// Write a grayscale image as PNG, replacing any existing file
pub fn save_gray(image: &GrayImage, path: &Path) -> Result<(), TransformError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| TransformError::Encode {
            path: path.to_path_buf(),
            source,
        })
}
