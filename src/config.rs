use crate::error::TransformError;
use crate::Args;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One input of the batch
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchEntry {
    pub path: PathBuf,
    /// Also produce the contrast-limited adaptive equalization
    #[serde(default)]
    pub local_equalization: bool,
}

impl BatchEntry {
    pub fn new(path: impl Into<PathBuf>, local_equalization: bool) -> Self {
        Self {
            path: path.into(),
            local_equalization,
        }
    }
}

/// Batch configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    pub batch: Vec<BatchEntry>,
}

impl TryFrom<Args> for Config {
    type Error = TransformError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let batch = match &args.manifest {
            Some(manifest) => load_manifest(manifest)?,
            None => default_batch(&args.input_dir),
        };

        Ok(Self {
            output_dir: args.output_dir,
            batch,
        })
    }
}

/// Three plain inputs followed by one that also gets local equalization
pub fn default_batch(input_dir: &Path) -> Vec<BatchEntry> {
    vec![
        BatchEntry::new(input_dir.join("input1.tif"), false),
        BatchEntry::new(input_dir.join("input2.tif"), false),
        BatchEntry::new(input_dir.join("input3.tif"), false),
        BatchEntry::new(input_dir.join("input4.tif"), true),
    ]
}

/// Read a JSON array of batch entries
pub fn load_manifest(path: &Path) -> Result<Vec<BatchEntry>, TransformError> {
    let invalid = |reason: String| TransformError::InvalidManifest {
        path: path.to_path_buf(),
        reason,
    };

    let contents = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let batch: Vec<BatchEntry> = serde_json::from_str(&contents).map_err(|e| invalid(e.to_string()))?;

    if batch.is_empty() {
        return Err(invalid("manifest lists no inputs".to_string()));
    }

    Ok(batch)
}
