//! Background sample storage and selection.
//!
//! Samples are flat PNG files named by frame index, e.g. `bgsample/40.png`.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage, RgbaImage};

use crate::ascii::{resize_to, GridSize};

/// Index loaded by default.
pub const DEFAULT_SAMPLE_INDEX: u32 = 40;

/// Number of frames written by sample generation.
pub const SAMPLE_COUNT: u32 = 100;

/// Errors from reading or writing background samples.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("failed to create sample directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read sample {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode sample {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to write sample {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("no background samples in {}. Run with --gen first", .0.display())]
    NoSamples(PathBuf),
}

/// Write an RGB image as PNG.
pub fn save_png(path: &Path, image: &RgbImage) -> Result<(), SampleError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| SampleError::Encode {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a PNG as RGBA. Images without alpha load fully opaque.
pub fn load_png(path: &Path) -> Result<RgbaImage, SampleError> {
    let bytes = fs::read(path).map_err(|source| SampleError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png).map_err(|source| {
        SampleError::Decode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(image.to_rgba8())
}

/// A directory of numbered PNG samples.
#[derive(Debug, Clone)]
pub struct SampleStore {
    dir: PathBuf,
}

impl SampleStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the sample with the given index.
    pub fn path_for(&self, index: u32) -> PathBuf {
        self.dir.join(format!("{}.png", index))
    }

    /// Create the sample directory and any missing parents.
    pub fn ensure_dir(&self) -> Result<(), SampleError> {
        fs::create_dir_all(&self.dir).map_err(|source| SampleError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    /// Save `image` as sample `index`, returning the written path.
    pub fn save(&self, index: u32, image: &RgbImage) -> Result<PathBuf, SampleError> {
        let path = self.path_for(index);
        save_png(&path, image)?;
        log::debug!("Saved background sample {}", path.display());
        Ok(path)
    }

    /// Load sample `index`.
    pub fn load(&self, index: u32) -> Result<RgbaImage, SampleError> {
        load_png(&self.path_for(index))
    }

    /// Indices of all `<n>.png` files in the directory, ascending.
    ///
    /// Other files are ignored. A missing directory is a `Read` error.
    pub fn indices(&self) -> Result<Vec<u32>, SampleError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| SampleError::Read {
            path: self.dir.clone(),
            source,
        })?;

        let mut indices: Vec<u32> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
            .filter_map(|path| path.file_stem()?.to_str()?.parse().ok())
            .collect();
        indices.sort_unstable();
        Ok(indices)
    }
}

/// Policy choosing which stored sample becomes the background.
pub trait SampleSelection {
    fn select(&self, store: &SampleStore) -> Result<u32, SampleError>;
}

/// Always use the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIndex(pub u32);

impl Default for FixedIndex {
    fn default() -> Self {
        Self(DEFAULT_SAMPLE_INDEX)
    }
}

impl SampleSelection for FixedIndex {
    fn select(&self, _store: &SampleStore) -> Result<u32, SampleError> {
        Ok(self.0)
    }
}

/// Use the highest-numbered sample present.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestIndex;

impl SampleSelection for LatestIndex {
    fn select(&self, store: &SampleStore) -> Result<u32, SampleError> {
        store
            .indices()?
            .last()
            .copied()
            .ok_or_else(|| SampleError::NoSamples(store.dir().to_path_buf()))
    }
}

/// The loaded background, plus a copy fitted to the current render grid.
#[derive(Debug, Clone)]
pub struct BackgroundSample {
    index: u32,
    source: RgbaImage,
    fitted: RgbaImage,
}

impl BackgroundSample {
    /// Load the sample picked by `selection` and fit it to `size`.
    pub fn load(
        store: &SampleStore,
        selection: &dyn SampleSelection,
        size: GridSize,
    ) -> Result<Self, SampleError> {
        let index = selection.select(store)?;
        let source = store.load(index)?;
        log::info!(
            "Loaded background sample {} ({}x{})",
            store.path_for(index).display(),
            source.width(),
            source.height()
        );
        Ok(Self::from_image(index, source, size))
    }

    /// Wrap an already decoded image.
    pub fn from_image(index: u32, source: RgbaImage, size: GridSize) -> Self {
        let fitted = resize_to(&source, size);
        Self {
            index,
            source,
            fitted,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Resample from the original image if `size` differs from the
    /// current fit. Returns whether a refit happened.
    pub fn fit(&mut self, size: GridSize) -> bool {
        if self.fitted.dimensions() == (size.width, size.height) {
            return false;
        }
        log::debug!(
            "Refitting background sample to {}x{}",
            size.width,
            size.height
        );
        self.fitted = resize_to(&self.source, size);
        true
    }

    /// The background at the current render grid size.
    pub fn fitted(&self) -> &RgbaImage {
        &self.fitted
    }
}
