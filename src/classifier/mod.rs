//! Food recognition: an ImageNet classifier behind a small trait.

pub mod assets;
pub mod labels;
pub mod preprocess;
mod vit;

use image::DynamicImage;
use serde::Serialize;

pub use assets::{ensure_assets, ModelAssets};
pub use labels::LabelTable;
pub use preprocess::PreprocessorConfig;
pub use vit::VitClassifier;

/// The single best class for an image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub index: usize,
    pub label: String,
    pub score: f32,
}

/// Maps a decoded image to one label from a fixed vocabulary.
///
/// Implementations are loaded once and shared read-only between requests.
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image: &DynamicImage) -> anyhow::Result<Prediction>;
}
