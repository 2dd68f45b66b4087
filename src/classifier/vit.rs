use anyhow::Context;
use image::{DynamicImage, RgbImage};
use tract_onnx::prelude::*;
use tracing::{debug, info};

use super::{ImageClassifier, LabelTable, ModelAssets, Prediction, PreprocessorConfig};

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Vision Transformer exported to ONNX, run on the CPU with tract.
pub struct VitClassifier {
    plan: Plan,
    labels: LabelTable,
    preprocessor: PreprocessorConfig,
}

impl VitClassifier {
    /// Loads and optimizes the model, then runs one warm-up inference so a
    /// broken model or a mismatched label table fails here instead of on the
    /// first upload.
    pub fn load(assets: &ModelAssets) -> anyhow::Result<Self> {
        let labels = LabelTable::load(&assets.config)?;
        let preprocessor = PreprocessorConfig::load(&assets.preprocessor)?;

        info!(
            model = %assets.model.display(),
            classes = labels.len(),
            "loading classification model"
        );

        let plan = tract_onnx::onnx()
            .model_for_path(&assets.model)
            .with_context(|| format!("reading {}", assets.model.display()))?
            .with_input_fact(0, f32::fact(preprocessor.input_shape()).into())?
            .into_optimized()?
            .into_runnable()?;

        let classifier = Self {
            plan,
            labels,
            preprocessor,
        };

        let (h, w) = classifier.preprocessor.size.height_width();
        let blank = DynamicImage::ImageRgb8(RgbImage::new(w, h));
        classifier
            .classify(&blank)
            .context("warm-up inference failed")?;

        info!("classification model ready");
        Ok(classifier)
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }
}

impl ImageClassifier for VitClassifier {
    fn classify(&self, image: &DynamicImage) -> anyhow::Result<Prediction> {
        let shape = self.preprocessor.input_shape();
        let input = tract_ndarray::Array4::from_shape_vec(
            (shape[0], shape[1], shape[2], shape[3]),
            self.preprocessor.pixel_values(image),
        )?
        .into_tensor();

        let outputs = self.plan.run(tvec!(input.into()))?;
        let logits = outputs
            .first()
            .context("model produced no outputs")?
            .to_array_view::<f32>()?;
        let scores: Vec<f32> = logits.iter().copied().collect();

        let prediction = self.labels.best(&scores)?;
        debug!(index = prediction.index, score = prediction.score, "classified image");
        Ok(prediction)
    }
}
