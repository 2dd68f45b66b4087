use std::path::Path;

use anyhow::{ensure, Context};
use image::imageops::{self, FilterType};
use image::DynamicImage;
use serde::Deserialize;

/// `size` appears either as a bare edge length or as explicit dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ImageSize {
    Square(u32),
    Dims { height: u32, width: u32 },
}

impl ImageSize {
    pub fn height_width(self) -> (u32, u32) {
        match self {
            ImageSize::Square(edge) => (edge, edge),
            ImageSize::Dims { height, width } => (height, width),
        }
    }
}

/// The subset of a Hugging Face `preprocessor_config.json` this model needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PreprocessorConfig {
    #[serde(default = "default_size")]
    pub size: ImageSize,
    #[serde(default = "default_resample")]
    pub resample: u8,
    #[serde(default = "default_true")]
    pub do_rescale: bool,
    #[serde(default = "default_rescale_factor")]
    pub rescale_factor: f32,
    #[serde(default = "default_true")]
    pub do_normalize: bool,
    #[serde(default = "default_half")]
    pub image_mean: [f32; 3],
    #[serde(default = "default_half")]
    pub image_std: [f32; 3],
}

fn default_size() -> ImageSize {
    ImageSize::Square(224)
}

fn default_resample() -> u8 {
    2
}

fn default_true() -> bool {
    true
}

fn default_rescale_factor() -> f32 {
    1.0 / 255.0
}

fn default_half() -> [f32; 3] {
    [0.5, 0.5, 0.5]
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            resample: default_resample(),
            do_rescale: true,
            rescale_factor: default_rescale_factor(),
            do_normalize: true,
            image_mean: default_half(),
            image_std: default_half(),
        }
    }
}

impl PreprocessorConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let (h, w) = self.size.height_width();
        ensure!(h > 0 && w > 0, "image size must be non-zero, got {h}x{w}");
        ensure!(
            self.image_std.iter().all(|s| *s != 0.0),
            "image_std contains a zero"
        );
        Ok(())
    }

    /// Shape of the model input, `[batch, channels, height, width]`.
    pub fn input_shape(&self) -> [usize; 4] {
        let (h, w) = self.size.height_width();
        [1, 3, h as usize, w as usize]
    }

    /// PIL resample codes.
    pub fn filter(&self) -> FilterType {
        match self.resample {
            0 => FilterType::Nearest,
            1 => FilterType::Lanczos3,
            3 => FilterType::CatmullRom,
            _ => FilterType::Triangle,
        }
    }

    /// Resizes, rescales and normalizes `image` into planar RGB (CHW) floats.
    pub fn pixel_values(&self, image: &DynamicImage) -> Vec<f32> {
        let (h, w) = self.size.height_width();
        let rgb = image.to_rgb8();
        let resized = imageops::resize(&rgb, w, h, self.filter());

        let plane = (h * w) as usize;
        let mut data = vec![0.0f32; 3 * plane];
        for (x, y, pixel) in resized.enumerate_pixels() {
            let offset = (y * w + x) as usize;
            for c in 0..3 {
                let mut v = f32::from(pixel[c]);
                if self.do_rescale {
                    v *= self.rescale_factor;
                }
                if self.do_normalize {
                    v = (v - self.image_mean[c]) / self.image_std[c];
                }
                data[c * plane + offset] = v;
            }
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn vit_config_parses() {
        let json = r#"{
            "do_normalize": true,
            "do_rescale": true,
            "do_resize": true,
            "image_mean": [0.5, 0.5, 0.5],
            "image_processor_type": "ViTImageProcessor",
            "image_std": [0.5, 0.5, 0.5],
            "resample": 2,
            "rescale_factor": 0.00392156862745098,
            "size": { "height": 224, "width": 224 }
        }"#;
        let config: PreprocessorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.size.height_width(), (224, 224));
        assert_eq!(config.filter(), FilterType::Triangle);
        assert_eq!(config.input_shape(), [1, 3, 224, 224]);
    }

    #[test]
    fn legacy_integer_size_and_defaults() {
        let config: PreprocessorConfig =
            serde_json::from_str(r#"{"size": 384, "resample": 3}"#).unwrap();
        assert_eq!(config.size, ImageSize::Square(384));
        assert_eq!(config.filter(), FilterType::CatmullRom);
        assert!(config.do_normalize);
        assert_eq!(config.image_mean, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn zero_std_is_invalid() {
        let config = PreprocessorConfig {
            image_std: [0.5, 0.0, 0.5],
            ..PreprocessorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn pixel_values_are_planar_and_normalized() {
        let config = PreprocessorConfig {
            size: ImageSize::Square(4),
            ..PreprocessorConfig::default()
        };
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(9, 5, Rgb([255, 0, 51])));

        let values = config.pixel_values(&image);
        assert_eq!(values.len(), 3 * 4 * 4);

        let (r, g, b) = (&values[0..16], &values[16..32], &values[32..48]);
        assert!(r.iter().all(|v| (v - 1.0).abs() < 1e-5));
        assert!(g.iter().all(|v| (v + 1.0).abs() < 1e-5));
        assert!(b.iter().all(|v| (v + 0.6).abs() < 1e-5));
    }

    #[test]
    fn alpha_is_dropped_and_raw_values_kept_without_rescale() {
        let config = PreprocessorConfig {
            size: ImageSize::Dims { height: 2, width: 3 },
            do_rescale: false,
            do_normalize: false,
            ..PreprocessorConfig::default()
        };
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 0])));

        let values = config.pixel_values(&image);
        assert_eq!(values.len(), 3 * 2 * 3);
        assert_eq!(&values[0..6], &[10.0; 6]);
        assert_eq!(&values[6..12], &[20.0; 6]);
        assert_eq!(&values[12..18], &[30.0; 6]);
    }
}
