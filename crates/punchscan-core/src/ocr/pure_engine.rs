//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::{assemble_lines, OcrCapability, OcrText, TextRegion};

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrEngine {
    engine: Mutex<pure_onnx_ocr::engine::OcrEngine>,
    config: OcrConfig,
}

impl PureOcrEngine {
    /// Create an engine from `det.onnx`, `latin_rec.onnx` and
    /// `latin_dict.txt` in a directory.
    pub fn from_dir(model_dir: &Path, config: OcrConfig) -> Result<Self, OcrError> {
        let det_path = model_dir.join("det.onnx");
        let rec_path = model_dir.join("latin_rec.onnx");
        let dict_path = model_dir.join("latin_dict.txt");

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!(
                    "missing model file {}",
                    path.display()
                )));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self {
            engine: Mutex::new(engine),
            config,
        })
    }

    /// Detect and recognize text regions.
    pub fn regions(&self, image: &DynamicImage) -> Result<Vec<TextRegion>, OcrError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OcrError::InvalidImage("empty image".to_string()));
        }
        debug!("Processing image: {}x{}", width, height);

        let engine = self
            .engine
            .lock()
            .map_err(|_| OcrError::Recognition("engine lock poisoned".to_string()))?;
        let results = engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        Ok(results
            .iter()
            .filter(|r| r.confidence >= self.config.min_confidence)
            .map(|r| TextRegion {
                bbox: polygon_to_bbox(&r.bounding_box),
                text: if self.config.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                },
                confidence: r.confidence,
            })
            .collect())
    }
}

impl OcrCapability for PureOcrEngine {
    fn name(&self) -> &str {
        "pure-onnx-ocr"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<OcrText, OcrError> {
        let start = Instant::now();
        let regions = self.regions(image)?;

        let confidence = if regions.is_empty() {
            0.0
        } else {
            regions.iter().map(|r| r.confidence).sum::<f32>() / regions.len() as f32
        };
        let text = assemble_lines(&regions);
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "OCR complete: {} regions, {} lines in {}ms",
            regions.len(),
            text.lines().count(),
            processing_time_ms
        );

        Ok(OcrText {
            text,
            confidence,
            processing_time_ms,
        })
    }
}

/// Convert a `Polygon<f64>` to `[x1, y1, x2, y2, x3, y3, x4, y4]`.
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_models_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PureOcrEngine::from_dir(dir.path(), OcrConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, OcrError::ModelLoad(_)));
    }
}
