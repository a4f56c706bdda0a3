use super::error::ScoreError;
use image::ImageReader;
use std::path::Path;

/// 計算候選圖的亮度分數（0-255）
pub trait BrightnessScorer {
    fn score(&self, image_path: &Path) -> Result<f64, ScoreError>;
}

/// 灰階平均亮度
#[derive(Debug, Clone, Copy, Default)]
pub struct LumaScorer;

impl BrightnessScorer for LumaScorer {
    fn score(&self, image_path: &Path) -> Result<f64, ScoreError> {
        // 依內容判斷格式，不信任副檔名
        let image = ImageReader::open(image_path)
            .and_then(ImageReader::with_guessed_format)
            .map_err(|source| ScoreError::Io {
                path: image_path.to_path_buf(),
                source,
            })?
            .decode()
            .map_err(|source| ScoreError::Decode {
                path: image_path.to_path_buf(),
                source,
            })?;

        let luma = image.to_luma8();
        let pixel_count = u64::from(luma.width()) * u64::from(luma.height());
        if pixel_count == 0 {
            return Err(ScoreError::Empty(image_path.to_path_buf()));
        }

        let sum: u64 = luma.as_raw().iter().map(|&v| u64::from(v)).sum();
        Ok(sum as f64 / pixel_count as f64)
    }
}
