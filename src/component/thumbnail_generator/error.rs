use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 候選圖亮度計算失敗
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("無法解碼圖片 {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("無法開啟圖片 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("圖片沒有任何像素: {0}")]
    Empty(PathBuf),
}

/// 單一影片範圍內可回復的錯誤
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("擷取 {timecode} 失敗: {reason}")]
    ExtractionFailure { timecode: String, reason: String },
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error("無法從 {0} 取得任何候選畫面")]
    NoCandidate(PathBuf),
    #[error("無法寫入縮圖 {path}: {source}")]
    Publish {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
