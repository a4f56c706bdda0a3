//! 課程影片縮圖元件
//!
//! 每支影片：
//! A. 在固定時間點擷取候選畫面（ffmpeg）
//! B. 計算灰階平均亮度
//! C. 選出最亮的候選（同分取較早者）
//! D. 發布為正式縮圖並清除暫存

mod brightness_scorer;
mod candidate_selector;
mod error;
mod frame_extractor;
mod library_walker;
mod main;
mod thumbnail_publisher;

pub use brightness_scorer::{BrightnessScorer, LumaScorer};
pub use candidate_selector::{Candidate, CandidateSelector, SelectionResult, candidate_path};
pub use error::{PipelineError, ScoreError};
pub use frame_extractor::{FfmpegFrameCapture, FrameCapture, wait_with_timeout};
pub use library_walker::{
    TEMP_DIR_NAME, THUMBS_DIR_NAME, VIDEO_DIR_NAME, VideoAsset, discover_videos,
};
pub use main::{RunSummary, ThumbnailGenerator};
pub use thumbnail_publisher::{publish, release_candidates};
