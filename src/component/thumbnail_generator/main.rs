use super::brightness_scorer::{BrightnessScorer, LumaScorer};
use super::candidate_selector::CandidateSelector;
use super::frame_extractor::{FfmpegFrameCapture, FrameCapture};
use super::library_walker::{VideoAsset, discover_videos};
use super::thumbnail_publisher::publish;
use crate::config::Config;
use anyhow::Result;
use console::style;
use log::info;
use std::path::Path;

/// 縮圖產生結果
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// 嘗試處理的影片數（不論成敗）
    pub processed: usize,
    pub published: usize,
    pub failed: usize,
}

/// 課程影片縮圖產生器
///
/// 流程：
/// 1. 走訪 `<subject>/<course>/video/` 找出影片
/// 2. 在每個設定的時間點擷取候選畫面
/// 3. 以灰階平均亮度評分，選出最亮者
/// 4. 複製到 `<course>/thumbs/<name>.jpg` 並清除暫存
pub struct ThumbnailGenerator {
    config: Config,
    capture: Box<dyn FrameCapture>,
    scorer: Box<dyn BrightnessScorer>,
}

impl ThumbnailGenerator {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let capture = FfmpegFrameCapture::from_config(&config);
        Self::with_capabilities(config, Box::new(capture), Box::new(LumaScorer))
    }

    #[must_use]
    pub fn with_capabilities(
        config: Config,
        capture: Box<dyn FrameCapture>,
        scorer: Box<dyn BrightnessScorer>,
    ) -> Self {
        Self {
            config,
            capture,
            scorer,
        }
    }

    /// 處理設定中的媒體根目錄
    pub fn run(&self) -> Result<RunSummary> {
        let root = self.config.root_dir.clone();
        self.run_at(&root)
    }

    pub fn run_at(&self, root: &Path) -> Result<RunSummary> {
        println!("{}", style("=== 課程影片縮圖產生 ===").cyan().bold());
        println!("{}", style(format!("媒體根目錄: {}", root.display())).dim());

        let videos = discover_videos(root, &self.config)?;
        if videos.is_empty() {
            println!("{}", style("找不到任何影片檔案").yellow());
        }

        let summary = self.process_videos(&videos);
        self.print_summary(&summary);

        Ok(summary)
    }

    /// 依序處理影片清單
    pub fn process_videos(&self, videos: &[VideoAsset]) -> RunSummary {
        let mut summary = RunSummary::default();

        for (index, video) in videos.iter().enumerate() {
            println!(
                "\n{} [{}/{}] {}",
                style("影片").cyan(),
                index + 1,
                videos.len(),
                style(video.path.display()).bold()
            );

            if self.process_video(video) {
                summary.published += 1;
            } else {
                summary.failed += 1;
            }
            summary.processed += 1;
        }

        summary
    }

    /// 處理單一影片，回傳是否產生縮圖
    pub fn process_video(&self, video: &VideoAsset) -> bool {
        let tmp_dir = video.temp_dir();
        let selector = CandidateSelector::new(self.capture.as_ref(), self.scorer.as_ref());
        let result = selector.select(video, &self.config.timecodes, &tmp_dir);

        publish(&result, &video.thumbnail_path(), &result.candidate_paths())
    }

    fn print_summary(&self, summary: &RunSummary) {
        println!();
        println!(
            "{} 已處理影片: {}",
            style("✓").green().bold(),
            summary.processed
        );
        println!("  產生縮圖: {} 個", style(summary.published).green());

        if summary.failed > 0 {
            println!("  未產生: {} 個", style(summary.failed).red());
        }

        info!(
            "縮圖產生完成 - 處理: {}, 成功: {}, 失敗: {}",
            summary.processed, summary.published, summary.failed
        );
    }
}
