use super::brightness_scorer::BrightnessScorer;
use super::error::PipelineError;
use super::frame_extractor::FrameCapture;
use super::library_walker::VideoAsset;
use crate::config::Timecode;
use console::style;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// 擷取成功的候選畫面
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// 從 1 起算
    pub index: usize,
    pub timecode: Timecode,
    pub path: PathBuf,
}

impl Candidate {
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// 選取結果
#[derive(Debug, Default)]
pub struct SelectionResult {
    pub best: Option<Candidate>,
    pub score: Option<f64>,
    /// 所有擷取成功的候選（依時間點順序）
    pub candidates: Vec<Candidate>,
    /// 每個時間點的目標路徑，不論擷取成功與否
    pub attempted: Vec<PathBuf>,
}

impl SelectionResult {
    /// 需要清理的暫存路徑：擷取失敗也可能留下檔案，因此涵蓋所有嘗試過的路徑
    #[must_use]
    pub fn candidate_paths(&self) -> Vec<PathBuf> {
        self.attempted.clone()
    }
}

#[must_use]
pub fn candidate_path(tmp_dir: &Path, video: &VideoAsset, index: usize) -> PathBuf {
    tmp_dir.join(video.output_file_name(&format!("_cand{index}.jpg")))
}

/// 依序擷取、評分，選出最亮的候選
pub struct CandidateSelector<'a> {
    capture: &'a dyn FrameCapture,
    scorer: &'a dyn BrightnessScorer,
}

impl<'a> CandidateSelector<'a> {
    pub fn new(capture: &'a dyn FrameCapture, scorer: &'a dyn BrightnessScorer) -> Self {
        Self { capture, scorer }
    }

    pub fn select(
        &self,
        video: &VideoAsset,
        timecodes: &[Timecode],
        tmp_dir: &Path,
    ) -> SelectionResult {
        let attempted: Vec<PathBuf> = (1..=timecodes.len())
            .map(|index| candidate_path(tmp_dir, video, index))
            .collect();
        let candidates = self.extract_candidates(video, timecodes, tmp_dir);

        if candidates.is_empty() {
            warn!("{}", PipelineError::NoCandidate(video.path.clone()));
            println!("  {} 無法取得任何畫面", style("⚠").yellow());
            return SelectionResult {
                attempted,
                ..SelectionResult::default()
            };
        }

        // 嚴格大於：分數相同時保留較早的候選
        let mut best: Option<&Candidate> = None;
        let mut best_score = -1.0_f64;

        for candidate in &candidates {
            match self.scorer.score(&candidate.path) {
                Ok(score) => {
                    println!("  候選 {}: 亮度 {score:.1}", candidate.file_name());
                    if score > best_score {
                        best_score = score;
                        best = Some(candidate);
                    }
                }
                Err(e) => {
                    let e = PipelineError::from(e);
                    warn!("候選 {} 無法評分，略過: {e}", candidate.file_name());
                }
            }
        }

        let best = best.cloned();
        if best.is_none() {
            warn!("{} 的候選畫面皆無法評分", video.path.display());
        }

        SelectionResult {
            score: best.as_ref().map(|_| best_score),
            best,
            candidates,
            attempted,
        }
    }

    fn extract_candidates(
        &self,
        video: &VideoAsset,
        timecodes: &[Timecode],
        tmp_dir: &Path,
    ) -> Vec<Candidate> {
        timecodes
            .iter()
            .enumerate()
            .filter_map(|(i, timecode)| {
                let index = i + 1;
                let path = candidate_path(tmp_dir, video, index);

                if self.capture.extract(video, timecode, &path) && path.exists() {
                    debug!("候選 {index} 擷取成功: {}", path.display());
                    Some(Candidate {
                        index,
                        timecode: timecode.clone(),
                        path,
                    })
                } else {
                    debug!(
                        "{}",
                        PipelineError::ExtractionFailure {
                            timecode: timecode.to_string(),
                            reason: format!(
                                "{} 未產生候選 {index}",
                                video.base_name().to_string_lossy()
                            ),
                        }
                    );
                    None
                }
            })
            .collect()
    }
}
