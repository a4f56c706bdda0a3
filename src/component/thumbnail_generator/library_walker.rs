//! 媒體庫走訪
//!
//! 目錄結構：`root/<subject>/<course>/video/*.<ext>`

use crate::config::Config;
use crate::tools::{list_subdirectories, scan_video_files, validate_directory_exists};
use anyhow::Result;
use log::debug;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

pub const VIDEO_DIR_NAME: &str = "video";
pub const THUMBS_DIR_NAME: &str = "thumbs";
pub const TEMP_DIR_NAME: &str = "_thumbs_tmp";

/// 一支待處理的課程影片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoAsset {
    pub path: PathBuf,
    pub subject: String,
    pub course: String,
}

impl VideoAsset {
    /// 由 `<course>/video/<file>` 推導科目與課程
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let course_dir = path.parent().and_then(Path::parent);
        let name_of = |p: Option<&Path>| {
            p.and_then(Path::file_name)
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default()
        };

        Self {
            path: path.to_path_buf(),
            subject: name_of(course_dir.and_then(Path::parent)),
            course: name_of(course_dir),
        }
    }

    /// 用來命名縮圖與候選圖的基本檔名（保留原始位元組）
    #[must_use]
    pub fn base_name(&self) -> OsString {
        self.path
            .file_stem()
            .map_or_else(|| OsString::from("video"), OsStr::to_os_string)
    }

    /// 基本檔名加上後綴，例如 `_cand1.jpg`
    #[must_use]
    pub fn output_file_name(&self, suffix: &str) -> OsString {
        let mut name = self.base_name();
        name.push(suffix);
        name
    }

    #[must_use]
    pub fn course_dir(&self) -> PathBuf {
        self.path
            .parent()
            .and_then(Path::parent)
            .unwrap_or(Path::new("."))
            .to_path_buf()
    }

    #[must_use]
    pub fn thumbnail_path(&self) -> PathBuf {
        self.course_dir()
            .join(THUMBS_DIR_NAME)
            .join(self.output_file_name(".jpg"))
    }

    #[must_use]
    pub fn temp_dir(&self) -> PathBuf {
        self.course_dir().join(TEMP_DIR_NAME)
    }
}

/// 走訪 `root` 找出所有影片
///
/// 科目、課程兩層依名稱排序；同一課程內的影片保留檔案系統列舉順序，
/// 各平台不保證一致。每支影片獨立處理，順序不影響結果。
pub fn discover_videos(root: &Path, config: &Config) -> Result<Vec<VideoAsset>> {
    validate_directory_exists(root)?;

    let mut videos = Vec::new();

    for subject_dir in list_subdirectories(root)? {
        if !matches_filter(&subject_dir, config.subject.as_deref()) {
            continue;
        }

        for course_dir in list_subdirectories(&subject_dir)? {
            if !matches_filter(&course_dir, config.course.as_deref()) {
                continue;
            }

            let video_dir = course_dir.join(VIDEO_DIR_NAME);
            if !video_dir.is_dir() {
                debug!("略過沒有 video 資料夾的課程: {}", course_dir.display());
                continue;
            }

            videos.extend(
                scan_video_files(&video_dir, config)
                    .into_iter()
                    .map(|path| VideoAsset::from_path(&path)),
            );
        }
    }

    Ok(videos)
}

fn matches_filter(dir: &Path, filter: Option<&str>) -> bool {
    filter.is_none_or(|wanted| dir.file_name().is_some_and(|name| name == wanted))
}
