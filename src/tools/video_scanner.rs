use crate::config::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 列出資料夾下一層的子資料夾（依名稱排序）
pub fn list_subdirectories(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(directory)
        .with_context(|| format!("無法讀取資料夾: {}", directory.display()))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("無法讀取資料夾項目: {}", directory.display()))?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }

    dirs.sort();
    Ok(dirs)
}

/// 掃描單一資料夾內的影片（不遞迴）
///
/// 回傳順序即檔案系統列舉順序，不做排序。
#[must_use]
pub fn scan_video_files(directory: &Path, config: &Config) -> Vec<PathBuf> {
    WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| config.is_video_file(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect()
}
