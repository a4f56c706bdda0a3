use super::candidate_selector::SelectionResult;
use super::error::PipelineError;
use console::style;
use log::{error, info, warn};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// 將勝出的候選複製到正式縮圖位置，並清除所有暫存候選
///
/// 不論是否成功發布，清理都會執行。
pub fn publish(result: &SelectionResult, final_path: &Path, all_candidates: &[PathBuf]) -> bool {
    let published = match &result.best {
        Some(best) => match copy_to_final(&best.path, final_path) {
            Ok(()) => {
                println!(
                    "  {} 選用 {} → {}",
                    style("✓").green(),
                    best.file_name(),
                    final_path.display()
                );
                info!("縮圖已建立: {}", final_path.display());
                true
            }
            Err(e) => {
                error!("{e}");
                println!("  {} 縮圖寫入失敗", style("✗").red());
                false
            }
        },
        None => {
            println!("  {} 無法選出最佳畫面，略過", style("⚠").yellow());
            false
        }
    };

    release_candidates(all_candidates);

    published
}

fn copy_to_final(source: &Path, final_path: &Path) -> Result<(), PipelineError> {
    let publish_error = |source: io::Error| PipelineError::Publish {
        path: final_path.to_path_buf(),
        source,
    };

    if let Some(parent) = final_path.parent() {
        fs::create_dir_all(parent).map_err(publish_error)?;
    }

    // 先寫到同資料夾的暫存檔再改名，讀者只會看到舊縮圖或完整的新縮圖
    let staging = staging_path(final_path);
    let replaced = fs::copy(source, &staging).and_then(|_| fs::rename(&staging, final_path));
    if replaced.is_err() {
        let _ = fs::remove_file(&staging);
    }
    replaced.map_err(publish_error)
}

fn staging_path(final_path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(final_path.file_name().unwrap_or_default());
    name.push(".partial");
    final_path.with_file_name(name)
}

/// 盡力刪除暫存候選：檔案不存在時靜默略過，其他錯誤只記錄
pub fn release_candidates(paths: &[PathBuf]) {
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("無法刪除暫存檔 {}: {e}", path.display()),
        }
    }
}
