use super::error::PipelineError;
use super::library_walker::VideoAsset;
use crate::config::{Config, Timecode};
use crate::tools::FfmpegCommand;
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::Path;
use std::process::{Child, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// 擷取單張候選畫面的能力
///
/// 回傳 `true` 代表呼叫結束後 `destination` 存在。失敗不是致命錯誤。
pub trait FrameCapture {
    fn extract(&self, video: &VideoAsset, timecode: &Timecode, destination: &Path) -> bool;
}

/// 以外部 ffmpeg 擷取畫面
#[derive(Debug, Clone)]
pub struct FfmpegFrameCapture {
    binary: String,
    quality: u8,
    timeout: Duration,
}

impl FfmpegFrameCapture {
    #[must_use]
    pub fn new(binary: &str, quality: u8, timeout: Duration) -> Self {
        Self {
            binary: binary.to_string(),
            quality,
            timeout,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.ffmpeg_binary,
            config.quality,
            Duration::from_secs(config.capture_timeout_secs),
        )
    }

    fn capture(
        &self,
        video: &VideoAsset,
        timecode: &Timecode,
        destination: &Path,
    ) -> Result<(), PipelineError> {
        let failure = |reason: String| PipelineError::ExtractionFailure {
            timecode: timecode.to_string(),
            reason,
        };

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| failure(format!("無法建立暫存資料夾 {}: {e}", parent.display())))?;
        }

        // 殘留的舊檔不能被當成這次的擷取結果
        remove_if_exists(destination)
            .map_err(|e| failure(format!("無法移除舊檔 {}: {e}", destination.display())))?;

        let command = FfmpegCommand::frame_capture(
            &self.binary,
            &video.path,
            timecode,
            self.quality,
            destination,
        );
        let mut cmd = command.build_command();
        debug!("執行擷取: {cmd:?}");

        let child = cmd
            .spawn()
            .map_err(|e| failure(format!("無法執行 {}: {e}", self.binary)))?;

        let status = match wait_with_timeout(child, self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = remove_if_exists(destination);
                return Err(failure(format!("逾時（{}s）", self.timeout.as_secs_f64())));
            }
            Err(e) => {
                let _ = remove_if_exists(destination);
                return Err(failure(format!("無法等待程序結束: {e}")));
            }
        };

        if !status.success() {
            let _ = remove_if_exists(destination);
            return Err(failure(format!("結束代碼 {}", status.code().unwrap_or(-1))));
        }

        if !destination.exists() {
            return Err(failure(format!("未產生檔案 {}", destination.display())));
        }

        Ok(())
    }
}

impl FrameCapture for FfmpegFrameCapture {
    fn extract(&self, video: &VideoAsset, timecode: &Timecode, destination: &Path) -> bool {
        match self.capture(video, timecode, destination) {
            Ok(()) => true,
            Err(e) => {
                warn!("{}: {e}", video.path.display());
                false
            }
        }
    }
}

/// 等待子程序結束，超過 `timeout` 則強制終止並回傳 `None`
pub fn wait_with_timeout(mut child: Child, timeout: Duration) -> io::Result<Option<ExitStatus>> {
    let started = Instant::now();

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }

        if started.elapsed() >= timeout {
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }

        thread::sleep(POLL_INTERVAL);
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::TempDir;

    fn asset(temp_dir: &TempDir) -> VideoAsset {
        VideoAsset::from_path(&temp_dir.path().join("algebra/lesson1/video/intro.mp4"))
    }

    #[test]
    fn test_missing_binary_yields_no_candidate() {
        let temp_dir = TempDir::new().unwrap();
        let video = asset(&temp_dir);
        let destination = video.temp_dir().join("intro_cand1.jpg");

        let capture =
            FfmpegFrameCapture::new("definitely-not-a-real-ffmpeg", 2, Duration::from_secs(5));
        let ok = capture.extract(&video, &Timecode::parse("00:00:30").unwrap(), &destination);

        assert!(!ok);
        assert!(!destination.exists());
        assert!(video.temp_dir().is_dir(), "暫存資料夾應已建立");
    }

    #[cfg(unix)]
    #[test]
    fn test_stale_file_is_not_mistaken_for_success() {
        let temp_dir = TempDir::new().unwrap();
        let video = asset(&temp_dir);
        let destination = video.temp_dir().join("intro_cand1.jpg");
        fs::create_dir_all(video.temp_dir()).unwrap();
        fs::write(&destination, b"stale").unwrap();

        // `true` 成功結束但不會寫出任何檔案
        let capture = FfmpegFrameCapture::new("true", 2, Duration::from_secs(5));
        let ok = capture.extract(&video, &Timecode::parse("00:00:30").unwrap(), &destination);

        assert!(!ok);
        assert!(!destination.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_yields_no_candidate() {
        let temp_dir = TempDir::new().unwrap();
        let video = asset(&temp_dir);
        let destination = video.temp_dir().join("intro_cand2.jpg");

        let capture = FfmpegFrameCapture::new("false", 2, Duration::from_secs(5));
        assert!(!capture.extract(&video, &Timecode::parse("00:10:05").unwrap(), &destination));
        assert!(!destination.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_with_timeout_kills_hung_process() {
        let child = Command::new("sleep").arg("10").spawn().unwrap();
        let started = Instant::now();

        let status = wait_with_timeout(child, Duration::from_millis(200)).unwrap();

        assert!(status.is_none());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_with_timeout_returns_status() {
        let child = Command::new("true").spawn().unwrap();
        let status = wait_with_timeout(child, Duration::from_secs(5)).unwrap();
        assert!(status.is_some_and(|s| s.success()));
    }

    #[test]
    fn test_remove_if_exists_ignores_missing() {
        let temp_dir = TempDir::new().unwrap();
        assert!(remove_if_exists(&temp_dir.path().join("missing.jpg")).is_ok());
    }
}
