use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// 預設媒體根目錄
pub const DEFAULT_ROOT_DIR: &str = "public/media";

/// 預設候選時間點（每支影片都套用同一組）
pub const DEFAULT_TIMECODES: [&str; 3] = ["00:00:30", "00:10:05", "00:20:10"];

/// ffmpeg `-q:v` 預設值（1-31，數字越小品質越高）
pub const DEFAULT_QUALITY: u8 = 2;

/// 單次擷取的逾時秒數
pub const DEFAULT_CAPTURE_TIMEOUT_SECS: u64 = 60;

static REGEX_TIMECODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2,}):([0-5]\d):([0-5]\d)$").expect("Invalid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("無效的時間碼 '{0}'，格式應為 HH:MM:SS")]
pub struct TimecodeError(pub String);

/// 已驗證的 `HH:MM:SS` 時間碼
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timecode(String);

impl Timecode {
    pub fn parse(value: &str) -> Result<Self, TimecodeError> {
        let trimmed = value.trim();
        if REGEX_TIMECODE.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(TimecodeError(value.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Timecode {
    type Error = TimecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timecode> for String {
    fn from(value: Timecode) -> Self {
        value.0
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[must_use]
pub fn default_timecodes() -> Vec<Timecode> {
    DEFAULT_TIMECODES
        .iter()
        .map(|t| Timecode(t.to_string()))
        .collect()
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ROOT_DIR)
}

const fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

fn default_video_extensions() -> Vec<String> {
    vec!["mp4".to_string()]
}

const fn default_capture_timeout_secs() -> u64 {
    DEFAULT_CAPTURE_TIMEOUT_SECS
}

fn default_ffmpeg_binary() -> String {
    "ffmpeg".to_string()
}

/// 縮圖產生設定
///
/// 未知的鍵視為錯誤，拼錯的設定不會被默默忽略。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,
    #[serde(default = "default_timecodes")]
    pub timecodes: Vec<Timecode>,
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// 影片副檔名（不分大小寫，前導點可省略）
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,
    #[serde(default = "default_capture_timeout_secs")]
    pub capture_timeout_secs: u64,
    #[serde(default = "default_ffmpeg_binary")]
    pub ffmpeg_binary: String,
    /// 只處理指定科目
    #[serde(default)]
    pub subject: Option<String>,
    /// 只處理指定課程
    #[serde(default)]
    pub course: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            timecodes: default_timecodes(),
            quality: default_quality(),
            video_extensions: default_video_extensions(),
            capture_timeout_secs: default_capture_timeout_secs(),
            ffmpeg_binary: default_ffmpeg_binary(),
            subject: None,
            course: None,
        }
    }
}

impl Config {
    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.video_extensions
                    .iter()
                    .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timecode_parse_valid() {
        let tc = Timecode::parse("00:10:05").unwrap();
        assert_eq!(tc.as_str(), "00:10:05");
        assert_eq!(Timecode::parse(" 01:00:00 ").unwrap().as_str(), "01:00:00");
    }

    #[test]
    fn test_timecode_parse_rejects_malformed() {
        assert!(Timecode::parse("00:0020:10").is_err());
        assert!(Timecode::parse("0:00:30").is_err());
        assert!(Timecode::parse("00:60:00").is_err());
        assert!(Timecode::parse("00:00").is_err());
        assert!(Timecode::parse("").is_err());
    }

    #[test]
    fn test_default_timecodes_are_valid() {
        for tc in default_timecodes() {
            assert!(Timecode::parse(tc.as_str()).is_ok());
        }
        assert_eq!(default_timecodes().len(), 3);
    }

    #[test]
    fn test_is_video_file() {
        let config = Config {
            video_extensions: vec![".mp4".to_string(), "mkv".to_string()],
            ..Config::default()
        };
        assert!(config.is_video_file(Path::new("/a/intro.mp4")));
        assert!(config.is_video_file(Path::new("/a/intro.MKV")));
        assert!(!config.is_video_file(Path::new("/a/notes.txt")));
        assert!(!config.is_video_file(Path::new("/a/mp4")));
    }
}
