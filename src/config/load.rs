use crate::config::types::Config;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// 工作目錄下的選用設定檔
pub const SETTINGS_FILE: &str = "thumbs_settings.json";

impl Config {
    /// 讀取 `thumbs_settings.json`，不存在時使用預設值
    pub fn new() -> Result<Self> {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content).context("設定檔格式錯誤")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timecodes.is_empty() {
            bail!("timecodes 不可為空");
        }
        if !(1..=31).contains(&self.quality) {
            bail!("quality 必須介於 1 到 31 之間: {}", self.quality);
        }
        if self.video_extensions.is_empty() {
            bail!("video_extensions 不可為空");
        }
        if self.capture_timeout_secs == 0 {
            bail!("capture_timeout_secs 必須大於 0");
        }
        if self.ffmpeg_binary.trim().is_empty() {
            bail!("ffmpeg_binary 不可為空");
        }
        Ok(())
    }
}
