use crate::config::Timecode;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 單張畫面擷取指令
pub struct FfmpegCommand {
    binary: String,
    source_path: PathBuf,
    timecode: Timecode,
    quality: u8,
    destination_path: PathBuf,
}

impl FfmpegCommand {
    #[must_use]
    pub fn frame_capture(
        binary: &str,
        source_path: &Path,
        timecode: &Timecode,
        quality: u8,
        destination_path: &Path,
    ) -> Self {
        Self {
            binary: binary.to_string(),
            source_path: source_path.to_path_buf(),
            timecode: timecode.clone(),
            quality,
            destination_path: destination_path.to_path_buf(),
        }
    }

    /// 路徑以 `OsString` 原樣傳遞，非 UTF-8 檔名也不會失真
    #[must_use]
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-loglevel".into(),
            "error".into(),
            "-y".into(),
            "-ss".into(),
            self.timecode.as_str().into(),
            "-i".into(),
            self.source_path.clone().into_os_string(),
            "-frames:v".into(),
            "1".into(),
            "-an".into(),
            "-sn".into(),
            "-dn".into(),
            "-q:v".into(),
            self.quality.to_string().into(),
            self.destination_path.clone().into_os_string(),
        ]
    }

    /// 建立指令，stdout/stderr 一律丟棄
    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FfmpegCommand {
        FfmpegCommand::frame_capture(
            "ffmpeg",
            Path::new("/media/algebra/lesson1/video/intro.mp4"),
            &Timecode::parse("00:10:05").unwrap(),
            2,
            Path::new("/media/algebra/lesson1/_thumbs_tmp/intro_cand2.jpg"),
        )
    }

    #[test]
    fn test_frame_capture_args() {
        let args = sample().args();

        let ss = args.iter().position(|a| a == "-ss").unwrap();
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[ss + 1], "00:10:05");
        assert!(ss < input, "-ss 應在 -i 之前以快速跳轉");
        assert_eq!(args[input + 1], "/media/algebra/lesson1/video/intro.mp4");

        let frames = args.iter().position(|a| a == "-frames:v").unwrap();
        assert_eq!(args[frames + 1], "1");
        let quality = args.iter().position(|a| a == "-q:v").unwrap();
        assert_eq!(args[quality + 1], "2");

        assert!(args.iter().any(|a| a == "-y"));
        assert_eq!(
            args.last().unwrap(),
            "/media/algebra/lesson1/_thumbs_tmp/intro_cand2.jpg"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_paths_passed_verbatim() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let course = Path::new("/media/algebra").join(OsStr::from_bytes(b"lesson\xff"));
        let source = course.join("video/intro.mp4");
        let destination = course.join("_thumbs_tmp/intro_cand1.jpg");
        let cmd = FfmpegCommand::frame_capture(
            "ffmpeg",
            &source,
            &Timecode::parse("00:00:30").unwrap(),
            2,
            &destination,
        );

        let args = cmd.args();
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[input + 1], source.as_os_str());
        assert_eq!(args.last().unwrap(), destination.as_os_str());
    }

    #[test]
    fn test_build_command_program() {
        let cmd = sample().build_command();
        assert_eq!(cmd.get_program(), "ffmpeg");
        assert_eq!(cmd.get_args().count(), sample().args().len());
    }
}
