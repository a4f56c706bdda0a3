mod ffmpeg_command;
mod path_validator;
mod video_scanner;

pub use ffmpeg_command::FfmpegCommand;
pub use path_validator::validate_directory_exists;
pub use video_scanner::{list_subdirectories, scan_video_files};
