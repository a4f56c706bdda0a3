pub mod load;
pub mod types;

pub use load::SETTINGS_FILE;
pub use types::{
    Config, DEFAULT_CAPTURE_TIMEOUT_SECS, DEFAULT_QUALITY, DEFAULT_ROOT_DIR, DEFAULT_TIMECODES,
    Timecode, TimecodeError, default_timecodes,
};
