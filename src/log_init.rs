use log::{LevelFilter, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Environment variable naming a log file when `--log-file` is not given.
pub const LOG_FILE_ENV: &str = "STYLED_MARKUP_LOG";

struct FileLogger {
    file_path: PathBuf,
    level: LevelFilter,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)
            {
                let _ = writeln!(
                    file,
                    "[{}] {}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {}
}

/// Appends log records up to `level` to the file at `path`.
///
/// Fails if the file cannot be opened or a logger is already installed.
pub fn init_logger(path: impl AsRef<Path>, level: LevelFilter) -> Result<()> {
    let file_path = path.as_ref().to_path_buf();
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&file_path)?;

    log::set_boxed_logger(Box::new(FileLogger { file_path, level }))?;
    log::set_max_level(level);
    Ok(())
}
