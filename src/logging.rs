use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Plain append-only file logger. The UI has no console to speak of,
/// so diagnostics (fallback substitutions, rejected intents) land in
/// the platform data dir instead.
#[derive(Debug)]
struct FileLogger {
    log_file: PathBuf,
}

static LOGGER: OnceCell<FileLogger> = OnceCell::new();

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let entry = format!("{} - {}\n", record.level(), record.args());
            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.log_file)
            {
                let _ = file.write_all(entry.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

pub fn init() -> Result<(), SetLoggerError> {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("founder_simulator");
    let _ = create_dir_all(&dir);

    let logger = LOGGER.get_or_init(|| FileLogger {
        log_file: dir.join("log.txt"),
    });

    log::set_logger(logger).map(|()| log::set_max_level(LevelFilter::Debug))
}
