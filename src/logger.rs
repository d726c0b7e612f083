use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::utils::current_timestamp;

static LOGGER: StderrLogger = StderrLogger;

/// `<时间> <级别> <target>: <消息>`，写到 stderr
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow(),
            Level::Info => "INFO ".green(),
            Level::Debug => "DEBUG".cyan(),
            Level::Trace => "TRACE".bright_black(),
        };
        eprintln!(
            "{} {} {}: {}",
            current_timestamp().bright_black(),
            level,
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

/// 进程启动时调用一次；重复调用只调整级别
pub fn init(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
