use crate::utils::config::Config;
use chrono::Local;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::{self, File};
use std::io::Write;
use std::process;

pub fn level_filter(level: &str) -> LevelFilter {
    match level {
        level if level.eq_ignore_ascii_case("error") => LevelFilter::Error,
        level if level.eq_ignore_ascii_case("warn") => LevelFilter::Warn,
        level if level.eq_ignore_ascii_case("info") => LevelFilter::Info,
        level if level.eq_ignore_ascii_case("debug") => LevelFilter::Debug,
        level if level.eq_ignore_ascii_case("trace") => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

fn open_log_file(config: &Config) -> std::io::Result<File> {
    fs::create_dir_all(&config.logger_dir)?;
    let date = Local::now().format("%Y-%m-%d");
    File::options()
        .create(true)
        .append(true)
        .open(config.logger_dir.join(format!("{}_{}.log", config.name, date)))
}

/// Sends log records to a daily file in the log directory, or to stderr when that
/// file cannot be opened. Nothing is installed while logging is off.
pub fn init_logger(config: &Config) {
    let level = level_filter(&config.logger_level);
    if level == LevelFilter::Off {
        return;
    }

    let (target, fallback) = match open_log_file(config) {
        Ok(file) => (Target::Pipe(Box::new(file)), None),
        Err(e) => (Target::Stderr, Some(e)),
    };

    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[PID:{}][{}] {} - {}",
                process::id(),
                record.level(),
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.args()
            )
        })
        .target(target)
        .filter(Some(config.name.as_str()), level)
        .filter(None, LevelFilter::Warn)
        .init();

    if let Some(e) = fallback {
        log::warn!("无法创建日志文件 {}: {}", config.logger_dir.display(), e);
    }
    log::debug!("日志级别设置为: {}", level);
}
