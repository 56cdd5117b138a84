// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
use csv::Writer;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::path::Path;
use strum_macros::{Display, EnumString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("cannot open log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot write csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Verbosity accepted on the command line and in session files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Off => LevelFilter::Off,
        }
    }
}

/// Terminal logger on stderr plus, when `log_file` is given, a copy of every record in
/// that file. A second call keeps the logger installed by the first one.
pub fn init_logger(level: LogLevel, log_file: Option<&Path>) -> Result<(), LoggerError> {
    if level == LogLevel::Off {
        return Ok(());
    }
    let filter = level.level_filter();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        filter,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        let file = File::create(path)?;
        loggers.push(WriteLogger::new(filter, Config::default(), file));
    }
    match CombinedLogger::init(loggers) {
        Ok(()) => log::info!("logging started with level {}", level),
        Err(_) => log::debug!("logger already initialised, keeping it"),
    }
    Ok(())
}

/// Writes `headers` and then every row of `rows` into a csv file.
pub fn save_table_to_csv(
    headers: &[&str],
    rows: &[Vec<String>],
    filename: &Path,
) -> Result<(), LoggerError> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    log::info!("{} rows saved to {}", rows.len(), filename.display());
    Ok(())
}
