use log::LevelFilter;
use log4rs::{
    Config, Handle,
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            RollingFileAppender,
            policy::compound::{
                CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
            },
        },
    },
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};
use thiserror::Error;

use crate::config::{LogConfig, LogFileConfig};

const LOG_SIZE_LIMIT: u64 = 10 * 1024 * 1024; // 10 MB

const LOG_FILE_COUNT: u32 = 3;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log archive pattern: {0}")]
    Roller(String),
    #[error("failed to open log file: {0}")]
    File(#[from] std::io::Error),
    #[error("invalid logger configuration: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("logger already initialized: {0}")]
    AlreadySet(#[from] log::SetLoggerError),
}

fn file_appender(file: &LogFileConfig) -> Result<Appender, LoggerError> {
    let trigger = SizeTrigger::new(LOG_SIZE_LIMIT);
    let roller = FixedWindowRoller::builder()
        .build(&file.archive_pattern, LOG_FILE_COUNT)
        .map_err(|e| LoggerError::Roller(e.to_string()))?;
    let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));

    let logfile = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d} {l} {t} - {m}{n}")))
        .build(&file.path, Box::new(policy))?;

    Ok(Appender::builder()
        .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
        .build("logfile", Box::new(logfile)))
}

pub fn init_logger(config: &LogConfig) -> Result<Handle, LoggerError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}{n}")))
        .build();

    let mut builder = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(LevelFilter::Info)))
            .build("stderr", Box::new(stderr)),
    );
    let mut root = Root::builder().appender("stderr");

    if let Some(file) = &config.file {
        builder = builder.appender(file_appender(file)?);
        root = root.appender("logfile");
    }

    let config = builder.build(root.build(LevelFilter::Debug))?;
    Ok(log4rs::init_config(config)?)
}
