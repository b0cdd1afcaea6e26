use log::LevelFilter;
use simplelog::*;
use std::fs::File;
use std::path::PathBuf;

/// Logging configuration for feedcard
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Master switch to enable/disable all logging
    pub enabled: bool,
    /// Path to the log file
    pub log_file: PathBuf,
    /// Whether to clear the log file on startup
    pub clear_on_startup: bool,
    /// Feature flags for specific logging categories
    pub features: LogFeatures,
    /// Overall log level
    pub level: LevelFilter,
}

/// Feature flags for specific logging categories
#[derive(Debug, Clone)]
pub struct LogFeatures {
    /// Log like toggles and their reconciliation
    pub likes: bool,
    /// Log comment submissions
    pub comments: bool,
    /// Log delete confirmation transitions
    pub deletes: bool,
    /// Log share confirmations
    pub shares: bool,
    /// Log API calls
    pub api_calls: bool,
    /// Log general debug messages
    pub general: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: PathBuf::from("feedcard_debug.log"),
            clear_on_startup: true,
            features: LogFeatures::default(),
            level: LevelFilter::Debug,
        }
    }
}

impl Default for LogFeatures {
    fn default() -> Self {
        Self::all(true)
    }
}

impl LogFeatures {
    fn all(on: bool) -> Self {
        Self {
            likes: on,
            comments: on,
            deletes: on,
            shares: on,
            api_calls: on,
            general: on,
        }
    }
}

impl LogConfig {
    /// Create a new log configuration with all features disabled
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Create a minimal log configuration (only errors and warnings)
    pub fn minimal() -> Self {
        Self {
            enabled: true,
            level: LevelFilter::Warn,
            features: LogFeatures::all(false),
            ..Default::default()
        }
    }

    /// Create a verbose log configuration (all features enabled)
    pub fn verbose() -> Self {
        Self {
            enabled: true,
            level: LevelFilter::Trace,
            features: LogFeatures::all(true),
            ..Default::default()
        }
    }
}

/// Initialize the logging system with the given configuration
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    if !config.enabled {
        let _ = WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink());
        return Ok(());
    }

    if config.clear_on_startup {
        let _ = File::create(&config.log_file)?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|builder| builder)
        .build();

    WriteLogger::init(config.level, log_config, log_file)?;

    log::info!(
        "Logging initialized: file={}, level={:?}",
        config.log_file.display(),
        config.level
    );
    log::debug!("Log features: {:?}", config.features);

    Ok(())
}

/// Macro for logging like toggles
#[macro_export]
macro_rules! log_like {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled && $config.features.likes {
            log::debug!(target: "likes", $($arg)*);
        }
    };
}

/// Macro for logging comment submissions
#[macro_export]
macro_rules! log_comment {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled && $config.features.comments {
            log::debug!(target: "comments", $($arg)*);
        }
    };
}

/// Macro for logging delete confirmation transitions
#[macro_export]
macro_rules! log_delete {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled && $config.features.deletes {
            log::debug!(target: "deletes", $($arg)*);
        }
    };
}

/// Macro for logging share confirmations
#[macro_export]
macro_rules! log_share {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled && $config.features.shares {
            log::debug!(target: "shares", $($arg)*);
        }
    };
}

/// Macro for logging API calls
#[macro_export]
macro_rules! log_api_call {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled && $config.features.api_calls {
            log::debug!(target: "api_calls", $($arg)*);
        }
    };
}

/// Macro for general debug logging
#[macro_export]
macro_rules! log_debug {
    ($config:expr, $($arg:tt)*) => {
        if $config.enabled && $config.features.general {
            log::debug!(target: "general", $($arg)*);
        }
    };
}
