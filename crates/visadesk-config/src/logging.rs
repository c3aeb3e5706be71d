use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Fallback filter directive when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
    /// Directory for daily-rolling JSON log files. Disabled when unset.
    pub log_dir: Option<String>,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT").map(|v| v.to_lowercase()) {
                Ok(v) if v == "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            log_dir: env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        }
    }
}
