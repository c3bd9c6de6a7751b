use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    ConfigValidation(String),

    #[error("report file not found: {0}")]
    ReportNotFound(PathBuf),

    #[error("report parse error: {0}")]
    ReportParse(String),

    #[error("malformed report: expected <{expected}> node but found <{found}>")]
    MalformedReport { expected: String, found: String },

    #[error("path '{path}' does not start with repository root '{prefix}'")]
    PrefixMismatch { path: String, prefix: String },

    #[error("git error: {0}")]
    Git(String),

    #[error("sink error: {0}")]
    Sink(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
