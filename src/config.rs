use std::path::Path;

use serde::Deserialize;

use crate::cli::Cli;
use crate::dispatch::DispatchOptions;
use crate::error::{Error, Result};
use crate::severity::Severity;
use crate::sink::ReportLevel;

/// Comment output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format: {other} (expected: console, json)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub min_severity: Option<String>,
    pub report_level: Option<String>,
    pub inline_comment: Option<bool>,
    pub modified_files_only: Option<bool>,
    pub changed_lines_only: Option<bool>,
    pub root_path: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub min_severity: Severity,
    pub report_level: ReportLevel,
    pub inline_comment: bool,
    pub modified_files_only: bool,
    pub changed_lines_only: bool,
    pub root_path: Option<String>,
    pub format: OutputFormat,
}

impl Config {
    /// Load the optional config file and merge CLI overrides. All label
    /// validation happens here, before any report parsing begins.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => {
                let config_path = Path::new(path);
                if !config_path.exists() {
                    return Err(Error::ConfigNotFound(config_path.to_path_buf()));
                }
                let content = std::fs::read_to_string(config_path)?;
                parse_config(&content)?
            }
            None => ConfigFile::default(),
        };

        merge(file_config, cli)
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConfigFile) -> Result<()> {
    if let Some(ref severity) = config.min_severity {
        severity
            .parse::<Severity>()
            .map_err(Error::ConfigValidation)?;
    }
    if let Some(ref level) = config.report_level {
        level
            .parse::<ReportLevel>()
            .map_err(Error::ConfigValidation)?;
    }
    if let Some(ref format) = config.format {
        format
            .parse::<OutputFormat>()
            .map_err(Error::ConfigValidation)?;
    }
    Ok(())
}

pub fn merge(file: ConfigFile, cli: &Cli) -> Result<Config> {
    let min_severity = cli
        .min_severity
        .clone()
        .or(file.min_severity)
        .map(|s| s.parse::<Severity>().map_err(Error::ConfigValidation))
        .transpose()?
        .unwrap_or(Severity::Error);

    let report_level = cli
        .report_level
        .clone()
        .or(file.report_level)
        .map(|s| s.parse::<ReportLevel>().map_err(Error::ConfigValidation))
        .transpose()?
        .unwrap_or(ReportLevel::Error);

    let format = cli
        .format
        .clone()
        .or(file.format)
        .map(|s| s.parse::<OutputFormat>().map_err(Error::ConfigValidation))
        .transpose()?
        .unwrap_or(OutputFormat::Console);

    Ok(Config {
        min_severity,
        report_level,
        inline_comment: if cli.summary {
            false
        } else {
            file.inline_comment.unwrap_or(true)
        },
        modified_files_only: if cli.all_files {
            false
        } else {
            file.modified_files_only.unwrap_or(true)
        },
        changed_lines_only: if cli.all_lines {
            false
        } else {
            file.changed_lines_only.unwrap_or(true)
        },
        root_path: cli.root.clone().or(file.root_path),
        format,
    })
}

impl From<&Config> for DispatchOptions {
    fn from(config: &Config) -> Self {
        Self {
            min_severity: config.min_severity,
            report_level: config.report_level,
            inline_comment: config.inline_comment,
            modified_files_only: config.modified_files_only,
            changed_lines_only: config.changed_lines_only,
            root_path: config.root_path.clone(),
        }
    }
}
