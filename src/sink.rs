use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Level a surviving finding is reported at. Resolved once at configuration
/// time; dispatch never looks levels up by name per finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    Message,
    Warn,
    Error,
}

impl ReportLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportLevel::Message => "message",
            ReportLevel::Warn => "warn",
            ReportLevel::Error => "error",
        }
    }
}

impl fmt::Display for ReportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "message" => Ok(ReportLevel::Message),
            "warn" => Ok(ReportLevel::Warn),
            "error" => Ok(ReportLevel::Error),
            other => Err(format!(
                "unknown report level: {other} (expected: message, warn, error)"
            )),
        }
    }
}

/// Destination for reporting actions. One call per surviving finding, in
/// report order.
pub trait ReportSink {
    /// Inline placement: a message attached to a specific file and line.
    fn comment(&mut self, level: ReportLevel, message: &str, file: &str, line: u32) -> Result<()>;

    /// Summary placement: a single pre-formatted line.
    fn summary(&mut self, level: ReportLevel, text: &str) -> Result<()>;
}

/// Plain stdout sink.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for ConsoleSink {
    fn comment(&mut self, level: ReportLevel, message: &str, file: &str, line: u32) -> Result<()> {
        println!("[{level}] {file}:{line} {message}");
        Ok(())
    }

    fn summary(&mut self, level: ReportLevel, text: &str) -> Result<()> {
        println!("[{level}] {text}");
        Ok(())
    }
}

/// One emitted reporting action, as serialized by `JsonSink`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRecord {
    pub level: ReportLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Accumulates reporting actions and renders them as one JSON document.
#[derive(Debug, Default)]
pub struct JsonSink {
    entries: Vec<CommentRecord>,
}

impl JsonSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries)
            .map_err(|e| Error::Sink(format!("failed to serialize comments: {e}")))
    }
}

impl ReportSink for JsonSink {
    fn comment(&mut self, level: ReportLevel, message: &str, file: &str, line: u32) -> Result<()> {
        self.entries.push(CommentRecord {
            level,
            message: message.to_string(),
            file: Some(file.to_string()),
            line: Some(line),
        });
        Ok(())
    }

    fn summary(&mut self, level: ReportLevel, text: &str) -> Result<()> {
        self.entries.push(CommentRecord {
            level,
            message: text.to_string(),
            file: None,
            line: None,
        });
        Ok(())
    }
}

/// In-memory sink for tests; records every action in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub entries: Vec<CommentRecord>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for RecordingSink {
    fn comment(&mut self, level: ReportLevel, message: &str, file: &str, line: u32) -> Result<()> {
        self.entries.push(CommentRecord {
            level,
            message: message.to_string(),
            file: Some(file.to_string()),
            line: Some(line),
        });
        Ok(())
    }

    fn summary(&mut self, level: ReportLevel, text: &str) -> Result<()> {
        self.entries.push(CommentRecord {
            level,
            message: text.to_string(),
            file: None,
            line: None,
        });
        Ok(())
    }
}
