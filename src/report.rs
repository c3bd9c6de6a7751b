use std::path::Path;

use roxmltree::{Document, Node};

use crate::error::{Error, Result};
use crate::severity::Severity;

/// One issue reported by the static-analysis tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub line: u32,
    /// Column is optional; whether it is present depends on the detector.
    pub column: Option<u32>,
    pub severity: Severity,
    /// Message text with XML entities already decoded.
    pub message: String,
    /// Name of the detector that produced this finding.
    pub source: String,
}

/// All findings for a single file in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path exactly as it appears in the report.
    pub path: String,
    /// Path relative to the repository root (equal to `path` when it was not absolute).
    pub relative_path: String,
    pub findings: Vec<Finding>,
}

/// Parse a whole checkstyle document into per-file reports.
///
/// Files with zero findings are retained; dropping them is a dispatch-time
/// policy, not a parse-time one.
pub fn parse_report(xml: &str, prefix: &str) -> Result<Vec<FileReport>> {
    let doc =
        Document::parse(xml).map_err(|e| Error::ReportParse(format!("invalid report xml: {e}")))?;
    let root = doc.root_element();
    if root.tag_name().name() != "checkstyle" {
        return Err(Error::MalformedReport {
            expected: "checkstyle".to_string(),
            found: root.tag_name().name().to_string(),
        });
    }

    root.children()
        .filter(Node::is_element)
        .map(|node| parse_file(node, prefix))
        .collect()
}

/// Parse one `<file>` element and its nested findings.
pub fn parse_file(node: Node, prefix: &str) -> Result<FileReport> {
    let tag = node.tag_name().name();
    if tag != "file" {
        return Err(Error::MalformedReport {
            expected: "file".to_string(),
            found: tag.to_string(),
        });
    }

    let path = node
        .attribute("name")
        .ok_or_else(|| Error::ReportParse("<file> node missing 'name' attribute".to_string()))?;
    let relative_path = relative_path(path, prefix)?;

    let findings = node
        .children()
        .filter(Node::is_element)
        .map(parse_finding)
        .collect::<Result<Vec<_>>>()?;

    Ok(FileReport {
        path: path.to_string(),
        relative_path,
        findings,
    })
}

/// Parse one `<error>` element into a `Finding`.
pub fn parse_finding(node: Node) -> Result<Finding> {
    let tag = node.tag_name().name();
    if tag != "error" {
        return Err(Error::MalformedReport {
            expected: "error".to_string(),
            found: tag.to_string(),
        });
    }

    let line = required_attribute(node, "line")?
        .parse::<u32>()
        .map_err(|e| Error::ReportParse(format!("invalid line attribute: {e}")))?;

    // Absence must be preserved, never defaulted to zero.
    let column = node
        .attribute("column")
        .map(|c| {
            c.parse::<u32>()
                .map_err(|e| Error::ReportParse(format!("invalid column attribute: {e}")))
        })
        .transpose()?;

    let severity = required_attribute(node, "severity")?
        .parse::<Severity>()
        .map_err(Error::ReportParse)?;

    // roxmltree decodes entities in attribute values, so `&apos;` etc. arrive
    // already unescaped.
    let message = required_attribute(node, "message")?.to_string();
    let source = required_attribute(node, "source")?.to_string();

    Ok(Finding {
        line,
        column,
        severity,
        message,
        source,
    })
}

fn required_attribute<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name)
        .ok_or_else(|| Error::ReportParse(format!("<error> node missing '{name}' attribute")))
}

/// Strip the repository-root `prefix` from an absolute `path`.
///
/// The prefix is normalized to end with exactly one separator. Non-absolute
/// paths are returned verbatim; absolute paths that do not start with the
/// prefix are an error.
pub fn relative_path(path: &str, prefix: &str) -> Result<String> {
    if !Path::new(path).is_absolute() {
        return Ok(path.to_string());
    }

    let normalized = format!("{}/", prefix.trim_end_matches('/'));
    match path.strip_prefix(&normalized) {
        Some(rest) => Ok(rest.to_string()),
        None => Err(Error::PrefixMismatch {
            path: path.to_string(),
            prefix: normalized,
        }),
    }
}
