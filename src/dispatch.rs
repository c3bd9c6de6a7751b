use std::path::Path;

use tracing::{debug, info};

use crate::diff;
use crate::error::{Error, Result};
use crate::git::GitRepo;
use crate::report;
use crate::severity::{self, Severity};
use crate::sink::{ReportLevel, ReportSink};

/// Filtering policy for one reporting run.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Minimum severity to report, inclusive.
    pub min_severity: Severity,
    /// Level every surviving finding is emitted at.
    pub report_level: ReportLevel,
    /// Inline `(message, file, line)` placement vs one formatted summary line.
    pub inline_comment: bool,
    /// Keep only files changed in the current patch.
    pub modified_files_only: bool,
    /// Keep only findings on lines inside the patch's changed ranges.
    pub changed_lines_only: bool,
    /// Root prefix for relativizing report paths; the repository top-level
    /// when unset.
    pub root_path: Option<String>,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            min_severity: Severity::Error,
            report_level: ReportLevel::Error,
            inline_comment: true,
            modified_files_only: true,
            changed_lines_only: true,
            root_path: None,
        }
    }
}

/// Outcome of a reporting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Relative paths of files that survived the file-level filters with at
    /// least one finding, in report order.
    pub reported_files: Vec<String>,
    /// Number of comments emitted through the sink.
    pub comment_count: usize,
}

/// Ties the report model, the diff resolver, and the severity filter together
/// and emits one reporting action per surviving finding.
pub struct Dispatcher<'a> {
    repo: &'a GitRepo,
    options: DispatchOptions,
}

impl<'a> Dispatcher<'a> {
    pub fn new(repo: &'a GitRepo, options: DispatchOptions) -> Self {
        Self { repo, options }
    }

    /// Run the full pipeline for one report file.
    ///
    /// Fatal errors abort before any comment for the failing stage is
    /// emitted; a missing per-file diff is not an error and leaves the
    /// affected findings unrestricted.
    pub fn report(&self, report_path: &Path, sink: &mut dyn ReportSink) -> Result<ReportSummary> {
        if !report_path.exists() {
            return Err(Error::ReportNotFound(report_path.to_path_buf()));
        }

        let prefix = match &self.options.root_path {
            Some(root) => root.clone(),
            None => self.repo.top_level()?,
        };

        let xml = std::fs::read_to_string(report_path)?;
        let mut files = report::parse_report(&xml, &prefix)?;
        info!(files = files.len(), "parsed report");

        if self.options.modified_files_only {
            let changed = self.repo.changed_files()?;
            files.retain(|f| changed.contains(&f.relative_path));
            debug!(files = files.len(), "after changed-files filter");
        }
        files.retain(|f| !f.findings.is_empty());

        let reported_files: Vec<String> =
            files.iter().map(|f| f.relative_path.clone()).collect();

        let mut comment_count = 0;
        for file in &files {
            let range = if self.options.changed_lines_only {
                self.repo
                    .diff_for(&file.relative_path)?
                    .and_then(|diff_text| diff::changed_range(&diff_text, &file.relative_path))
            } else {
                None
            };

            for finding in &file.findings {
                if !severity::less_or_equal(Some(self.options.min_severity), Some(finding.severity))
                {
                    debug!(
                        file = %file.relative_path,
                        line = finding.line,
                        severity = %finding.severity,
                        "skipped below minimum severity"
                    );
                    continue;
                }

                // No diff or no resolvable range means we cannot restrict, so
                // the finding stays in.
                if self.options.changed_lines_only
                    && let Some(range) = range
                    && !range.contains(finding.line)
                {
                    debug!(
                        file = %file.relative_path,
                        line = finding.line,
                        "skipped outside changed range"
                    );
                    continue;
                }

                if self.options.inline_comment {
                    sink.comment(
                        self.options.report_level,
                        &finding.message,
                        &file.relative_path,
                        finding.line,
                    )?;
                } else {
                    sink.summary(
                        self.options.report_level,
                        &format!(
                            "{} : {} at {}",
                            file.relative_path, finding.message, finding.line
                        ),
                    )?;
                }
                comment_count += 1;
            }
        }

        info!(
            files = reported_files.len(),
            comments = comment_count,
            "report complete"
        );
        Ok(ReportSummary {
            reported_files,
            comment_count,
        })
    }
}
