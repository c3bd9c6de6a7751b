use std::path::PathBuf;

use clap::Parser;

/// patchlint — surface static-analysis findings relevant to the current patch
#[derive(Parser, Debug, Clone)]
#[command(name = "patchlint", version, about)]
pub struct Cli {
    /// Path to the checkstyle XML report
    pub report: PathBuf,

    /// Minimum severity to report, inclusive (ignore, info, warning, error)
    #[arg(long)]
    pub min_severity: Option<String>,

    /// Level emitted comments are reported at (message, warn, error)
    #[arg(long)]
    pub report_level: Option<String>,

    /// Emit one formatted summary line per finding instead of inline comments
    #[arg(long)]
    pub summary: bool,

    /// Report findings in all files, not only files changed in the patch
    #[arg(long)]
    pub all_files: bool,

    /// Report findings on all lines, not only lines changed in the patch
    #[arg(long)]
    pub all_lines: bool,

    /// Project root used to relativize report paths (default: git top-level)
    #[arg(long)]
    pub root: Option<String>,

    /// Output format (console, json)
    #[arg(long)]
    pub format: Option<String>,

    /// Path to config file
    #[arg(long)]
    pub config: Option<String>,
}
