use std::sync::OnceLock;

use regex::Regex;

/// Inclusive span of new-file line numbers treated as changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangedRange {
    pub from: u32,
    pub to: u32,
}

impl ChangedRange {
    pub fn contains(&self, line: u32) -> bool {
        self.from <= line && line <= self.to
    }
}

/// Structured parse of a `@@ -<old>[,<len>] +<start>[,<len>] @@` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkHeader {
    pub new_start: u32,
    /// Absent when the hunk omits the length (a one-line hunk).
    pub new_len: Option<u32>,
}

impl HunkHeader {
    /// End of this hunk's new-line span: `new_start + new_len`, or just
    /// `new_start` when the length is omitted.
    pub fn new_end(&self) -> u32 {
        self.new_len.map_or(self.new_start, |len| self.new_start + len)
    }
}

fn hunk_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^@@ -\d+(?:,\d+)? \+(\d+)(?:,(\d+))? @@").unwrap())
}

/// Parse one diff line as a hunk header. Lines that do not match (including
/// almost-headers with garbage counts) yield `None` and are treated as
/// ordinary content by the scanner.
pub fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    let caps = hunk_header_re().captures(line)?;
    let new_start = caps[1].parse().ok()?;
    let new_len = match caps.get(2) {
        Some(m) => Some(m.as_str().parse().ok()?),
        None => None,
    };
    Some(HunkHeader { new_start, new_len })
}

/// Resolve the changed new-file line range for `path` within a unified diff.
///
/// Returns `None` when the diff has no `+++ b/<path>` boundary for the file.
/// Once the boundary is found the scan walks the file's section, stopping at
/// the next `diff --git` boundary, and returns the span of the first hunk
/// header it sees. A section without any hunk header yields a degenerate
/// single-point range keyed off the raw line-count cursor.
pub fn changed_range(diff: &str, path: &str) -> Option<ChangedRange> {
    let marker = format!("+++ b/{path}");
    let mut lines = diff.lines();
    lines.find(|&line| line == marker)?;

    // Zero-based count of diff lines seen since the file boundary; the
    // fallback range when the section has no hunk header.
    let mut position: u32 = 0;

    for line in lines {
        if line.starts_with("diff --git a/") {
            break;
        }
        if line == "\\ No newline at end of file" {
            position += 1;
            continue;
        }
        if let Some(hunk) = parse_hunk_header(line) {
            return Some(ChangedRange {
                from: hunk.new_start,
                to: hunk.new_end(),
            });
        }
        position += 1;
    }

    Some(ChangedRange {
        from: position,
        to: position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_FILE_DIFF: &str = "\
diff --git a/src/A.java b/src/A.java
index 83db48f..bf269f4 100644
--- a/src/A.java
+++ b/src/A.java
@@ -140,5 +140,8 @@ public class A {
 context
-removed
+added one
+added two
+added three
 context
";

    #[test]
    fn test_hunk_header_with_lengths() {
        let hunk = parse_hunk_header("@@ -140,5 +140,8 @@ public class A {").unwrap();
        assert_eq!(hunk.new_start, 140);
        assert_eq!(hunk.new_len, Some(8));
        assert_eq!(hunk.new_end(), 148);
    }

    #[test]
    fn test_hunk_header_without_lengths() {
        let hunk = parse_hunk_header("@@ -10 +12 @@").unwrap();
        assert_eq!(hunk.new_start, 12);
        assert_eq!(hunk.new_len, None);
        assert_eq!(hunk.new_end(), 12);
    }

    #[test]
    fn test_hunk_header_mixed_lengths() {
        let hunk = parse_hunk_header("@@ -3,2 +4 @@").unwrap();
        assert_eq!(hunk.new_start, 4);
        assert_eq!(hunk.new_len, None);
    }

    #[test]
    fn test_hunk_header_rejects_garbage() {
        assert_eq!(parse_hunk_header("@@ invalid @@"), None);
        assert_eq!(parse_hunk_header("@@ -a,b +c,d @@"), None);
        assert_eq!(parse_hunk_header(" @@ -1,2 +3,4 @@"), None);
        assert_eq!(parse_hunk_header("context line"), None);
    }

    #[test]
    fn test_changed_range_single_hunk() {
        let range = changed_range(SINGLE_FILE_DIFF, "src/A.java").unwrap();
        assert_eq!(range, ChangedRange { from: 140, to: 148 });
        assert!(range.contains(140));
        assert!(range.contains(144));
        assert!(range.contains(148));
        assert!(!range.contains(139));
        assert!(!range.contains(296));
    }

    #[test]
    fn test_changed_range_idempotent() {
        let first = changed_range(SINGLE_FILE_DIFF, "src/A.java");
        let second = changed_range(SINGLE_FILE_DIFF, "src/A.java");
        assert_eq!(first, second);
    }

    #[test]
    fn test_changed_range_file_not_in_diff() {
        assert_eq!(changed_range(SINGLE_FILE_DIFF, "src/B.java"), None);
    }

    #[test]
    fn test_changed_range_requires_exact_path() {
        // `src/A.java` must not match the section for `src/A.java.bak`.
        let diff = "\
--- a/src/A.java.bak
+++ b/src/A.java.bak
@@ -1,2 +1,3 @@
 x
+y
 z
";
        assert_eq!(changed_range(diff, "src/A.java"), None);
    }

    #[test]
    fn test_changed_range_first_hunk_wins() {
        let diff = "\
--- a/src/A.java
+++ b/src/A.java
@@ -10,3 +10,4 @@
 a
+b
 c
 d
@@ -50,2 +51,6 @@
+e
+f
+g
+h
 i
";
        let range = changed_range(diff, "src/A.java").unwrap();
        assert_eq!(range, ChangedRange { from: 10, to: 14 });
    }

    #[test]
    fn test_changed_range_second_file_in_multi_file_diff() {
        let diff = "\
diff --git a/src/A.java b/src/A.java
--- a/src/A.java
+++ b/src/A.java
@@ -1,2 +1,3 @@
 a
+b
 c
diff --git a/src/B.java b/src/B.java
--- a/src/B.java
+++ b/src/B.java
@@ -20,4 +20,5 @@
 d
+e
 f
 g
 h
";
        let range = changed_range(diff, "src/B.java").unwrap();
        assert_eq!(range, ChangedRange { from: 20, to: 25 });
    }

    #[test]
    fn test_changed_range_stops_at_next_file_boundary() {
        // A's section has no hunk header; B's hunks must not leak into it.
        let diff = "\
diff --git a/src/A.java b/src/A.java
--- a/src/A.java
+++ b/src/A.java
diff --git a/src/B.java b/src/B.java
--- a/src/B.java
+++ b/src/B.java
@@ -20,4 +20,5 @@
 d
+e
";
        let range = changed_range(diff, "src/A.java").unwrap();
        assert_eq!(range, ChangedRange { from: 0, to: 0 });
    }

    #[test]
    fn test_changed_range_no_hunk_degenerate() {
        let diff = "\
+++ b/image.png
Binary files a/image.png and b/image.png differ
";
        let range = changed_range(diff, "image.png").unwrap();
        assert_eq!(range, ChangedRange { from: 1, to: 1 });
    }

    #[test]
    fn test_changed_range_no_newline_marker_counts() {
        // The marker line increments the cursor but is otherwise skipped.
        let diff = "\
+++ b/notes.txt
\\ No newline at end of file
other
";
        let range = changed_range(diff, "notes.txt").unwrap();
        assert_eq!(range, ChangedRange { from: 2, to: 2 });
    }

    #[test]
    fn test_changed_range_no_newline_marker_inside_hunk() {
        let diff = "\
--- a/notes.txt
+++ b/notes.txt
@@ -1,2 +1,2 @@
 keep
-old
+new
\\ No newline at end of file
";
        let range = changed_range(diff, "notes.txt").unwrap();
        assert_eq!(range, ChangedRange { from: 1, to: 3 });
    }

    #[test]
    fn test_changed_range_malformed_header_skipped() {
        // The broken header is treated as content; the valid one after it wins.
        let diff = "\
--- a/src/A.java
+++ b/src/A.java
@@ -x,y +z @@
@@ -7,2 +7,4 @@
 a
+b
+c
 d
";
        let range = changed_range(diff, "src/A.java").unwrap();
        assert_eq!(range, ChangedRange { from: 7, to: 11 });
    }

    #[test]
    fn test_changed_range_empty_section() {
        let range = changed_range("+++ b/empty.txt\n", "empty.txt").unwrap();
        assert_eq!(range, ChangedRange { from: 0, to: 0 });
    }
}
