//! Unified diff parser

use diffsense_domain::{ChangeUnit, Language};
use tracing::{debug, warn};

use crate::{
    error::{DiffError, Result},
    types::{FileDiff, FileStatus, IgnoreReason, IgnoredFile, ParsedDiff},
};

/// File extensions that always mark a file as binary
const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "ico", "pdf", "zip", "tar", "gz", "exe", "dll", "so", "dylib",
];

/// Size limits enforced before any parsing work starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffLimits {
    /// Maximum accepted diff size in bytes
    pub max_bytes: usize,
    /// Maximum accepted total line count
    pub max_lines: usize,
}

impl Default for DiffLimits {
    fn default() -> Self {
        Self {
            max_bytes: 1_048_576,
            max_lines: 20_000,
        }
    }
}

/// Parser for unified diff text
///
/// Stateless between calls; limits are fixed at construction so callers
/// never reach for process-wide configuration.
#[derive(Debug, Clone, Default)]
pub struct DiffParser {
    limits: DiffLimits,
}

impl DiffParser {
    /// Create a parser with the given size limits
    pub fn new(limits: DiffLimits) -> Self {
        Self { limits }
    }

    /// Parse a unified diff into reviewable files and an ignored-file report
    ///
    /// Fails with [`DiffError::TooLarge`] when the input exceeds the
    /// configured limits (checked up front, so an oversized diff is never
    /// tokenized) and with [`DiffError::Malformed`] when no file header can
    /// be found. Garbled hunks inside an otherwise valid diff are skipped
    /// with a warning. Output order follows input order, so identical input
    /// always yields identical output.
    pub fn parse(&self, raw_diff: &str) -> Result<ParsedDiff> {
        let bytes = raw_diff.len();
        if bytes > self.limits.max_bytes {
            // don't scan a huge input just to report its exact line count
            let lines = raw_diff.lines().take(self.limits.max_lines + 1).count();
            return Err(self.too_large(bytes, lines));
        }
        let lines = raw_diff.lines().count();
        if lines > self.limits.max_lines {
            return Err(self.too_large(bytes, lines));
        }

        let file_diffs = scan(raw_diff)?;
        debug!(files = file_diffs.len(), "parsed diff");
        Ok(partition(file_diffs))
    }

    fn too_large(&self, bytes: usize, lines: usize) -> DiffError {
        DiffError::TooLarge {
            bytes,
            lines,
            max_bytes: self.limits.max_bytes,
            max_lines: self.limits.max_lines,
        }
    }
}

/// One file being accumulated during the scan
struct FileBuilder {
    file_path: String,
    language: Option<Language>,
    status: FileStatus,
    additions: u32,
    deletions: u32,
    units: Vec<ChangeUnit>,
    raw_lines: Vec<String>,
    binary: bool,
}

impl FileBuilder {
    fn finish(self) -> FileBuilderOutput {
        FileBuilderOutput {
            diff: FileDiff {
                file_path: self.file_path,
                language: self.language,
                status: self.status,
                additions: self.additions,
                deletions: self.deletions,
                units: self.units,
                raw_diff: self.raw_lines.join("\n"),
            },
            binary: self.binary,
        }
    }
}

struct FileBuilderOutput {
    diff: FileDiff,
    binary: bool,
}

fn scan(raw_diff: &str) -> Result<Vec<FileBuilderOutput>> {
    let mut finished: Vec<FileBuilderOutput> = Vec::new();
    let mut current: Option<FileBuilder> = None;
    let mut raw_capture: Vec<String> = Vec::new();
    let mut capturing = false;
    let mut saw_header = false;

    let mut old_path: Option<String> = None;
    let mut git_path: Option<String> = None;

    let mut hunk_start: Option<u32> = None;
    let mut original_lines: Vec<String> = Vec::new();
    let mut new_lines: Vec<String> = Vec::new();

    macro_rules! flush_hunk {
        () => {
            if let (Some(file), Some(start)) = (current.as_mut(), hunk_start) {
                if !original_lines.is_empty() || !new_lines.is_empty() {
                    file.units.push(ChangeUnit {
                        file_path: file.file_path.clone(),
                        language: file.language,
                        original_lines: std::mem::take(&mut original_lines),
                        new_lines: std::mem::take(&mut new_lines),
                        start_line: start,
                    });
                }
            }
            original_lines.clear();
            new_lines.clear();
            hunk_start = None;
        };
    }

    macro_rules! finalize_file {
        () => {
            flush_hunk!();
            if let Some(mut file) = current.take() {
                file.raw_lines = std::mem::take(&mut raw_capture);
                finished.push(file.finish());
            } else {
                raw_capture.clear();
            }
            old_path = None;
        };
    }

    for line in raw_diff.lines() {
        if let Some(rest) = line.strip_prefix("diff --git ") {
            finalize_file!();
            saw_header = true;
            capturing = true;
            raw_capture.push(line.to_string());
            git_path = parse_git_header_path(rest);
            continue;
        }

        if capturing {
            raw_capture.push(line.to_string());
        }

        if let Some(rest) = line.strip_prefix("--- ") {
            old_path = Some(normalize_diff_path(rest));
            continue;
        }

        if let Some(rest) = line.strip_prefix("+++ ") {
            let new_path = normalize_diff_path(rest);
            saw_header = true;

            let (file_path, status) = classify_file(old_path.as_deref(), &new_path);
            current = Some(FileBuilder {
                language: Language::from_path(&file_path),
                file_path,
                status,
                additions: 0,
                deletions: 0,
                units: Vec::new(),
                raw_lines: Vec::new(),
                binary: false,
            });
            continue;
        }

        if is_binary_marker(line) {
            match current.as_mut() {
                Some(file) => file.binary = true,
                None => {
                    // git emits no ---/+++ headers for binary files
                    if let Some(path) = git_path.take() {
                        current = Some(FileBuilder {
                            language: Language::from_path(&path),
                            file_path: path,
                            status: FileStatus::Modified,
                            additions: 0,
                            deletions: 0,
                            units: Vec::new(),
                            raw_lines: Vec::new(),
                            binary: true,
                        });
                    }
                }
            }
            continue;
        }

        if line.starts_with("@@") && current.is_some() {
            flush_hunk!();
            match parse_hunk_start(line) {
                Some(start) => hunk_start = Some(start),
                None => {
                    warn!(header = line, "skipping malformed hunk header");
                }
            }
            continue;
        }

        if current.is_none() || hunk_start.is_none() {
            continue;
        }

        if let Some(text) = line.strip_prefix('+') {
            new_lines.push(text.to_string());
            if let Some(file) = current.as_mut() {
                file.additions += 1;
            }
        } else if let Some(text) = line.strip_prefix('-') {
            original_lines.push(text.to_string());
            if let Some(file) = current.as_mut() {
                file.deletions += 1;
            }
        } else if let Some(text) = line.strip_prefix(' ') {
            original_lines.push(text.to_string());
            new_lines.push(text.to_string());
        }
        // "\ No newline at end of file" and anything else falls through
    }

    finalize_file!();

    if !saw_header {
        return Err(DiffError::Malformed(
            "no file headers found in diff text".to_string(),
        ));
    }
    Ok(finished)
}

/// Split finished files into reviewable and ignored sets
fn partition(finished: Vec<FileBuilderOutput>) -> ParsedDiff {
    let mut parsed = ParsedDiff::default();

    for output in finished {
        let file = output.diff;
        if output.binary || has_binary_extension(&file.file_path) {
            parsed.ignored.push(IgnoredFile {
                file_path: file.file_path,
                reason: IgnoreReason::Binary,
            });
        } else if file.status == FileStatus::Deleted {
            parsed.ignored.push(IgnoredFile {
                file_path: file.file_path,
                reason: IgnoreReason::Deleted,
            });
        } else if file.units.is_empty() {
            parsed.ignored.push(IgnoredFile {
                file_path: file.file_path,
                reason: IgnoreReason::NoCodeChanges,
            });
        } else {
            parsed.files.push(file);
        }
    }

    parsed
}

/// Strip git's `a/`/`b/` prefixes and normalize the null-path sentinel
fn normalize_diff_path(raw: &str) -> String {
    // headers may carry a timestamp after a tab
    let trimmed = raw.split('\t').next().unwrap_or(raw).trim();
    if trimmed == "/dev/null" || trimmed == "dev/null" {
        return "/dev/null".to_string();
    }
    trimmed
        .strip_prefix("a/")
        .or_else(|| trimmed.strip_prefix("b/"))
        .unwrap_or(trimmed)
        .to_string()
}

/// Pull the new-side path out of a `diff --git a/x b/y` header
fn parse_git_header_path(rest: &str) -> Option<String> {
    let b_side = rest.split_whitespace().last()?;
    Some(normalize_diff_path(b_side))
}

fn classify_file(old_path: Option<&str>, new_path: &str) -> (String, FileStatus) {
    if old_path == Some("/dev/null") {
        return (new_path.to_string(), FileStatus::Added);
    }
    if new_path == "/dev/null" {
        return (
            old_path.unwrap_or_default().to_string(),
            FileStatus::Deleted,
        );
    }

    let status = match old_path {
        Some(old) if old != new_path => FileStatus::Renamed,
        _ => FileStatus::Modified,
    };
    (new_path.to_string(), status)
}

fn is_binary_marker(line: &str) -> bool {
    (line.starts_with("Binary files ") && line.ends_with(" differ"))
        || line == "GIT binary patch"
}

fn has_binary_extension(path: &str) -> bool {
    path.rsplit_once('.')
        .map(|(_, ext)| BINARY_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Extract the new-file starting line from a `@@ -a,b +c,d @@` header
///
/// Returns `None` when the header does not follow the unified format. A
/// zero start (pure-addition headers like `@@ -0,0 +1,2 @@` put the zero on
/// the old side, but tools disagree) is clamped to line 1.
fn parse_hunk_start(line: &str) -> Option<u32> {
    let mut sections = line.split("@@");
    let _ = sections.next()?;
    let ranges = sections.next()?.trim();

    let plus_range = ranges
        .split_whitespace()
        .find(|part| part.starts_with('+'))?;
    let start_str = plus_range[1..].split(',').next()?;
    let start: u32 = start_str.parse().ok()?;
    Some(start.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> DiffParser {
        DiffParser::new(DiffLimits::default())
    }

    const MODIFIED_DIFF: &str = "diff --git a/src/app/example.py b/src/app/example.py\n\
index 1111111..2222222 100644\n\
--- a/src/app/example.py\n\
+++ b/src/app/example.py\n\
@@ -1,3 +1,4 @@\n \
def foo():\n\
-    return 1\n\
+    return 2\n";

    #[test]
    fn modified_file_reports_counts_and_units() {
        let parsed = parser().parse(MODIFIED_DIFF).unwrap();

        assert_eq!(parsed.files.len(), 1);
        let file = &parsed.files[0];
        assert_eq!(file.status, FileStatus::Modified);
        assert_eq!(file.file_path, "src/app/example.py");
        assert_eq!(file.language, Some(Language::Python));
        assert_eq!(file.additions, 1);
        assert_eq!(file.deletions, 1);
        assert_eq!(file.units.len(), 1);

        let unit = &file.units[0];
        assert_eq!(unit.start_line, 1);
        assert!(unit.new_lines.contains(&"    return 2".to_string()));
        assert!(unit.original_lines.contains(&"    return 1".to_string()));
    }

    #[test]
    fn added_file_detected() {
        let diff = "diff --git a/src/new_file.py b/src/new_file.py\n\
new file mode 100644\n\
index 0000000..3333333\n\
--- /dev/null\n\
+++ b/src/new_file.py\n\
@@ -0,0 +1,2 @@\n\
+def added():\n\
+    return True\n";

        let parsed = parser().parse(diff).unwrap();
        assert_eq!(parsed.files.len(), 1);
        let file = &parsed.files[0];
        assert_eq!(file.status, FileStatus::Added);
        assert_eq!(file.additions, 2);
        assert_eq!(file.deletions, 0);
        assert!(file.units[0].is_addition());
        assert_eq!(file.units[0].start_line, 1);
    }

    #[test]
    fn deleted_file_goes_to_ignored() {
        let diff = "diff --git a/src/old_file.py b/src/old_file.py\n\
deleted file mode 100644\n\
index 4444444..0000000\n\
--- a/src/old_file.py\n\
+++ /dev/null\n\
@@ -1,2 +0,0 @@\n\
-def removed():\n\
-    return False\n";

        let parsed = parser().parse(diff).unwrap();
        assert!(parsed.files.is_empty());
        assert_eq!(
            parsed.ignored,
            vec![IgnoredFile {
                file_path: "src/old_file.py".to_string(),
                reason: IgnoreReason::Deleted,
            }]
        );
    }

    #[test]
    fn renamed_file_detected() {
        let diff = "diff --git a/src/before.py b/src/after.py\n\
--- a/src/before.py\n\
+++ b/src/after.py\n\
@@ -1,1 +1,1 @@\n\
-x = 1\n\
+x = 2\n";

        let parsed = parser().parse(diff).unwrap();
        assert_eq!(parsed.files[0].status, FileStatus::Renamed);
        assert_eq!(parsed.files[0].file_path, "src/after.py");
    }

    #[test]
    fn binary_marker_goes_to_ignored() {
        let diff = "diff --git a/logo.dat b/logo.dat\n\
index 1111111..2222222 100644\n\
Binary files a/logo.dat and b/logo.dat differ\n";

        let parsed = parser().parse(diff).unwrap();
        assert!(parsed.files.is_empty());
        assert_eq!(parsed.ignored[0].reason, IgnoreReason::Binary);
        assert_eq!(parsed.ignored[0].file_path, "logo.dat");
    }

    #[test]
    fn binary_extension_goes_to_ignored() {
        let diff = "diff --git a/img.png b/img.png\n\
--- a/img.png\n\
+++ b/img.png\n\
@@ -1,1 +1,1 @@\n\
-old\n\
+new\n";

        let parsed = parser().parse(diff).unwrap();
        assert!(parsed.files.is_empty());
        assert_eq!(parsed.ignored[0].reason, IgnoreReason::Binary);
    }

    #[test]
    fn file_without_hunks_reported_as_no_code_changes() {
        let diff = "diff --git a/mode_only.py b/mode_only.py\n\
old mode 100644\n\
new mode 100755\n\
--- a/mode_only.py\n\
+++ b/mode_only.py\n";

        let parsed = parser().parse(diff).unwrap();
        assert!(parsed.files.is_empty());
        assert_eq!(parsed.ignored[0].reason, IgnoreReason::NoCodeChanges);
    }

    #[test]
    fn garbled_hunk_header_is_skipped_not_fatal() {
        let diff = "diff --git a/a.py b/a.py\n\
--- a/a.py\n\
+++ b/a.py\n\
@@ garbage @@\n\
+ignored line\n\
@@ -1,1 +5,1 @@\n\
+kept = True\n";

        let parsed = parser().parse(diff).unwrap();
        assert_eq!(parsed.files.len(), 1);
        let units = &parsed.files[0].units;
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].start_line, 5);
        assert_eq!(units[0].new_lines, vec!["kept = True".to_string()]);
    }

    #[test]
    fn multiple_hunks_yield_one_unit_each_in_order() {
        let diff = "diff --git a/a.py b/a.py\n\
--- a/a.py\n\
+++ b/a.py\n\
@@ -1,2 +1,2 @@\n \
keep\n\
-one\n\
+uno\n\
@@ -10,2 +10,3 @@\n \
keep\n\
+added\n \
keep2\n";

        let parsed = parser().parse(diff).unwrap();
        let units = &parsed.files[0].units;
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].start_line, 1);
        assert_eq!(units[1].start_line, 10);
        assert_eq!(units[1].new_lines.len(), 3);
    }

    #[test]
    fn start_line_preserved_verbatim() {
        let diff = "diff --git a/b.rs b/b.rs\n\
--- a/b.rs\n\
+++ b/b.rs\n\
@@ -120,3 +127,4 @@ fn context()\n \
a\n\
+b\n \
c\n \
d\n";

        let parsed = parser().parse(diff).unwrap();
        assert_eq!(parsed.files[0].units[0].start_line, 127);
    }

    #[test]
    fn rejects_diff_over_byte_limit() {
        let parser = DiffParser::new(DiffLimits {
            max_bytes: 16,
            max_lines: 1000,
        });
        let err = parser.parse(MODIFIED_DIFF).unwrap_err();
        assert!(matches!(err, DiffError::TooLarge { .. }));
    }

    #[test]
    fn rejects_diff_over_line_limit() {
        let parser = DiffParser::new(DiffLimits {
            max_bytes: 1_048_576,
            max_lines: 3,
        });
        let err = parser.parse(MODIFIED_DIFF).unwrap_err();
        assert!(matches!(err, DiffError::TooLarge { .. }));
    }

    #[test]
    fn accepts_diff_exactly_at_limit() {
        let parser = DiffParser::new(DiffLimits {
            max_bytes: MODIFIED_DIFF.len(),
            max_lines: MODIFIED_DIFF.lines().count(),
        });
        assert!(parser.parse(MODIFIED_DIFF).is_ok());
    }

    #[test]
    fn rejects_text_without_file_headers() {
        let err = parser().parse("not a diff at all\njust words\n").unwrap_err();
        assert!(matches!(err, DiffError::Malformed(_)));

        let err = parser().parse("").unwrap_err();
        assert!(matches!(err, DiffError::Malformed(_)));
    }

    #[test]
    fn unknown_extension_still_emits_unit_with_no_language() {
        let diff = "diff --git a/build.gradle.kts2 b/build.gradle.kts2\n\
--- a/build.gradle.kts2\n\
+++ b/build.gradle.kts2\n\
@@ -1,1 +1,1 @@\n\
-old\n\
+new\n";

        let parsed = parser().parse(diff).unwrap();
        assert_eq!(parsed.files.len(), 1);
        assert_eq!(parsed.files[0].language, None);
    }

    #[test]
    fn parse_is_deterministic() {
        let first = parser().parse(MODIFIED_DIFF).unwrap();
        let second = parser().parse(MODIFIED_DIFF).unwrap();
        assert_eq!(first, second);
    }
}
