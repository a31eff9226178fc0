//! Parsed diff data structures

use diffsense_domain::{ChangeUnit, Language};
use serde::{Deserialize, Serialize};

/// How a file changed within the diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// File created by this diff
    Added,
    /// File changed in place
    Modified,
    /// File removed by this diff
    Deleted,
    /// File moved to a new path
    Renamed,
}

impl FileStatus {
    /// Get the status name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Deleted => "deleted",
            FileStatus::Renamed => "renamed",
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Changes to a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    /// Path of the file in the new version (old version for deletions)
    pub file_path: String,
    /// Detected language, `None` when the extension is unknown
    pub language: Option<Language>,
    /// How the file changed
    pub status: FileStatus,
    /// Number of lines added
    pub additions: u32,
    /// Number of lines deleted
    pub deletions: u32,
    /// One change unit per hunk, in diff order
    pub units: Vec<ChangeUnit>,
    /// Raw per-file diff text, for traceability
    pub raw_diff: String,
}

impl FileDiff {
    /// Total number of changed lines
    pub fn total_changes(&self) -> u32 {
        self.additions + self.deletions
    }
}

/// Why a file was excluded from review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Binary content, nothing reviewable
    Binary,
    /// File deleted, no new content to review
    Deleted,
    /// File header present but no parseable hunks
    NoCodeChanges,
}

impl IgnoreReason {
    /// Get the reason as string
    pub fn as_str(&self) -> &'static str {
        match self {
            IgnoreReason::Binary => "binary",
            IgnoreReason::Deleted => "deleted",
            IgnoreReason::NoCodeChanges => "no code changes",
        }
    }
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file the parser saw but excluded from review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoredFile {
    /// Path of the excluded file
    pub file_path: String,
    /// Why it was excluded
    pub reason: IgnoreReason,
}

/// Result of parsing one unified diff
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDiff {
    /// Reviewable files, in diff order
    pub files: Vec<FileDiff>,
    /// Files excluded from review, with reasons
    pub ignored: Vec<IgnoredFile>,
}

impl ParsedDiff {
    /// All change units across all reviewable files, in diff order
    pub fn units(&self) -> Vec<ChangeUnit> {
        self.files
            .iter()
            .flat_map(|file| file.units.iter().cloned())
            .collect()
    }

    /// Consume the parse result, keeping only the change units
    pub fn into_units(self) -> Vec<ChangeUnit> {
        self.files
            .into_iter()
            .flat_map(|file| file.units)
            .collect()
    }
}
