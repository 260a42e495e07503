use crate::common::constants::{OUTPUT_FILE_PATTERN, OUTPUT_RETRIEVE_DEPTH, OUTPUT_RETRIEVE_TARGET};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file staged from the local machine into the job's working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalCopy {
    pub source: PathBuf,
    pub filename: String,
}

impl LocalCopy {
    pub fn new(source: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            filename: filename.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCopy {
    pub computer_uuid: String,
    pub source: PathBuf,
    pub destination: String,
}

/// Output retrieval rule.
///
/// A bare pattern is retrieved keeping its relative path; the nested form
/// `[pattern, destination, depth]` keeps only the last `depth` path components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RetrieveEntry {
    Pattern(String),
    Nested(String, String, u32),
}

impl RetrieveEntry {
    pub fn pattern(&self) -> &str {
        match self {
            Self::Pattern(pattern) | Self::Nested(pattern, _, _) => pattern,
        }
    }

    pub fn default_output() -> Self {
        Self::Nested(
            OUTPUT_FILE_PATTERN.to_string(),
            OUTPUT_RETRIEVE_TARGET.to_string(),
            OUTPUT_RETRIEVE_DEPTH,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeInfo {
    pub code_uuid: String,
    pub cmdline_params: Vec<String>,
}

/// Staging descriptor handed to the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcInfo {
    pub uuid: String,
    pub stdin_name: String,
    pub cmdline_params: Vec<String>,
    pub codes_info: Vec<CodeInfo>,
    pub local_copy_list: Vec<LocalCopy>,
    pub remote_copy_list: Vec<RemoteCopy>,
    pub remote_symlink_list: Vec<RemoteCopy>,
    pub retrieve_list: Vec<RetrieveEntry>,
    pub parser_name: String,
}
