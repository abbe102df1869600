use serde::{Deserialize, Serialize};

/// One pull request and every filename its commits changed.
///
/// `files` keeps discovery order across the PR's commits and may contain the
/// same filename more than once when several commits touched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrRecord {
    /// Platform-assigned PR number
    pub number: u64,
    /// Changed filenames, in commit order then per-commit listing order
    pub files: Vec<String>,
}

/// All records of one collection run, in the platform's listing order.
/// Built once, immutable afterwards.
pub type PrIndex = Vec<PrRecord>;
