use serde::Deserialize;

use super::GithubError;

/// A GitHub repository identified by its `owner/repo` slug.
#[derive(Debug, Clone)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    /// Parse an `owner/repo` slug into its component parts.
    /// Returns GithubError::InvalidRepo for anything else.
    pub fn parse(slug: &str) -> Result<RepoId, GithubError> {
        match slug.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(RepoId {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(GithubError::InvalidRepo(slug.to_string())),
        }
    }

    /// API endpoint listing the repository's pull requests.
    pub fn pulls_url(&self) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/pulls",
            self.owner, self.repo
        )
    }

    /// Web link to the "files changed" view of one pull request.
    pub fn files_url(&self, number: u64) -> String {
        format!(
            "https://github.com/{}/{}/pull/{}/files",
            self.owner, self.repo, number
        )
    }
}

/// Basic-auth credentials sent with every GitHub request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub token: String,
}

/// One entry of the paginated pull request listing.
/// Only the fields the collector reads; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PullSummary {
    /// Platform-assigned PR number
    pub number: u64,
    /// URL of the PR's commits resource
    pub commits_url: String,
}

/// One entry of a PR's commit listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRef {
    /// URL of the commit's detail resource
    pub url: String,
}

/// The commit detail resource, reduced to its changed-files list.
/// A commit with no `files` array contributes nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub files: Vec<ChangedFile>,
}

/// A single file changed by a commit.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
}
