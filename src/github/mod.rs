pub mod types;

pub use types::{Credentials, RepoId};

use std::future::Future;

use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::index::{PrIndex, PrRecord};
use types::{CommitDetail, CommitRef, PullSummary};

const USER_AGENT: &str = "pr-locator";
const PAGE_SIZE: u32 = 100;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("Invalid repository slug: {0} (expected owner/repo)")]
    InvalidRepo(String),

    #[error("GitHub credentials not found: set GIT_USER and GIT_TOKEN")]
    MissingCredentials,
}

/// Fetch every pull request of the repository and flatten each one's commits
/// into the ordered list of filenames it changed.
///
/// Issues one listing request per page, one commits request per PR, and one
/// detail request per commit, strictly in sequence. Any failure aborts the
/// whole run; there is no retry and no partial result.
#[instrument(skip(creds), fields(owner = %repo.owner, repo = %repo.repo))]
pub async fn collect(repo: &RepoId, creds: &Credentials) -> Result<PrIndex, GithubError> {
    let client = reqwest::Client::new();
    let pulls_url = repo.pulls_url();

    debug!("listing pull requests");
    let pulls = list_pulls(|page| {
        let query = vec![
            ("page".to_string(), page.to_string()),
            ("per_page".to_string(), PAGE_SIZE.to_string()),
        ];
        get_json::<Vec<PullSummary>>(&client, &pulls_url, query, creds)
    })
    .await?;
    info!(total = pulls.len(), "pull request listing complete");
    println!("prs in total: {}", pulls.len());

    let mut index = Vec::with_capacity(pulls.len());
    for pull in &pulls {
        let files = collect_pr_files(&client, pull, creds).await?;
        debug!(pr = pull.number, files = files.len(), "collected changed files");
        index.push(PrRecord {
            number: pull.number,
            files,
        });
    }

    Ok(index)
}

/// Page through the listing endpoint starting at page 1, requesting the next
/// page unconditionally until one deserializes to an empty array. The empty
/// page itself is requested; it terminates the loop and contributes nothing.
async fn list_pulls<F, Fut>(mut fetch_page: F) -> Result<Vec<PullSummary>, GithubError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<PullSummary>, GithubError>>,
{
    let mut pulls = Vec::new();
    let mut page = 1;
    loop {
        let batch = fetch_page(page).await?;
        if batch.is_empty() {
            break;
        }
        pulls.extend(batch);
        page += 1;
    }
    Ok(pulls)
}

/// Flatten one PR's commits into its changed filenames, preserving commit
/// listing order and, within a commit, file listing order. Duplicates across
/// commits are kept.
async fn collect_pr_files(
    client: &reqwest::Client,
    pull: &PullSummary,
    creds: &Credentials,
) -> Result<Vec<String>, GithubError> {
    debug!(pr = pull.number, "fetching commit list");
    let commits: Vec<CommitRef> = get_json(client, &pull.commits_url, Vec::new(), creds).await?;

    let mut files = Vec::new();
    for commit in &commits {
        let detail: CommitDetail = get_json(client, &commit.url, Vec::new(), creds).await?;
        files.extend(detail.files.into_iter().map(|f| f.filename));
    }
    Ok(files)
}

/// One authenticated GET, deserialized into the caller's shape. Non-2xx
/// responses (including auth rejections) surface as ApiRequest errors.
async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: Vec<(String, String)>,
    creds: &Credentials,
) -> Result<T, GithubError> {
    let response = client
        .get(url)
        .query(&query)
        .header("User-Agent", USER_AGENT)
        .basic_auth(&creds.user, Some(&creds.token))
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json::<T>().await?)
}
