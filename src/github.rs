use crate::config::Config;
use crate::stats::{RepositorySummary, Tally, UserProfile};
use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, LINK};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Rough average size of a source line, used to turn language byte counts
/// into a lines-of-code estimate.
pub const BYTES_PER_LINE: u64 = 30;

const REPOS_PER_PAGE: u32 = 100;
const ACCEPT_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct ProfileResponse {
    name: Option<String>,
    public_repos: Option<u64>,
    followers: Option<u64>,
    following: Option<u64>,
}

#[derive(Clone)]
pub struct GithubClient {
    token: Option<Arc<String>>,
    http: Arc<Client>,
    api_base: String,
    username: String,
    max_pages: u32,
}

impl GithubClient {
    /// Create a REST client for the account named in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        if config.token.is_none() {
            warn!("No GitHub token configured; requests are subject to the unauthenticated rate limit");
        }

        Ok(Self {
            token: config.token.clone().map(Arc::new),
            http: Arc::new(http),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            max_pages: config.max_pages,
        })
    }

    /// Low-level GET. Transport failures and non-2xx statuses are errors.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = format!("{}{path}", self.api_base);
        debug!(%url, ?query, "GET");

        let mut req = self.http.get(&url).header(ACCEPT, ACCEPT_V3).query(query);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token.as_str());
        }

        let resp = req
            .send()
            .await
            .with_context(|| format!("Network error requesting {url}"))?;

        resp.error_for_status()
            .with_context(|| format!("GitHub API returned an error for {url}"))
    }

    /// Fetch the public profile. Missing fields fall back to zero, or to the
    /// configured username for the display name.
    pub async fn fetch_profile(&self) -> Result<UserProfile> {
        let path = format!("/users/{}", self.username);
        let parsed: ProfileResponse = self
            .get(&path, &[])
            .await?
            .json()
            .await
            .context("Failed to deserialize profile response")?;

        Ok(UserProfile {
            name: parsed.name.unwrap_or_else(|| self.username.clone()),
            public_repos: parsed.public_repos.unwrap_or(0),
            followers: parsed.followers.unwrap_or(0),
            following: parsed.following.unwrap_or(0),
        })
    }

    /// One page of the user's repository listing (1-based).
    pub async fn list_repos_page(&self, page: u32) -> Result<Vec<RepositorySummary>> {
        let path = format!("/users/{}/repos", self.username);
        let query = [
            ("page", page.to_string()),
            ("per_page", REPOS_PER_PAGE.to_string()),
        ];

        self.get(&path, &query)
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to deserialize repository listing page {page}"))
    }

    /// Sum stargazers across every listing page, stopping at the first empty
    /// page or after `max_pages` pages.
    pub async fn fetch_total_stars(&self) -> Result<u64> {
        let mut total = 0u64;

        for page in 1..=self.max_pages {
            let repos = self.list_repos_page(page).await?;
            if repos.is_empty() {
                return Ok(total);
            }
            total = repos
                .iter()
                .fold(total, |acc, r| acc.saturating_add(r.stargazers_count));
        }

        warn!(
            max_pages = self.max_pages,
            "Repository listing never returned an empty page; star total may be incomplete"
        );
        Ok(total)
    }

    /// Commits authored by the user in one repository.
    ///
    /// Requests a single commit per page, so the `rel="last"` page number in
    /// the `Link` header is the commit count. Without it, the body holds
    /// every commit there is.
    pub async fn repo_commit_count(&self, repo: &str) -> Result<u64> {
        let path = format!("/repos/{}/{repo}/commits", self.username);
        let query = [
            ("author", self.username.clone()),
            ("per_page", "1".to_string()),
        ];
        let resp = self.get(&path, &query).await?;

        let last_page = resp
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(last_page_from_link);
        if let Some(count) = last_page {
            return Ok(count);
        }

        let commits: Vec<Value> = resp
            .json()
            .await
            .with_context(|| format!("Failed to deserialize commits for {repo}"))?;
        Ok(commits.len() as u64)
    }

    /// Estimated lines of code in one repository from its language byte counts.
    pub async fn repo_language_lines(&self, repo: &str) -> Result<u64> {
        let path = format!("/repos/{}/{repo}/languages", self.username);
        let languages: HashMap<String, u64> = self
            .get(&path, &[])
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to deserialize languages for {repo}"))?;

        Ok(languages.values().map(|bytes| bytes / BYTES_PER_LINE).sum())
    }

    /// Commit total over the first listing page. A repository whose lookup
    /// fails contributes nothing and is counted as skipped.
    pub async fn fetch_total_commits(&self) -> Result<Tally> {
        let repos = self.list_repos_page(1).await?;
        let mut tally = Tally::default();

        for repo in repos {
            let outcome = self.repo_commit_count(&repo.name).await;
            if let Err(e) = &outcome {
                warn!(repo = %repo.name, "Skipping commit count: {e:#}");
            }
            tally.add(outcome);
        }

        Ok(tally)
    }

    /// Lines-of-code estimate over the non-fork repositories of the first
    /// listing page, with the same skip-and-continue policy as commits.
    pub async fn fetch_lines_of_code(&self) -> Result<Tally> {
        let repos = self.list_repos_page(1).await?;
        let mut tally = Tally::default();

        for repo in repos.iter().filter(|r| !r.is_fork) {
            let outcome = self.repo_language_lines(&repo.name).await;
            if let Err(e) = &outcome {
                warn!(repo = %repo.name, "Skipping language breakdown: {e:#}");
            }
            tally.add(outcome);
        }

        Ok(tally)
    }
}

/// Page number of the `rel="last"` entry of an RFC 8288 `Link` header.
pub fn last_page_from_link(header: &str) -> Option<u64> {
    header.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        if !params.split(';').any(|p| p.trim() == r#"rel="last""#) {
            return None;
        }

        let url = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        let (_, query) = url.split_once('?')?;
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix("page="))
            .and_then(|n| n.parse().ok())
    })
}
