use serde::Deserialize;

/// Public profile fields shown in the README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
}

/// One entry of a repository listing page. Only folded into counters.
#[derive(Debug, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default, rename = "fork")]
    pub is_fork: bool,
}

/// Result of a best-effort fold over repositories: the sum of everything that
/// succeeded plus how many repositories were left out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub total: u64,
    pub skipped: usize,
}

impl Tally {
    pub fn add<E>(&mut self, outcome: Result<u64, E>) {
        match outcome {
            Ok(n) => self.total = self.total.saturating_add(n),
            Err(_) => self.skipped += 1,
        }
    }
}

/// Everything the renderer needs, gathered within a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub name: String,
    pub repos: u64,
    pub stars: u64,
    pub commits: u64,
    pub lines_of_code: u64,
    pub followers: u64,
    pub following: u64,
}

impl Stats {
    pub fn new(profile: UserProfile, stars: u64, commits: Tally, lines: Tally) -> Self {
        Self {
            name: profile.name,
            repos: profile.public_repos,
            stars,
            commits: commits.total,
            lines_of_code: lines.total,
            followers: profile.followers,
            following: profile.following,
        }
    }
}
