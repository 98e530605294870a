use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_USERNAME: &str = "YOUR_USERNAME";
pub const DEFAULT_OUTPUT: &str = "README.md";

/// Command line, with every option backed by an environment variable so the
/// binary can run unattended from a scheduled workflow.
#[derive(Parser, Debug)]
#[command(name = "profile-readme")]
#[command(version, about = "Refresh a GitHub profile README with account statistics", long_about = None)]
pub struct Cli {
    /// Access token sent as a bearer credential
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Account whose statistics are collected
    #[arg(long, env = "GITHUB_USERNAME", default_value = DEFAULT_USERNAME)]
    pub username: String,

    /// REST API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// File that is overwritten with the rendered README
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Upper bound on repository listing pages walked for the star total
    #[arg(long, default_value_t = 100)]
    pub max_pages: u32,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: Option<String>,
    pub username: String,
    pub api_base: String,
    pub output: PathBuf,
    pub timeout: Duration,
    pub max_pages: u32,
}

impl Config {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            token: None,
            username: username.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            timeout: Duration::from_secs(30),
            max_pages: 100,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = normalize_token(Some(token.into()));
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            token: normalize_token(cli.token),
            username: cli.username,
            api_base: cli.api_base.trim_end_matches('/').to_string(),
            output: cli.output,
            timeout: Duration::from_secs(cli.timeout_secs),
            max_pages: cli.max_pages,
        }
    }
}

// Workflows often export an unset secret as an empty string.
fn normalize_token(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
