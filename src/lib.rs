pub mod config;
pub mod github;
pub mod logging;
pub mod readme;
pub mod stats;

use anyhow::Result;
use chrono::Utc;
use config::Config;
use github::GithubClient;
use stats::Stats;
use tracing::info;

/// Collect every statistic, render the README and overwrite the output file.
///
/// Steps run one after another. If the profile or a repository listing
/// cannot be fetched the error is returned before anything is written.
pub async fn run(config: &Config) -> Result<Stats> {
    println!("🚀 Fetching GitHub statistics...");
    let client = GithubClient::new(config)?;

    let profile = client.fetch_profile().await?;
    println!(
        "✓ User stats retrieved for {}: {} repos",
        profile.name, profile.public_repos
    );

    let stars = client.fetch_total_stars().await?;
    println!("✓ Total stars: {stars}");

    let commits = client.fetch_total_commits().await?;
    println!("✓ Total commits: {}", commits.total);
    if commits.skipped > 0 {
        println!("  ({} repositories skipped)", commits.skipped);
    }

    let lines = client.fetch_lines_of_code().await?;
    println!(
        "✓ Estimated lines of code: {}",
        readme::group_thousands(lines.total)
    );
    if lines.skipped > 0 {
        println!("  ({} repositories skipped)", lines.skipped);
    }

    let stats = Stats::new(profile, stars, commits, lines);
    let contents = readme::render_readme(&stats, Utc::now());
    readme::write_readme(&config.output, &contents)?;
    info!(path = %config.output.display(), "README written");
    println!("✅ {} updated successfully!", config.output.display());

    Ok(stats)
}
