use httpmock::prelude::*;
use profile_readme::config::Config;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

async fn mock_account(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octocat");
            then.status(200).json_body(json!({
                "name": "The Octocat",
                "public_repos": 2,
                "followers": 1500,
                "following": 9
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/users/octocat/repos")
                .query_param("page", "1");
            then.status(200).json_body(json!([
                { "name": "hello-world", "stargazers_count": 40, "fork": false },
                { "name": "linguist", "stargazers_count": 2, "fork": true }
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/users/octocat/repos")
                .query_param("page", "2");
            then.status(200).json_body(json!([]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/hello-world/commits");
            then.status(200)
                .header(
                    "Link",
                    r#"<https://api.github.com/repositories/2/commits?per_page=1&page=1203>; rel="last""#,
                )
                .json_body(json!([{ "sha": "a" }]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/linguist/commits");
            then.status(409).json_body(json!({ "message": "Git Repository is empty." }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octocat/hello-world/languages");
            then.status(200).json_body(json!({ "Rust": 30000, "Shell": 300 }));
        })
        .await;
}

fn config_for(server: &MockServer, dir: &TempDir) -> Config {
    Config::new("octocat")
        .with_api_base(server.base_url())
        .with_output(dir.path().join("README.md"))
}

fn without_timestamp(readme: &str) -> Vec<&str> {
    readme
        .lines()
        .filter(|l| !l.contains("Last Updated:"))
        .collect()
}

#[tokio::test]
async fn run_writes_readme_with_collected_stats() {
    let server = MockServer::start_async().await;
    mock_account(&server).await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);

    let stats = profile_readme::run(&config).await.unwrap();

    assert_eq!(stats.stars, 42);
    assert_eq!(stats.commits, 1203);
    assert_eq!(stats.lines_of_code, 1010);

    let readme = fs::read_to_string(&config.output).unwrap();
    assert!(readme.contains("| 📦 **Total Repositories** | 2 |"));
    assert!(readme.contains("| ⭐ **Total Stars Received** | 42 |"));
    assert!(readme.contains("| 💻 **Total Commits** | 1,203 |"));
    assert!(readme.contains("| 📝 **Lines of Code** | 1,010+ |"));
    assert!(readme.contains("| 👥 **Followers** | 1500 |"));
    assert!(readme.contains("| 👤 **Following** | 9 |"));
    assert!(readme.contains(" UTC*"));
}

#[tokio::test]
async fn repeated_runs_differ_only_in_timestamp() {
    let server = MockServer::start_async().await;
    mock_account(&server).await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);

    profile_readme::run(&config).await.unwrap();
    let first = fs::read_to_string(&config.output).unwrap();
    profile_readme::run(&config).await.unwrap();
    let second = fs::read_to_string(&config.output).unwrap();

    assert_eq!(without_timestamp(&first), without_timestamp(&second));
}

#[tokio::test]
async fn profile_failure_leaves_output_untouched() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octocat");
            then.status(502);
        })
        .await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);
    fs::write(&config.output, "previous README").unwrap();

    assert!(profile_readme::run(&config).await.is_err());
    assert_eq!(fs::read_to_string(&config.output).unwrap(), "previous README");
}

#[tokio::test]
async fn listing_failure_leaves_output_untouched() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octocat");
            then.status(200).json_body(json!({ "public_repos": 1 }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octocat/repos");
            then.status(403)
                .json_body(json!({ "message": "API rate limit exceeded" }));
        })
        .await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);
    fs::write(&config.output, "previous README").unwrap();

    assert!(profile_readme::run(&config).await.is_err());
    assert_eq!(fs::read_to_string(&config.output).unwrap(), "previous README");
}

#[tokio::test]
async fn unwritable_output_is_an_error() {
    let server = MockServer::start_async().await;
    mock_account(&server).await;
    let dir = TempDir::new().unwrap();
    let config = Config::new("octocat")
        .with_api_base(server.base_url())
        .with_output(dir.path().join("missing-dir").join("README.md"));

    assert!(profile_readme::run(&config).await.is_err());
}
