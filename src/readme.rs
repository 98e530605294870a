//! README generation.
//!
//! The template is fixed: a greeting, a six-row metrics table, a static block
//! of technology badges and a "last updated" line. Only the numbers and the
//! timestamp vary between runs.

use crate::stats::Stats;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

pub const TIMESTAMP_FORMAT: &str = "%B %d, %Y at %H:%M UTC";

const BADGES: &[(&str, &str)] = &[
    (
        "Python",
        "https://img.shields.io/badge/-Python-3776AB?style=flat-square&logo=python&logoColor=white",
    ),
    (
        "JavaScript",
        "https://img.shields.io/badge/-JavaScript-F7DF1E?style=flat-square&logo=javascript&logoColor=black",
    ),
    (
        "Git",
        "https://img.shields.io/badge/-Git-F05032?style=flat-square&logo=git&logoColor=white",
    ),
    (
        "GitHub",
        "https://img.shields.io/badge/-GitHub-181717?style=flat-square&logo=github",
    ),
    (
        "VS Code",
        "https://img.shields.io/badge/-VS%20Code-007ACC?style=flat-square&logo=visual-studio-code",
    ),
];

/// Format an integer with `,` between groups of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

fn build_metric_rows(stats: &Stats) -> String {
    let rows = [
        ("📦", "Total Repositories", stats.repos.to_string()),
        ("⭐", "Total Stars Received", stats.stars.to_string()),
        ("💻", "Total Commits", group_thousands(stats.commits)),
        (
            "📝",
            "Lines of Code",
            format!("{}+", group_thousands(stats.lines_of_code)),
        ),
        ("👥", "Followers", stats.followers.to_string()),
        ("👤", "Following", stats.following.to_string()),
    ];

    rows.iter()
        .map(|(emoji, label, value)| format!("| {emoji} **{label}** | {value} |\n"))
        .collect()
}

fn build_badges() -> String {
    BADGES
        .iter()
        .map(|(alt, url)| format!("![{alt}]({url})\n"))
        .collect()
}

/// Render the README for `stats`, stamped with `now`.
pub fn render_readme(stats: &Stats, now: DateTime<Utc>) -> String {
    format!(
        r#"# Hi there! 👋

I'm a passionate developer working on various projects. Here are my GitHub statistics:

## 📊 GitHub Statistics

<div align="center">

| Metric | Count |
|--------|-------|
{rows}
</div>

---

<div align="center">

### 🛠️ Technologies & Tools

{badges}
</div>

---

<div align="center">

*📅 Last Updated: {updated}*

*This README is automatically updated using GitHub Actions*

</div>
"#,
        rows = build_metric_rows(stats),
        badges = build_badges(),
        updated = now.format(TIMESTAMP_FORMAT),
    )
}

/// Replace the contents of `path` with `contents`.
pub fn write_readme(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
