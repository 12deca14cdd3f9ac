//! @ai:module:intent HTML report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api HtmlReporter
//! @ai:module:stateless true

use crate::model::{PlatformPresence, Report, Timeline};
use crate::report::charts::RenderedChart;
use crate::visualization::ChartKind;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Number of posts listed in the timeline section.
pub const RECENT_POSTS_LIMIT: usize = 10;

/// @ai:intent Trait for HTML report generation
pub trait HtmlReporterTrait: Send + Sync {
    /// @ai:intent Generate HTML report referencing the charts that were produced
    fn generate(&self, report: &Report, charts: &[RenderedChart], output_path: &Path)
        -> Result<()>;
}

/// @ai:intent Generates a self-contained HTML report
pub struct HtmlReporter;

impl HtmlReporter {
    /// @ai:intent Create a new HTML reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Render the whole document
    /// @ai:effects pure
    pub fn render(&self, report: &Report, charts: &[RenderedChart]) -> String {
        let mut sections = String::new();

        if let Some(presence) = report.presence() {
            sections.push_str(&Self::presence_section(presence));
            if let Some(chart) = find_chart(charts, ChartKind::PlatformPresence) {
                sections.push_str(&Self::chart_section(
                    "Platform Presence Visualization",
                    chart,
                ));
            }
        }

        if let Some(timeline) = report.timeline() {
            sections.push_str(&Self::timeline_section(
                timeline,
                find_chart(charts, ChartKind::TweetActivity),
            ));
        }

        if let Some(metadata) = report.metadata() {
            sections.push_str(&Self::metadata_section(metadata));
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>OSINT Report for {target}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <h1>OSINT Report for {target}</h1>
        <p>Generated on {generated}</p>
{sections}    </div>
</body>
</html>
"#,
            target = escape(report.target.as_str()),
            css = inline_css(),
            generated = report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            sections = sections,
        )
    }

    /// @ai:intent Platform/status/url table
    /// @ai:effects pure
    fn presence_section(presence: &PlatformPresence) -> String {
        let mut rows = String::new();

        for entry in &presence.platforms {
            let (class, status) = if entry.status.claimed {
                ("platform-found", "Claimed")
            } else {
                ("platform-not-found", "Not Claimed")
            };
            let url = escape(&entry.status.url);

            rows.push_str(&format!(
                "                <tr>\n                    <td>{}</td>\n                    <td class=\"{}\">{}</td>\n                    <td><a href=\"{url}\" target=\"_blank\">{url}</a></td>\n                </tr>\n",
                escape(&entry.name),
                class,
                status,
                url = url,
            ));
        }

        format!(
            r#"        <div class="section">
            <h2>Platform Presence (Sherlock Results)</h2>
            <p>{claimed} of {total} platforms claimed</p>
            <table>
                <tr><th>Platform</th><th>Status</th><th>URL</th></tr>
{rows}            </table>
        </div>
"#,
            claimed = presence.claimed_count(),
            total = presence.platforms.len(),
            rows = rows,
        )
    }

    /// @ai:intent Profile summary, activity chart and the first posts
    /// @ai:effects pure
    fn timeline_section(timeline: &Timeline, chart: Option<&RenderedChart>) -> String {
        let mut output = String::new();

        if let Some(profile) = &timeline.profile {
            output.push_str(&format!(
                r#"        <div class="section">
            <h2>Twitter Profile</h2>
            <p><strong>Username:</strong> @{}</p>
            <p><strong>Name:</strong> {}</p>
            <p><strong>Bio:</strong> {}</p>
            <p><strong>User ID:</strong> {}</p>
        </div>
"#,
                escape(&profile.handle),
                escape(&profile.display_name),
                escape(&profile.bio),
                profile.id,
            ));
        }

        if let Some(chart) = chart {
            output.push_str(&Self::chart_section("Tweet Activity", chart));
        }

        let mut rows = String::new();
        for post in timeline.posts.iter().take(RECENT_POSTS_LIMIT) {
            rows.push_str(&format!(
                "                <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&post.timestamp),
                escape(&post.text),
                post.like_count,
                post.retweet_count,
            ));
        }

        output.push_str(&format!(
            r#"        <div class="section">
            <h2>Recent Tweets</h2>
            <table>
                <tr><th>Date</th><th>Tweet</th><th>Likes</th><th>Retweets</th></tr>
{rows}            </table>
        </div>
"#,
            rows = rows,
        ));

        output
    }

    /// @ai:intent Top-level metadata keys with compact values
    /// @ai:effects pure
    fn metadata_section(metadata: &Map<String, Value>) -> String {
        let mut rows = String::new();

        for (key, value) in metadata {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            rows.push_str(&format!(
                "                <tr><td>{}</td><td><code>{}</code></td></tr>\n",
                escape(key),
                escape(&text),
            ));
        }

        format!(
            r#"        <div class="section">
            <h2>Profile Metadata (Social-Analyzer Results)</h2>
            <table>
                <tr><th>Key</th><th>Value</th></tr>
{rows}            </table>
        </div>
"#,
            rows = rows,
        )
    }

    fn chart_section(title: &str, chart: &RenderedChart) -> String {
        format!(
            r#"        <div class="section">
            <h2>{title}</h2>
            <img src="{src}" alt="{title}">
        </div>
"#,
            title = title,
            src = escape(&chart.relative_path),
        )
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlReporterTrait for HtmlReporter {
    /// @ai:intent Generate HTML report to file
    /// @ai:effects fs:write
    fn generate(
        &self,
        report: &Report,
        charts: &[RenderedChart],
        output_path: &Path,
    ) -> Result<()> {
        std::fs::write(output_path, self.render(report, charts))
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}

fn find_chart(charts: &[RenderedChart], kind: ChartKind) -> Option<&RenderedChart> {
    charts.iter().find(|c| c.kind == kind)
}

fn inline_css() -> &'static str {
    r#"
        body { font-family: Arial, sans-serif; margin: 20px; }
        h1, h2, h3 { color: #333; }
        .container { max-width: 1200px; margin: 0 auto; }
        .section { margin-bottom: 30px; border: 1px solid #ddd; padding: 20px; border-radius: 5px; }
        .platform-found { color: green; }
        .platform-not-found { color: red; }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 8px; border-bottom: 1px solid #ddd; }
        th { background-color: #f2f2f2; }
        img { max-width: 100%; height: auto; }
    "#
}

/// @ai:intent Escape text for HTML content and attributes
/// @ai:effects pure
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
