use chrono::Utc;
use crewmark_core::CrewmarkResult;
use std::path::{Path, PathBuf};

/// Artifact categories below the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Posts,
    Articles,
    Emails,
    Reports,
    Analytics,
}

impl Category {
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Posts => "posts",
            Category::Articles => "articles",
            Category::Emails => "emails",
            Category::Reports => "reports",
            Category::Analytics => "analytics",
        }
    }
}

/// The artifact output tree.
///
/// Filenames embed a creation timestamp, so repeated runs append new files.
/// Nothing is deduplicated or evicted.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.dir_name())
    }

    async fn ensure(&self, category: Category) -> CrewmarkResult<PathBuf> {
        let dir = self.category_dir(category);
        tokio::fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    /// Write a social post draft: `posts/<platform>-<timestamp>.md`.
    pub async fn write_post(
        &self,
        platform: &str,
        post_type: &str,
        content: &str,
    ) -> CrewmarkResult<PathBuf> {
        let dir = self.ensure(Category::Posts).await?;
        let now = Utc::now();
        let path = dir.join(format!("{}-{}.md", platform, now.format("%Y%m%d-%H%M%S")));

        let body = format!(
            "# {} Post\n\n**Type:** {}\n**Created:** {}\n**Platform:** {}\n\n---\n\n{}",
            platform.to_uppercase(),
            post_type,
            now.format("%Y-%m-%d %H:%M"),
            platform,
            content,
        );
        tokio::fs::write(&path, body).await?;
        Ok(path)
    }

    /// Write an SEO article with YAML front matter:
    /// `articles/<slugified-title>-<timestamp>.md`.
    pub async fn write_article(
        &self,
        title: &str,
        keywords: &str,
        content: &str,
    ) -> CrewmarkResult<PathBuf> {
        let dir = self.ensure(Category::Articles).await?;
        let now = Utc::now();
        let path = dir.join(format!(
            "{}-{}.md",
            slugify(title),
            now.format("%Y%m%d-%H%M%S")
        ));

        let body = format!(
            "---\ntitle: \"{}\"\nkeywords: \"{}\"\ndate: {}\n---\n\n{}",
            title,
            keywords,
            now.to_rfc3339(),
            content,
        );
        tokio::fs::write(&path, body).await?;
        Ok(path)
    }

    /// Write an email draft: `emails/seq<NN>-<timestamp>.md`.
    pub async fn write_email_draft(
        &self,
        subject: &str,
        sequence_position: u32,
        content: &str,
    ) -> CrewmarkResult<PathBuf> {
        let dir = self.ensure(Category::Emails).await?;
        let now = Utc::now();
        let path = dir.join(format!(
            "seq{:02}-{}.md",
            sequence_position,
            now.format("%Y%m%d-%H%M%S")
        ));

        let body = format!(
            "# Email Draft\n\n**Subject:** {}\n**Sequence Position:** {}\n**Created:** {}\n\n---\n\n{}",
            subject,
            sequence_position,
            now.format("%Y-%m-%d %H:%M"),
            content,
        );
        tokio::fs::write(&path, body).await?;
        Ok(path)
    }

    /// Write the daily performance report: `reports/daily-<YYYY-MM-DD>.md`.
    /// Date-keyed, so a second run the same day overwrites (last writer wins).
    pub async fn write_report(&self, report: &str) -> CrewmarkResult<PathBuf> {
        let dir = self.ensure(Category::Reports).await?;
        let date = Utc::now().format("%Y-%m-%d");
        let path = dir.join(format!("daily-{date}.md"));

        let body = format!("# Daily Marketing Report - {date}\n\n{report}");
        tokio::fs::write(&path, body).await?;
        Ok(path)
    }

    /// Read `analytics/latest_report.json`, if any run has produced one.
    pub async fn read_latest_analytics(&self) -> CrewmarkResult<Option<serde_json::Value>> {
        let path = self.category_dir(Category::Analytics).join("latest_report.json");
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// File-name-safe slug: alphanumerics, spaces, `-` and `_` kept, everything
/// else replaced with `_`, truncated to 50 characters.
pub fn slugify(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(50)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_replaces_punctuation() {
        assert_eq!(slugify("Best AI Tools: 2026!"), "Best AI Tools_ 2026_");
    }

    #[test]
    fn test_slugify_truncates() {
        let long = "a".repeat(80);
        assert_eq!(slugify(&long).len(), 50);
    }

    #[tokio::test]
    async fn test_write_post_creates_category_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(tmp.path());

        let path = layout
            .write_post("twitter", "text", "Ship early, ship often.")
            .await
            .unwrap();

        assert!(path.starts_with(tmp.path().join("posts")));
        let body = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(body.contains("# TWITTER Post"));
        assert!(body.contains("Ship early, ship often."));
    }

    #[tokio::test]
    async fn test_write_article_front_matter() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(tmp.path());

        let path = layout
            .write_article("AI Marketing 101", "ai, marketing", "Body text.")
            .await
            .unwrap();

        let body = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(body.starts_with("---\ntitle: \"AI Marketing 101\""));
        assert!(body.contains("keywords: \"ai, marketing\""));
    }

    #[tokio::test]
    async fn test_write_email_draft_zero_pads_position() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(tmp.path());

        let path = layout.write_email_draft("Welcome!", 3, "Hi.").await.unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("seq03-"));
    }

    #[tokio::test]
    async fn test_read_latest_analytics_missing_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(tmp.path());
        assert!(layout.read_latest_analytics().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_latest_analytics_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(tmp.path());
        let dir = layout.category_dir(Category::Analytics);
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(
            dir.join("latest_report.json"),
            r#"{"posts": {"impressions": 1200}}"#,
        )
        .await
        .unwrap();

        let data = layout.read_latest_analytics().await.unwrap().unwrap();
        assert_eq!(data["posts"]["impressions"], 1200);
    }
}
