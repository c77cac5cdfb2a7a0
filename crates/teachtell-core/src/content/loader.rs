use std::path::{Path, PathBuf};

use super::parser::parse_week_markdown;
use super::types::{CourseSettings, PrebuiltContent, Week, WeekMeta};
use crate::error::{ClientError, ClientResult};

/// Prebuilt content location, relative to the content directory.
pub const PREBUILT_CONTENT_PATH: &str = "data/content.json";

/// Read and parse one week's markdown file.
pub async fn load_week(
    content_dir: &Path,
    meta: &WeekMeta,
    settings: &CourseSettings,
) -> ClientResult<Week> {
    let path = content_dir.join(&meta.source);
    let markdown = tokio::fs::read_to_string(&path).await.map_err(|e| {
        ClientError::Content(format!("Failed to load {}: {}", path.display(), e))
    })?;
    Ok(parse_week_markdown(&markdown, meta, settings))
}

async fn load_prebuilt(path: &Path) -> Option<Vec<Week>> {
    let raw = tokio::fs::read(path).await.ok()?;
    match serde_json::from_slice::<PrebuiltContent>(&raw) {
        Ok(content) if !content.weeks.is_empty() => {
            tracing::debug!(
                path = %path.display(),
                weeks = content.weeks.len(),
                generated_at = content.generated_at.as_deref().unwrap_or("unknown"),
                "Using prebuilt content"
            );
            Some(content.weeks)
        }
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Prebuilt content unreadable, parsing markdown");
            None
        }
    }
}

/// Load every week of the course, ordered by `order`.
///
/// Prebuilt `data/content.json` is used when it exists and lists weeks;
/// otherwise each markdown file is parsed. A week whose file cannot be read
/// is kept as a placeholder with its `error` set.
pub async fn load_course(
    content_dir: &Path,
    weeks: &[WeekMeta],
    settings: &CourseSettings,
) -> Vec<Week> {
    if let Some(mut prebuilt) = load_prebuilt(&content_dir.join(PREBUILT_CONTENT_PATH)).await {
        prebuilt.sort_by_key(|w| w.order);
        return prebuilt;
    }

    let mut loaded = Vec::with_capacity(weeks.len());
    for meta in weeks {
        match load_week(content_dir, meta, settings).await {
            Ok(week) => loaded.push(week),
            Err(e) => {
                tracing::error!(week = %meta.id, error = %e, "Failed to load week");
                loaded.push(Week::failed(meta, e.to_string()));
            }
        }
    }
    loaded.sort_by_key(|w| w.order);
    loaded
}

/// Parse every week's markdown and write `data/content.json`.
///
/// Fails on the first unreadable week. Returns the written path.
pub async fn build_content(
    content_dir: &Path,
    weeks: &[WeekMeta],
    settings: &CourseSettings,
) -> ClientResult<PathBuf> {
    let mut parsed = Vec::with_capacity(weeks.len());
    for meta in weeks {
        parsed.push(load_week(content_dir, meta, settings).await?);
    }
    parsed.sort_by_key(|w| w.order);

    let content = PrebuiltContent {
        generated_at: Some(chrono::Utc::now().to_rfc3339()),
        weeks: parsed,
    };

    let output = content_dir.join(PREBUILT_CONTENT_PATH);
    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_vec_pretty(&content)?;
    tokio::fs::write(&output, json).await?;

    tracing::info!(path = %output.display(), weeks = content.weeks.len(), "Content built");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn metas() -> Vec<WeekMeta> {
        vec![
            WeekMeta::new("week2", "Week 2", "week2.md", 2),
            WeekMeta::new("week1", "Week 1", "week1.md", 1),
        ]
    }

    #[tokio::test]
    async fn test_missing_week_becomes_placeholder() {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join("week1.md"), "## Story\nIt began.")
            .await
            .unwrap();

        let weeks = load_course(dir.path(), &metas(), &CourseSettings::default()).await;
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].id, "week1");
        assert!(weeks[0].error.is_none());
        assert_eq!(weeks[1].id, "week2");
        assert!(weeks[1].error.as_deref().unwrap().contains("Failed to load"));
        assert!(weeks[1].sections.is_empty());
    }

    #[tokio::test]
    async fn test_build_then_load_prefers_prebuilt() {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join("week1.md"), "## Story\nOne.")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("week2.md"), "## Story\nTwo.")
            .await
            .unwrap();

        let path = build_content(dir.path(), &metas(), &CourseSettings::default())
            .await
            .unwrap();
        assert!(path.ends_with("data/content.json"));

        // markdown changes are ignored once content.json exists
        tokio::fs::write(dir.path().join("week1.md"), "## Story\nChanged.")
            .await
            .unwrap();
        let weeks = load_course(dir.path(), &metas(), &CourseSettings::default()).await;
        assert_eq!(weeks[0].summary, "One.");
    }

    #[tokio::test]
    async fn test_build_fails_on_missing_week() {
        let dir = tempdir().unwrap();
        let err = build_content(dir.path(), &metas(), &CourseSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Content(_)));
    }
}
