//! Week markdown → typed sections.
//!
//! `#` is the week title, `##` opens a section and `###` splits a section
//! into separately classified parts.

use std::collections::HashMap;

use super::types::{CourseSettings, Section, SectionCategory, SectionKind, Week, WeekMeta};

/// Lowercase, drop anything but word characters, whitespace and hyphens, and
/// join words with single hyphens.
pub fn slugify(text: &str) -> String {
    let cleaned: String = text
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(cleaned.len());
    for ch in cleaned.chars() {
        let ch = if ch.is_whitespace() { '-' } else { ch };
        if ch == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(ch);
    }
    slug
}

/// Classify a heading. Reading patterns take precedence over task patterns.
pub fn classify_heading(heading: &str, settings: &CourseSettings) -> (SectionKind, SectionCategory) {
    let normalized = heading.to_lowercase();
    let matches = |patterns: &[String]| patterns.iter().any(|p| normalized.contains(p.as_str()));

    if matches(&settings.reading_heading_patterns) {
        return (SectionKind::Reading, SectionCategory::Reading);
    }

    if matches(&settings.task_heading_patterns) {
        let category = if normalized.contains("vocabulary") {
            SectionCategory::Vocabulary
        } else if normalized.contains("grammar") {
            SectionCategory::Grammar
        } else if normalized.contains("writing") {
            SectionCategory::Writing
        } else if normalized.contains("question") {
            SectionCategory::Questions
        } else {
            SectionCategory::Exercise
        };
        return (SectionKind::Task, category);
    }

    (SectionKind::Info, SectionCategory::Info)
}

/// Split prose into sentences after `.`, `!` or `?` followed by whitespace.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let end = idx + ch.len_utf8();
        let mut next_start = end;
        while let Some(&(ws_idx, ws)) = chars.peek() {
            if !ws.is_whitespace() {
                break;
            }
            next_start = ws_idx + ws.len_utf8();
            chars.next();
        }
        if next_start > end {
            sentences.push(&text[start..end]);
            start = next_start;
        }
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences.into_iter().filter(|s| !s.is_empty()).collect()
}

/// First `limit` sentences of a section, with line breaks folded.
pub fn extract_summary(section: Option<&Section>, limit: usize) -> String {
    let Some(section) = section.filter(|s| !s.content.is_empty()) else {
        return String::new();
    };

    let folded = section
        .content
        .split('\n')
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let folded = folded.trim();

    split_sentences(folded)
        .into_iter()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}

struct RawSection {
    heading: String,
    lines: Vec<String>,
}

struct Segment {
    heading: String,
    content: String,
}

fn split_segments(section: &RawSection) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut active_heading = section.heading.clone();
    let mut buffer: Vec<&str> = Vec::new();

    let mut flush = |heading: &str, buffer: &mut Vec<&str>| {
        let content = buffer.join("\n").trim().to_string();
        buffer.clear();
        if !content.is_empty() {
            segments.push(Segment {
                heading: heading.to_string(),
                content,
            });
        }
    };

    for line in &section.lines {
        if let Some(sub) = line.strip_prefix("###") {
            if sub.starts_with(char::is_whitespace) && !sub.trim().is_empty() {
                flush(&active_heading, &mut buffer);
                active_heading = sub.trim().to_string();
                continue;
            }
        }
        buffer.push(line);
    }
    flush(&active_heading, &mut buffer);

    if segments.is_empty() {
        segments.push(Segment {
            heading: section.heading.clone(),
            content: section.lines.join("\n").trim().to_string(),
        });
    }
    segments
}

/// Parse one week of markdown.
pub fn parse_week_markdown(markdown: &str, meta: &WeekMeta, settings: &CourseSettings) -> Week {
    let mut title = meta.title.clone();
    let mut raw_sections: Vec<RawSection> = Vec::new();
    let mut current: Option<RawSection> = None;

    for line in markdown.lines() {
        if let Some(rest) = line.strip_prefix("# ") {
            if title.is_empty() {
                title = rest.trim().to_string();
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("## ") {
            if let Some(done) = current.take() {
                raw_sections.push(done);
            }
            current = Some(RawSection {
                heading: rest.trim().to_string(),
                lines: Vec::new(),
            });
            continue;
        }

        if let Some(section) = current.as_mut() {
            section.lines.push(line.to_string());
        }
    }
    if let Some(done) = current.take() {
        raw_sections.push(done);
    }

    let mut order: u32 = 0;
    let mut slug_counts: HashMap<String, u32> = HashMap::new();
    let mut sections = Vec::new();

    for raw in &raw_sections {
        for segment in split_segments(raw) {
            let (kind, category) = classify_heading(&segment.heading, settings);

            let mut slug = slugify(&segment.heading);
            if slug.is_empty() {
                slug = format!("section-{order}");
            }
            let count = slug_counts.entry(slug.clone()).or_insert(0);
            *count += 1;
            if *count > 1 {
                slug = format!("{slug}-{count}");
            }

            sections.push(Section {
                id: format!("{}-{}", meta.id, slug),
                heading: segment.heading,
                content: segment.content,
                kind,
                category,
                order,
            });
            order += 1;
        }
    }

    let tasks: Vec<Section> = sections
        .iter()
        .filter(|s| s.kind == SectionKind::Task)
        .cloned()
        .collect();
    let reading_sections: Vec<Section> = sections
        .iter()
        .filter(|s| s.kind == SectionKind::Reading)
        .cloned()
        .collect();

    let reference = reading_sections
        .iter()
        .find(|s| !s.heading.to_lowercase().contains("vocabulary"))
        .or_else(|| reading_sections.first())
        .or_else(|| sections.iter().find(|s| s.kind == SectionKind::Info));

    let summary = extract_summary(reference, settings.summary_sentence_limit);
    let preview = reference
        .map(|s| s.content.chars().take(settings.max_reading_preview_chars).collect())
        .unwrap_or_default();

    if title.is_empty() {
        title = meta.id.clone();
    }

    tracing::debug!(
        week = %meta.id,
        sections = sections.len(),
        tasks = tasks.len(),
        "Parsed week"
    );

    Week {
        id: meta.id.clone(),
        title,
        order: meta.order,
        source: Some(meta.source.clone()),
        sections,
        tasks,
        reading_sections,
        summary,
        preview,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> WeekMeta {
        WeekMeta::new("week1", "Week 1 · The Party", "week1_the_party.md", 1)
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Reading: The Party!"), "reading-the-party");
        assert_eq!(slugify("  Grammar -- Past   Simple "), "grammar-past-simple");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn test_classify_heading() {
        let settings = CourseSettings::default();
        assert_eq!(
            classify_heading("Reading Text", &settings),
            (SectionKind::Reading, SectionCategory::Reading)
        );
        // reading patterns win over task patterns
        assert_eq!(
            classify_heading("Story vocabulary", &settings),
            (SectionKind::Reading, SectionCategory::Reading)
        );
        assert_eq!(
            classify_heading("Vocabulary Exercise", &settings),
            (SectionKind::Task, SectionCategory::Vocabulary)
        );
        assert_eq!(
            classify_heading("Grammar focus", &settings),
            (SectionKind::Task, SectionCategory::Grammar)
        );
        assert_eq!(
            classify_heading("Writing task", &settings),
            (SectionKind::Task, SectionCategory::Writing)
        );
        assert_eq!(
            classify_heading("Discussion Questions", &settings),
            (SectionKind::Task, SectionCategory::Questions)
        );
        assert_eq!(
            classify_heading("Final Task", &settings),
            (SectionKind::Task, SectionCategory::Exercise)
        );
        assert_eq!(
            classify_heading("Before you start", &settings),
            (SectionKind::Info, SectionCategory::Info)
        );
    }

    #[test]
    fn test_summary_sentences() {
        let section = Section {
            id: "w-s".into(),
            heading: "Story".into(),
            content: "Tim arrived late.\nThe music was loud! Who left first? Nobody knows.".into(),
            kind: SectionKind::Reading,
            category: SectionCategory::Reading,
            order: 0,
        };
        assert_eq!(
            extract_summary(Some(&section), 2),
            "Tim arrived late. The music was loud!"
        );
        assert_eq!(extract_summary(None, 2), "");
    }

    #[test]
    fn test_parse_week_sections_and_subsections() {
        let markdown = "\
# The Party

Intro text before any section is ignored.

## Reading: The Party
Tim arrived late. Everyone noticed. Then the lights went out.

## Exercises
### Vocabulary
Match the words.
### Grammar
Put the verbs in the past.

## Exercises
Another exercise block.
";
        let week = parse_week_markdown(markdown, &meta(), &CourseSettings::default());

        assert_eq!(week.title, "Week 1 · The Party");
        let ids: Vec<&str> = week.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "week1-reading-the-party",
                "week1-vocabulary",
                "week1-grammar",
                "week1-exercises",
            ]
        );
        let orders: Vec<u32> = week.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);

        assert_eq!(week.tasks.len(), 3);
        assert_eq!(week.reading_sections.len(), 1);
        assert_eq!(week.summary, "Tim arrived late. Everyone noticed.");
        assert!(week.preview.starts_with("Tim arrived late."));
    }

    #[test]
    fn test_duplicate_headings_get_suffixes() {
        let markdown = "## Task\nOne\n## Task\nTwo\n## Task\nThree\n";
        let week = parse_week_markdown(markdown, &meta(), &CourseSettings::default());
        let ids: Vec<&str> = week.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["week1-task", "week1-task-2", "week1-task-3"]);
    }

    #[test]
    fn test_title_from_markdown_when_meta_empty() {
        let meta = WeekMeta::new("week9", "", "week9.md", 9);
        let week = parse_week_markdown("# Bonus Week\n## Info\nHello.", &meta, &CourseSettings::default());
        assert_eq!(week.title, "Bonus Week");
        assert_eq!(week.summary, "Hello.");
    }

    #[test]
    fn test_empty_section_is_kept() {
        let week = parse_week_markdown("## ???\n\n", &meta(), &CourseSettings::default());
        assert_eq!(week.sections.len(), 1);
        assert_eq!(week.sections[0].id, "week1-section-0");
        assert_eq!(week.sections[0].content, "");
    }
}
