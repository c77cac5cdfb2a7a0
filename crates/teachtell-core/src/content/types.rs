use serde::{Deserialize, Serialize};

/// How a section is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Reading,
    Task,
    Info,
}

impl SectionKind {
    /// Sender label used when the section is shown as a message.
    pub fn sender(&self) -> &'static str {
        match self {
            SectionKind::Task => "Weekly Mission",
            SectionKind::Reading => "Story",
            SectionKind::Info => "Mentor",
        }
    }
}

/// Finer classification, shown as a badge on tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionCategory {
    Reading,
    Vocabulary,
    Grammar,
    Writing,
    Questions,
    Exercise,
    Info,
}

impl SectionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SectionCategory::Reading => "Reading",
            SectionCategory::Vocabulary => "Vocabulary",
            SectionCategory::Grammar => "Grammar",
            SectionCategory::Writing => "Writing",
            SectionCategory::Questions => "Questions",
            SectionCategory::Exercise => "Exercise",
            SectionCategory::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// `<week id>-<slug>`, unique within a week
    pub id: String,
    pub heading: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub category: SectionCategory,
    pub order: u32,
}

/// A week of course content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub tasks: Vec<Section>,
    #[serde(default)]
    pub reading_sections: Vec<Section>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub preview: String,
    /// Set when the week's source could not be loaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Week {
    /// Placeholder for a week whose source failed to load.
    pub fn failed(meta: &WeekMeta, error: impl Into<String>) -> Self {
        Self {
            id: meta.id.clone(),
            title: meta.title.clone(),
            order: meta.order,
            source: Some(meta.source.clone()),
            sections: Vec::new(),
            tasks: Vec::new(),
            reading_sections: Vec::new(),
            summary: String::new(),
            preview: String::new(),
            error: Some(error.into()),
        }
    }

    /// Sections sorted by their order.
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }
}

/// Where a week comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekMeta {
    pub id: String,
    /// Display title; an empty title is taken from the markdown `#` heading
    pub title: String,
    /// Markdown file name relative to the content directory
    pub source: String,
    pub order: i64,
}

impl WeekMeta {
    pub fn new(id: &str, title: &str, source: &str, order: i64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            source: source.to_string(),
            order,
        }
    }
}

/// The weeks of the detective course.
pub fn default_weeks() -> Vec<WeekMeta> {
    vec![
        WeekMeta::new("week1", "Week 1 · The Party", "week1_the_party.md", 1),
        WeekMeta::new(
            "week2",
            "Week 2 · Secrets & Shadows",
            "week2_secrets_and_shadows.md",
            2,
        ),
        WeekMeta::new("week3", "Week 3 · The Attack", "week3_the_attack.md", 3),
        WeekMeta::new(
            "week4",
            "Week 4 · The Investigation",
            "week4_the_investigation.md",
            4,
        ),
    ]
}

/// Heading classification and summary settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseSettings {
    pub summary_sentence_limit: usize,
    pub max_reading_preview_chars: usize,
    pub task_heading_patterns: Vec<String>,
    pub reading_heading_patterns: Vec<String>,
}

impl Default for CourseSettings {
    fn default() -> Self {
        Self {
            summary_sentence_limit: 2,
            max_reading_preview_chars: 220,
            task_heading_patterns: ["exercise", "writing", "question", "task", "grammar", "vocabulary"]
                .into_iter()
                .map(String::from)
                .collect(),
            reading_heading_patterns: ["reading", "story", "text"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Contents of the prebuilt `data/content.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrebuiltContent {
    #[serde(rename = "generatedAt", default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub weeks: Vec<Week>,
}
