//! Course content: weekly markdown parsed into sections and tasks.

mod loader;
mod parser;
mod types;

pub use loader::{build_content, load_course, load_week, PREBUILT_CONTENT_PATH};
pub use parser::{classify_heading, extract_summary, parse_week_markdown, slugify};
pub use types::{
    default_weeks, CourseSettings, PrebuiltContent, Section, SectionCategory, SectionKind, Week,
    WeekMeta,
};
