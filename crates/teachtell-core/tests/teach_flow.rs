//! Teach mode end-to-end tests
//!
//! Course content is written to a temp directory, loaded, and driven through
//! progress tracking, step unlocking and highlighting with a real redb store.

use std::path::Path;

use tempfile::tempdir;
use teachtell_core::content::{build_content, load_course, CourseSettings, WeekMeta};
use teachtell_core::highlight::message_id;
use teachtell_core::{
    HighlightManager, HighlightOutcome, SectionKind, StepSequencer, Storage, TeachProgress,
    WeekStep,
};

const WEEK_ONE: &str = "\
# The Party

## Reading: The Party
Tim arrived at the party late. Nobody saw him leave. The lights went out at midnight.

## Vocabulary Exercise
Match the words with their meanings.

## Grammar
### Grammar Practice
Write five sentences in the past simple.
### Questions
Who left the party first?

## Before Next Week
Read the next chapter.
";

const WEEK_TWO: &str = "\
## Story
Secrets were everywhere. Fiona kept quiet.

## Writing Task
Describe the apartment.
";

async fn write_course(dir: &Path) -> Vec<WeekMeta> {
    tokio::fs::write(dir.join("week1.md"), WEEK_ONE).await.unwrap();
    tokio::fs::write(dir.join("week2.md"), WEEK_TWO).await.unwrap();
    vec![
        WeekMeta::new("week1", "Week 1 · The Party", "week1.md", 1),
        WeekMeta::new("week2", "Week 2 · Secrets & Shadows", "week2.md", 2),
    ]
}

#[tokio::test]
async fn test_course_loads_and_classifies() {
    let dir = tempdir().unwrap();
    let metas = write_course(dir.path()).await;

    let weeks = load_course(dir.path(), &metas, &CourseSettings::default()).await;
    assert_eq!(weeks.len(), 2);

    let week1 = &weeks[0];
    let kinds: Vec<SectionKind> = week1.sections.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Reading,
            SectionKind::Task,
            SectionKind::Task,
            SectionKind::Task,
            SectionKind::Info,
        ]
    );
    assert_eq!(week1.sections[2].id, "week1-grammar-practice");
    assert_eq!(
        week1.summary,
        "Tim arrived at the party late. Nobody saw him leave."
    );
    assert_eq!(weeks[1].tasks.len(), 1);
}

#[tokio::test]
async fn test_prebuilt_content_matches_markdown() {
    let dir = tempdir().unwrap();
    let metas = write_course(dir.path()).await;
    let settings = CourseSettings::default();

    let parsed = load_course(dir.path(), &metas, &settings).await;
    build_content(dir.path(), &metas, &settings).await.unwrap();

    tokio::fs::remove_file(dir.path().join("week1.md")).await.unwrap();
    let prebuilt = load_course(dir.path(), &metas, &settings).await;
    assert_eq!(parsed, prebuilt);
}

#[tokio::test]
async fn test_progress_survives_restart() {
    let dir = tempdir().unwrap();
    let metas = write_course(dir.path()).await;
    let weeks = load_course(dir.path(), &metas, &CourseSettings::default()).await;
    let db_path = dir.path().join("store.redb");

    let task_id = weeks[0].tasks[0].id.clone();
    {
        let mut progress = TeachProgress::new(Storage::new(&db_path).unwrap());
        progress.initialize(weeks.clone()).unwrap();
        progress.toggle_task("week1", &task_id, true).unwrap();
        progress.set_notes("week1", "Tim is hiding something.").unwrap();
        progress.set_current_week("week2").unwrap();
    }

    let mut progress = TeachProgress::new(Storage::new(&db_path).unwrap());
    progress.initialize(weeks).unwrap();
    assert_eq!(progress.current_week_id(), Some("week2"));
    assert!(progress.is_task_completed("week1", &task_id));
    assert_eq!(progress.notes("week1"), "Tim is hiding something.");

    let overall = progress.overall_progress();
    assert_eq!((overall.completed, overall.total), (1, 4));
    assert_eq!(overall.percent(), 25);
}

#[tokio::test]
async fn test_continue_reveals_one_step_at_a_time() {
    let dir = tempdir().unwrap();
    let metas = write_course(dir.path()).await;
    let weeks = load_course(dir.path(), &metas, &CourseSettings::default()).await;

    let mut steps = StepSequencer::for_week(&weeks[1]);
    assert_eq!(steps.visible(), &[WeekStep::Summary]);
    assert_eq!(steps.advance(), Some(&WeekStep::Section(0)));
    assert_eq!(steps.advance(), Some(&WeekStep::Section(1)));
    assert_eq!(steps.advance(), Some(&WeekStep::Notes));
    assert!(!steps.has_more());

    steps.reset(WeekStep::for_week(&weeks[0]));
    assert_eq!(steps.revealed(), 1);
    assert_eq!(steps.len(), 7);
}

#[tokio::test]
async fn test_highlights_follow_message_content() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("store.redb");
    let text = "Tim arrived at the party late.";
    let id = message_id(text);

    {
        let mut highlights = HighlightManager::load(Storage::new(&db_path).unwrap()).unwrap();
        assert_eq!(
            highlights.highlight_selection(&id, "arrived").unwrap(),
            HighlightOutcome::Added("arrived".into())
        );
    }

    // the same content maps to the same id after a restart
    let highlights = HighlightManager::load(Storage::new(&db_path).unwrap()).unwrap();
    let html = highlights.render_html(&message_id(text), "<p>Tim arrived at the party late.</p>");
    assert!(html.contains("data-word=\"arrived\""));
    assert!(html.contains(&format!("data-message-id=\"{id}\"")));
}
