//! Tests for the coordinator module.

use jiff::civil::date;
use tempfile::TempDir;

use super::*;
use crate::models::Category;
use crate::params::{
    ActivityCreate, CreatePlanning, DeletePlanning, GenerateTimeline, Id, ImportSuggestions,
    ListPlannings, MoveActivity, RebaseAnchor, UpdateActivity,
};
use crate::questionnaire::AnswerSet;
use crate::suggestions::RawSuggestion;

/// Helper function to create a test coordinator
async fn create_test_coordinator() -> (TempDir, Coordinator) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let coordinator = CoordinatorBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create coordinator");
    (temp_dir, coordinator)
}

fn create_params() -> CreatePlanning {
    CreatePlanning {
        title: "Nora & Sam".to_string(),
        wedding_date: "2026-06-20".to_string(),
        notes: Some("garden venue".to_string()),
    }
}

fn single_ceremony_answers() -> AnswerSet {
    let mut answers = AnswerSet::new();
    answers.insert("double_ceremonie", "non");
    answers.insert("coiffure", "coiffure simple");
    answers.insert("maquillage", "maquillage complet");
    answers.insert("heure_ceremonie", "15:00");
    answers.insert("ceremonie", "laique");
    answers.insert("cocktail", "cocktail simple");
    answers.insert("repas", "repas assis");
    answers
}

async fn generated_planning(coordinator: &Coordinator) -> u64 {
    let planning = coordinator
        .create_planning(&create_params())
        .await
        .expect("Failed to create planning");
    let outcome = coordinator
        .generate_timeline(&GenerateTimeline {
            planning_id: planning.id,
            answers: single_ceremony_answers(),
            keep_existing: false,
        })
        .await
        .expect("Failed to generate timeline");
    assert!(outcome.saved);
    planning.id
}

#[tokio::test]
async fn test_create_and_list_plannings() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;

    let planning = coordinator
        .create_planning(&create_params())
        .await
        .expect("Failed to create planning");
    assert_eq!(planning.title, "Nora & Sam");
    assert_eq!(planning.wedding_date, date(2026, 6, 20));

    let summaries = coordinator
        .list_plannings_summary(&ListPlannings { archived: false })
        .await
        .expect("Failed to list plannings");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].title, "Nora & Sam");
    assert_eq!(summaries[0].notes, Some("garden venue".to_string()));
}

#[tokio::test]
async fn test_create_planning_rejects_invalid_input() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;

    let bad_date = CreatePlanning {
        title: "Nora & Sam".to_string(),
        wedding_date: "someday".to_string(),
        notes: None,
    };
    assert!(coordinator.create_planning(&bad_date).await.is_err());

    let empty_title = CreatePlanning {
        title: "  ".to_string(),
        wedding_date: "2026-06-20".to_string(),
        notes: None,
    };
    assert!(coordinator.create_planning(&empty_title).await.is_err());
}

#[tokio::test]
async fn test_generate_timeline_pins_ceremony() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;
    let planning_id = generated_planning(&coordinator).await;

    let timeline = coordinator
        .timeline(&Id { id: planning_id })
        .await
        .expect("Failed to load timeline");

    let ceremony = timeline
        .iter()
        .find(|a| a.category == Category::Ceremony)
        .expect("ceremony should be generated");
    assert_eq!(ceremony.start_time, date(2026, 6, 20).at(15, 0, 0, 0));
    assert!(ceremony.is_highlight);

    // The preparation window opens three hours before the ceremony.
    assert_eq!(timeline.day_start(), Some(date(2026, 6, 20).at(12, 0, 0, 0)));
}

#[tokio::test]
async fn test_generate_twice_replaces_by_default() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;
    let planning_id = generated_planning(&coordinator).await;

    let first = coordinator
        .timeline(&Id { id: planning_id })
        .await
        .expect("Failed to load timeline");

    let outcome = coordinator
        .generate_timeline(&GenerateTimeline {
            planning_id,
            answers: single_ceremony_answers(),
            keep_existing: false,
        })
        .await
        .expect("Failed to regenerate timeline");

    assert_eq!(outcome.timeline.len(), first.len());
}

#[tokio::test]
async fn test_add_activity_with_position_hint() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;
    let planning_id = generated_planning(&coordinator).await;
    let before = coordinator
        .timeline(&Id { id: planning_id })
        .await
        .expect("Failed to load timeline");

    let (activity, outcome) = coordinator
        .add_activity(&ActivityCreate {
            planning_id,
            title: "Premier regard".to_string(),
            category: "photos".to_string(),
            duration_minutes: 20,
            position: Some(1),
            ..Default::default()
        })
        .await
        .expect("Failed to add activity");

    assert_eq!(activity.category, Category::Photos);
    assert_eq!(outcome.timeline.len(), before.len() + 1);
    assert!(outcome.saved);

    // The edit persisted: a fresh load shows the same schedule.
    let reloaded = coordinator
        .timeline(&Id { id: planning_id })
        .await
        .expect("Failed to reload timeline");
    assert_eq!(reloaded.len(), outcome.timeline.len());
    for (stored, edited) in reloaded.iter().zip(outcome.timeline.iter()) {
        assert_eq!(stored.id, edited.id);
        assert_eq!(stored.start_time, edited.start_time);
        assert_eq!(stored.end_time, edited.end_time);
    }
}

#[tokio::test]
async fn test_update_activity_applies_duration_floor() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;
    let planning_id = generated_planning(&coordinator).await;
    let timeline = coordinator
        .timeline(&Id { id: planning_id })
        .await
        .expect("Failed to load timeline");
    let target = timeline.get(0).expect("timeline should not be empty");

    let (updated, _outcome) = coordinator
        .update_activity(&UpdateActivity {
            id: target.id,
            duration_minutes: Some(2),
            ..Default::default()
        })
        .await
        .expect("Failed to update activity");

    assert_eq!(updated.duration_minutes, 5);
}

#[tokio::test]
async fn test_move_activity_reorders_and_persists() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;
    let planning_id = generated_planning(&coordinator).await;
    let before = coordinator
        .timeline(&Id { id: planning_id })
        .await
        .expect("Failed to load timeline");
    let moved_id = before.get(1).expect("need at least two activities").id;

    let outcome = coordinator
        .move_activity(&MoveActivity {
            planning_id,
            from: 1,
            to: 0,
        })
        .await
        .expect("Failed to move activity");

    assert_eq!(outcome.timeline.get(0).map(|a| a.id), Some(moved_id));
    assert_eq!(outcome.timeline.day_start(), before.day_start());
}

#[tokio::test]
async fn test_remove_activity_closes_gap() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;
    let planning_id = generated_planning(&coordinator).await;
    let before = coordinator
        .timeline(&Id { id: planning_id })
        .await
        .expect("Failed to load timeline");
    let removed = before.get(1).expect("need at least two activities").clone();

    let (deleted, outcome) = coordinator
        .remove_activity(&Id { id: removed.id })
        .await
        .expect("Failed to remove activity");

    assert_eq!(deleted.id, removed.id);
    assert_eq!(outcome.timeline.len(), before.len() - 1);
    assert!(outcome.timeline.position_of(removed.id).is_none());

    let reloaded = coordinator
        .timeline(&Id { id: planning_id })
        .await
        .expect("Failed to reload timeline");
    assert_eq!(reloaded.len(), before.len() - 1);
}

#[tokio::test]
async fn test_rebase_timeline_slides_everything() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;
    let planning_id = generated_planning(&coordinator).await;
    let before = coordinator
        .timeline(&Id { id: planning_id })
        .await
        .expect("Failed to load timeline");

    let outcome = coordinator
        .rebase_timeline(&RebaseAnchor {
            planning_id,
            new_anchor: "16:30".to_string(),
        })
        .await
        .expect("Failed to rebase timeline");

    assert_eq!(
        outcome.timeline.anchor_time(),
        Some(date(2026, 6, 20).at(16, 30, 0, 0))
    );
    for (old, new) in before.iter().zip(outcome.timeline.iter()) {
        assert_eq!(old.id, new.id);
        assert_eq!(old.duration_minutes, new.duration_minutes);
        assert_eq!(
            new.start_time,
            crate::models::activity::add_minutes(old.start_time, 90)
        );
    }
}

#[tokio::test]
async fn test_import_suggestions_drops_malformed() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;
    let planning_id = generated_planning(&coordinator).await;
    let before = coordinator
        .timeline(&Id { id: planning_id })
        .await
        .expect("Failed to load timeline");

    let suggestions = vec![
        RawSuggestion {
            title: "Lancer de bouquet".to_string(),
            duration_minutes: Some(15),
            category: Some("custom".to_string()),
            ..Default::default()
        },
        RawSuggestion {
            title: String::new(),
            duration_minutes: Some(15),
            ..Default::default()
        },
    ];

    let (merged, outcome) = coordinator
        .import_suggestions(&ImportSuggestions {
            planning_id,
            suggestions,
        })
        .await
        .expect("Failed to import suggestions");

    assert_eq!(merged, 1);
    assert_eq!(outcome.timeline.len(), before.len() + 1);
}

#[tokio::test]
async fn test_archive_and_unarchive() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;
    let planning = coordinator
        .create_planning(&create_params())
        .await
        .expect("Failed to create planning");

    coordinator
        .archive_planning(&Id { id: planning.id })
        .await
        .expect("Failed to archive");

    let active = coordinator
        .list_plannings_summary(&ListPlannings { archived: false })
        .await
        .expect("Failed to list active");
    assert!(active.is_empty());

    let archived = coordinator
        .list_plannings_summary(&ListPlannings { archived: true })
        .await
        .expect("Failed to list archived");
    assert_eq!(archived.len(), 1);

    coordinator
        .unarchive_planning(&Id { id: planning.id })
        .await
        .expect("Failed to unarchive");
    let active = coordinator
        .list_plannings_summary(&ListPlannings { archived: false })
        .await
        .expect("Failed to list active");
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn test_delete_planning_requires_confirmation() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;
    let planning = coordinator
        .create_planning(&create_params())
        .await
        .expect("Failed to create planning");

    let unconfirmed = coordinator
        .delete_planning(&DeletePlanning {
            id: planning.id,
            confirmed: false,
        })
        .await;
    assert!(unconfirmed.is_err());

    let deleted = coordinator
        .delete_planning(&DeletePlanning {
            id: planning.id,
            confirmed: true,
        })
        .await
        .expect("Failed to delete planning");
    assert_eq!(deleted.id, planning.id);

    let shown = coordinator
        .show_planning_with_activities(&Id { id: planning.id })
        .await
        .expect("Failed to query planning");
    assert!(shown.is_none());
}

#[tokio::test]
async fn test_timeline_for_unknown_planning() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;
    let result = coordinator.timeline(&Id { id: 999 }).await;
    assert!(matches!(
        result,
        Err(crate::error::TimelineError::PlanningNotFound { id: 999 })
    ));
}

#[tokio::test]
async fn test_debounced_save_lands() {
    let (_temp_dir, coordinator) = create_test_coordinator().await;
    let planning_id = generated_planning(&coordinator).await;
    let timeline = coordinator
        .timeline(&Id { id: planning_id })
        .await
        .expect("Failed to load timeline");

    // Rebase in memory only, then save through the debouncer.
    let rebased = crate::schedule::mutator::rebase(
        &timeline,
        date(2026, 6, 20).at(17, 0, 0, 0),
    );
    coordinator.save_timeline_debounced(planning_id, rebased.clone());
    coordinator.debouncer.flush().await;

    let reloaded = coordinator
        .timeline(&Id { id: planning_id })
        .await
        .expect("Failed to reload timeline");
    assert_eq!(reloaded.anchor_time(), rebased.anchor_time());
}
