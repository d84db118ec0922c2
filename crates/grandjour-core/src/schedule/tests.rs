//! Tests for the scheduling engine.

use jiff::civil::{date, DateTime};
use jiff::Timestamp;

use super::*;
use crate::models::{Activity, ActivityPatch, Category};
use crate::schedule::mutator;

fn at(hour: i8, minute: i8) -> DateTime {
    date(2026, 6, 20).at(hour, minute, 0, 0)
}

fn activity(id: u64, title: &str, category: Category, duration_minutes: i64) -> Activity {
    Activity {
        id,
        planning_id: 1,
        title: title.to_string(),
        category,
        start_time: at(0, 0),
        end_time: at(0, 0),
        duration_minutes,
        fixed_start: None,
        is_highlight: category.is_ceremony(),
        notes: None,
        assigned_to: vec![],
        sort_order: 0,
        created_at: Timestamp::from_second(1_750_000_000).unwrap(),
        updated_at: Timestamp::from_second(1_750_000_000).unwrap(),
    }
}

fn pinned(mut a: Activity, start: DateTime) -> Activity {
    a.fixed_start = Some(start);
    a
}

/// Four back-to-back custom activities of 30 minutes each, built from a
/// 09:00 fallback anchor. With the 5-minute custom buffer they occupy
/// 09:00-09:30, 09:35-10:05, 10:10-10:40, 10:45-11:15.
fn sequential_timeline(count: u64) -> Timeline {
    let activities = (1..=count)
        .map(|id| activity(id, &format!("Task {id}"), Category::Custom, 30))
        .collect();
    build_timeline(activities, &BuildOptions::new(at(9, 0)))
}

fn assert_invariants(timeline: &Timeline) {
    // No activity runs backward, and the end always matches the duration.
    for a in timeline {
        assert!(a.end_time >= a.start_time, "{} runs backward", a.title);
        assert_eq!(
            a.end_time,
            crate::models::activity::add_minutes(a.start_time, a.duration_minutes),
            "{} end does not match its duration",
            a.title
        );
    }
    // Output ordering guarantee: sorted by start ascending.
    for pair in timeline.activities().windows(2) {
        assert!(pair[0].start_time <= pair[1].start_time);
    }
}

#[test]
fn test_scenario_single_ceremony_prep_window() {
    let activities = vec![
        activity(1, "Coiffure", Category::Preparation, 60),
        activity(2, "Maquillage", Category::Preparation, 45),
        activity(3, "Habillage", Category::Preparation, 30),
        pinned(activity(4, "Ceremonie laique", Category::Ceremony, 60), at(15, 0)),
    ];

    let timeline = build_timeline(activities, &BuildOptions::new(at(8, 0)));
    assert_invariants(&timeline);

    let acts = timeline.activities();
    assert_eq!(acts[0].start_time, at(12, 0));
    assert_eq!(acts[0].end_time, at(13, 0));
    assert_eq!(acts[1].start_time, at(13, 5));
    assert_eq!(acts[1].end_time, at(13, 50));
    assert_eq!(acts[2].start_time, at(13, 55));
    assert_eq!(acts[2].end_time, at(14, 25));
    // Idle gap until the pinned ceremony, then the ceremony itself.
    assert_eq!(acts[3].start_time, at(15, 0));
    assert_eq!(acts[3].end_time, at(16, 0));
}

#[test]
fn test_scenario_dual_ceremony_pins_both() {
    let activities = vec![
        activity(1, "Preparatifs", Category::Preparation, 60),
        activity(2, "Trajet 1", Category::Travel(1), 20),
        pinned(activity(3, "Ceremonie laique", Category::Ceremony, 60), at(11, 0)),
        activity(4, "Trajet 2", Category::Travel(2), 20),
        activity(5, "Trajet 3", Category::Travel(3), 20),
        activity(6, "Preparatifs 2", Category::PreparationSecond, 30),
        activity(7, "Trajet 4", Category::Travel(4), 20),
        pinned(
            activity(8, "Ceremonie religieuse", Category::CeremonySecond, 90),
            at(16, 0),
        ),
        activity(9, "Photos de groupe", Category::Photos, 30),
    ];

    // Feed the builder a shuffled order; precedence fixes it.
    let mut shuffled = activities.clone();
    shuffled.reverse();

    let timeline = build_timeline(shuffled, &BuildOptions::new(at(8, 0)));
    assert_invariants(&timeline);

    // Both pins are honored exactly regardless of input order.
    let first = timeline
        .iter()
        .find(|a| a.category == Category::Ceremony)
        .unwrap();
    let second = timeline
        .iter()
        .find(|a| a.category == Category::CeremonySecond)
        .unwrap();
    assert_eq!(first.start_time, at(11, 0));
    assert_eq!(second.start_time, at(16, 0));

    // Travel legs chain with zero buffer after the first ceremony's
    // 15-minute settle buffer: 12:15-12:35 then 12:35-12:55.
    let leg2 = timeline.iter().find(|a| a.id == 4).unwrap();
    let leg3 = timeline.iter().find(|a| a.id == 5).unwrap();
    assert_eq!(leg2.start_time, at(12, 15));
    assert_eq!(leg3.start_time, at(12, 35));
}

#[test]
fn test_build_respects_buffers_between_followers() {
    let timeline = sequential_timeline(4);
    assert_invariants(&timeline);

    // Every non-pinned follower starts at least buffer minutes after
    // its predecessor's end.
    for pair in timeline.activities().windows(2) {
        let gap_floor = crate::models::activity::add_minutes(
            pair[0].end_time,
            pair[0].category.buffer_after_minutes(),
        );
        assert!(pair[1].start_time >= gap_floor);
    }
}

#[test]
fn test_build_without_anchor_uses_fallback() {
    let timeline = sequential_timeline(2);
    assert_eq!(timeline.day_start(), Some(at(9, 0)));
    assert_eq!(timeline.anchor_time(), None);
}

#[test]
fn test_build_empty_input() {
    let timeline = build_timeline(vec![], &BuildOptions::new(at(9, 0)));
    assert!(timeline.is_empty());
    assert_eq!(timeline.day_start(), None);
}

#[test]
fn test_build_is_deterministic() {
    // Same input, same output.
    let make = || {
        vec![
            activity(1, "Coiffure", Category::Preparation, 60),
            pinned(activity(2, "Ceremonie", Category::Ceremony, 60), at(14, 0)),
            activity(3, "Cocktail", Category::Cocktail, 90),
        ]
    };
    let options = BuildOptions::new(at(8, 0));
    assert_eq!(
        build_timeline(make(), &options),
        build_timeline(make(), &options)
    );
}

#[test]
fn test_build_pin_earlier_than_cursor_is_honored() {
    // Preparations long enough to overrun the pinned ceremony start. The
    // pin wins even though the schedules now overlap.
    let activities = vec![
        activity(1, "Coiffure", Category::Preparation, 240),
        pinned(activity(2, "Ceremonie", Category::Ceremony, 60), at(15, 0)),
    ];

    let timeline = build_timeline(activities, &BuildOptions::new(at(8, 0)));
    let acts = timeline.activities();
    // Prep window opens at 12:00 and the prep runs until 16:00.
    assert_eq!(acts[0].start_time, at(12, 0));
    assert_eq!(acts[0].end_time, at(16, 0));
    // The ceremony still starts exactly at its pinned time.
    assert_eq!(acts[1].start_time, at(15, 0));
}

#[test]
fn test_reorder_moves_item_to_front() {
    let timeline = sequential_timeline(4);
    let moved_id = timeline.get(3).unwrap().id;

    let reordered = mutator::reorder(&timeline, 3, 0).unwrap();
    assert_invariants(&reordered);

    // The moved activity now opens the day at the original day start.
    assert_eq!(reordered.get(0).unwrap().id, moved_id);
    assert_eq!(reordered.day_start(), Some(at(9, 0)));

    // The same id set survives, only times changed.
    let mut before: Vec<u64> = timeline.iter().map(|a| a.id).collect();
    let mut after: Vec<u64> = reordered.iter().map(|a| a.id).collect();
    before.sort_unstable();
    after.sort_unstable();
    assert_eq!(before, after);

    // Total span cannot grow: same durations, same buffers.
    assert!(reordered.day_end() <= timeline.day_end());
}

#[test]
fn test_reorder_rejects_out_of_range() {
    let timeline = sequential_timeline(3);
    assert!(mutator::reorder(&timeline, 7, 0).is_err());
    assert!(mutator::reorder(&timeline, 0, 7).is_err());
}

#[test]
fn test_remove_closes_gap() {
    let timeline = sequential_timeline(5);
    let third = timeline.get(2).unwrap().clone();
    let fourth_id = timeline.get(3).unwrap().id;

    let after = mutator::remove(&timeline, third.id).unwrap();
    assert_invariants(&after);
    assert_eq!(after.len(), 4);
    assert!(after.position_of(third.id).is_none());

    // The follower of the deleted activity moved up to "previous end +
    // buffer" instead of keeping its old slot.
    let second = after.get(1).unwrap();
    let mover = after.get(2).unwrap();
    assert_eq!(mover.id, fourth_id);
    assert_eq!(
        mover.start_time,
        crate::models::activity::add_minutes(
            second.end_time,
            second.category.buffer_after_minutes()
        )
    );
}

#[test]
fn test_remove_unknown_id() {
    let timeline = sequential_timeline(2);
    assert!(matches!(
        mutator::remove(&timeline, 999),
        Err(crate::error::TimelineError::ActivityNotFound { id: 999 })
    ));
}

#[test]
fn test_insert_appends_without_hint() {
    let timeline = sequential_timeline(2);
    let new = activity(42, "Lancer de bouquet", Category::Custom, 15);

    let after = mutator::insert(&timeline, new, None);
    assert_invariants(&after);
    assert_eq!(after.len(), 3);
    assert_eq!(after.get(2).unwrap().id, 42);

    // Appended after the previous last activity plus its buffer.
    let previous = after.get(1).unwrap();
    assert_eq!(
        after.get(2).unwrap().start_time,
        crate::models::activity::add_minutes(
            previous.end_time,
            previous.category.buffer_after_minutes()
        )
    );
}

#[test]
fn test_insert_at_hint_shifts_followers() {
    let timeline = sequential_timeline(3);
    let new = activity(42, "Discours surprise", Category::Custom, 10);

    let after = mutator::insert(&timeline, new, Some(1));
    assert_invariants(&after);
    assert_eq!(after.get(1).unwrap().id, 42);
    assert_eq!(after.day_start(), Some(at(9, 0)));
}

#[test]
fn test_rebase_is_pure_translation() {
    let activities = vec![
        activity(1, "Coiffure", Category::Preparation, 60),
        pinned(activity(2, "Ceremonie", Category::Ceremony, 60), at(15, 0)),
        activity(3, "Cocktail", Category::Cocktail, 90),
    ];
    let timeline = build_timeline(activities, &BuildOptions::new(at(8, 0)));

    let rebased = mutator::rebase(&timeline, at(16, 30));
    assert_invariants(&rebased);

    // Every start shifted by exactly +90 minutes, durations intact.
    for (before, after) in timeline.iter().zip(rebased.iter()) {
        assert_eq!(after.id, before.id);
        assert_eq!(after.duration_minutes, before.duration_minutes);
        assert_eq!(
            after.start_time,
            crate::models::activity::add_minutes(before.start_time, 90)
        );
    }
    assert_eq!(rebased.anchor_time(), Some(at(16, 30)));
}

#[test]
fn test_rebase_without_pin_uses_day_start() {
    let timeline = sequential_timeline(2);
    let rebased = mutator::rebase(&timeline, at(10, 0));
    assert_eq!(rebased.day_start(), Some(at(10, 0)));
}

#[test]
fn test_update_duration_floor() {
    let timeline = sequential_timeline(2);
    let id = timeline.get(0).unwrap().id;
    let patch = ActivityPatch {
        duration_minutes: Some(2),
        ..Default::default()
    };

    let after = mutator::update_fields(&timeline, id, &patch).unwrap();
    let updated = after.iter().find(|a| a.id == id).unwrap();

    // The floor applies, and the end time follows it.
    assert_eq!(updated.duration_minutes, MIN_ACTIVITY_MINUTES);
    assert_eq!(
        updated.end_time,
        crate::models::activity::add_minutes(updated.start_time, MIN_ACTIVITY_MINUTES)
    );
}

#[test]
fn test_update_duration_recalculates_forward_only() {
    let timeline = sequential_timeline(3);
    let first_before = timeline.get(0).unwrap().clone();
    let second_id = timeline.get(1).unwrap().id;

    let patch = ActivityPatch {
        duration_minutes: Some(60),
        ..Default::default()
    };
    let after = mutator::update_fields(&timeline, second_id, &patch).unwrap();
    assert_invariants(&after);

    // Earlier activities untouched.
    assert_eq!(after.get(0).unwrap().start_time, first_before.start_time);
    assert_eq!(after.get(0).unwrap().end_time, first_before.end_time);

    // The patched activity grew in place; its follower shifted.
    let second = after.get(1).unwrap();
    assert_eq!(second.start_time, timeline.get(1).unwrap().start_time);
    assert_eq!(second.duration_minutes, 60);
    let third = after.get(2).unwrap();
    assert_eq!(
        third.start_time,
        crate::models::activity::add_minutes(
            second.end_time,
            second.category.buffer_after_minutes()
        )
    );
}

#[test]
fn test_update_non_timing_fields_keeps_times() {
    let timeline = sequential_timeline(2);
    let id = timeline.get(1).unwrap().id;
    let patch = ActivityPatch {
        title: Some("Ouverture de bal".to_string()),
        notes: Some("first dance playlist".to_string()),
        assigned_to: Some(vec!["DJ".to_string()]),
        ..Default::default()
    };

    let after = mutator::update_fields(&timeline, id, &patch).unwrap();
    let updated = after.iter().find(|a| a.id == id).unwrap();
    assert_eq!(updated.title, "Ouverture de bal");
    assert_eq!(updated.notes.as_deref(), Some("first dance playlist"));
    assert_eq!(updated.assigned_to, vec!["DJ".to_string()]);
    assert_eq!(updated.start_time, timeline.get(1).unwrap().start_time);
    assert_eq!(updated.end_time, timeline.get(1).unwrap().end_time);
}

#[test]
fn test_grouping_disjoint_timeline() {
    let timeline = sequential_timeline(3);
    let groups = group_overlapping(&timeline);
    assert_eq!(groups.len(), 3);
    assert!(groups.iter().all(|g| !g.is_parallel()));
}

#[test]
fn test_grouping_overlapping_pair() {
    // A prep overrun into a pinned ceremony shows up as a parallel group.
    let activities = vec![
        activity(1, "Coiffure", Category::Preparation, 240),
        pinned(activity(2, "Ceremonie", Category::Ceremony, 60), at(15, 0)),
    ];
    let timeline = build_timeline(activities, &BuildOptions::new(at(8, 0)));

    let groups = group_overlapping(&timeline);
    assert_eq!(groups.len(), 1);
    assert!(groups[0].is_parallel());
    assert_eq!(groups[0].window_start, at(12, 0));
    assert_eq!(groups[0].window_end, at(16, 0));
}

#[test]
fn test_grouping_is_pairwise_not_chained() {
    // A overlaps B and B overlaps C, but A and C are disjoint: C must not
    // join the group.
    let mut a = activity(1, "A", Category::Custom, 60);
    a.start_time = at(10, 0);
    a.sync_end_time();
    let mut b = activity(2, "B", Category::Custom, 90);
    b.start_time = at(10, 30);
    b.sync_end_time();
    let mut c = activity(3, "C", Category::Custom, 60);
    c.start_time = at(11, 30);
    c.sync_end_time();

    let timeline = Timeline::from_activities(vec![a, b, c]);
    let groups = group_overlapping(&timeline);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].activities.len(), 2);
    assert_eq!(groups[1].activities.len(), 1);
}

#[test]
fn test_grouping_does_not_touch_timing() {
    let timeline = sequential_timeline(3);
    let before = timeline.clone();
    let _groups = group_overlapping(&timeline);
    assert_eq!(timeline, before);
}
