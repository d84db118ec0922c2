//! Core library for the Grand Jour day-of coordination application.
//!
//! This crate provides the business logic for assembling and maintaining
//! a wedding day timeline: domain models, the questionnaire that turns
//! answers into activities, the pure scheduling engine, SQLite
//! persistence, and the async coordinator service that ties them
//! together.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ Questionnaire│   │   Schedule   │   │  Coordinator │
//! │ answers →    │──▶│ build/mutate │◀──│ (async edit  │──▶ db/
//! │ drafts       │   │ (pure)       │   │  service)    │
//! └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! The engine in [`schedule`] is deterministic and free of I/O: every
//! edit path recalculates in memory first, and the [`coordinator`]
//! persists the result afterwards; a failed save never rolls an edit
//! back.
//!
//! # Quick Start
//!
//! ```rust
//! use grandjour_core::{params::CreatePlanning, CoordinatorBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a coordinator instance
//! let coordinator = CoordinatorBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! // Create a planning for the big day
//! let params = CreatePlanning {
//!     title: "Nora & Sam".to_string(),
//!     wedding_date: "2026-06-20".to_string(),
//!     notes: None,
//! };
//! let planning = coordinator.create_planning(&params).await?;
//! println!("Created planning: {}", planning);
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod questionnaire;
pub mod schedule;
pub mod suggestions;

// Re-export commonly used types
pub use coordinator::{Coordinator, CoordinatorBuilder, EditOutcome};
pub use db::Database;
pub use display::{
    ClockTime, CreateResult, DeleteResult, GroupedTimeline, LocalDateTime, OperationStatus,
    PlanningSummaries, TimelineView, UpdateResult,
};
pub use error::{Result, TimelineError};
pub use models::{Activity, ActivityDraft, ActivityPatch, Category, Planning, PlanningSummary};
pub use questionnaire::{AnswerSet, AnswerValue, Condition, Question};
pub use schedule::{
    build_timeline, group_overlapping, BuildOptions, ParallelGroup, ScheduleMode, Timeline,
};
pub use suggestions::RawSuggestion;
