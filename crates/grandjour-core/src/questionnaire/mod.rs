//! Questionnaire-driven activity generation.
//!
//! A questionnaire is a list of [`Question`]s answered through an explicit
//! [`AnswerSet`]. Each visible, answered, non-declined question produces
//! at most one [`ActivityDraft`](crate::models::ActivityDraft); durations
//! come from the resolution chain in [`duration`], anchors from
//! time-of-day questions, and conditional branches (the dual-ceremony
//! block) from [`Condition`] visibility rules.

pub mod answers;
pub mod catalog;
pub mod condition;
pub mod duration;
pub mod question;

pub use answers::{parse_clock, AnswerSet, AnswerValue};
pub use catalog::{default_questionnaire, generate_drafts, schedule_mode, DUAL_CEREMONY_OPTION};
pub use condition::Condition;
pub use duration::{resolve_duration, FALLBACK_MINUTES};
pub use question::{ChoiceOption, Question, QuestionKind};
