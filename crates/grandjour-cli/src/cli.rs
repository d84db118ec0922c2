//! Command definitions and dispatch for the Grand Jour CLI.
//!
//! This module implements the CLI side of the parameter wrapper pattern:
//! clap argument structs wrap the framework-free core parameter types and
//! convert into them via `From`, so CLI concerns (flags, aliases, help
//! text) never leak into `grandjour-core`.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Coordinator
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use grandjour_core::params::*;
use grandjour_core::{
    group_overlapping, Coordinator, CreateResult, DeleteResult, EditOutcome, GroupedTimeline,
    OperationStatus, TimelineView, UpdateResult,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Planning commands
// ============================================================================

/// Create a new planning
#[derive(Args)]
pub struct CreatePlanningArgs {
    /// Title of the planning, e.g. the couple's names
    pub title: String,
    /// Calendar day of the wedding as YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    /// Optional free-text notes
    #[arg(short, long, help = "Optional notes kept with the planning")]
    pub notes: Option<String>,
}

impl From<CreatePlanningArgs> for CreatePlanning {
    fn from(val: CreatePlanningArgs) -> Self {
        CreatePlanning {
            title: val.title,
            wedding_date: val.date,
            notes: val.notes,
        }
    }
}

/// List all plannings
#[derive(Args)]
pub struct ListPlanningsArgs {
    /// Show archived plannings instead of active ones
    #[arg(long, help = "Show archived plannings instead of active ones")]
    pub archived: bool,
}

impl From<ListPlanningsArgs> for ListPlannings {
    fn from(val: ListPlanningsArgs) -> Self {
        ListPlannings {
            archived: val.archived,
        }
    }
}

/// Reference a planning by its ID
#[derive(Args)]
pub struct PlanningIdArgs {
    /// Unique identifier of the planning
    pub id: u64,
}

impl From<PlanningIdArgs> for Id {
    fn from(val: PlanningIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a planning permanently
#[derive(Args)]
pub struct DeletePlanningArgs {
    /// Unique identifier of the planning to permanently delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanningArgs> for DeletePlanning {
    fn from(val: DeletePlanningArgs) -> Self {
        DeletePlanning {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanningCommands {
    /// Create a new planning
    #[command(alias = "c")]
    Create(CreatePlanningArgs),
    /// List all plannings
    #[command(aliases = ["l", "ls"])]
    List(ListPlanningsArgs),
    /// Show a planning with its timeline
    #[command(alias = "s")]
    Show(PlanningIdArgs),
    /// Archive a planning
    Archive(PlanningIdArgs),
    /// Unarchive a planning
    Unarchive(PlanningIdArgs),
    /// Delete a planning permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanningArgs),
}

// ============================================================================
// Activity commands
// ============================================================================

/// Add an activity to a planning's timeline
#[derive(Args)]
pub struct AddActivityArgs {
    /// Unique identifier of the planning
    pub planning_id: u64,
    /// Title of the activity
    pub title: String,
    /// Category name (preparation, ceremony, travel1-4, photos,
    /// cocktail, meal, evening_party, custom)
    #[arg(short, long, default_value = "custom")]
    pub category: String,
    /// Duration in minutes
    #[arg(short, long)]
    pub duration: i64,
    /// Pin the activity to a wall-clock start as HH:MM
    #[arg(long)]
    pub at: Option<String>,
    /// Optional free-text notes
    #[arg(short, long)]
    pub notes: Option<String>,
    /// People or vendors responsible - comma-separated list
    #[arg(long, value_delimiter = ',')]
    pub assign: Vec<String>,
    /// 0-based timeline position to insert at (appends when omitted)
    #[arg(short, long)]
    pub position: Option<usize>,
}

impl From<AddActivityArgs> for ActivityCreate {
    fn from(val: AddActivityArgs) -> Self {
        ActivityCreate {
            planning_id: val.planning_id,
            title: val.title,
            category: val.category,
            duration_minutes: val.duration,
            fixed_start: val.at,
            notes: val.notes,
            assigned_to: val.assign,
            position: val.position,
        }
    }
}

/// Update an activity's fields
#[derive(Args)]
pub struct UpdateActivityArgs {
    /// Unique identifier of the activity to update
    pub id: u64,
    /// Updated title
    #[arg(short, long)]
    pub title: Option<String>,
    /// Updated duration in minutes (values below 5 are raised to 5)
    #[arg(short, long)]
    pub duration: Option<i64>,
    /// Updated free-text notes
    #[arg(short, long)]
    pub notes: Option<String>,
    /// Updated assignment list - comma-separated
    #[arg(long, value_delimiter = ',')]
    pub assign: Option<Vec<String>>,
    /// Mark or unmark the activity as a key moment
    #[arg(long)]
    pub highlight: Option<bool>,
}

impl From<UpdateActivityArgs> for UpdateActivity {
    fn from(val: UpdateActivityArgs) -> Self {
        UpdateActivity {
            id: val.id,
            title: val.title,
            duration_minutes: val.duration,
            notes: val.notes,
            assigned_to: val.assign,
            is_highlight: val.highlight,
        }
    }
}

/// Move an activity to a new timeline position (drag-drop reorder)
#[derive(Args)]
pub struct MoveActivityArgs {
    /// Unique identifier of the planning
    pub planning_id: u64,
    /// Current 0-based position
    pub from: usize,
    /// Target 0-based position
    pub to: usize,
}

impl From<MoveActivityArgs> for MoveActivity {
    fn from(val: MoveActivityArgs) -> Self {
        MoveActivity {
            planning_id: val.planning_id,
            from: val.from,
            to: val.to,
        }
    }
}

/// Reference an activity by its ID
#[derive(Args)]
pub struct ActivityIdArgs {
    /// Unique identifier of the activity
    pub id: u64,
}

impl From<ActivityIdArgs> for Id {
    fn from(val: ActivityIdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Add an activity to a planning's timeline
    #[command(alias = "a")]
    Add(AddActivityArgs),
    /// Update an activity's fields
    #[command(alias = "u")]
    Update(UpdateActivityArgs),
    /// Move an activity to a new timeline position
    #[command(alias = "mv")]
    Move(MoveActivityArgs),
    /// Remove an activity from its timeline
    #[command(aliases = ["d", "rm"])]
    Remove(ActivityIdArgs),
    /// Show a single activity
    #[command(alias = "s")]
    Show(ActivityIdArgs),
}

// ============================================================================
// Timeline commands
// ============================================================================

/// Generate a timeline from questionnaire answers
#[derive(Args)]
pub struct GenerateTimelineArgs {
    /// Unique identifier of the planning
    pub planning_id: u64,
    /// Path to a JSON file with the questionnaire answers
    #[arg(long)]
    pub answers: PathBuf,
    /// Keep already-present activities instead of replacing them
    #[arg(long)]
    pub keep_existing: bool,
}

/// Show a planning's timeline
#[derive(Args)]
pub struct ShowTimelineArgs {
    /// Unique identifier of the planning
    pub planning_id: u64,
    /// Cluster overlapping activities into parallel groups
    #[arg(long)]
    pub grouped: bool,
}

/// Slide the whole timeline to a new anchor time
#[derive(Args)]
pub struct RebaseTimelineArgs {
    /// Unique identifier of the planning
    pub planning_id: u64,
    /// New anchor wall-clock time as HH:MM
    pub new_anchor: String,
}

impl From<RebaseTimelineArgs> for RebaseAnchor {
    fn from(val: RebaseTimelineArgs) -> Self {
        RebaseAnchor {
            planning_id: val.planning_id,
            new_anchor: val.new_anchor,
        }
    }
}

/// Merge AI-suggested tasks from a JSON file
#[derive(Args)]
pub struct ImportSuggestionsArgs {
    /// Unique identifier of the planning
    pub planning_id: u64,
    /// Path to a JSON array of suggested tasks
    pub file: PathBuf,
}

#[derive(Subcommand)]
pub enum TimelineCommands {
    /// Generate a timeline from questionnaire answers
    #[command(alias = "g")]
    Generate(GenerateTimelineArgs),
    /// Show a planning's timeline
    #[command(alias = "s")]
    Show(ShowTimelineArgs),
    /// Slide the whole timeline to a new anchor time
    Rebase(RebaseTimelineArgs),
    /// Merge AI-suggested tasks from a JSON file
    Import(ImportSuggestionsArgs),
}

// ============================================================================
// Dispatch
// ============================================================================

/// CLI dispatcher owning the coordinator and the terminal renderer.
pub struct Cli {
    coordinator: Coordinator,
    renderer: TerminalRenderer,
}

impl Cli {
    /// Create a new dispatcher.
    pub fn new(coordinator: Coordinator, renderer: TerminalRenderer) -> Self {
        Self {
            coordinator,
            renderer,
        }
    }

    /// Warn when the edit landed in memory but the save leg failed.
    fn report_save(&self, outcome: &EditOutcome) -> Result<()> {
        if !outcome.saved {
            self.renderer.render(&format!(
                "{}",
                OperationStatus::warning(
                    "The timeline was updated but may not be saved.".to_string()
                )
            ))?;
        }
        Ok(())
    }

    /// Handle planning subcommands.
    pub async fn handle_planning_command(&self, command: PlanningCommands) -> Result<()> {
        match command {
            PlanningCommands::Create(args) => {
                let planning = self.coordinator.create_planning(&args.into()).await?;
                self.renderer
                    .render(&format!("{}", CreateResult::new(planning)))
            }
            PlanningCommands::List(args) => self.list_plannings(&args.into()).await,
            PlanningCommands::Show(args) => {
                let params: Id = args.into();
                match self
                    .coordinator
                    .show_planning_with_activities(&params)
                    .await?
                {
                    Some(planning) => self.renderer.render(&format!("{}", planning)),
                    None => self.renderer.render(&format!(
                        "{}",
                        OperationStatus::failure(format!("Planning {} not found", params.id))
                    )),
                }
            }
            PlanningCommands::Archive(args) => {
                let params: Id = args.into();
                self.coordinator.archive_planning(&params).await?;
                self.renderer.render(&format!(
                    "{}",
                    OperationStatus::success(format!("Archived planning {}", params.id))
                ))
            }
            PlanningCommands::Unarchive(args) => {
                let params: Id = args.into();
                self.coordinator.unarchive_planning(&params).await?;
                self.renderer.render(&format!(
                    "{}",
                    OperationStatus::success(format!("Unarchived planning {}", params.id))
                ))
            }
            PlanningCommands::Delete(args) => {
                let planning = self.coordinator.delete_planning(&args.into()).await?;
                self.renderer
                    .render(&format!("{}", DeleteResult::new(planning)))
            }
        }
    }

    /// List plannings under a section header.
    pub async fn list_plannings(&self, params: &ListPlannings) -> Result<()> {
        let summaries = self.coordinator.list_plannings_summary(params).await?;
        let title = if params.archived {
            "# Archived Plannings"
        } else {
            "# Active Plannings"
        };
        self.renderer.render(&format!("{title}\n\n{summaries}"))
    }

    /// Handle activity subcommands.
    pub async fn handle_activity_command(&self, command: ActivityCommands) -> Result<()> {
        match command {
            ActivityCommands::Add(args) => {
                let (activity, outcome) = self.coordinator.add_activity(&args.into()).await?;
                self.renderer
                    .render(&format!("{}", CreateResult::new(activity)))?;
                self.report_save(&outcome)
            }
            ActivityCommands::Update(args) => {
                let (activity, outcome) = self.coordinator.update_activity(&args.into()).await?;
                self.renderer
                    .render(&format!("{}", UpdateResult::new(activity)))?;
                self.report_save(&outcome)
            }
            ActivityCommands::Move(args) => {
                let outcome = self.coordinator.move_activity(&args.into()).await?;
                self.renderer
                    .render(&format!("{}", TimelineView(outcome.timeline.clone())))?;
                self.report_save(&outcome)
            }
            ActivityCommands::Remove(args) => {
                let (activity, outcome) = self.coordinator.remove_activity(&args.into()).await?;
                self.renderer
                    .render(&format!("{}", DeleteResult::new(activity)))?;
                self.report_save(&outcome)
            }
            ActivityCommands::Show(args) => {
                let params: Id = args.into();
                match self.coordinator.show_activity(&params).await? {
                    Some(activity) => self.renderer.render(&format!("{}", activity)),
                    None => self.renderer.render(&format!(
                        "{}",
                        OperationStatus::failure(format!("Activity {} not found", params.id))
                    )),
                }
            }
        }
    }

    /// Handle timeline subcommands.
    pub async fn handle_timeline_command(&self, command: TimelineCommands) -> Result<()> {
        match command {
            TimelineCommands::Generate(args) => {
                let payload = std::fs::read_to_string(&args.answers).with_context(|| {
                    format!("Failed to read answers file {}", args.answers.display())
                })?;
                let answers =
                    serde_json::from_str(&payload).context("Failed to parse answers file")?;

                let outcome = self
                    .coordinator
                    .generate_timeline(&GenerateTimeline {
                        planning_id: args.planning_id,
                        answers,
                        keep_existing: args.keep_existing,
                    })
                    .await?;
                self.renderer
                    .render(&format!("{}", TimelineView(outcome.timeline.clone())))?;
                self.report_save(&outcome)
            }
            TimelineCommands::Show(args) => {
                let timeline = self
                    .coordinator
                    .timeline(&Id {
                        id: args.planning_id,
                    })
                    .await?;
                if args.grouped {
                    let groups = group_overlapping(&timeline);
                    self.renderer
                        .render(&format!("{}", GroupedTimeline(groups)))
                } else {
                    self.renderer.render(&format!("{}", TimelineView(timeline)))
                }
            }
            TimelineCommands::Rebase(args) => {
                let outcome = self.coordinator.rebase_timeline(&args.into()).await?;
                self.renderer
                    .render(&format!("{}", TimelineView(outcome.timeline.clone())))?;
                self.report_save(&outcome)
            }
            TimelineCommands::Import(args) => {
                let payload = std::fs::read_to_string(&args.file).with_context(|| {
                    format!("Failed to read suggestions file {}", args.file.display())
                })?;
                let suggestions = grandjour_core::suggestions::suggestions_from_json(&payload)
                    .context("Failed to parse suggestions file")?;

                let (merged, outcome) = self
                    .coordinator
                    .import_suggestions(&ImportSuggestions {
                        planning_id: args.planning_id,
                        suggestions,
                    })
                    .await?;
                self.renderer.render(&format!(
                    "{}",
                    OperationStatus::success(format!("Merged {merged} suggested activities"))
                ))?;
                self.renderer
                    .render(&format!("{}", TimelineView(outcome.timeline.clone())))?;
                self.report_save(&outcome)
            }
        }
    }
}
