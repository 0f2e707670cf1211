//! Backward project scheduling from a hard deadline.
//!
//! A plan is an ordered list of phases; each phase holds ordered groups of
//! tasks and milestones. Groups run one after another, items inside a group
//! run concurrently. [`compute_schedule`] dates everything by working back
//! from the deadline and returns flat, render-ordered [`GanttRow`]s.

pub mod config;
pub mod dates;
pub mod logging;
pub mod models;
pub mod plan;
pub mod report;
pub mod schedule;

#[cfg(feature = "python")]
mod python;

pub use config::ScheduleConfig;
pub use dates::{days_between, parse_date, project_deadline, subtract_days};
pub use models::{GanttRow, Group, Item, ItemKind, Phase, RowKind, MILESTONE_DURATION_DAYS};
pub use plan::{parse_duration, MoveDirection, PlanError, PlanIssue, ProjectPlan};
pub use report::{format_report, write_report, ExportError};
pub use schedule::{compute_schedule, schedule_project};
