//! Editable project plan: phases, groups and items keyed by generated ids.
//!
//! All mutations are index-based edits of the owned phase list. Schedules are
//! recomputed from scratch with [`ProjectPlan::schedule`].

use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::config::ScheduleConfig;
use crate::dates::project_deadline;
use crate::models::{GanttRow, Group, Item, ItemKind, Phase};
use crate::schedule::compute_schedule;

/// Errors from editing a plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Name must not be blank")]
    EmptyName,
    #[error("Phase not found: {0}")]
    PhaseNotFound(String),
    #[error("Item not found: {0}")]
    ItemNotFound(String),
    #[error("Group index {index} out of range for phase {phase_id}")]
    GroupOutOfRange { phase_id: String, index: usize },
    #[error("Item index {index} out of range for group {group_index}")]
    ItemOutOfRange { group_index: usize, index: usize },
}

/// A caller invariant the plan currently violates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanIssue {
    DuplicateId(String),
    BlankName(String),
    EmptyGroup { phase_id: String, group_index: usize },
    NonPositiveDuration { item_id: String, duration_days: i64 },
}

impl fmt::Display for PlanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "Duplicate id: {}", id),
            Self::BlankName(id) => write!(f, "Blank name on {}", id),
            Self::EmptyGroup {
                phase_id,
                group_index,
            } => write!(f, "Empty group {} in phase {}", group_index, phase_id),
            Self::NonPositiveDuration {
                item_id,
                duration_days,
            } => write!(
                f,
                "Task {} has non-positive duration {}",
                item_id, duration_days
            ),
        }
    }
}

/// Direction for reordering a group within its phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Parse a task duration typed by the user.
///
/// Anything that is not a whole number of at least 1 becomes 1.
pub fn parse_duration(input: &str) -> i64 {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|days| *days >= 1)
        .unwrap_or(1)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn require_name(name: &str) -> Result<(), PlanError> {
    if name.trim().is_empty() {
        return Err(PlanError::EmptyName);
    }
    Ok(())
}

/// A project plan: ordered phases and the nominal end date.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectPlan {
    /// Last day of work, inclusive
    pub end_date: Option<NaiveDate>,
    pub phases: Vec<Phase>,
}

impl ProjectPlan {
    pub fn new(end_date: Option<NaiveDate>) -> Self {
        Self {
            end_date,
            phases: Vec::new(),
        }
    }

    /// Four-phase starter plan for a typical software project.
    pub fn sample(end_date: Option<NaiveDate>) -> Self {
        let task = |name: &str, days: i64| Group::single(Item::task(new_id(), name, days));
        let milestone = |name: &str| Group::single(Item::milestone(new_id(), name));

        let phases = vec![
            Phase::new(
                new_id(),
                "Phase 1: Planning & Discovery",
                vec![
                    milestone("Project Kickoff Meeting"),
                    task("Requirement Gathering", 10),
                    task("Technical Specification", 8),
                ],
            ),
            Phase::new(
                new_id(),
                "Phase 2: Design & Prototyping",
                vec![
                    task("Wireframing", 5),
                    task("UI/UX Design", 12),
                    task("Interactive Prototype", 7),
                    milestone("Design Review Complete"),
                ],
            ),
            Phase::new(
                new_id(),
                "Phase 3: Development & Testing",
                vec![
                    task("Frontend Development", 20),
                    task("Backend Development", 25),
                    task("Integration", 5),
                    task("QA Testing", 10),
                    milestone("Alpha Version Ready"),
                ],
            ),
            Phase::new(
                new_id(),
                "Phase 4: Deployment",
                vec![
                    task("User Acceptance Testing", 5),
                    task("Final Release Preparation", 3),
                    milestone("Project Launch"),
                ],
            ),
        ];

        Self { end_date, phases }
    }

    pub fn phase(&self, phase_id: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == phase_id)
    }

    fn phase_mut(&mut self, phase_id: &str) -> Result<&mut Phase, PlanError> {
        self.phases
            .iter_mut()
            .find(|p| p.id == phase_id)
            .ok_or_else(|| PlanError::PhaseNotFound(phase_id.to_string()))
    }

    /// Append a new, empty phase. Returns its id.
    pub fn add_phase(&mut self, name: &str) -> Result<String, PlanError> {
        require_name(name)?;
        let id = new_id();
        self.phases.push(Phase::new(id.clone(), name, Vec::new()));
        Ok(id)
    }

    pub fn remove_phase(&mut self, phase_id: &str) -> Result<Phase, PlanError> {
        let index = self
            .phases
            .iter()
            .position(|p| p.id == phase_id)
            .ok_or_else(|| PlanError::PhaseNotFound(phase_id.to_string()))?;
        Ok(self.phases.remove(index))
    }

    fn push_item(&mut self, phase_id: &str, item: Item) -> Result<String, PlanError> {
        let phase = self.phase_mut(phase_id)?;
        let id = item.id.clone();
        phase.groups.push(Group::single(item));
        Ok(id)
    }

    /// Append a task as its own sequential step. Returns the new item id.
    pub fn add_task(
        &mut self,
        phase_id: &str,
        name: &str,
        duration_input: &str,
    ) -> Result<String, PlanError> {
        require_name(name)?;
        let item = Item::task(new_id(), name, parse_duration(duration_input));
        self.push_item(phase_id, item)
    }

    /// Append a milestone as its own sequential step. Returns the new item id.
    pub fn add_milestone(&mut self, phase_id: &str, name: &str) -> Result<String, PlanError> {
        require_name(name)?;
        self.push_item(phase_id, Item::milestone(new_id(), name))
    }

    /// Remove an item, dropping its group if it becomes empty.
    pub fn remove_item(&mut self, phase_id: &str, item_id: &str) -> Result<Item, PlanError> {
        let phase = self.phase_mut(phase_id)?;
        for group_index in 0..phase.groups.len() {
            let group = &mut phase.groups[group_index];
            if let Some(item_index) = group.items.iter().position(|i| i.id == item_id) {
                let item = group.items.remove(item_index);
                if group.items.is_empty() {
                    phase.groups.remove(group_index);
                }
                return Ok(item);
            }
        }
        Err(PlanError::ItemNotFound(item_id.to_string()))
    }

    /// Swap a group with its neighbour. Returns false when already at the edge.
    pub fn move_group(
        &mut self,
        phase_id: &str,
        group_index: usize,
        direction: MoveDirection,
    ) -> Result<bool, PlanError> {
        let phase = self.phase_mut(phase_id)?;
        if group_index >= phase.groups.len() {
            return Err(PlanError::GroupOutOfRange {
                phase_id: phase_id.to_string(),
                index: group_index,
            });
        }
        let target = match direction {
            MoveDirection::Up => group_index.checked_sub(1),
            MoveDirection::Down => Some(group_index + 1).filter(|i| *i < phase.groups.len()),
        };
        match target {
            Some(target) => {
                phase.groups.swap(group_index, target);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Merge a group into the one before it so their items run concurrently.
    ///
    /// Returns false for the first group, which has nothing to merge into.
    pub fn group_with_previous(
        &mut self,
        phase_id: &str,
        group_index: usize,
    ) -> Result<bool, PlanError> {
        let phase = self.phase_mut(phase_id)?;
        if group_index >= phase.groups.len() {
            return Err(PlanError::GroupOutOfRange {
                phase_id: phase_id.to_string(),
                index: group_index,
            });
        }
        if group_index == 0 {
            return Ok(false);
        }
        let merged = phase.groups.remove(group_index);
        phase.groups[group_index - 1].items.extend(merged.items);
        Ok(true)
    }

    /// Split an item out of a concurrent group into its own group right after.
    ///
    /// Returns false when the group already holds a single item.
    pub fn ungroup_item(
        &mut self,
        phase_id: &str,
        group_index: usize,
        item_index: usize,
    ) -> Result<bool, PlanError> {
        let phase = self.phase_mut(phase_id)?;
        let group = phase
            .groups
            .get_mut(group_index)
            .ok_or_else(|| PlanError::GroupOutOfRange {
                phase_id: phase_id.to_string(),
                index: group_index,
            })?;
        if item_index >= group.items.len() {
            return Err(PlanError::ItemOutOfRange {
                group_index,
                index: item_index,
            });
        }
        if !group.is_concurrent() {
            return Ok(false);
        }
        let item = group.items.remove(item_index);
        phase.groups.insert(group_index + 1, Group::single(item));
        Ok(true)
    }

    /// List every caller invariant the plan violates.
    pub fn validate(&self) -> Vec<PlanIssue> {
        let mut issues = Vec::new();
        let mut seen: FxHashSet<&str> = FxHashSet::default();

        for phase in &self.phases {
            if !seen.insert(phase.id.as_str()) {
                issues.push(PlanIssue::DuplicateId(phase.id.clone()));
            }
            if phase.name.trim().is_empty() {
                issues.push(PlanIssue::BlankName(phase.id.clone()));
            }
            for (group_index, group) in phase.groups.iter().enumerate() {
                if group.is_empty() {
                    issues.push(PlanIssue::EmptyGroup {
                        phase_id: phase.id.clone(),
                        group_index,
                    });
                }
                for item in &group.items {
                    if !seen.insert(item.id.as_str()) {
                        issues.push(PlanIssue::DuplicateId(item.id.clone()));
                    }
                    if item.name.trim().is_empty() {
                        issues.push(PlanIssue::BlankName(item.id.clone()));
                    }
                    if let ItemKind::Task { duration_days } = item.kind {
                        if duration_days < 1 {
                            issues.push(PlanIssue::NonPositiveDuration {
                                item_id: item.id.clone(),
                                duration_days,
                            });
                        }
                    }
                }
            }
        }

        issues
    }

    /// Compute the schedule ending on `end_date`.
    pub fn schedule(&self, config: &ScheduleConfig) -> Vec<GanttRow> {
        let deadline = if config.inclusive_end_date {
            self.end_date.and_then(project_deadline)
        } else {
            self.end_date
        };
        compute_schedule(&self.phases, deadline, config)
    }
}
