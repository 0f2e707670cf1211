//! Core data types for the planning tree and the computed Gantt rows.

use chrono::NaiveDate;
use std::fmt;

/// Implicit length of a milestone in days.
pub const MILESTONE_DURATION_DAYS: i64 = 1;

/// What kind of work an item represents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Durable work with an explicit day count.
    Task { duration_days: i64 },
    /// Point-in-time marker, rendered as a one-day event.
    Milestone,
}

/// A task or milestone inside a phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
}

impl Item {
    /// Create a task lasting `duration_days` days.
    pub fn task(id: impl Into<String>, name: impl Into<String>, duration_days: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Task { duration_days },
        }
    }

    /// Create a milestone.
    pub fn milestone(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Milestone,
        }
    }

    /// Duration as entered, before any clamping.
    pub fn nominal_duration(&self) -> i64 {
        match self.kind {
            ItemKind::Task { duration_days } => duration_days,
            ItemKind::Milestone => MILESTONE_DURATION_DAYS,
        }
    }

    /// Duration used for scheduling, never below `min_days` (or 1).
    pub fn effective_duration(&self, min_days: i64) -> i64 {
        self.nominal_duration().max(min_days.max(1))
    }

    pub fn row_kind(&self) -> RowKind {
        match self.kind {
            ItemKind::Task { .. } => RowKind::Task,
            ItemKind::Milestone => RowKind::Milestone,
        }
    }

    pub fn is_milestone(&self) -> bool {
        matches!(self.kind, ItemKind::Milestone)
    }
}

/// Items that run concurrently and share an end date.
///
/// A single-item group is an ordinary sequential step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Group {
    pub items: Vec<Item>,
}

impl Group {
    pub fn single(item: Item) -> Self {
        Self { items: vec![item] }
    }

    pub fn concurrent(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when the group holds more than one item.
    pub fn is_concurrent(&self) -> bool {
        self.items.len() > 1
    }
}

/// Top-level grouping of work. Its dates are derived from its items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Phase {
    pub id: String,
    pub name: String,
    pub groups: Vec<Group>,
}

impl Phase {
    pub fn new(id: impl Into<String>, name: impl Into<String>, groups: Vec<Group>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            groups,
        }
    }

    /// All items in group order, then item order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }
}

/// Rendering kind of a Gantt row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowKind {
    Phase,
    Task,
    Milestone,
}

impl RowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Phase => "Phase",
            Self::Task => "Task",
            Self::Milestone => "Milestone",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dated, render-ready schedule row for a phase or an item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GanttRow {
    /// Id of the originating phase or item
    pub id: String,
    pub name: String,
    pub kind: RowKind,
    pub start_date: NaiveDate,
    /// Exclusive day boundary where the work finishes
    pub end_date: NaiveDate,
    pub duration_days: i64,
    /// 0 for phases, 1 for items
    pub level: u8,
    /// Offset of `start_date` from the earliest start in the schedule
    pub days_from_start: i64,
}

impl GanttRow {
    pub fn is_phase(&self) -> bool {
        self.kind == RowKind::Phase
    }
}
