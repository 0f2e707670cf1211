//! Backward pass that dates every phase and item from a hard deadline.
//!
//! Groups are chained end-to-start working back from the deadline: the last
//! group of the last phase ends on the deadline, and every earlier group ends
//! exactly when the next one starts. Items inside a group share the group's
//! end date and start according to their own duration.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use crate::config::ScheduleConfig;
use crate::dates::{days_between, parse_date, project_deadline, subtract_days};
use crate::models::{GanttRow, Phase, RowKind};
use crate::{log_changes, log_checks, log_debug};

/// Dates computed for a single item during the backward pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ItemTiming {
    start: NaiveDate,
    end: NaiveDate,
    duration_days: i64,
}

/// Date every group, walking from the last group of the last phase backward.
///
/// Items are keyed by id; duplicate ids collapse to the earliest occurrence.
fn date_groups<'a>(
    phases: &'a [Phase],
    deadline: NaiveDate,
    config: &ScheduleConfig,
) -> FxHashMap<&'a str, ItemTiming> {
    let verbosity = config.verbosity;
    let floor = config.duration_floor();
    let mut timings: FxHashMap<&str, ItemTiming> = FxHashMap::default();
    let mut cursor = deadline;

    for group in phases.iter().flat_map(|p| p.groups.iter()).rev() {
        if group.is_empty() {
            log_checks!(verbosity, "Skipping empty group");
            continue;
        }

        let group_end = cursor;
        let mut group_duration = 0;

        for item in &group.items {
            let duration_days = item.effective_duration(floor);
            if duration_days != item.nominal_duration() {
                log_checks!(
                    verbosity,
                    "Clamped duration of {:?} from {} to {} days",
                    item.id,
                    item.nominal_duration(),
                    duration_days
                );
            }
            group_duration = group_duration.max(duration_days);

            let start = subtract_days(group_end, duration_days);
            log_debug!(
                verbosity,
                "{} {:?}: {} -> {} ({} days)",
                item.row_kind(),
                item.id,
                start,
                group_end,
                duration_days
            );
            timings.insert(
                item.id.as_str(),
                ItemTiming {
                    start,
                    end: group_end,
                    duration_days,
                },
            );
        }

        cursor = subtract_days(group_end, group_duration);
        log_changes!(
            verbosity,
            "Group of {} dated {} -> {}",
            group.len(),
            cursor,
            group_end
        );
    }

    timings
}

/// Compute the dated Gantt rows for `phases`, finishing on `deadline`.
///
/// `deadline` is the exclusive day boundary of the final day of work; callers
/// holding a nominal end date should use [`schedule_project`] or add one day
/// first. Returns an empty list when there is no deadline or nothing to
/// schedule. Never fails: task durations below the configured floor are
/// clamped rather than rejected.
///
/// Output is depth-first: each phase row (level 0) is followed by its item
/// rows (level 1) in group and item order. Phases without items produce no
/// rows.
pub fn compute_schedule(
    phases: &[Phase],
    deadline: Option<NaiveDate>,
    config: &ScheduleConfig,
) -> Vec<GanttRow> {
    let verbosity = config.verbosity;
    let Some(deadline) = deadline else {
        log_checks!(verbosity, "No deadline, nothing to schedule");
        return Vec::new();
    };
    if phases.is_empty() {
        return Vec::new();
    }

    log_changes!(
        verbosity,
        "Scheduling {} phases back from {}",
        phases.len(),
        deadline
    );
    let timings = date_groups(phases, deadline, config);

    let mut rows: Vec<GanttRow> = Vec::with_capacity(timings.len() + phases.len());
    for phase in phases {
        let item_rows: Vec<GanttRow> = phase
            .items()
            .filter_map(|item| {
                timings.get(item.id.as_str()).map(|timing| GanttRow {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    kind: item.row_kind(),
                    start_date: timing.start,
                    end_date: timing.end,
                    duration_days: timing.duration_days,
                    level: 1,
                    days_from_start: 0,
                })
            })
            .collect();

        let (Some(start), Some(end)) = (
            item_rows.iter().map(|r| r.start_date).min(),
            item_rows.iter().map(|r| r.end_date).max(),
        ) else {
            log_checks!(verbosity, "Phase {:?} has no items, skipping", phase.id);
            continue;
        };

        log_changes!(verbosity, "Phase {:?}: {} -> {}", phase.id, start, end);
        rows.push(GanttRow {
            id: phase.id.clone(),
            name: phase.name.clone(),
            kind: RowKind::Phase,
            start_date: start,
            end_date: end,
            duration_days: days_between(start, end),
            level: 0,
            days_from_start: 0,
        });
        rows.extend(item_rows);
    }

    if let Some(project_start) = rows.iter().map(|r| r.start_date).min() {
        log_debug!(verbosity, "Project starts {}", project_start);
        for row in &mut rows {
            row.days_from_start = days_between(project_start, row.start_date);
        }
    }

    rows
}

/// Schedule from a nominal end date entered as `YYYY-MM-DD` text.
///
/// With `inclusive_end_date` set, the end date counts as a full day of work
/// and the backward pass starts from the day after. Unparseable or missing
/// dates yield an empty schedule.
pub fn schedule_project(
    phases: &[Phase],
    end_date: Option<&str>,
    config: &ScheduleConfig,
) -> Vec<GanttRow> {
    let end_date = end_date.and_then(parse_date);
    let deadline = if config.inclusive_end_date {
        end_date.and_then(project_deadline)
    } else {
        end_date
    };
    compute_schedule(phases, deadline, config)
}
