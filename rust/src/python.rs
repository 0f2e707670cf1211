//! PyO3 bindings: the `waterfall.rust` extension module.

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::path::PathBuf;

use crate::config::ScheduleConfig;
use crate::models::{GanttRow, Group, Item, Phase};
use crate::{dates, report, schedule};

/// A task (with a duration) or milestone (without one).
#[pyclass(name = "Item")]
#[derive(Clone, Debug)]
pub struct PyItem {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration_days: Option<i64>,
}

#[pymethods]
impl PyItem {
    #[new]
    #[pyo3(signature = (id, name, duration_days=None))]
    fn new(id: String, name: String, duration_days: Option<i64>) -> Self {
        Self {
            id,
            name,
            duration_days,
        }
    }

    #[staticmethod]
    fn task(id: String, name: String, duration_days: i64) -> Self {
        Self::new(id, name, Some(duration_days))
    }

    #[staticmethod]
    fn milestone(id: String, name: String) -> Self {
        Self::new(id, name, None)
    }

    #[getter]
    fn kind(&self) -> &'static str {
        Item::from(self).row_kind().as_str()
    }

    fn __repr__(&self) -> String {
        format!(
            "Item(id={:?}, name={:?}, duration_days={:?})",
            self.id, self.name, self.duration_days
        )
    }
}

impl From<&PyItem> for Item {
    fn from(item: &PyItem) -> Self {
        match item.duration_days {
            Some(days) => Item::task(item.id.clone(), item.name.clone(), days),
            None => Item::milestone(item.id.clone(), item.name.clone()),
        }
    }
}

/// A phase: ordered groups, each a list of concurrent items.
#[pyclass(name = "Phase")]
#[derive(Clone, Debug)]
pub struct PyPhase {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub groups: Vec<Vec<PyItem>>,
}

#[pymethods]
impl PyPhase {
    #[new]
    #[pyo3(signature = (id, name, groups=None))]
    fn new(id: String, name: String, groups: Option<Vec<Vec<PyItem>>>) -> Self {
        Self {
            id,
            name,
            groups: groups.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Phase(id={:?}, name={:?}, groups={})",
            self.id,
            self.name,
            self.groups.len()
        )
    }
}

impl From<&PyPhase> for Phase {
    fn from(phase: &PyPhase) -> Self {
        let groups = phase
            .groups
            .iter()
            .map(|g| Group::concurrent(g.iter().map(Item::from).collect()))
            .collect();
        Phase::new(phase.id.clone(), phase.name.clone(), groups)
    }
}

/// A computed, read-only schedule row.
#[pyclass(name = "GanttRow", frozen)]
#[derive(Clone, Debug)]
pub struct PyGanttRow {
    inner: GanttRow,
}

#[pymethods]
impl PyGanttRow {
    #[getter]
    fn id(&self) -> &str {
        &self.inner.id
    }

    #[getter]
    fn name(&self) -> &str {
        &self.inner.name
    }

    #[getter]
    fn kind(&self) -> &'static str {
        self.inner.kind.as_str()
    }

    #[getter]
    fn start_date(&self) -> NaiveDate {
        self.inner.start_date
    }

    #[getter]
    fn end_date(&self) -> NaiveDate {
        self.inner.end_date
    }

    #[getter]
    fn duration_days(&self) -> i64 {
        self.inner.duration_days
    }

    #[getter]
    fn level(&self) -> u8 {
        self.inner.level
    }

    #[getter]
    fn days_from_start(&self) -> i64 {
        self.inner.days_from_start
    }

    fn __repr__(&self) -> String {
        format!(
            "GanttRow(id={:?}, kind={}, start={}, end={})",
            self.inner.id, self.inner.kind, self.inner.start_date, self.inner.end_date
        )
    }
}

fn to_phases(phases: &[PyPhase]) -> Vec<Phase> {
    phases.iter().map(Phase::from).collect()
}

fn to_py_rows(rows: Vec<GanttRow>) -> Vec<PyGanttRow> {
    rows.into_iter().map(|inner| PyGanttRow { inner }).collect()
}

/// Date every phase and item backward from `deadline` (exclusive boundary).
#[pyfunction]
#[pyo3(signature = (phases, deadline=None, verbosity=0))]
fn compute_schedule(
    phases: Vec<PyPhase>,
    deadline: Option<NaiveDate>,
    verbosity: u8,
) -> Vec<PyGanttRow> {
    let config = ScheduleConfig::default().with_verbosity(verbosity);
    to_py_rows(schedule::compute_schedule(
        &to_phases(&phases),
        deadline,
        &config,
    ))
}

/// Schedule from a nominal `YYYY-MM-DD` end date.
#[pyfunction]
#[pyo3(signature = (phases, end_date=None, inclusive_end_date=true, verbosity=0))]
fn schedule_project(
    phases: Vec<PyPhase>,
    end_date: Option<String>,
    inclusive_end_date: bool,
    verbosity: u8,
) -> Vec<PyGanttRow> {
    let config = ScheduleConfig {
        verbosity,
        inclusive_end_date,
        ..ScheduleConfig::default()
    };
    to_py_rows(schedule::schedule_project(
        &to_phases(&phases),
        end_date.as_deref(),
        &config,
    ))
}

#[pyfunction]
fn subtract_days(date: NaiveDate, days: i64) -> NaiveDate {
    dates::subtract_days(date, days)
}

#[pyfunction]
fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    dates::days_between(start, end)
}

/// Write the schedule detail table to `path`.
///
/// # Raises
/// * ValueError if there are no rows or the file cannot be written
#[pyfunction]
fn write_report(rows: Vec<PyGanttRow>, path: PathBuf) -> PyResult<()> {
    let rows: Vec<GanttRow> = rows.into_iter().map(|r| r.inner).collect();
    report::write_report(&rows, &path)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// The waterfall.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyItem>()?;
    m.add_class::<PyPhase>()?;
    m.add_class::<PyGanttRow>()?;

    m.add_function(wrap_pyfunction!(compute_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(schedule_project, m)?)?;
    m.add_function(wrap_pyfunction!(subtract_days, m)?)?;
    m.add_function(wrap_pyfunction!(days_between, m)?)?;
    m.add_function(wrap_pyfunction!(write_report, m)?)?;

    Ok(())
}
