//! Planning board.
//!
//! The PLANNED list of the active epoch split into three columns by the
//! kind of each task's schedule. Moving a task onto a column reschedules it
//! to that column's epoch, anchored on the active epoch's start date.

use chrono::NaiveDate;

use crate::models::epoch::{Epoch, EpochKind, WeekStart};
use crate::models::task::Task;

/// Column order on the board.
pub const BOARD_COLUMNS: [EpochKind; 3] = [EpochKind::Day, EpochKind::Week, EpochKind::AllTime];

pub fn column_title(kind: EpochKind) -> &'static str {
    match kind {
        EpochKind::Day => "This Day",
        EpochKind::Week => "This Week",
        EpochKind::AllTime => "Not Scheduled",
    }
}

/// Target epoch of a column. `ALL` has no start date, so `today` anchors it.
pub fn column_epoch(active: &Epoch, kind: EpochKind, today: NaiveDate, ws: WeekStart) -> Epoch {
    let anchor = active.start_date().unwrap_or(today);
    match kind {
        EpochKind::Day => Epoch::of_date(anchor),
        EpochKind::Week => Epoch::of_week(anchor, ws),
        EpochKind::AllTime => Epoch::null_epoch(),
    }
}

#[derive(Debug, Clone)]
pub struct BoardColumn {
    pub kind: EpochKind,
    pub epoch: Epoch,
    pub tasks: Vec<Task>,
}

impl BoardColumn {
    pub fn title(&self) -> &'static str {
        column_title(self.kind)
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    pub active: Epoch,
    pub columns: Vec<BoardColumn>,
    pub from_cache: bool,
}

impl Board {
    /// Group `tasks` by schedule kind. Each column is ordered by id so the
    /// board reads the same after a refetch.
    pub fn build(active: Epoch, mut tasks: Vec<Task>, today: NaiveDate, ws: WeekStart) -> Self {
        tasks.sort_by_key(|t| t.id);
        let columns = BOARD_COLUMNS
            .iter()
            .map(|&kind| BoardColumn {
                kind,
                epoch: column_epoch(&active, kind, today, ws),
                tasks: tasks
                    .iter()
                    .filter(|t| t.scheduled_on.kind() == kind)
                    .cloned()
                    .collect(),
            })
            .collect();

        Self {
            active,
            columns,
            from_cache: false,
        }
    }

    pub fn column(&self, kind: EpochKind) -> Option<&BoardColumn> {
        self.columns.iter().find(|c| c.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| c.tasks.is_empty())
    }
}
