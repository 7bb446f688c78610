use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::epoch::Epoch;
use super::input::TaskField;

/// Which subset of tasks a list query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewType {
    /// Tasks scheduled inside the selected epoch.
    Scheduled,
    /// Tasks scheduled on a wider epoch that covers the selected one.
    Planned,
}

impl ViewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Scheduled => "SCHEDULED",
            ViewType::Planned => "PLANNED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewType::Scheduled => "Scheduled",
            ViewType::Planned => "Planned",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SCHEDULED" => Ok(ViewType::Scheduled),
            "PLANNED" => Ok(ViewType::Planned),
            other => Err(format!("unknown view type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewFilter {
    pub view_type: ViewType,
    pub epoch: Epoch,
}

impl ViewFilter {
    pub fn new(view_type: ViewType, epoch: Epoch) -> Self {
        Self { view_type, epoch }
    }

    /// Whether a task scheduled on `task_epoch` belongs to this view.
    pub fn matches(&self, task_epoch: &Epoch) -> bool {
        match self.view_type {
            ViewType::Scheduled => self.epoch.contains(task_epoch),
            ViewType::Planned => {
                task_epoch.contains(&self.epoch)
                    && task_epoch.date_range() != self.epoch.date_range()
            }
        }
    }

    /// Task fields whose value decides membership in any list view.
    pub fn membership_fields() -> &'static [TaskField] {
        &[TaskField::ScheduledOn]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::epoch::WeekStart;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> Epoch {
        Epoch::of_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn week(y: i32, m: u32, d: u32) -> Epoch {
        Epoch::of_week(NaiveDate::from_ymd_opt(y, m, d).unwrap(), WeekStart::Monday)
    }

    #[test]
    fn scheduled_view() {
        let f = ViewFilter::new(ViewType::Scheduled, week(2024, 4, 29));
        assert!(f.matches(&day(2024, 5, 2)));
        assert!(f.matches(&week(2024, 5, 1)));
        assert!(!f.matches(&day(2024, 5, 6)));
        assert!(!f.matches(&Epoch::AllTime));

        let all = ViewFilter::new(ViewType::Scheduled, Epoch::AllTime);
        assert!(all.matches(&Epoch::AllTime));
        assert!(all.matches(&day(1999, 1, 1)));
    }

    #[test]
    fn planned_view() {
        let f = ViewFilter::new(ViewType::Planned, day(2024, 5, 2));
        assert!(f.matches(&week(2024, 4, 29)));
        assert!(f.matches(&Epoch::AllTime));
        assert!(!f.matches(&day(2024, 5, 2)));
        assert!(!f.matches(&week(2024, 5, 6)));

        let all = ViewFilter::new(ViewType::Planned, Epoch::AllTime);
        assert!(!all.matches(&Epoch::AllTime));
        assert!(!all.matches(&day(2024, 5, 2)));
    }

    #[test]
    fn view_type_parsing() {
        assert_eq!("planned".parse::<ViewType>(), Ok(ViewType::Planned));
        assert_eq!(ViewType::Scheduled.to_string(), "SCHEDULED");
        assert!("later".parse::<ViewType>().is_err());
    }
}
