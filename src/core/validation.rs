//! Task form validation.
//!
//! Forms carry the raw text the user typed. Validation either produces a
//! mutation input or the first problem found; nothing is sent to the server
//! until validation passes.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::epoch::{Epoch, EpochKind, WeekStart};
use crate::models::input::{CreateTaskInput, Patch, UpdateTaskInput};
use crate::models::task::RecurringSpec;
use crate::utils::date::parse_date;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,

    #[error("When schedule type is not \"ALL\", a date is required")]
    DateRequired,

    #[error("Cost must be a number, got '{0}'")]
    InvalidCost(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Recurrence must be a positive number of weeks, got '{0}'")]
    InvalidRecurrence(String),

    #[error("Nothing to update")]
    NothingToUpdate,
}

/// Values of the create-task form.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub cost: Option<String>,
    pub kind: EpochKind,
    pub date: Option<String>,
    pub every: Option<String>,
}

/// Values of the edit-task form. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct EditForm {
    pub title: Option<String>,
    /// Empty text or `none` clears the cost.
    pub cost: Option<String>,
    pub kind: Option<EpochKind>,
    pub date: Option<String>,
}

fn parse_cost(raw: &str) -> Result<i32, ValidationError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidCost(raw.to_string()))
}

fn parse_form_date(raw: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidDate(s.to_string())),
    }
}

/// Build the epoch for a schedule kind and optional date text.
fn schedule(kind: EpochKind, date: Option<&str>, ws: WeekStart) -> Result<Epoch, ValidationError> {
    let date = parse_form_date(date)?;
    match (kind, date) {
        (EpochKind::AllTime, _) => Ok(Epoch::AllTime),
        (_, None) => Err(ValidationError::DateRequired),
        (EpochKind::Day, Some(d)) => Ok(Epoch::of_date(d)),
        (EpochKind::Week, Some(d)) => Ok(Epoch::of_week(d, ws)),
    }
}

impl TaskForm {
    /// Validate for creation. Recurrence always starts on the first day of
    /// the current week, whatever the schedule.
    pub fn validate(&self, today: NaiveDate, ws: WeekStart) -> Result<CreateTaskInput, ValidationError> {
        //
        // 1) TITLE
        //
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::TitleRequired);
        }

        //
        // 2) SCHEDULE
        //
        let scheduled_on = schedule(self.kind, self.date.as_deref(), ws)?;

        //
        // 3) COST
        //
        let cost = match self.cost.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(parse_cost(raw)?),
            None => None,
        };

        //
        // 4) RECURRENCE
        //
        let recurring = match self.every.as_deref() {
            None => None,
            Some(raw) => {
                let every = raw
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| ValidationError::InvalidRecurrence(raw.to_string()))?;
                Some(RecurringSpec {
                    start_date: ws.start_of_week(today),
                    every_n_weeks: every,
                })
            }
        };

        Ok(CreateTaskInput {
            title: title.to_string(),
            cost,
            scheduled_on,
            recurring,
        })
    }
}

impl EditForm {
    pub fn validate(&self, id: Uuid, ws: WeekStart) -> Result<UpdateTaskInput, ValidationError> {
        let mut input = UpdateTaskInput::new(id);

        if let Some(title) = &self.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(ValidationError::TitleRequired);
            }
            input.title = Patch::Set(title.to_string());
        }

        if let Some(raw) = &self.cost {
            let trimmed = raw.trim();
            input.cost = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
                Patch::Set(None)
            } else {
                Patch::Set(Some(parse_cost(raw)?))
            };
        }

        // A bare date reschedules to that day.
        let kind = match (self.kind, &self.date) {
            (Some(k), _) => Some(k),
            (None, Some(_)) => Some(EpochKind::Day),
            (None, None) => None,
        };
        if let Some(kind) = kind {
            input.scheduled_on = Patch::Set(schedule(kind, self.date.as_deref(), ws)?);
        }

        if input.is_empty() {
            return Err(ValidationError::NothingToUpdate);
        }
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    fn form(title: &str) -> TaskForm {
        TaskForm {
            title: title.into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_title_is_rejected() {
        let err = form("   ").validate(today(), WeekStart::Monday).unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn dated_kind_needs_a_date() {
        let mut f = form("write report");
        f.kind = EpochKind::Week;
        let err = f.validate(today(), WeekStart::Monday).unwrap_err();
        assert_eq!(
            err.to_string(),
            "When schedule type is not \"ALL\", a date is required"
        );

        f.date = Some("2024-05-01".into());
        let input = f.validate(today(), WeekStart::Monday).unwrap();
        assert_eq!(input.scheduled_on.start_date(), NaiveDate::from_ymd_opt(2024, 4, 29));
    }

    #[test]
    fn cost_and_recurrence_are_parsed() {
        let mut f = form("gym");
        f.cost = Some("3".into());
        f.every = Some("2".into());
        let input = f.validate(today(), WeekStart::Monday).unwrap();
        assert_eq!(input.cost, Some(3));
        assert_eq!(input.scheduled_on, Epoch::AllTime);
        // Thursday 2024-05-02: the week starts on Monday 2024-04-29.
        assert_eq!(
            input.recurring,
            Some(RecurringSpec {
                start_date: NaiveDate::from_ymd_opt(2024, 4, 29).unwrap(),
                every_n_weeks: 2
            })
        );

        f.cost = Some("lots".into());
        assert_eq!(
            f.validate(today(), WeekStart::Monday),
            Err(ValidationError::InvalidCost("lots".into()))
        );

        f.cost = None;
        f.every = Some("0".into());
        assert_eq!(
            f.validate(today(), WeekStart::Monday),
            Err(ValidationError::InvalidRecurrence("0".into()))
        );
    }

    #[test]
    fn recurrence_start_ignores_schedule_and_follows_week_start() {
        let mut f = form("standup notes");
        f.kind = EpochKind::Day;
        f.date = Some("2024-06-12".into());
        f.every = Some("1".into());

        let monday = f.validate(today(), WeekStart::Monday).unwrap();
        assert_eq!(
            monday.recurring.map(|r| r.start_date),
            NaiveDate::from_ymd_opt(2024, 4, 29)
        );

        let sunday = f.validate(today(), WeekStart::Sunday).unwrap();
        assert_eq!(
            sunday.recurring.map(|r| r.start_date),
            NaiveDate::from_ymd_opt(2024, 4, 28)
        );
    }

    #[test]
    fn bad_date_text() {
        let mut f = form("x");
        f.kind = EpochKind::Day;
        f.date = Some("2024-5-2".into());
        assert_eq!(
            f.validate(today(), WeekStart::Monday),
            Err(ValidationError::InvalidDate("2024-5-2".into()))
        );
    }

    #[test]
    fn edit_only_sets_given_fields() {
        let id = Uuid::from_u128(3);
        let edit = EditForm {
            cost: Some("none".into()),
            ..Default::default()
        };
        let input = edit.validate(id, WeekStart::Monday).unwrap();
        assert_eq!(input.cost, Patch::Set(None));
        assert!(input.title.is_unchanged());
        assert!(input.scheduled_on.is_unchanged());

        let edit = EditForm {
            date: Some("2024-05-02".into()),
            ..Default::default()
        };
        let input = edit.validate(id, WeekStart::Monday).unwrap();
        assert_eq!(input.scheduled_on, Patch::Set(Epoch::of_date(today())));

        assert_eq!(
            EditForm::default().validate(id, WeekStart::Monday),
            Err(ValidationError::NothingToUpdate)
        );
    }
}
