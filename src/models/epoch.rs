//! Epoch: the time scope a task is scheduled in.
//!
//! An epoch is either "all time" (unscheduled), a single calendar day, or a
//! single calendar week. Weeks are always stored by their first day, under a
//! configurable [`WeekStart`] convention, so two weeks compare equal exactly
//! when they start on the same date.
//!
//! Representations:
//! - wire: `null` or `{ "type": "DATE" | "WEEK", "date": "YYYY-MM-DD" }`
//! - url token: `ALL`, `DATE.YYYY-MM-DD`, `WEEK.YYYY-MM-DD`
//! - display: `All Time`, `April 29th, 2024`, `April 29th, 2024 – May 5th, 2024`

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::utils::date::{format_iso, format_long, parse_date};

const ALL_TOKEN: &str = "ALL";
const EN_DASH: char = '\u{2013}';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EpochError {
    #[error("Invalid epoch date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// First day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }

    /// First day of the week containing `date`.
    pub fn start_of_week(self, date: NaiveDate) -> NaiveDate {
        let offset = (7 + date.weekday().num_days_from_monday()
            - self.weekday().num_days_from_monday())
            % 7;
        date.checked_sub_days(Days::new(u64::from(offset)))
            .unwrap_or(date)
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(WeekStart::Monday),
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            other => Err(format!("unknown week start '{}'", other)),
        }
    }
}

/// A week, identified by its (normalized) first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Week {
    start: NaiveDate,
    week_start: WeekStart,
}

impl Week {
    pub fn containing(date: NaiveDate, week_start: WeekStart) -> Self {
        Self {
            start: week_start.start_of_week(date),
            week_start,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the week (inclusive).
    pub fn last_date(&self) -> NaiveDate {
        self.start.checked_add_days(Days::new(6)).unwrap_or(self.start)
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }
}

/// Three-way discriminant used to drive branching in the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EpochKind {
    #[default]
    AllTime,
    Day,
    Week,
}

impl EpochKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpochKind::AllTime => "ALL",
            EpochKind::Day => "DATE",
            EpochKind::Week => "WEEK",
        }
    }
}

impl FromStr for EpochKind {
    type Err = String;

    /// Accepts the token prefixes and the friendlier CLI names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ALL" => Ok(EpochKind::AllTime),
            "DATE" | "DAY" => Ok(EpochKind::Day),
            "WEEK" => Ok(EpochKind::Week),
            other => Err(format!("unknown epoch kind '{}'", other)),
        }
    }
}

impl fmt::Display for EpochKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `type` of a wire epoch. There is no wire tag for "all time": that is `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WireEpochType {
    Date,
    Week,
}

/// GraphQL `Epoch` / `InputEpoch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEpoch {
    #[serde(rename = "type")]
    pub kind: WireEpochType,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Epoch {
    #[default]
    AllTime,
    Day(NaiveDate),
    Week(Week),
}

/// Half-open date interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, other: &DateRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl Epoch {
    pub fn of_date(date: NaiveDate) -> Self {
        Epoch::Day(date)
    }

    pub fn of_week(date: NaiveDate, week_start: WeekStart) -> Self {
        Epoch::Week(Week::containing(date, week_start))
    }

    pub fn null_epoch() -> Self {
        Epoch::AllTime
    }

    pub fn is_null_epoch(&self) -> bool {
        matches!(self, Epoch::AllTime)
    }

    pub fn kind(&self) -> EpochKind {
        match self {
            Epoch::AllTime => EpochKind::AllTime,
            Epoch::Day(_) => EpochKind::Day,
            Epoch::Week(_) => EpochKind::Week,
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        match self {
            Epoch::AllTime => None,
            Epoch::Day(d) => Some(*d),
            Epoch::Week(w) => Some(w.start_date()),
        }
    }

    /// Last day covered by the epoch (inclusive).
    pub fn last_date(&self) -> Option<NaiveDate> {
        match self {
            Epoch::AllTime => None,
            Epoch::Day(d) => Some(*d),
            Epoch::Week(w) => Some(w.last_date()),
        }
    }

    /// First day after the epoch (exclusive end).
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.last_date()
            .map(|d| d.checked_add_days(Days::new(1)).unwrap_or(d))
    }

    pub fn date_range(&self) -> Option<DateRange> {
        Some(DateRange {
            start: self.start_date()?,
            end: self.end_date()?,
        })
    }

    /// Whether `other` lies entirely inside this epoch.
    /// `AllTime` contains everything and is contained only by itself.
    pub fn contains(&self, other: &Epoch) -> bool {
        match (self.date_range(), other.date_range()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(outer), Some(inner)) => outer.contains(&inner),
        }
    }

    pub fn next_epoch(&self) -> Self {
        match self {
            Epoch::AllTime => Epoch::AllTime,
            Epoch::Day(d) => Epoch::Day(d.checked_add_days(Days::new(1)).unwrap_or(*d)),
            Epoch::Week(w) => {
                let next = w.start.checked_add_days(Days::new(7)).unwrap_or(w.start);
                Epoch::of_week(next, w.week_start)
            }
        }
    }

    pub fn prev_epoch(&self) -> Self {
        match self {
            Epoch::AllTime => Epoch::AllTime,
            Epoch::Day(d) => Epoch::Day(d.checked_sub_days(Days::new(1)).unwrap_or(*d)),
            Epoch::Week(w) => {
                let prev = w.start.checked_sub_days(Days::new(7)).unwrap_or(w.start);
                Epoch::of_week(prev, w.week_start)
            }
        }
    }

    // ---------------------------
    // Wire (GraphQL)
    // ---------------------------

    /// Decode a wire epoch. `None` (GraphQL `null`) is the null epoch.
    pub fn from_wire(wire: Option<&WireEpoch>, week_start: WeekStart) -> Result<Self, EpochError> {
        let Some(wire) = wire else {
            return Ok(Epoch::AllTime);
        };
        let date =
            parse_date(&wire.date).ok_or_else(|| EpochError::InvalidDate(wire.date.clone()))?;
        Ok(match wire.kind {
            WireEpochType::Date => Epoch::of_date(date),
            WireEpochType::Week => Epoch::of_week(date, week_start),
        })
    }

    pub fn to_wire(&self) -> Option<WireEpoch> {
        match self {
            Epoch::AllTime => None,
            Epoch::Day(d) => Some(WireEpoch {
                kind: WireEpochType::Date,
                date: format_iso(*d),
            }),
            Epoch::Week(w) => Some(WireEpoch {
                kind: WireEpochType::Week,
                date: format_iso(w.start_date()),
            }),
        }
    }

    // ---------------------------
    // URL token
    // ---------------------------

    pub fn to_url_token(&self) -> String {
        match self {
            Epoch::AllTime => ALL_TOKEN.to_string(),
            Epoch::Day(d) => format!("{}.{}", EpochKind::Day.as_str(), format_iso(*d)),
            Epoch::Week(w) => format!("{}.{}", EpochKind::Week.as_str(), format_iso(w.start_date())),
        }
    }

    /// Permissive decoder: anything unrecognized yields `None` and the caller
    /// picks a default. Tokens are user-editable and must never hard-fail.
    pub fn from_url_token(token: &str, week_start: WeekStart) -> Option<Self> {
        if token == ALL_TOKEN {
            return Some(Epoch::AllTime);
        }
        let (prefix, date) = token.split_once('.')?;
        let date = parse_date(date)?;
        match prefix {
            "DATE" => Some(Epoch::of_date(date)),
            "WEEK" => Some(Epoch::of_week(date, week_start)),
            _ => None,
        }
    }

    // ---------------------------
    // Display
    // ---------------------------

    pub fn to_display_string(&self) -> String {
        match self {
            Epoch::AllTime => "All Time".to_string(),
            Epoch::Day(d) => format_long(*d),
            Epoch::Week(w) => format!(
                "{} {} {}",
                format_long(w.start_date()),
                EN_DASH,
                format_long(w.last_date())
            ),
        }
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}
