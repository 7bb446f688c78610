//! Active epoch selection.
//!
//! The selected epoch is stored as a URL-style token in `ui_state` so it
//! survives between invocations. A missing or unreadable token falls back to
//! today and is rewritten.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::state::{get_state, set_state};
use crate::errors::AppResult;
use crate::models::epoch::{Epoch, EpochKind, WeekStart};

pub const EPOCH_KEY: &str = "epoch";

/// Decode a stored token. The flag is `true` when the token must be rewritten.
pub fn resolve_epoch(stored: Option<&str>, today: NaiveDate, ws: WeekStart) -> (Epoch, bool) {
    match stored.and_then(|t| Epoch::from_url_token(t, ws)) {
        Some(epoch) => {
            // WEEK tokens with a mid-week date decode renormalized.
            let canonical = stored == Some(epoch.to_url_token().as_str());
            (epoch, !canonical)
        }
        None => (Epoch::of_date(today), true),
    }
}

/// Switch the schedule kind, keeping the current date where it makes sense.
pub fn select_kind(current: Epoch, kind: EpochKind, today: NaiveDate, ws: WeekStart) -> Epoch {
    match kind {
        EpochKind::AllTime => Epoch::null_epoch(),
        EpochKind::Day => Epoch::of_date(today),
        EpochKind::Week => Epoch::of_week(current.start_date().unwrap_or(today), ws),
    }
}

/// Pick a date inside the current kind. `None` when the epoch is `ALL`.
pub fn set_date(current: Epoch, date: NaiveDate, ws: WeekStart) -> Option<Epoch> {
    match current.kind() {
        EpochKind::AllTime => None,
        EpochKind::Day => Some(Epoch::of_date(date)),
        EpochKind::Week => Some(Epoch::of_week(date, ws)),
    }
}

pub struct ActiveEpoch<'a> {
    conn: &'a Connection,
    week_start: WeekStart,
    today: NaiveDate,
}

impl<'a> ActiveEpoch<'a> {
    pub fn new(conn: &'a Connection, week_start: WeekStart, today: NaiveDate) -> Self {
        Self {
            conn,
            week_start,
            today,
        }
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn load(&self) -> AppResult<Epoch> {
        let stored = get_state(self.conn, EPOCH_KEY)?;
        let (epoch, rewrite) = resolve_epoch(stored.as_deref(), self.today, self.week_start);
        if rewrite {
            log::debug!("rewriting active epoch token {:?} -> {}", stored, epoch.to_url_token());
            self.save(&epoch)?;
        }
        Ok(epoch)
    }

    pub fn save(&self, epoch: &Epoch) -> AppResult<()> {
        set_state(self.conn, EPOCH_KEY, &epoch.to_url_token())
    }

    pub fn next(&self) -> AppResult<Epoch> {
        let epoch = self.load()?.next_epoch();
        self.save(&epoch)?;
        Ok(epoch)
    }

    pub fn prev(&self) -> AppResult<Epoch> {
        let epoch = self.load()?.prev_epoch();
        self.save(&epoch)?;
        Ok(epoch)
    }

    pub fn select_kind(&self, kind: EpochKind) -> AppResult<Epoch> {
        let epoch = select_kind(self.load()?, kind, self.today, self.week_start);
        self.save(&epoch)?;
        Ok(epoch)
    }

    /// `Ok(None)` when the active epoch is `ALL` and the pick was ignored.
    pub fn set_date(&self, date: NaiveDate) -> AppResult<Option<Epoch>> {
        let Some(epoch) = set_date(self.load()?, date, self.week_start) else {
            return Ok(None);
        };
        self.save(&epoch)?;
        Ok(Some(epoch))
    }

    /// Parse and store a token given on the command line. Unreadable input
    /// falls back to today, like a stored token would.
    pub fn set_token(&self, token: &str) -> AppResult<Epoch> {
        let (epoch, _) = resolve_epoch(Some(token), self.today, self.week_start);
        self.save(&epoch)?;
        Ok(epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::open_in_memory;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn resolve_falls_back_to_today() {
        let today = d(2024, 5, 2);
        let ws = WeekStart::Monday;
        assert_eq!(resolve_epoch(None, today, ws), (Epoch::of_date(today), true));
        assert_eq!(resolve_epoch(Some("DATE.2024-5-2"), today, ws), (Epoch::of_date(today), true));
        assert_eq!(resolve_epoch(Some("MONTH.2024-05-01"), today, ws), (Epoch::of_date(today), true));
        assert_eq!(resolve_epoch(Some("ALL"), today, ws), (Epoch::AllTime, false));
        assert_eq!(
            resolve_epoch(Some("WEEK.2024-05-01"), today, ws),
            (Epoch::of_week(d(2024, 4, 29), ws), true)
        );
    }

    #[test]
    fn kind_switching() {
        let today = d(2024, 5, 2);
        let ws = WeekStart::Monday;
        let day = Epoch::of_date(d(2024, 6, 12));

        assert_eq!(select_kind(day, EpochKind::Day, today, ws), Epoch::of_date(today));
        assert_eq!(
            select_kind(day, EpochKind::Week, today, ws),
            Epoch::of_week(d(2024, 6, 10), ws)
        );
        assert_eq!(
            select_kind(Epoch::AllTime, EpochKind::Week, today, ws),
            Epoch::of_week(today, ws)
        );
        assert!(select_kind(day, EpochKind::AllTime, today, ws).is_null_epoch());
    }

    #[test]
    fn date_pick_is_ignored_for_all() {
        assert_eq!(set_date(Epoch::AllTime, d(2024, 1, 1), WeekStart::Monday), None);
    }

    #[test]
    fn store_rewrites_bad_token_and_navigates() {
        let pool = open_in_memory().unwrap();
        let today = d(2024, 5, 2);
        set_state(&pool.conn, EPOCH_KEY, "garbage").unwrap();

        let active = ActiveEpoch::new(&pool.conn, WeekStart::Monday, today);
        assert_eq!(active.load().unwrap(), Epoch::of_date(today));
        assert_eq!(
            get_state(&pool.conn, EPOCH_KEY).unwrap().as_deref(),
            Some("DATE.2024-05-02")
        );

        assert_eq!(active.next().unwrap(), Epoch::of_date(d(2024, 5, 3)));
        let week = active.select_kind(EpochKind::Week).unwrap();
        assert_eq!(week, Epoch::of_week(d(2024, 4, 29), WeekStart::Monday));
        assert_eq!(active.prev().unwrap().start_date(), Some(d(2024, 4, 22)));
    }
}
