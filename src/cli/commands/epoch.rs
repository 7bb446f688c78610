use crate::cli::commands::{active_epoch, open_pool};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::epoch::Epoch;
use crate::ui::messages::warning;
use crate::utils::colors::{color_for_kind, colorize};
use crate::utils::date::parse_date;

pub fn print_epoch(epoch: &Epoch) {
    let kind = epoch.kind();
    println!(
        "📅 {} {}  ({})",
        colorize(kind.as_str(), color_for_kind(kind.as_str())),
        epoch.to_display_string(),
        epoch.to_url_token()
    );
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Epoch {
        set,
        next,
        prev,
        kind,
        date,
    } = cmd
    {
        let pool = open_pool(cfg)?;
        let active = active_epoch(cfg, &pool.conn);

        //
        // 1) EXPLICIT TOKEN
        //
        if let Some(token) = set {
            if Epoch::from_url_token(token, cfg.week_start).is_none() {
                warning(format!("Unrecognized epoch '{}', using today.", token));
            }
            active.set_token(token)?;
        }

        //
        // 2) KIND SWITCH
        //
        if let Some(k) = kind {
            active.select_kind(*k)?;
        }

        //
        // 3) DATE PICK
        //
        if let Some(raw) = date {
            let d = parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?;
            if active.set_date(d)?.is_none() {
                warning("The active epoch is ALL; pick a kind first (--kind DATE or WEEK).");
            }
        }

        //
        // 4) NAVIGATION
        //
        if *next {
            active.next()?;
        }
        if *prev {
            active.prev()?;
        }

        print_epoch(&active.load()?);
    }

    Ok(())
}
