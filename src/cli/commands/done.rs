use crate::cli::commands::{open_pool, remote_service};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::{parse_date, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Done { id, date, undo } = cmd {
        let complete_date = if *undo {
            None
        } else {
            match date {
                Some(raw) => Some(parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?),
                None => Some(today()),
            }
        };

        let pool = open_pool(cfg)?;
        let service = remote_service(cfg, &pool.conn)?;
        let id = service.resolve_id(id)?;
        let task = service.set_completed(id, complete_date)?;

        if task.is_completed {
            success(format!("Completed '{}' [{}]", task.title, task.short_id()));
        } else {
            success(format!("Reopened '{}' [{}]", task.title, task.short_id()));
        }
    }

    Ok(())
}
