use crate::cli::commands::{active_epoch, open_pool, remote_service};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::validation::TaskForm;
use crate::errors::AppResult;
use crate::models::epoch::EpochKind;
use crate::ui::messages::success;
use crate::utils::date::{format_iso, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        title,
        cost,
        schedule,
        date,
        every,
    } = cmd
    {
        let pool = open_pool(cfg)?;

        //
        // 1) BUILD FORM (defaults to the active epoch)
        //
        let (kind, date) = match (schedule, date) {
            (Some(k), d) => (*k, d.clone()),
            (None, Some(d)) => (EpochKind::Day, Some(d.clone())),
            (None, None) => {
                let current = active_epoch(cfg, &pool.conn).load()?;
                (current.kind(), current.start_date().map(format_iso))
            }
        };
        let form = TaskForm {
            title: title.clone(),
            cost: cost.clone(),
            kind,
            date,
            every: every.clone(),
        };

        //
        // 2) VALIDATE (no request on failure)
        //
        let input = form.validate(today(), cfg.week_start)?;

        //
        // 3) CREATE
        //
        let service = remote_service(cfg, &pool.conn)?;
        let task = service.create(&input)?;

        success(format!(
            "Created '{}' [{}] on {}",
            task.title,
            task.short_id(),
            task.scheduled_on.to_display_string()
        ));
    }

    Ok(())
}
