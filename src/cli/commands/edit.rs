use crate::cli::commands::{open_pool, remote_service};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::validation::EditForm;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        title,
        cost,
        schedule,
        date,
    } = cmd
    {
        let pool = open_pool(cfg)?;
        let service = remote_service(cfg, &pool.conn)?;
        let id = service.resolve_id(id)?;

        let form = EditForm {
            title: title.clone(),
            cost: cost.clone(),
            kind: *schedule,
            date: date.clone(),
        };
        let input = form.validate(id, cfg.week_start)?;
        let task = service.update(&input)?;

        success(format!("Updated '{}' [{}]", task.title, task.short_id()));
    }

    Ok(())
}
