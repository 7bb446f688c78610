use crate::cli::commands::{open_pool, remote_service, selected_epoch};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::task::Task;
use crate::models::view::ViewFilter;
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREY, RESET, color_for_task};
use crate::utils::formatting::{format_cost, format_done, format_every};
use crate::utils::table::{Column, Table};

/// Rows are ordered by task id so output is stable across refetches.
pub fn render_tasks(tasks: &[Task]) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 8),
        Column::new("Done", 4),
        Column::wrapping("Title", 36),
        Column::new("Cost", 4),
        Column::wrapping("Scheduled", 32),
        Column::new("Repeat", 8),
    ]);

    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|t| t.id);

    for t in sorted {
        let color = color_for_task(t.is_completed);
        table.add_row(vec![
            t.short_id(),
            format_done(t.is_completed),
            format!("{color}{}{RESET}", t.title),
            format_cost(t.cost),
            t.scheduled_on.to_display_string(),
            format_every(t.recurring.map(|r| r.every_n_weeks)),
        ]);
    }
    table.render()
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        epoch,
        view,
        refresh,
    } = cmd
    {
        let pool = open_pool(cfg)?;

        //
        // 1) RESOLVE EPOCH
        //
        let selected = selected_epoch(cfg, &pool.conn, epoch.as_ref())?;
        let filter = ViewFilter::new(*view, selected);

        //
        // 2) FETCH (cache first)
        //
        let service = remote_service(cfg, &pool.conn)?;
        let listing = service.list(&filter, *refresh)?;

        //
        // 3) RENDER
        //
        header(format!("{} · {}", view.label(), selected.to_display_string()));
        if listing.tasks.is_empty() {
            info("No tasks.");
        } else {
            print!("{}", render_tasks(&listing.tasks));
        }
        if listing.from_cache {
            println!("{GREY}(cached, use --refresh to reload){RESET}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::epoch::Epoch;
    use uuid::Uuid;

    fn task(n: u128, title: &str) -> Task {
        Task {
            id: Uuid::from_u128(n),
            title: title.into(),
            cost: None,
            is_completed: false,
            scheduled_on: Epoch::AllTime,
            recurring: None,
        }
    }

    #[test]
    fn rows_are_ordered_by_id_not_server_order() {
        let served = vec![task(0xb0 << 120, "second"), task(0xa0 << 120, "first")];
        let out = render_tasks(&served);
        let first = out.find("first").unwrap();
        let second = out.find("second").unwrap();
        assert!(first < second);
    }
}
