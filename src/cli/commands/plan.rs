use crate::cli::commands::list::render_tasks;
use crate::cli::commands::{open_pool, remote_service, selected_epoch};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::planning::{Board, column_epoch, column_title};
use crate::errors::AppResult;
use crate::ui::messages::{header, success};
use crate::utils::colors::{GREY, RESET};
use crate::utils::date::today;

pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for column in &board.columns {
        out.push_str(&format!(
            "\n{} {GREY}({}){RESET}\n",
            column.title(),
            column.epoch.to_display_string()
        ));
        if column.tasks.is_empty() {
            out.push_str(&format!("{GREY}  (empty){RESET}\n"));
        } else {
            out.push_str(&render_tasks(&column.tasks));
        }
    }
    out
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Plan { epoch, refresh } => {
            let pool = open_pool(cfg)?;
            let active = selected_epoch(cfg, &pool.conn, epoch.as_ref())?;

            let service = remote_service(cfg, &pool.conn)?;
            let board = service.board(active, today(), *refresh)?;

            header(format!("Planning · {}", active.to_display_string()));
            print!("{}", render_board(&board));
            if board.from_cache {
                println!("{GREY}(cached, use --refresh to reload){RESET}");
            }
        }

        Commands::Move { id, to, epoch } => {
            let pool = open_pool(cfg)?;
            let active = selected_epoch(cfg, &pool.conn, epoch.as_ref())?;
            let target = column_epoch(&active, *to, today(), cfg.week_start);

            let service = remote_service(cfg, &pool.conn)?;
            let id = service.resolve_id(id)?;
            let task = service.reschedule(id, target)?;

            success(format!(
                "Moved '{}' [{}] to {} ({})",
                task.title,
                task.short_id(),
                column_title(*to),
                task.scheduled_on.to_display_string()
            ));
        }

        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::epoch::{Epoch, WeekStart};
    use crate::models::task::Task;
    use crate::utils::formatting::strip_ansi;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn board_prints_every_column_in_order() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let task = Task {
            id: Uuid::from_u128(5),
            title: "someday".into(),
            cost: None,
            is_completed: false,
            scheduled_on: Epoch::AllTime,
            recurring: None,
        };
        let board = Board::build(Epoch::of_date(day), vec![task], day, WeekStart::Monday);
        let out = strip_ansi(&render_board(&board));

        let this_day = out.find("This Day (May 2nd, 2024)").unwrap();
        let this_week = out.find("This Week (April 29th, 2024 – May 5th, 2024)").unwrap();
        let unscheduled = out.find("Not Scheduled (All Time)").unwrap();
        assert!(this_day < this_week && this_week < unscheduled);
        assert!(out[unscheduled..].contains("someday"));
        assert!(out[this_day..this_week].contains("(empty)"));
    }
}
