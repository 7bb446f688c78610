use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::strip_ansi;
use ansi_term::Colour;

const OP_MAX: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "done" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "login" | "logout" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `op (target)` with only the operation coloured, cut to `OP_MAX` visible chars.
fn render_op(row: &LogRow) -> String {
    let color = color_for_operation(&row.operation);
    let visible = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };

    let visible = if visible.chars().count() > OP_MAX {
        let mut s = visible.chars().take(OP_MAX - 3).collect::<String>();
        s.push_str("...");
        s
    } else {
        visible
    };

    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rendered: Vec<(String, String)> = entries
            .iter()
            .map(|r| {
                let date = chrono::DateTime::parse_from_rfc3339(&r.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| r.date.clone());
                (date, render_op(r))
            })
            .collect();

        let op_w = rendered
            .iter()
            .map(|(_, op)| strip_ansi(op).chars().count())
            .max()
            .unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|r| r.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = rendered.iter().map(|(d, _)| d.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (row, (date, op)) in entries.iter().zip(rendered) {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op).chars().count()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                row.id,
                date,
                op,
                padding,
                row.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(op: &str, target: &str) -> LogRow {
        LogRow {
            id: 1,
            date: "2024-05-02T10:00:00+02:00".into(),
            operation: op.into(),
            target: target.into(),
            message: "m".into(),
        }
    }

    #[test]
    fn op_column_is_coloured_and_truncated() {
        let short = render_op(&row("add", "1234abcd"));
        assert_eq!(strip_ansi(&short), "add (1234abcd)");
        assert_ne!(short, "add (1234abcd)");

        let long = render_op(&row("migration_applied", &"x".repeat(80)));
        let visible = strip_ansi(&long);
        assert_eq!(visible.chars().count(), OP_MAX);
        assert!(visible.ends_with("..."));
    }
}
