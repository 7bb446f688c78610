use crate::cli::commands::{open_pool, remote_service};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let pool = open_pool(cfg)?;
        let service = remote_service(cfg, &pool.conn)?;
        let id = service.resolve_id(id)?;

        let prompt = format!("Delete task {}? This action is irreversible.", id);
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let deleted = service.delete(id)?;
        success(format!("Task {} has been deleted.", deleted));
    }

    Ok(())
}
