use crate::auth::{self, TokenStore};
use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let pool = open_pool(cfg)?;
    let store = TokenStore::new(&pool.conn);

    match cmd {
        Commands::Login { username } => {
            auth::login(&store, &cfg.auth_url, username, cfg.request_timeout_secs)?;
            ttlog(&pool.conn, "login", username, "Session token stored")?;
            success(format!("Logged in as {}", username));
        }
        Commands::Logout => {
            if store.clear()? {
                ttlog(&pool.conn, "logout", "", "Session token removed")?;
                success("Logged out.");
            } else {
                info("Not logged in.");
            }
        }
        _ => {}
    }

    Ok(())
}
