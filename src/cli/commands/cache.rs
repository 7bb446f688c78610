use crate::cache::store::TaskListCache;
use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::{CYAN, GREEN, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Cache { info: show, clear } = cmd {
        let pool = open_pool(cfg)?;
        let cache = TaskListCache::new(&pool.conn);

        if *show {
            let stats = cache.stats()?;
            println!("{}• Cached lists:{} {}{}{}", CYAN, RESET, GREEN, stats.entries, RESET);
            println!("{}• Cached tasks:{} {}{}{}", CYAN, RESET, GREEN, stats.tasks, RESET);
            for key in &stats.keys {
                println!("    {}", key);
            }
        }

        if *clear {
            let removed = cache.clear()?;
            if removed == 0 {
                info("Cache already empty.");
            } else {
                success(format!("Removed {} cached result(s).", removed));
            }
        }
    }

    Ok(())
}
