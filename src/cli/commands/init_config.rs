//! Init config command handler

use crate::config::Config;

pub fn cmd_init_config() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml. Fill in the [appwrite] ids before use.");
    } else {
        println!("config.toml already exists.");
    }
    Ok(())
}
