//! `authorscan config` - inspect or create the user config file

use anyhow::Result;
use console::style;

use super::ConfigAction;
use crate::config::UserConfig;

pub(super) fn run(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = UserConfig::load()?;
            match UserConfig::user_config_path() {
                Some(path) if path.exists() => {
                    println!("{}", style(format!("# {}", path.display())).dim())
                }
                _ => println!("{}", style("# no config file, showing defaults").dim()),
            }
            print!("{}", config.to_display_toml()?);
        }
        ConfigAction::Init => {
            let path = UserConfig::init_user_config()?;
            println!(
                "{}Config file ready at {}",
                style("✓ ").green(),
                style(path.display()).cyan()
            );
        }
        ConfigAction::Path => match UserConfig::user_config_path() {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("Could not determine config directory"),
        },
    }
    Ok(())
}
