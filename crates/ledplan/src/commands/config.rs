use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use ledplan::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let path = Config::path()?;
            let config = if path.exists() {
                Config::load_from(&path)?
            } else {
                println!("{}", "No config file found, showing defaults.".yellow());
                Config::default()
            };
            print!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", Config::path()?.display());
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_or_default_from(&Config::path()?)?;
            config.set(&key, &value)?;
            config.planner.validate()?;
            let saved = config.save()?;
            println!(
                "{} {key} = {value} ({})",
                "Set".green().bold(),
                saved.display()
            );
            Ok(())
        }
    }
}
