use crate::errors::CliError;
use crate::GlobalOpts;
use clap::Subcommand;
use colored::Colorize;
use sapphillon_config::Config;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show the values read from the config file
    Show,
    /// Print the config file location
    Path,
}

/// Handle `sapphillon config`
pub fn handle_config(action: Option<ConfigAction>, opts: &GlobalOpts) -> Result<(), CliError> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", "Configuration:".bold().green());
            if config.is_empty() {
                if opts.verbosity_level() > 0 {
                    println!("  {}", "(empty)".yellow());
                }
            } else {
                for (key, value) in config.values() {
                    println!("  {}: {}", key.cyan(), value);
                }
            }
        }
        ConfigAction::Path => println!("{}", Config::path()?.display()),
    }
    Ok(())
}
