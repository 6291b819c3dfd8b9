use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print_config } = cmd {
        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            let yaml = serde_yaml::to_string(cfg)
                .map_err(|e| AppError::Config(format!("cannot render configuration: {e}")))?;
            println!("{yaml}");
        } else {
            println!("📄 Config file : {}", Config::config_file().display());
            println!("🗄️  Replica     : {}", cfg.replica);
            println!("🔌 Source      : {}", cfg.source.describe());
        }
    }

    Ok(())
}
