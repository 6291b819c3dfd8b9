use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages;

/// Handle the `init` command
///
/// This creates:
///  - the config directory (if missing)
///  - a starter configuration file (an existing one is left untouched)
pub fn handle(cli: &Cli) -> AppResult<()> {
    println!("⚙️  Initializing catwmigrate…");

    let (path, created) = Config::init_all(cli.config.as_deref())?;
    if created {
        println!("📄 Config file : {}", path.display());
    } else {
        messages::warning(format!(
            "Config file already exists, left untouched: {}",
            path.display()
        ));
    }

    let cfg = Config::load(cli.config.as_deref())?;
    println!("🗄️  Replica     : {}", cfg.replica);
    println!("🔌 Source      : {}", cfg.source.describe());

    println!("🎉 Done. Edit the source credentials, then run 'catwmigrate rebuild'.");
    Ok(())
}
