use anyhow::{Context, Result};
use cssflip_cli::{Config, ConfigError, USAGE, convert_tree};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            println!("{USAGE}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    let summary = convert_tree(&config)
        .with_context(|| format!("converting stylesheets under {}", config.root.display()))?;

    log::info!(
        "wrote {} stylesheets, {} declarations flipped",
        summary.files(),
        summary.substitutions()
    );
    Ok(())
}
