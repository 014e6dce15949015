//! Show or persist the application configuration.

use stillframe_common::config::AppConfig;

pub fn run(config: &AppConfig, init: bool) -> anyhow::Result<()> {
    if init {
        config.save()?;
        println!("Wrote {}", AppConfig::path().display());
    } else {
        println!("{}", serde_json::to_string_pretty(config)?);
    }
    Ok(())
}
