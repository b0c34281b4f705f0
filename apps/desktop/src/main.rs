use ehub::domain::config::AppConfig;
use ehub::kernel::config::load_config;
use ehub_desktop::DesktopApp;
use ehub_logger::Logger;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let explicit = std::env::var_os("EHUB_CONFIG").map(PathBuf::from);
    let config: AppConfig = load_config(ehub::config_path(explicit.as_deref(), Path::new("")))?;
    let _logger = Logger::from_config(env!("CARGO_BIN_NAME"), &config.logging)?;

    DesktopApp::new().launch(&config)?;
    Ok(())
}
