//! Handler for `check config`.

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate configuration without starting the gateway.
///
/// Also resolves the backend credential and the listen address, so a
/// passing check means `serve` will get past startup.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;
    config.backend.api_token()?;
    let addr = config.bind_addr()?;

    println!("Configuration OK");
    println!("  Config          {}", path.display());
    println!("  Bind            {addr}");
    println!("  Text endpoint   {}", config.backend.text_url()?);
    println!("  Image endpoint  {}", config.backend.image_url()?);
    println!("  Upload dir      {}", config.storage.upload_dir.display());
    println!("  Public prefix   {}", config.storage.public_prefix);
    println!("  Concurrency     {}", config.dispatch.max_concurrency);
    match config.retention() {
        Some(r) => println!("  Retention       {}s", r.as_secs()),
        None => println!("  Retention       disabled"),
    }

    Ok(())
}
