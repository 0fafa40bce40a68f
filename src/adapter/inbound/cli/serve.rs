//! Handler for the `serve` command.

use std::sync::Arc;

use tracing::info;

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::http::serve;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_gateway;
use crate::infrastructure::config::logging::LogFormat;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::sweeper::spawn_sweeper;

/// Execute the serve command.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    apply_overrides(&mut config, args);
    config.init_logging();

    let addr = config.bind_addr()?;
    info!(version = env!("CARGO_PKG_VERSION"), config = %args.config.display(), "chatgate starting");

    let gateway = build_gateway(&config)?;
    let sweeper = config
        .retention()
        .map(|retention| spawn_sweeper(Arc::clone(&gateway.store), retention));

    let result = serve(gateway.router, addr).await;

    if let Some(handle) = sweeper {
        handle.abort();
    }
    result
}

fn apply_overrides(config: &mut Config, args: &ServeArgs) {
    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
    }
    if let Some(level) = &args.log_level {
        config.logging.set_level(level.as_str());
    }
    if args.json_logs {
        config.logging.format = LogFormat::Json;
    }
}
