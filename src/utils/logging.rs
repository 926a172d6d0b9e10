use crate::utils::config::ServerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub fn default_filter(level: &str) -> String {
    format!("agent_router={level},tower_http={level}")
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects debug over the
/// configured level.
pub fn init(server: &ServerConfig, verbose: bool) {
    let level = if verbose { "debug" } else { server.log_level.as_str() };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into());

    let registry = tracing_subscriber::registry().with(filter);

    // try_init fails if a subscriber is already installed.
    if server.log_format.eq_ignore_ascii_case("json") {
        let _ = registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init();
    } else {
        let _ = registry.with(tracing_subscriber::fmt::layer()).try_init();
    }
}
