use agent_router::{
    agents::report,
    api::routes::create_router,
    cli::{output::Output, Cli, Commands},
    utils::logging,
    AppState, Config,
};
use anyhow::Context;
use std::process::ExitCode;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match run(cli, &output).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, output: &Output) -> anyhow::Result<()> {
    let mut config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    let command = cli.command();

    if let Commands::Serve { host, port } = &command {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }

    logging::init(&config.server, cli.verbose);
    if cli.config.exists() {
        info!("Loaded configuration from {}", cli.config.display());
    } else {
        debug!("{} not found, using default configuration", cli.config.display());
    }
    debug!(keys = ?config.keys, "Resolved API keys");

    match command {
        Commands::Serve { .. } => {
            output.banner();
            serve(config, output).await
        }
        Commands::Ask { query } => {
            let state = AppState::from_config(config)?;
            let response = report(&query, state.agent.stream(&query)).await;
            output.response(&response)?;
            Ok(())
        }
        Commands::Tools => {
            let state = AppState::from_config(config)?;
            output.tools(&state.agent.tools().get_tool_definitions());
            Ok(())
        }
    }
}

async fn serve(config: Config, output: &Output) -> anyhow::Result<()> {
    for (env, key) in [
        (&config.agent.model.api_key_env, &config.keys.agent),
        (&config.weather.api_key_env, &config.keys.weather),
    ] {
        if key.is_none() {
            output.warning(&format!("{} is not set", env));
        }
    }

    let addr = config.bind_address();
    let model = config.agent.model.model.clone();
    let state = AppState::from_config(config)?;
    let max_iterations = state.agent.max_iterations();
    info!(
        tools = ?state.agent.tools().tool_names(),
        max_iterations,
        "Agent ready"
    );

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    output.success("Server started");
    output.kv("Address", &format!("http://{}", addr));
    output.kv("Model", &model);
    output.kv("Max iterations", &max_iterations.to_string());
    output.info("Press Ctrl+C to stop");
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
