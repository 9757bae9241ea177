//! Breath Pacer - A state-managed HTTP server for guided breathing sessions
//! 
//! This is the main entry point for the breath-pacer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use breath_pacer::{
    config::Config,
    state::{AppState, Session},
    api::create_router,
    services::cue_sink_for,
    tasks::{cue_dispatcher_task, SessionController, TICK_PERIOD},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("breath_pacer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting breath-pacer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, steps={}, limit={}",
          config.host, config.port, config.steps.describe(),
          config.limit.map_or("none".to_string(), |minutes| format!("{}min", minutes)));

    // Spawn the session controller that owns the timer engine
    let session = Session::new(config.steps.clone(), config.playback_limit());
    let (handle, controller_task) = SessionController::spawn(session, TICK_PERIOD);

    // Start the cue dispatcher background task
    let sink = cue_sink_for(config.cue_command.as_deref());
    let dispatcher_task = tokio::spawn(cue_dispatcher_task(handle.subscribe(), sink));

    if config.autostart {
        handle.start_countdown().await.map_err(anyhow::Error::msg)?;
    }

    // Create application state and HTTP router with all endpoints
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.steps.clone(),
        handle.clone(),
    ));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /session/start  - Start the 3-2-1 countdown");
    info!("  POST /session/pause  - Toggle pause");
    info!("  POST /session/stop   - Stop the session");
    info!("  POST /session/reset  - Stop and clear the session");
    info!("  PUT  /session/limit  - Set or clear the playback limit");
    info!("  GET  /session        - Current session snapshot");
    info!("  POST /player/load|toggle|stop|seek, GET /player - Music player");
    info!("  GET  /status         - Check current status");
    info!("  GET  /health         - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = handle.shutdown().await {
        tracing::warn!("Session controller already stopped: {}", e);
    }
    controller_task.await?;
    // Event stream is closed now; the dispatcher silences cues and exits.
    dispatcher_task.await?;

    info!("Server shutdown complete");
    Ok(())
}
