use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::post,
    Json,
};
use axum_server::Handle;
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use meetbot_common::models::{Activity, MeetingSubmit};
use meetbot_core::config::{
    NotifyConfig, DEFAULT_LEAD_GAP_MINUTES, DEFAULT_MEETING_DURATION_MINUTES,
};
use meetbot_core::platforms::{BotConnectorChannel, GraphScheduleClient, DEFAULT_GRAPH_BASE_URL};
use meetbot_core::registry::ConversationRegistry;
use meetbot_core::repositories::memory::{
    InMemoryActivityMappingRepository, InMemoryFavoriteRoomRepository, InMemoryTokenProvider,
    InMemoryUserSettingsRepository, PassthroughRoomFilter,
};
use meetbot_core::services::NotifyService;
use meetbot_core::Error;

#[derive(Parser, Debug, Clone)]
#[command(name = "meetbot")]
#[command(author, version, about = "Favorite meeting rooms bot - proactive notification server")]
struct Args {
    /// Address to bind the HTTP surface to
    #[arg(long, default_value = "0.0.0.0:3978")]
    bind_addr: String,

    /// Bot application id (falls back to the MICROSOFT_APP_ID env var)
    #[arg(long, default_value = "")]
    app_id: String,

    /// Minutes between "now" and the start of the availability window
    #[arg(long, default_value_t = DEFAULT_LEAD_GAP_MINUTES)]
    lead_gap_minutes: i64,

    /// Length of the availability window in minutes
    #[arg(long, default_value_t = DEFAULT_MEETING_DURATION_MINUTES)]
    default_duration_minutes: i64,

    /// Microsoft Graph base URL
    #[arg(long, default_value = DEFAULT_GRAPH_BASE_URL)]
    graph_base_url: String,
}

#[derive(Clone)]
struct AppState {
    registry: Arc<ConversationRegistry>,
    notify: Arc<NotifyService>,
}

/// Inbound Bot Framework activity. The only thing this surface does with it
/// is capture (or refresh) the sender's conversation reference so the
/// proactive path can reach them later.
async fn handle_messages(
    State(state): State<AppState>,
    Json(activity): Json<Activity>,
) -> StatusCode {
    match activity.conversation_reference() {
        Some(reference) => {
            state.registry.register(reference);
            StatusCode::OK
        }
        None => StatusCode::BAD_REQUEST,
    }
}

/// Task-module submit. Each trigger runs as its own task; triggers for
/// different users are independent and carry no ordering guarantee.
async fn handle_submit(
    State(state): State<AppState>,
    Json(submit): Json<MeetingSubmit>,
) -> StatusCode {
    let notify = state.notify.clone();
    tokio::spawn(async move {
        let user_id = submit.user_id.clone();
        if let Err(e) = notify.handle_submit(submit).await {
            error!("notify flow failed for user {}: {}", user_id, e);
        }
    });
    StatusCode::OK
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let app_id = if args.app_id.is_empty() {
        std::env::var("MICROSOFT_APP_ID").unwrap_or_default()
    } else {
        args.app_id.clone()
    };

    let mut config = NotifyConfig::new(app_id);
    config.lead_gap_minutes = args.lead_gap_minutes;
    config.default_duration_minutes = args.default_duration_minutes;

    let registry = Arc::new(ConversationRegistry::new());
    let connector_token = std::env::var("BOT_CONNECTOR_TOKEN").ok();

    let notify = Arc::new(NotifyService::new(
        registry.clone(),
        Arc::new(BotConnectorChannel::new(connector_token)),
        Arc::new(InMemoryUserSettingsRepository::new()),
        Arc::new(InMemoryFavoriteRoomRepository::new()),
        Arc::new(InMemoryActivityMappingRepository::new()),
        Arc::new(GraphScheduleClient::new(args.graph_base_url.clone())),
        Arc::new(PassthroughRoomFilter),
        Arc::new(InMemoryTokenProvider::new()),
        config,
    ));

    let state = AppState { registry, notify };

    let app = Router::new()
        .route("/api/messages", post(handle_messages))
        .route("/api/notify/submit", post(handle_submit))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let addr: SocketAddr = args.bind_addr.parse()?;
    info!("meetbot listening on http://{}", addr);

    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown signal received");
        shutdown_handle.graceful_shutdown(None);
    });

    axum_server::Server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    info!("meetbot shut down.");
    Ok(())
}
