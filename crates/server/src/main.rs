use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use dashboard::{Dashboard, Rendered, Session};
use dataset::Dataset;
use shared::{
    domain::{ControlSpec, ViewId},
    error::{ApiError, ErrorCode},
    protocol::{Chart, ClientRequest, ControlOverrides, ServerEvent, WorthSummary},
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod app_state;
mod assets;
mod config;
mod layout;

use app_state::AppState;
use assets::{StaticAsset, StaticAssets};
use config::load_settings;

const MAX_REQUEST_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings();
    let dataset = Dataset::load(&settings.data_path).map_err(|error| {
        error!(
            data_path = %settings.data_path.display(),
            error = %format!("{error:#}"),
            "failed to load dataset; verify the path and that every worth value is numeric"
        );
        error
    })?;
    let assets = StaticAssets::load(&settings.favicon_path, &settings.sidebar_image_path)?;

    let dashboard = Arc::new(Dashboard::new(Arc::new(dataset)));
    let state = AppState {
        page: layout::render_page(&dashboard).into(),
        dashboard,
        assets: Arc::new(assets),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/assets/favicon", get(favicon))
        .route("/assets/sidebar-image", get(sidebar_image))
        .route("/api/summary", get(summary))
        .route("/api/controls", get(controls))
        .route("/api/views", get(render_defaults))
        .route("/api/views/:view", post(render_view))
        .route("/ws", get(ws_handler))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES))
        .with_state(state)
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.to_string())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn favicon(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    asset_response(&state.assets.favicon)
}

async fn sidebar_image(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    asset_response(&state.assets.sidebar_image)
}

fn asset_response(asset: &StaticAsset) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, asset.content_type)],
        asset.bytes.clone(),
    )
}

async fn summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<WorthSummary>> {
    state.dashboard.dataset().describe().map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(ErrorCode::NotFound, "dataset is empty")),
        )
    })
}

async fn controls(State(state): State<Arc<AppState>>) -> Json<Vec<ControlSpec>> {
    Json(state.dashboard.controls().to_vec())
}

async fn render_defaults(State(state): State<Arc<AppState>>) -> Json<Vec<ServerEvent>> {
    let session = Session::new(state.dashboard.clone());
    Json(
        session
            .render_all()
            .into_iter()
            .map(Rendered::into_event)
            .collect(),
    )
}

async fn render_view(
    State(state): State<Arc<AppState>>,
    Path(view): Path<String>,
    Json(overrides): Json<ControlOverrides>,
) -> ApiResult<Json<Chart>> {
    let view: ViewId = view.parse().map_err(|_| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(
                ErrorCode::NotFound,
                format!("view '{view}' not found"),
            )),
        )
    })?;
    let controls = state
        .dashboard
        .state_with(&overrides)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ApiError::from(e))))?;
    let chart = state.dashboard.render(view, &controls).map_err(|e| {
        warn!(%view, error = %e, "view render failed");
        (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiError::from(e)))
    })?;
    Ok(Json(chart))
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_connection(state, socket))
}

/// One page session. Messages are handled to completion, one at a time.
async fn ws_connection(state: Arc<AppState>, mut socket: WebSocket) {
    let session_id = Uuid::new_v4();
    let mut session = Session::new(state.dashboard.clone());
    info!(%session_id, "dashboard session opened");

    let mut opening = vec![ServerEvent::SessionOpened {
        controls: state.dashboard.controls().to_vec(),
    }];
    opening.extend(session.render_all().into_iter().map(Rendered::into_event));
    if send_events(&mut socket, opening).await.is_err() {
        return;
    }

    while let Some(Ok(message)) = socket.recv().await {
        let events = match message {
            Message::Text(text) => handle_client_message(&mut session, &text),
            Message::Close(_) => break,
            _ => continue,
        };
        if send_events(&mut socket, events).await.is_err() {
            break;
        }
    }

    info!(%session_id, "dashboard session closed");
}

fn handle_client_message(session: &mut Session, text: &str) -> Vec<ServerEvent> {
    let request = match serde_json::from_str::<ClientRequest>(text) {
        Ok(request) => request,
        Err(e) => {
            return vec![ServerEvent::Error(ApiError::new(
                ErrorCode::Validation,
                format!("malformed request: {e}"),
            ))]
        }
    };

    match request {
        ClientRequest::SetControl { control, value } => {
            match session.set_control(control, value) {
                Ok(renders) => renders.into_iter().map(Rendered::into_event).collect(),
                Err(e) => {
                    debug!(%control, error = %e, "rejected control change");
                    vec![ServerEvent::Error(e.into())]
                }
            }
        }
        ClientRequest::RenderAll => session
            .render_all()
            .into_iter()
            .map(Rendered::into_event)
            .collect(),
    }
}

async fn send_events(socket: &mut WebSocket, events: Vec<ServerEvent>) -> Result<(), axum::Error> {
    for text in encode_events(events) {
        socket.send(Message::Text(text)).await?;
    }
    Ok(())
}

/// JSON frames in event order. Events that fail to serialize are logged and skipped.
fn encode_events(events: Vec<ServerEvent>) -> Vec<String> {
    events
        .into_iter()
        .filter_map(|event| match serde_json::to_string(&event) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "dropping unserializable server event");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
