//! Axum control server with a WebSocket draw-command stream.
//!
//! The browser side is an external collaborator: this server only exposes
//! the playback controls as JSON endpoints and forwards the renderer's
//! primitive draw commands over the socket. How bars are actually drawn is
//! entirely the subscriber's concern.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex};
use tower_http::cors::CorsLayer;

use sortscope_engines::Algorithm;

use crate::driver::Driver;
use crate::error::Error;
use crate::player::{Player, PlayerStatus};
use crate::sink::{ColorRole, Renderer, SinkCommand};
use crate::source::parse_fields;

/// A renderer that fans every draw call out to WebSocket subscribers.
///
/// Sending with no subscriber connected fails; that is fine, late
/// subscribers are synchronized from the player status when they attach.
pub struct BroadcastRenderer {
    tx: broadcast::Sender<SinkCommand>,
}

impl BroadcastRenderer {
    pub fn new(tx: broadcast::Sender<SinkCommand>) -> Self {
        Self { tx }
    }

    fn send(&self, command: SinkCommand) {
        let _ = self.tx.send(command);
    }
}

impl Renderer for BroadcastRenderer {
    fn create_bars(&mut self, values: &[i64]) {
        self.send(SinkCommand::CreateBars { values: values.to_vec() });
    }

    fn set_color(&mut self, index: usize, role: ColorRole) {
        self.send(SinkCommand::SetColor { index, role });
    }

    fn update_height(&mut self, index: usize, value: i64) {
        self.send(SinkCommand::UpdateHeight { index, value });
    }

    fn mark_sorted(&mut self, index: usize) {
        self.send(SinkCommand::MarkSorted { index });
    }
}

/// Shared application state.
pub struct AppState {
    driver: Mutex<Driver<BroadcastRenderer>>,
    commands: broadcast::Sender<SinkCommand>,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        let driver = Driver::new(Player::new(BroadcastRenderer::new(tx.clone())));
        Self {
            state: Arc::new(AppState { driver: Mutex::new(driver), commands: tx }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/status", get(status_handler))
            .route("/api/run", post(run_handler))
            .route("/api/playback/pause", post(pause_handler))
            .route("/api/playback/resume", post(resume_handler))
            .route("/api/playback/reset", post(reset_handler))
            .route("/api/playback/speed", post(speed_handler))
            // WebSocket for the draw-command stream
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given port.
    pub async fn serve(self, port: u16) -> Result<(), std::io::Error> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("sortscope server running on http://localhost:{}", port);
        axum::serve(listener, self.router()).await
    }
}

impl Default for VisServer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse { error: self.to_string() });
        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<PlayerStatus> {
    let driver = state.driver.lock().await;
    Json(driver.status().await)
}

#[derive(Deserialize)]
struct RunRequest {
    fields: Vec<String>,
    algorithm: String,
}

async fn run_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RunRequest>,
) -> Result<Json<PlayerStatus>, Error> {
    let algorithm = Algorithm::from_key(&req.algorithm)
        .ok_or_else(|| Error::UnknownAlgorithm(req.algorithm.clone()))?;
    let values = parse_fields(&req.fields)?;

    let mut driver = state.driver.lock().await;
    driver.start(values, algorithm).await?;
    Ok(Json(driver.status().await))
}

async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<PlayerStatus> {
    let mut driver = state.driver.lock().await;
    driver.pause().await;
    Json(driver.status().await)
}

async fn resume_handler(State(state): State<Arc<AppState>>) -> Json<PlayerStatus> {
    let mut driver = state.driver.lock().await;
    driver.resume().await;
    Json(driver.status().await)
}

async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<PlayerStatus> {
    let mut driver = state.driver.lock().await;
    driver.reset().await;
    Json(driver.status().await)
}

#[derive(Deserialize)]
struct SpeedRequest {
    delay_ms: u64,
}

async fn speed_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeedRequest>,
) -> Json<PlayerStatus> {
    let mut driver = state.driver.lock().await;
    driver.set_speed(req.delay_ms).await;
    Json(driver.status().await)
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let mut commands = state.commands.subscribe();

    // Synchronize a late subscriber with the active run's picture before
    // live commands flow.
    let status = {
        let driver = state.driver.lock().await;
        driver.status().await
    };
    if !status.values.is_empty() {
        let mut sync = vec![SinkCommand::CreateBars { values: status.values.clone() }];
        sync.extend(status.sorted.iter().map(|&index| SinkCommand::MarkSorted { index }));
        for command in sync {
            if send_command(&mut socket, &command).await.is_err() {
                return;
            }
        }
    }

    loop {
        tokio::select! {
            received = commands.recv() => match received {
                Ok(command) => {
                    if send_command(&mut socket, &command).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "ws subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                _ => {}
            },
        }
    }
}

async fn send_command(socket: &mut WebSocket, command: &SinkCommand) -> Result<(), ()> {
    let json = serde_json::to_string(command).map_err(|_| ())?;
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}
