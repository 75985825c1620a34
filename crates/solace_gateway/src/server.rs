use crate::types::{MessageRequest, MessageResponse, MoodSnapshot, SummaryQuery};
use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use solace_core::SentimentAnalyzer;
use solace_memory::ConversationSentiment;
use solace_reasoning::SessionStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared state for the route handlers.
#[derive(Clone)]
struct AppState {
    sessions: Arc<SessionStore>,
    analyzer: Arc<dyn SentimentAnalyzer>,
}

/// HTTP front end for the companion.
///
/// - `POST /api/message`: one turn, answered synchronously
/// - `GET /api/summary`: sentiment summary of a session's conversation
/// - `GET /health`: health check
pub struct GatewayServer {
    sessions: Arc<SessionStore>,
    analyzer: Arc<dyn SentimentAnalyzer>,
    host: String,
    port: u16,
}

impl GatewayServer {
    pub fn new(
        sessions: Arc<SessionStore>,
        analyzer: Arc<dyn SentimentAnalyzer>,
        host: &str,
        port: u16,
    ) -> Self {
        Self {
            sessions,
            analyzer,
            host: host.to_string(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            sessions: self.sessions.clone(),
            analyzer: self.analyzer.clone(),
        };
        Router::new()
            .route("/health", get(health))
            .route("/api/message", post(handle_message))
            .route("/api/summary", get(handle_summary))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Bind and serve until the server stops.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.addr();
        let app = self.router();

        let listener = match tokio::net::TcpListener::bind(&addr).await {
            Ok(l) => l,
            Err(e) => {
                tracing::error!("Gateway failed to bind {}: {}", addr, e);
                return Err(e).with_context(|| format!("binding gateway to {}", addr));
            }
        };
        tracing::info!("Gateway listening on {}", addr);
        axum::serve(listener, app)
            .await
            .context("gateway server error")
    }
}

// ============================================================================
// Route handlers
// ============================================================================

async fn health() -> &'static str {
    "ok"
}

/// POST /api/message: score the text, run one turn, log the exchange.
async fn handle_message(
    State(state): State<AppState>,
    Json(req): Json<MessageRequest>,
) -> Json<MessageResponse> {
    let report = state.analyzer.analyze(&req.message);
    let session = state.sessions.session(req.session_id.as_deref()).await;
    let mut session = session.lock().await;

    let bot = session.engine.respond(&req.message, Some(report.label));
    session.log.add_exchange(&req.message, &bot, &report);
    let memory = session.engine.memory();
    let mood = MoodSnapshot {
        score: memory.mood_score,
        state: memory.mood_state(),
    };
    tracing::debug!(
        session = req.session_id.as_deref().unwrap_or(solace_reasoning::DEFAULT_SESSION),
        mood = mood.score,
        "Gateway turn answered"
    );

    Json(MessageResponse {
        user: req.message,
        bot,
        sentiment: report,
        mood,
    })
}

/// GET /api/summary: 404 for sessions that never spoke.
async fn handle_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ConversationSentiment>, StatusCode> {
    let session = state
        .sessions
        .get(query.session_id.as_deref())
        .await
        .ok_or(StatusCode::NOT_FOUND)?;
    let session = session.lock().await;
    Ok(Json(session.log.summarize(state.analyzer.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_core::{KeywordSentiment, Lexicons, MoodState, SentimentLabel};
    use solace_reasoning::EngineConfig;

    fn state() -> AppState {
        AppState {
            sessions: Arc::new(SessionStore::new(
                Lexicons::shared().unwrap(),
                EngineConfig::default(),
            )),
            analyzer: Arc::new(KeywordSentiment),
        }
    }

    fn request(message: &str, session_id: Option<&str>) -> Json<MessageRequest> {
        Json(MessageRequest {
            message: message.into(),
            session_id: session_id.map(String::from),
        })
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn test_message_round_trip() {
        let state = state();
        let Json(resp) = handle_message(State(state.clone()), request("my name is Alex", None)).await;
        assert_eq!(resp.user, "my name is Alex");
        assert_eq!(resp.bot, "Nice to meet you, Alex! I'm Solace. How are you doing today?");
        assert_eq!(resp.mood.state, MoodState::Neutral);

        let Json(resp) =
            handle_message(State(state.clone()), request("I feel extremely anxious about my exam", None)).await;
        assert_eq!(resp.mood.score, -7);
        assert_eq!(resp.sentiment.label, SentimentLabel::Negative);
        assert_eq!(resp.mood.state, MoodState::VeryNegative);
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_memory() {
        let state = state();
        handle_message(State(state.clone()), request("my name is Alex", Some("a"))).await;
        let Json(resp) = handle_message(State(state.clone()), request("I feel sad", Some("b"))).await;
        assert!(!resp.bot.contains("Alex"));
        assert_eq!(state.sessions.len().await, 2);
    }

    #[tokio::test]
    async fn test_session_ids_cannot_grow_the_store_without_bound() {
        let state = AppState {
            sessions: Arc::new(SessionStore::with_capacity(
                Lexicons::shared().unwrap(),
                EngineConfig::default(),
                16,
            )),
            analyzer: Arc::new(KeywordSentiment),
        };
        for i in 0..200 {
            let id = format!("client-{i}");
            handle_message(State(state.clone()), request("hello", Some(id.as_str()))).await;
        }
        assert_eq!(state.sessions.len().await, 16);
    }

    #[tokio::test]
    async fn test_summary_for_unknown_session_is_404() {
        let result = handle_summary(
            State(state()),
            Query(SummaryQuery {
                session_id: Some("nobody".into()),
            }),
        )
        .await;
        assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_summary_after_messages() {
        let state = state();
        handle_message(State(state.clone()), request("I am so happy today", Some("s"))).await;
        handle_message(State(state.clone()), request("this is great", Some("s"))).await;

        let Json(summary) = handle_summary(
            State(state),
            Query(SummaryQuery {
                session_id: Some("s".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(summary.per_message.len(), 2);
        assert_eq!(summary.final_label, SentimentLabel::Positive);
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();
        let server = GatewayServer::new(
            Arc::new(SessionStore::new(Lexicons::shared().unwrap(), EngineConfig::default())),
            Arc::new(KeywordSentiment),
            "127.0.0.1",
            port,
        );
        assert!(server.serve().await.is_err());
    }
}
