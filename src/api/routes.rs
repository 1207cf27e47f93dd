use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<crate::core::AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/holdings", get(holdings::current))
        .route("/api/holdings/refresh", post(holdings::refresh))
        .route("/api/view", get(holdings::view))
        .route("/api/portfolio/toggle", post(holdings::toggle_portfolio))
}

mod health {
    use axum::{extract::State, Json};
    use serde_json::json;

    use crate::core::AppState;

    pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
        Json(json!({"status": "ok", "screen": state.screen.status()}))
    }
}

mod holdings {
    use axum::{extract::State, http::StatusCode, Json};
    use serde_json::json;

    use crate::{
        core::AppState,
        screen::{self, RefreshOutcome, ScreenModel, View},
    };

    pub async fn current(State(state): State<AppState>) -> Json<ScreenModel> {
        Json(state.screen.model())
    }

    pub async fn view(State(state): State<AppState>) -> Json<View> {
        Json(screen::render(&state.screen.model()))
    }

    pub async fn refresh(
        State(state): State<AppState>,
    ) -> Result<Json<ScreenModel>, (StatusCode, Json<serde_json::Value>)> {
        // Run on its own task so a client hanging up mid-fetch does not
        // leave the screen stuck in INITIAL.
        let screen = state.screen.clone();
        let outcome = tokio::spawn(async move { screen.refresh().await })
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": e.to_string()})),
                )
            })?;

        match outcome {
            RefreshOutcome::Completed(_) => Ok(Json(state.screen.model())),
            RefreshOutcome::AlreadyInFlight => Err((
                StatusCode::CONFLICT,
                Json(json!({"error": "refresh already in flight"})),
            )),
        }
    }

    pub async fn toggle_portfolio(State(state): State<AppState>) -> Json<serde_json::Value> {
        let expanded = state.screen.toggle_portfolio();
        Json(json!({"portfolioExpanded": expanded}))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{AppConfig, AppState};
    use crate::screen::testing::{record, ScriptedSource};
    use crate::screen::HoldingsScreen;
    use serde_json::Value;
    use std::net::SocketAddr;
    use std::sync::Arc;

    async fn serve(source: Arc<ScriptedSource>) -> String {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let state = AppState {
            config: Arc::new(config),
            screen: Arc::new(HoldingsScreen::new(source)),
        };

        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let app = crate::api::router(state);
        let server = axum::Server::bind(&addr).serve(app.into_make_service());
        let addr = server.local_addr();
        tokio::spawn(server);
        format!("http://{addr}")
    }

    fn tcs_source() -> Arc<ScriptedSource> {
        let tcs = record("TCS", 10, 3250.5, 2480.3, 3312.0);
        Arc::new(ScriptedSource::new(vec![Ok(vec![tcs])]))
    }

    #[tokio::test]
    async fn health_reports_screen_status() {
        let base = serve(Arc::new(ScriptedSource::new(vec![]))).await;
        let v: Value = reqwest::get(format!("{base}/api/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(v["status"], "ok");
        assert_eq!(v["screen"], "INITIAL");
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let base = serve(Arc::new(ScriptedSource::new(vec![]))).await;
        let resp = reqwest::get(format!("{base}/api/nope")).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        let v: Value = resp.json().await.unwrap();
        assert_eq!(v["error"], "not found");
    }

    #[tokio::test]
    async fn refresh_then_read_holdings() {
        let source = tcs_source();
        let base = serve(source.clone()).await;
        let http = reqwest::Client::new();

        let resp = http.post(format!("{base}/api/holdings/refresh")).send().await.unwrap();
        assert!(resp.status().is_success());
        let v: Value = resp.json().await.unwrap();
        assert_eq!(v["state"]["status"], "SUCCESS");
        assert_eq!(source.calls(), 1);

        let v: Value = http
            .get(format!("{base}/api/holdings"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(v["state"]["snapshot"]["holdings"][0]["symbol"], "TCS");
        assert_eq!(v["state"]["snapshot"]["holdings"][0]["avgPrice"], 2480.3);
        assert_eq!(v["portfolioExpanded"], false);
    }

    #[tokio::test]
    async fn failed_refresh_renders_error_view() {
        let base = serve(Arc::new(ScriptedSource::new(vec![Err("HTTP 502")]))).await;
        let http = reqwest::Client::new();

        let v: Value = http
            .post(format!("{base}/api/holdings/refresh"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(v["state"]["status"], "FAILURE");

        let v: Value = http
            .get(format!("{base}/api/view"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(v["body"]["kind"], "error");
        assert_eq!(v["body"]["message"], "Error fetching data");
        assert!(v["summary"].is_null());
    }

    #[tokio::test]
    async fn toggle_expands_summary_in_view() {
        let source = tcs_source();
        let base = serve(source).await;
        let http = reqwest::Client::new();

        http.post(format!("{base}/api/holdings/refresh")).send().await.unwrap();
        let v: Value = http
            .post(format!("{base}/api/portfolio/toggle"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(v["portfolioExpanded"], true);

        let v: Value = http
            .get(format!("{base}/api/view"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(v["summary"]["expanded"], true);
        assert_eq!(v["summary"]["details"].as_array().unwrap().len(), 3);
        assert_eq!(v["summary"]["total"]["value"], "₹7702.00");
    }
}
