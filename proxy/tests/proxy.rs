// Test target reuses the package deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	routing::{get, post},
};
use common_ground_proxy::{AppState, ProxyConfig, app};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Backend {
	set_api_key_calls: Arc<AtomicUsize>,
}

#[derive(serde::Deserialize)]
struct UserQuery {
	user_id: Option<String>,
}

/// Stand-in for the real backend with one behaviour per endpoint.
fn fake_backend(backend: Backend) -> Router {
	Router::new()
		.route(
			"/api/graph_data",
			get(|Query(q): Query<UserQuery>| async move {
				Json(json!({
					"nodes": [{"id": q.user_id, "label": q.user_id, "type": "person"}],
					"edges": []
				}))
			}),
		)
		.route(
			"/api/map_data",
			get(|| async {
				(
					StatusCode::NOT_FOUND,
					Json(json!({"detail": "User 'ghost' not found"})),
				)
			}),
		)
		.route(
			"/api/interests_list",
			get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
		)
		.route(
			"/set_api_key",
			post(
				|State(b): State<Backend>, Json(body): Json<Value>| async move {
					b.set_api_key_calls.fetch_add(1, Ordering::SeqCst);
					if body["api_key"] == "bad" {
						return (
							StatusCode::UNPROCESSABLE_ENTITY,
							Json(json!({"detail": "Invalid API key"})),
						);
					}
					(
						StatusCode::OK,
						Json(json!({"message": format!("API key set for {}", body["user_id"].as_str().unwrap_or(""))})),
					)
				},
			),
		)
		.with_state(backend)
}

async fn serve(router: Router) -> SocketAddr {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
	let addr = listener.local_addr().expect("addr");
	tokio::spawn(async move {
		axum::serve(listener, router).await.expect("serve");
	});
	addr
}

async fn proxy_for(backend_url: String) -> String {
	let config = ProxyConfig::default().with_backend(backend_url);
	let addr = serve(app(AppState::new(reqwest::Client::new(), &config))).await;
	format!("http://{addr}")
}

async fn setup() -> (String, Backend) {
	let backend = Backend::default();
	let backend_addr = serve(fake_backend(backend.clone())).await;
	(proxy_for(format!("http://{backend_addr}")).await, backend)
}

#[tokio::test]
async fn graph_data_is_passed_through_with_user_id() -> anyhow::Result<()> {
	let (proxy, _) = setup().await;
	let response = reqwest::get(format!("{proxy}/api/graph_data?user_id=alice")).await?;
	assert_eq!(response.status(), 200);
	let body: Value = response.json().await?;
	assert_eq!(body["nodes"][0]["id"], "alice");
	Ok(())
}

#[tokio::test]
async fn backend_detail_is_mirrored_as_error() -> anyhow::Result<()> {
	let (proxy, _) = setup().await;
	let response = reqwest::get(format!("{proxy}/api/map_data?user_id=ghost")).await?;
	assert_eq!(response.status(), 404);
	let body: Value = response.json().await?;
	assert_eq!(body, json!({"error": "User 'ghost' not found"}));
	Ok(())
}

#[tokio::test]
async fn failure_without_detail_uses_generic_message() -> anyhow::Result<()> {
	let (proxy, _) = setup().await;
	let response = reqwest::get(format!("{proxy}/api/interests_list?user_id=a")).await?;
	assert_eq!(response.status(), 500);
	let body: Value = response.json().await?;
	assert_eq!(body, json!({"error": "Failed to fetch interests"}));
	Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway() -> anyhow::Result<()> {
	let closed = {
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		listener.local_addr()?
	};
	let proxy = proxy_for(format!("http://{closed}")).await;
	let response = reqwest::get(format!("{proxy}/api/graph_data?user_id=a")).await?;
	assert_eq!(response.status(), 502);
	let body: Value = response.json().await?;
	let message = body["error"].as_str().unwrap_or_default();
	assert!(message.starts_with("Failed to fetch graph data"));
	Ok(())
}

#[tokio::test]
async fn set_api_key_requires_both_fields() -> anyhow::Result<()> {
	let (proxy, backend) = setup().await;
	let client = reqwest::Client::new();
	for body in [
		json!({"user_id": "", "api_key": "k"}),
		json!({"user_id": "u", "api_key": "   "}),
		json!({"user_id": "u"}),
	] {
		let response = client
			.post(format!("{proxy}/api/set-api-key"))
			.json(&body)
			.send()
			.await?;
		assert_eq!(response.status(), 400);
		let body: Value = response.json().await?;
		assert_eq!(body, json!({"detail": "user_id and api_key are required"}));
	}
	assert_eq!(backend.set_api_key_calls.load(Ordering::SeqCst), 0);
	Ok(())
}

#[tokio::test]
async fn set_api_key_forwards_and_mirrors_rejections() -> anyhow::Result<()> {
	let (proxy, backend) = setup().await;
	let client = reqwest::Client::new();

	let ok = client
		.post(format!("{proxy}/api/set-api-key"))
		.json(&json!({"user_id": "alice", "api_key": "secret"}))
		.send()
		.await?;
	assert_eq!(ok.status(), 200);
	let body: Value = ok.json().await?;
	assert_eq!(body["message"], "API key set for alice");

	let rejected = client
		.post(format!("{proxy}/api/set-api-key"))
		.json(&json!({"user_id": "alice", "api_key": "bad"}))
		.send()
		.await?;
	assert_eq!(rejected.status(), 422);
	let body: Value = rejected.json().await?;
	assert_eq!(body, json!({"detail": "Invalid API key"}));

	assert_eq!(backend.set_api_key_calls.load(Ordering::SeqCst), 2);
	Ok(())
}

#[tokio::test]
async fn set_api_key_transport_failure_is_internal_error() -> anyhow::Result<()> {
	let closed = {
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		listener.local_addr()?
	};
	let proxy = proxy_for(format!("http://{closed}")).await;
	let response = reqwest::Client::new()
		.post(format!("{proxy}/api/set-api-key"))
		.json(&json!({"user_id": "alice", "api_key": "secret"}))
		.send()
		.await?;
	assert_eq!(response.status(), 500);
	let body: Value = response.json().await?;
	assert_eq!(body, json!({"detail": "Internal server error"}));
	Ok(())
}

#[tokio::test]
async fn health_answers_locally() -> anyhow::Result<()> {
	let proxy = proxy_for("http://127.0.0.1:9".to_string()).await;
	let body = reqwest::get(format!("{proxy}/health")).await?.text().await?;
	assert_eq!(body, "ok");
	Ok(())
}
