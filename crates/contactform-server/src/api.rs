use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    routing::post,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use serde_json::Value;
use tracing::info;

use contactform_shared::constants::CONTACT_API_PATH;
use contactform_shared::{ContactDraft, ContactRecord};

use crate::error::ServerError;
use crate::store::ContactStore;

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<ContactStore>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route(CONTACT_API_PATH, post(create_contact))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactRecord>), ServerError> {
    let Json(body) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let draft = ContactDraft::try_from(body).map_err(|e| ServerError::BadRequest(e.to_string()))?;

    let contact = draft.normalize()?;
    let record = state.store.insert(contact).await?;

    info!(id = %record.id, "Contact created");

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Server is running");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request};
    use contactform_store::Database;
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;

    fn state_with(store: ContactStore) -> AppState {
        AppState {
            store: Arc::new(store),
        }
    }

    fn memory_state() -> AppState {
        state_with(ContactStore::ready(Database::open_in_memory().unwrap()))
    }

    fn valid_payload() -> Value {
        json!({
            "name": "A",
            "number": "123",
            "email": "A@B.COM",
            "address": "X",
            "state": "Goa",
            "city": "Y",
        })
    }

    async fn post_raw(state: &AppState, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(CONTACT_API_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        send(state, request).await
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(state: &AppState, body: &Value) -> (StatusCode, Value) {
        post_raw(state, body.to_string()).await
    }

    #[tokio::test]
    async fn test_create_contact_normalizes_fields() {
        let state = memory_state();
        let payload = json!({
            "name": "  Asha Rao ",
            "number": " 98450 12345 ",
            "email": " Asha@Example.COM",
            "address": "12 MG Road\n",
            "state": "Karnataka",
            "city": " Bengaluru ",
        });

        let (status, body) = post_json(&state, &payload).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Asha Rao");
        assert_eq!(body["number"], "98450 12345");
        assert_eq!(body["email"], "asha@example.com");
        assert_eq!(body["address"], "12 MG Road");
        assert_eq!(body["state"], "Karnataka");
        assert_eq!(body["city"], "Bengaluru");
        assert!(Uuid::parse_str(body["_id"].as_str().unwrap()).is_ok());
        assert!(body["createdAt"].is_string());
        assert_eq!(body["createdAt"], body["updatedAt"]);
    }

    #[tokio::test]
    async fn test_uppercase_email_is_stored_lowercase() {
        let state = memory_state();

        let (status, body) = post_json(&state, &valid_payload()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["email"], "a@b.com");

        let id = Uuid::parse_str(body["_id"].as_str().unwrap()).unwrap();
        let stored = state
            .store
            .with_db(|db| db.get_contact(id).unwrap())
            .unwrap();
        assert_eq!(stored.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_duplicate_submissions_create_two_records() {
        let state = memory_state();

        let (_, first) = post_json(&state, &valid_payload()).await;
        let (_, second) = post_json(&state, &valid_payload()).await;

        assert_ne!(first["_id"], second["_id"]);
        let count = state
            .store
            .with_db(|db| db.count_contacts().unwrap())
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected_with_its_name() {
        let state = memory_state();
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("city");

        let (status, body) = post_json(&state, &payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("city"), "message was: {message}");
        assert!(message.starts_with("Contact validation failed"));

        let count = state
            .store
            .with_db(|db| db.count_contacts().unwrap())
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_blank_field_is_rejected() {
        let state = memory_state();
        let mut payload = valid_payload();
        payload["name"] = json!("   ");

        let (status, body) = post_json(&state, &payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Contact validation failed: name: Path `name` is required."
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_bad_request() {
        let state = memory_state();

        let (status, body) = post_raw(&state, "{not json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_array_body_is_not_read_positionally() {
        let state = memory_state();
        let positional = json!(["A", "123", "A@B.COM", "X", "Goa", "Y"]);

        let (status, body) = post_json(&state, &positional).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Request body must be a JSON object, got an array"
        );
        let count = state
            .store
            .with_db(|db| db.count_contacts().unwrap())
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_scalar_bodies_are_bad_requests() {
        let state = memory_state();

        for scalar in [json!("hello"), json!(42), json!(true), Value::Null] {
            let (status, body) = post_json(&state, &scalar).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body was: {scalar}");
            let message = body["message"].as_str().unwrap();
            assert!(message.starts_with("Request body must be a JSON object"));
        }

        let count = state
            .store
            .with_db(|db| db.count_contacts().unwrap())
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_a_bad_request() {
        let state = memory_state();
        let request = Request::builder()
            .method(Method::POST)
            .uri(CONTACT_API_PATH)
            .body(Body::from(valid_payload().to_string()))
            .unwrap();

        let (status, body) = send(&state, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("Content-Type"), "message was: {message}");
    }

    #[tokio::test]
    async fn test_unavailable_store_reports_and_keeps_serving() {
        let state = state_with(ContactStore::unavailable("unable to open database file"));

        for _ in 0..2 {
            let (status, body) = post_json(&state, &valid_payload()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                body["message"],
                "Database unavailable: unable to open database file"
            );
        }
    }

    #[tokio::test]
    async fn test_write_failure_surfaces_store_message() {
        let state = memory_state();
        state
            .store
            .with_db(|db| db.conn().execute_batch("DROP TABLE contacts").unwrap())
            .unwrap();

        let (status, body) = post_json(&state, &valid_payload()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("no such table"), "message was: {message}");
    }

    #[tokio::test]
    async fn test_cors_preflight_is_allowed() {
        let state = memory_state();
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(CONTACT_API_PATH)
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = build_router(state).oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
