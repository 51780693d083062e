//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::CrustaceanService;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::crustaceans::{
    self, CreateCrustaceanRequest, CrustaceanResponse, CrustaceanState,
    PaginatedCrustaceanResponse, UpdateCrustaceanRequest,
};
use crate::interfaces::http::modules::health::{self, ComponentHealth, HealthResponse, HealthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        crustaceans::create_crustacean,
        crustaceans::list_crustaceans,
        crustaceans::get_crustacean,
        crustaceans::update_crustacean,
        crustaceans::delete_crustacean,
    ),
    components(
        schemas(
            HealthResponse,
            ComponentHealth,
            CrustaceanResponse,
            CreateCrustaceanRequest,
            UpdateCrustaceanRequest,
            PaginatedCrustaceanResponse,
            ApiResponse<CrustaceanResponse>,
        )
    ),
    tags(
        (name = "Health", description = "Service health check endpoints"),
        (name = "Crustaceans", description = "Crustacean catalogue: lobsters, prawns and shrimps"),
    ),
    info(
        title = "Crustaceans API",
        version = "1.0.0",
        description = "REST API for cataloguing crustacean species",
        license(name = "MIT"),
    )
)]
pub struct ApiDoc;

async fn endpoint_not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Endpoint not found")),
    )
}

/// Create the API router with all routes
pub fn create_api_router(
    service: Arc<CrustaceanService>,
    db: DatabaseConnection,
    metrics_handle: PrometheusHandle,
) -> Router {
    let crustacean_routes = Router::new()
        .route(
            "/",
            get(crustaceans::list_crustaceans).post(crustaceans::create_crustacean),
        )
        .route(
            "/{id}",
            get(crustaceans::get_crustacean)
                .put(crustaceans::update_crustacean)
                .delete(crustaceans::delete_crustacean),
        )
        .with_state(CrustaceanState { service });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: metrics_handle,
        });

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/", get(health::index))
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/crustaceans", crustacean_routes)
        .fallback(endpoint_not_found)
        // Middleware
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Response};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::database::test_support::memory_database;
    use crate::infrastructure::SeaOrmCrustaceanRepository;

    async fn app() -> Router {
        let db = memory_database().await;
        let repo = Arc::new(SeaOrmCrustaceanRepository::new(db.clone()));
        let service = Arc::new(CrustaceanService::new(repo));
        let handle = PrometheusBuilder::new().build_recorder().handle();
        create_api_router(service, db, handle)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        read(resp).await
    }

    async fn read(resp: Response<Body>) -> (StatusCode, Value) {
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn lobster(name: &str) -> Value {
        json!({
            "name": name,
            "subGroup": "Lobster",
            "description": "Large marine crustacean with large claws",
            "habitat": "North Atlantic Ocean",
            "averageSize": 25.0,
            "scientificName": "Homarus americanus"
        })
    }

    async fn create(app: &Router, name: &str) -> i64 {
        let (status, body) = send(app, "POST", "/api/crustaceans", Some(lobster(name))).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn create_returns_201_with_default_group() {
        let app = app().await;
        let mut payload = lobster("  American Lobster  ");
        payload["group"] = json!("Insects");

        let (status, body) = send(&app, "POST", "/api/crustaceans", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Crustacean created successfully");
        assert_eq!(body["data"]["name"], "American Lobster");
        assert_eq!(body["data"]["group"], "Crustaceans");
        assert_eq!(body["data"]["subGroup"], "Lobster");
        assert!(body["data"]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn duplicate_name_returns_409() {
        let app = app().await;
        create(&app, "American Lobster").await;

        let (status, body) =
            send(&app, "POST", "/api/crustaceans", Some(lobster("American Lobster"))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "A crustacean with this name already exists");
    }

    #[tokio::test]
    async fn invalid_body_returns_400_with_errors() {
        let app = app().await;
        let mut payload = lobster("A");
        payload["averageSize"] = json!(0);

        let (status, body) = send(&app, "POST", "/api/crustaceans", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn malformed_json_returns_400() {
        let app = app().await;
        let req = Request::builder()
            .method("POST")
            .uri("/api/crustaceans")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = read(app.oneshot(req).await.unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn list_paginates_newest_first() {
        let app = app().await;
        for i in 0..25 {
            create(&app, &format!("Lobster {i:02}")).await;
        }

        let (status, body) = send(&app, "GET", "/api/crustaceans?limit=10&page=3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Crustaceans retrieved successfully");
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
        assert_eq!(body["totalRows"], 25);
        assert_eq!(body["totalPages"], 3);
        assert_eq!(body["currentPage"], 3);
        assert_eq!(body["hasNextPage"], false);
        assert_eq!(body["hasPreviousPage"], true);

        let (_, first) = send(&app, "GET", "/api/crustaceans", None).await;
        assert_eq!(first["data"][0]["name"], "Lobster 24");
        assert_eq!(first["data"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn list_filters_by_sub_group() {
        let app = app().await;
        create(&app, "American Lobster").await;
        let mut prawn = lobster("Giant Tiger Prawn");
        prawn["subGroup"] = json!("Prawn");
        send(&app, "POST", "/api/crustaceans", Some(prawn)).await;

        let (_, body) = send(&app, "GET", "/api/crustaceans?subGroup=Prawn&group=", None).await;
        assert_eq!(body["totalRows"], 1);
        assert_eq!(body["data"][0]["name"], "Giant Tiger Prawn");
    }

    #[tokio::test]
    async fn empty_list_has_no_pages() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/api/crustaceans", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["totalPages"], 0);
        assert_eq!(body["hasNextPage"], false);
        assert_eq!(body["hasPreviousPage"], false);
    }

    #[tokio::test]
    async fn bad_pagination_returns_400() {
        let app = app().await;
        for uri in [
            "/api/crustaceans?limit=0",
            "/api/crustaceans?limit=101",
            "/api/crustaceans?page=0",
            "/api/crustaceans?limit=abc",
        ] {
            let (status, body) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["message"], "Invalid pagination parameters");
            assert!(!body["errors"].as_array().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn undecodable_query_returns_envelope_400() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/api/crustaceans?limit=1&limit=2", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid pagination parameters");
        assert!(!body["errors"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn huge_page_returns_empty_page() {
        let app = app().await;
        create(&app, "American Lobster").await;
        create(&app, "Norway Lobster").await;

        let (status, body) = send(
            &app,
            "GET",
            "/api/crustaceans?page=100000000000000000&limit=100",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["totalRows"], 2);
        assert_eq!(body["hasPreviousPage"], true);
        assert_eq!(body["hasNextPage"], false);
    }

    #[tokio::test]
    async fn get_update_delete_round() {
        let app = app().await;
        let id = create(&app, "American Lobster").await;
        let uri = format!("/api/crustaceans/{id}");

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "American Lobster");

        let (status, body) =
            send(&app, "PUT", &uri, Some(json!({"habitat": "Gulf of Maine"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Crustacean updated successfully");
        assert_eq!(body["data"]["habitat"], "Gulf of Maine");
        assert_eq!(body["data"]["name"], "American Lobster");

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "message": "Crustacean deleted successfully"}));

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Crustacean not found");
    }

    #[tokio::test]
    async fn rename_conflict_returns_409() {
        let app = app().await;
        create(&app, "American Lobster").await;
        let id = create(&app, "Spiny Lobster").await;

        let uri = format!("/api/crustaceans/{id}");
        let (status, _) = send(&app, "PUT", &uri, Some(json!({"name": "American Lobster"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&app, "PUT", &uri, Some(json!({"name": "Spiny Lobster"}))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_and_invalid_ids() {
        let app = app().await;
        for method in ["GET", "DELETE"] {
            let (status, _) = send(&app, method, "/api/crustaceans/999", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method}");

            let (status, body) = send(&app, method, "/api/crustaceans/abc", None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
            assert_eq!(body["message"], "Invalid ID parameter");
        }

        let (status, _) = send(&app, "PUT", "/api/crustaceans/999", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_path_returns_envelope_404() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/api/lobsters", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"success": false, "message": "Endpoint not found"}));
    }

    #[tokio::test]
    async fn health_and_index_respond() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["database"]["status"], "ok");

        let (status, body) = send(&app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["availableSubGroups"], json!(["Lobster", "Prawn", "Shrimp"]));
    }

    #[tokio::test]
    async fn openapi_document_lists_crustacean_paths() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/api-doc/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/crustaceans"].is_object());
        assert!(body["paths"]["/api/crustaceans/{id}"].is_object());
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let app = app().await;
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(resp.headers().contains_key("x-request-id"));
    }
}
