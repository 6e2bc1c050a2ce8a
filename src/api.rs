//! REST API for the packaging visualizer.
//!
//! Provides HTTP endpoints for the placement planner, the showcase catalog,
//! the delivery-cluster map data and the session state. Uses Axum as the
//! web framework and supports CORS.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::{
    Router,
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use std::sync::OnceLock;
use tokio::sync::{Mutex, mpsc};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tower_http::cors::{Any, CorsLayer};
use utoipa::{OpenApi, ToSchema};

use crate::catalog::{
    ClusterStatus, DashboardStats, OrderCluster, OrderStatus, PackagingLayer, RecentOrder,
    ScenePlacement, ShowcaseBox, dashboard_stats, order_clusters, showcase_box, showcase_boxes,
};
use crate::config::{ApiConfig, PlannerConfig};
use crate::model::{
    PackageDescriptor, PackageDraft, PlacementEntry, PlacementResult, PlacementSummary,
};
use crate::placement::{plan_placement, plan_placement_with_progress};
use crate::state::{SessionEvent, SessionState, SessionView};
use crate::types::{Dimensions, Fragility};

#[derive(Clone)]
struct ApiState {
    planner_config: PlannerConfig,
    session: Arc<Mutex<SessionState>>,
}

static OPENAPI_DOC: OnceLock<utoipa::openapi::OpenApi> = OnceLock::new();

// SRI hashes verified against https://unpkg.com/swagger-ui-dist@5.17.14/.
const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8" />
        <title>packplan API Docs</title>
        <link
            rel="stylesheet"
            href="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css"
            integrity="sha384-wxLW6kwyHktdDGr6Pv1zgm/VGJh99lfUbzSn6HNHBENZlCN7W602k9VkGdxuFvPn"
            crossorigin="anonymous"
        />
    </head>
    <body>
        <div id="swagger-ui"></div>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-bundle.js"
            integrity="sha384-wmyclcVGX/WhUkdkATwhaK1X1JtiNrr2EoYJ+diV3vj4v6OC5yCeSu+yW13SYJep"
            crossorigin="anonymous"
        ></script>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-standalone-preset.js"
            integrity="sha384-2YH8WDRaj7V2OqU/trsmzSagmk/E2SutiCsGkdgoQwC9pNUJV1u/141DHB6jgs8t"
            crossorigin="anonymous"
        ></script>
        <script>
            window.onload = function () {
                const ui = SwaggerUIBundle({
                    url: "/docs/openapi.json",
                    dom_id: "#swagger-ui",
                    presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],
                    layout: "StandaloneLayout",
                });
                window.ui = ui;
            };
        </script>
    </body>
    </html>"##;

fn openapi_doc() -> &'static utoipa::openapi::OpenApi {
    OPENAPI_DOC.get_or_init(ApiDoc::openapi)
}

/// Embedded Web Assets (HTML, CSS, JS)
#[derive(RustEmbed)]
#[folder = "web/"]
struct WebAssets;

/// Request structure for the placement endpoints.
#[derive(Deserialize, ToSchema)]
#[schema(
    example = json!({
        "packages": [
            {
                "id": "1",
                "name": "Electronics Box",
                "fragility": "High",
                "dimensions": { "width": 30.0, "height": 20.0, "depth": 25.0 },
                "weight": 2.0,
                "handling_instructions": "keep upright",
                "contents": "PlayStation 5"
            }
        ]
    })
)]
pub struct PlacementRequest {
    pub packages: Vec<PackageDescriptor>,
}

impl PlacementRequest {
    fn into_packages(self) -> Result<Vec<PackageDescriptor>, Response> {
        if self.packages.is_empty() {
            return Err(validation_error("Please add at least one package"));
        }
        Ok(self.packages)
    }
}

/// Marker data for one delivery cluster on the map overlay.
#[derive(Serialize, ToSchema)]
pub struct ClusterMarker {
    pub id: u32,
    pub lat: f64,
    pub lng: f64,
    pub status: ClusterStatus,
    pub status_label: &'static str,
    pub count: u32,
    pub area: &'static str,
    /// Fill color as a hex string.
    pub color: &'static str,
    /// Radius in pixels, bucketed by order count.
    pub radius: u32,
}

impl From<OrderCluster> for ClusterMarker {
    fn from(cluster: OrderCluster) -> Self {
        Self {
            radius: cluster.marker_radius(),
            color: cluster.status.marker_color(),
            status_label: cluster.status.label(),
            id: cluster.id,
            lat: cluster.lat,
            lng: cluster.lng,
            status: cluster.status,
            count: cluster.count,
            area: cluster.area,
        }
    }
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    error: String,
    details: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}

fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    details: impl Into<String>,
) -> Response {
    (status, Json(ErrorResponse::new(error, details))).into_response()
}

fn json_deserialize_error(err: JsonRejection) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid JSON data",
        err.to_string(),
    )
}

fn validation_error(details: impl Into<String>) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid input data",
        details,
    )
}

fn parse_placement_request(
    payload: Result<Json<PlacementRequest>, JsonRejection>,
) -> Result<Vec<PackageDescriptor>, Response> {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(err) => return Err(json_deserialize_error(err)),
    };
    payload.into_packages()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handle_placement,
        handle_placement_stream,
        serve_catalog,
        serve_catalog_entry,
        serve_clusters,
        serve_dashboard,
        serve_session,
        handle_session_event
    ),
    components(
        schemas(
            PlacementRequest,
            PlacementResult,
            PlacementEntry,
            PlacementSummary,
            PackageDescriptor,
            PackageDraft,
            Dimensions,
            Fragility,
            ErrorResponse,
            ShowcaseBox,
            PackagingLayer,
            ScenePlacement,
            ClusterMarker,
            ClusterStatus,
            DashboardStats,
            RecentOrder,
            OrderStatus,
            SessionEvent,
            SessionView
        )
    ),
    tags(
        (name = "placement", description = "Placement planning endpoints"),
        (name = "catalog", description = "Showcase boxes and demo data"),
        (name = "session", description = "Session state transitions")
    )
)]
struct ApiDoc;

/// Starts the API server.
///
/// Configures CORS for cross-origin requests from the frontend.
/// Blocks until the server is terminated.
pub async fn start_api_server(config: ApiConfig, planner_config: PlannerConfig) {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let state = ApiState {
        planner_config,
        session: Arc::new(Mutex::new(SessionState::new())),
    };

    let app = Router::new()
        // API endpoints
        .route("/placement", post(handle_placement))
        .route("/placement_stream", post(handle_placement_stream))
        .route("/catalog", get(serve_catalog))
        .route("/catalog/{id}", get(serve_catalog_entry))
        .route("/clusters", get(serve_clusters))
        .route("/dashboard", get(serve_dashboard))
        .route("/session", get(serve_session))
        .route("/session/events", post(handle_session_event))
        // API documentation
        .route("/docs/openapi.json", get(serve_openapi_json))
        .route("/docs", get(serve_openapi_ui))
        // Web-UI (embedded)
        .route("/", get(serve_index))
        .route("/{*path}", get(serve_static))
        .layer(cors)
        .with_state(state);

    let addr = config.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            panic!("❌ Could not bind API server to {}: {}", addr, err);
        }
    };

    let display_host = config.display_host().to_string();
    println!(
        "🚀 Server running on http://{}:{}",
        display_host,
        config.port()
    );
    if config.binds_to_all_interfaces() && config.uses_default_host() {
        println!("💡 Local access: http://localhost:{}", config.port());
    }
    println!("📦 API Endpoints:");
    println!("   - POST /placement");
    println!("   - POST /placement_stream");
    println!("   - GET  /catalog, /clusters, /dashboard");
    println!("   - GET  /session, POST /session/events");
    println!("📑 Documentation:");
    println!("   - GET /docs");
    println!("   - GET /docs/openapi.json");
    println!("🌐 Web-UI: http://{}:{}", display_host, config.port());

    if let Err(err) = axum::serve(listener, app).await {
        eprintln!("❌ API server terminated with an error: {err}");
    }
}

/// Handler for POST /placement.
///
/// Takes a list of packages and computes stacking order, scene placements
/// and the aggregate summary.
#[utoipa::path(
    post,
    path = "/placement",
    request_body = PlacementRequest,
    responses(
        (status = 200, description = "Placement computed", body = PlacementResult),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Empty package list or malformed request",
            body = ErrorResponse
        )
    ),
    tag = "placement"
)]
async fn handle_placement(
    payload: Result<Json<PlacementRequest>, JsonRejection>,
) -> impl IntoResponse {
    let packages = match parse_placement_request(payload) {
        Ok(packages) => packages,
        Err(response) => return response,
    };

    println!("📥 New placement request: {} packages", packages.len());
    let result = plan_placement(packages);
    println!(
        "📦 Result: {} entries, efficiency {}%",
        result.entry_count(),
        result.summary.efficiency
    );

    (StatusCode::OK, Json(result)).into_response()
}

/// Handler for POST /placement_stream (SSE).
///
/// Streams placement events as Server-Sent Events after the configured
/// cosmetic processing delay. The delay sits here, in the orchestration
/// layer; the planner itself runs synchronously and near-instantly.
#[utoipa::path(
    post,
    path = "/placement_stream",
    request_body = PlacementRequest,
    responses(
        (
            status = 200,
            description = "Streams placement events",
            content_type = "text/event-stream",
            body = String
        ),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Empty package list or malformed request",
            body = ErrorResponse
        )
    ),
    tag = "placement"
)]
async fn handle_placement_stream(
    State(state): State<ApiState>,
    payload: Result<Json<PlacementRequest>, JsonRejection>,
) -> impl IntoResponse {
    let packages = match parse_placement_request(payload) {
        Ok(packages) => packages,
        Err(response) => return response,
    };

    let (tx, rx) = mpsc::channel::<String>(32);
    let delay = state.planner_config.processing_delay();

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tokio::task::spawn_blocking(move || {
            plan_placement_with_progress(packages, |evt| {
                if let Ok(json) = serde_json::to_string(evt) {
                    if tx.blocking_send(json).is_err() {
                        // Receiver has closed the stream; remaining events are discarded.
                        return;
                    }
                }
            });
        })
        .await;
    });

    let stream = ReceiverStream::new(rx)
        .map(|msg| Ok::<_, std::convert::Infallible>(Event::default().data(msg)));
    Sse::new(stream)
        .keep_alive(
            KeepAlive::new()
                .interval(std::time::Duration::from_secs(10))
                .text("keep-alive"),
        )
        .into_response()
}

/// Handler for GET /catalog.
#[utoipa::path(
    get,
    path = "/catalog",
    responses((status = 200, description = "Showcase boxes", body = [ShowcaseBox])),
    tag = "catalog"
)]
async fn serve_catalog() -> impl IntoResponse {
    Json(showcase_boxes())
}

/// Handler for GET /catalog/{id}.
#[utoipa::path(
    get,
    path = "/catalog/{id}",
    params(("id" = u32, Path, description = "Showcase box id")),
    responses(
        (status = 200, description = "Showcase box details", body = ShowcaseBox),
        (status = NOT_FOUND, description = "Unknown box id", body = ErrorResponse)
    ),
    tag = "catalog"
)]
async fn serve_catalog_entry(Path(id): Path<u32>) -> Response {
    match showcase_box(id) {
        Some(entry) => (StatusCode::OK, Json(entry)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "Box Not Found",
            format!("The requested box '{id}' could not be found"),
        ),
    }
}

/// Handler for GET /clusters.
#[utoipa::path(
    get,
    path = "/clusters",
    responses((status = 200, description = "Delivery cluster markers", body = [ClusterMarker])),
    tag = "catalog"
)]
async fn serve_clusters() -> impl IntoResponse {
    let markers: Vec<ClusterMarker> = order_clusters().into_iter().map(Into::into).collect();
    Json(markers)
}

/// Handler for GET /dashboard.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses((status = 200, description = "Dashboard stats", body = DashboardStats)),
    tag = "catalog"
)]
async fn serve_dashboard() -> impl IntoResponse {
    Json(dashboard_stats())
}

/// Handler for GET /session.
#[utoipa::path(
    get,
    path = "/session",
    responses((status = 200, description = "Current session view", body = SessionView)),
    tag = "session"
)]
async fn serve_session(State(state): State<ApiState>) -> impl IntoResponse {
    let session = state.session.lock().await;
    Json(session.current_view())
}

/// Handler for POST /session/events.
///
/// Applies exactly one session event and returns the resulting view.
/// Rejected events (incomplete draft, compute over an empty list) leave the
/// state untouched and set the `notice` field.
#[utoipa::path(
    post,
    path = "/session/events",
    request_body = SessionEvent,
    responses(
        (status = 200, description = "Session view after the event", body = SessionView),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Malformed event",
            body = ErrorResponse
        )
    ),
    tag = "session"
)]
async fn handle_session_event(
    State(state): State<ApiState>,
    payload: Result<Json<SessionEvent>, JsonRejection>,
) -> Response {
    let Json(event) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };

    let mut session = state.session.lock().await;
    let view = session.apply(event);
    (StatusCode::OK, Json(view)).into_response()
}

/// Serves the index.html main page
async fn serve_index() -> Response {
    match WebAssets::get("index.html") {
        Some(content) => Html(content.data).into_response(),
        None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}

/// Serves static assets (JS, CSS, etc.)
async fn serve_static(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    match WebAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}

async fn serve_openapi_json(State(_state): State<ApiState>) -> impl IntoResponse {
    Json(openapi_doc())
}

async fn serve_openapi_ui(State(_state): State<ApiState>) -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_doc_lists_expected_paths() {
        let doc = openapi_doc();
        let paths = &doc.paths.paths;
        for path in [
            "/placement",
            "/placement_stream",
            "/catalog",
            "/catalog/{id}",
            "/clusters",
            "/dashboard",
            "/session",
            "/session/events",
        ] {
            assert!(
                paths.contains_key(path),
                "OpenAPI documentation is missing the {} path",
                path
            );
        }
    }

    #[test]
    fn openapi_doc_contains_key_schemas() {
        let doc = openapi_doc();
        let components = doc
            .components
            .as_ref()
            .expect("OpenAPI documentation contains no components");
        let schemas = &components.schemas;
        for name in [
            "PlacementRequest",
            "PlacementResult",
            "SessionEvent",
            "SessionView",
            "ShowcaseBox",
            "ErrorResponse",
        ] {
            assert!(
                schemas.contains_key(name),
                "Expected schema '{}' is missing from the OpenAPI document",
                name
            );
        }
    }

    #[test]
    fn placement_request_parses_package_list() {
        let json = r#"{
            "packages": [
                {
                    "id": "1",
                    "name": "Electronics Box",
                    "fragility": "High",
                    "dimensions": { "width": 30.0, "height": 20.0, "depth": 25.0 },
                    "weight": 2.0,
                    "handling_instructions": "keep upright",
                    "contents": "PlayStation 5"
                }
            ]
        }"#;
        let request: PlacementRequest = serde_json::from_str(json).expect("Should parse");
        assert_eq!(request.packages.len(), 1);
        assert_eq!(request.packages[0].fragility, Fragility::High);
    }

    #[test]
    fn empty_package_list_is_rejected() {
        let request = PlacementRequest {
            packages: Vec::new(),
        };
        assert!(request.into_packages().is_err());
    }

    #[test]
    fn cluster_marker_carries_presentation_fields() {
        let marker: ClusterMarker = order_clusters().remove(0).into();
        assert_eq!(marker.status, ClusterStatus::HighPriority);
        assert_eq!(marker.color, "#ef4444");
        assert_eq!(marker.status_label, "High Priority");
        assert_eq!(marker.radius, 10); // count 8 falls in the >5 bucket
    }
}
