#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use uuid::Uuid;

use retailops_auth::RecordingNavigator;
use retailops_client::notify::RecordingNotifier;
use retailops_client::storage::keys;
use retailops_client::{ClientConfig, ClientStorage, MemoryStorage, RetailClient};
use retailops_core::{Branch, BranchId};

pub const GOOD_TOKEN: &str = "good-token";
pub const REFRESHED_TOKEN: &str = "refreshed-token";
pub const PASSWORD: &str = "secret123";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
}

#[derive(Clone, Default)]
pub struct Backend {
    requests: Arc<Mutex<Vec<Recorded>>>,
    unit_failures: Arc<AtomicUsize>,
}

impl Backend {
    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn total(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_query(&self, method: &str, path: &str) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .map(|r| r.query.clone())
    }

    /// Make the next `n` unit list requests answer 503.
    pub fn fail_unit_lists(&self, n: usize) {
        self.unit_failures.store(n, Ordering::SeqCst);
    }
}

async fn record(State(backend): State<Backend>, req: Request, next: Next) -> Response {
    backend.requests.lock().unwrap().push(Recorded {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        query: req.uri().query().unwrap_or_default().to_string(),
    });
    next.run(req).await
}

fn paginated(data: Vec<Value>) -> Value {
    let total = data.len();
    json!({
        "data": data,
        "pagination": { "page": 1, "perPage": 10, "total": total, "totalPages": 1 }
    })
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

pub fn item_json(name: &str) -> Value {
    json!({
        "id": Uuid::now_v7().to_string(),
        "code": "BRG-0001",
        "name": name,
        "unitId": Uuid::now_v7().to_string(),
        "categoryId": Uuid::now_v7().to_string(),
        "unitName": "pcs",
        "purchasePrice": 3_000,
        "sellPrice": 4_500,
        "stock": 12,
        "minStock": 5
    })
}

fn branch_label(q: &HashMap<String, String>) -> String {
    q.get("branchId").cloned().unwrap_or_else(|| "none".to_string())
}

async fn profile(headers: HeaderMap) -> Response {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if auth == format!("Bearer {GOOD_TOKEN}") || auth == format!("Bearer {REFRESHED_TOKEN}") {
        Json(json!({
            "data": {
                "id": Uuid::now_v7().to_string(),
                "name": "Sari",
                "username": "sari",
                "role": "cashier",
                "permissions": ["dashboard.read", "item.read"]
            }
        }))
        .into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Token expired")
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == PASSWORD {
        Json(json!({ "data": { "token": GOOD_TOKEN, "refreshToken": "refresh-1" } })).into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Invalid username or password")
    }
}

async fn refresh(Json(body): Json<Value>) -> Response {
    if body["refreshToken"] == "refresh-1" {
        Json(json!({ "data": { "token": REFRESHED_TOKEN, "refreshToken": "refresh-2" } })).into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Refresh token revoked")
    }
}

async fn list_items(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    Json(paginated(vec![item_json(&format!("Item {}", branch_label(&q)))]))
}

async fn item_detail(Path(id): Path<String>) -> Json<Value> {
    let mut item = item_json("Detail");
    item["id"] = json!(id);
    Json(json!({ "data": item }))
}

async fn create_item(Json(body): Json<Value>) -> Response {
    if body["code"] == "DUP" {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "Code already used");
    }
    let name = body["name"].as_str().unwrap_or("New item");
    Json(json!({ "data": item_json(name) })).into_response()
}

async fn front_stock(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    Json(paginated(vec![json!({
        "itemId": Uuid::now_v7().to_string(),
        "code": "BRG-0001",
        "name": format!("Front {}", branch_label(&q)),
        "stock": 4,
        "sellPrice": 4_500
    })]))
}

async fn list_adjustments() -> Json<Value> {
    Json(paginated(Vec::new()))
}

async fn create_adjustment(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "data": {
            "id": Uuid::now_v7().to_string(),
            "branchId": body["branchId"],
            "itemId": body["itemId"],
            "delta": body["delta"],
            "reason": body["reason"],
            "createdAt": "2026-03-01T09:30:00Z"
        }
    }))
}

async fn list_members() -> Json<Value> {
    Json(paginated(vec![json!({
        "id": Uuid::now_v7().to_string(),
        "code": "MBR-01",
        "name": "Budi",
        "points": 120
    })]))
}

async fn delete_member() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn list_units(State(backend): State<Backend>) -> Response {
    let failing = backend
        .unit_failures
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if failing {
        return error(StatusCode::SERVICE_UNAVAILABLE, "Server under maintenance");
    }
    Json(paginated(vec![json!({ "id": Uuid::now_v7().to_string(), "name": "pcs" })])).into_response()
}

async fn create_unit() -> Response {
    error(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable")
}

async fn overview(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    let sales = if q.contains_key("branchId") { 250_000 } else { 0 };
    Json(json!({
        "data": {
            "totalSales": sales,
            "totalTransactions": 3,
            "totalItemsSold": 9,
            "cashIn": 300_000,
            "cashOut": 50_000,
            "lowStockItems": []
        }
    }))
}

async fn receipt(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "data": {
            "transactionId": id,
            "branchName": "Toko Sinar Jaya",
            "branchAddress": "Jl. Merdeka No. 10",
            "cashierName": "Sari",
            "createdAt": "2026-03-01T09:30:00Z",
            "lines": [
                { "name": "Teh Botol", "quantity": 2, "price": 4_500, "subtotal": 9_000 }
            ],
            "total": 9_000,
            "paid": 10_000,
            "change": 1_000
        }
    }))
}

async fn labels(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    let ids = q.get("ids").cloned().unwrap_or_default();
    let labels: Vec<Value> = ids
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|id| json!({ "itemId": id, "code": "BRG", "name": "Teh Botol", "sellPrice": 4_500 }))
        .collect();
    Json(json!({ "data": labels }))
}

fn router(backend: Backend) -> Router {
    let api = Router::new()
        .route("/auth/profile", get(profile))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/items", get(list_items).post(create_item))
        .route("/items/front-stock", get(front_stock))
        .route("/items/:id", get(item_detail))
        .route("/stock-adjustments", get(list_adjustments).post(create_adjustment))
        .route("/members", get(list_members))
        .route("/members/:id", delete(delete_member))
        .route("/units", get(list_units).post(create_unit))
        .route("/overview", get(overview))
        .route("/reports/receipt/:id", get(receipt))
        .route("/reports/labels", get(labels));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend)
}

pub struct TestServer {
    pub base_url: String,
    pub backend: Backend,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let backend = Backend::default();
        let app = router(backend.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            backend,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub struct Harness {
    pub server: TestServer,
    pub client: RetailClient,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    /// Client pointed at a fresh backend, no token stored, not started.
    pub async fn new() -> Self {
        let server = TestServer::spawn().await;
        let storage = Arc::new(MemoryStorage::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let config = ClientConfig::new(server.base_url.clone()).with_stale_time(Duration::from_secs(60));
        let client = RetailClient::new(config, storage.clone(), notifier.clone(), navigator.clone())
            .expect("client builds");
        Self {
            server,
            client,
            storage,
            navigator,
            notifier,
        }
    }

    /// Started client with a valid token.
    pub async fn logged_in() -> Self {
        let h = Self::new().await;
        h.storage.set(keys::TOKEN, GOOD_TOKEN).await.unwrap();
        h.client.start().await;
        h
    }

    pub fn backend(&self) -> &Backend {
        &self.server.backend
    }

    pub async fn select_branch(&self, name: &str) -> Branch {
        let branch = Branch {
            id: BranchId::new(),
            name: name.to_string(),
            address: None,
            phone: None,
        };
        self.client.branch().set_branch(branch.clone()).await.unwrap();
        branch
    }
}
