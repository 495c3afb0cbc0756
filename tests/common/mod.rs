//! Local stand-ins for the origin API and the key-value REST service.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

// == Fake Origin ==

/// Origin API double with request counting and a failure switch.
#[derive(Default)]
pub struct FakeOrigin {
    pub requests: AtomicUsize,
    pub failing: AtomicBool,
    pub delay_ms: AtomicU64,
}

impl FakeOrigin {
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Makes every following reply wait `ms` milliseconds.
    pub fn slow_down(&self, ms: u64) {
        self.delay_ms.store(ms, Ordering::SeqCst);
    }
}

type OriginReply = Result<Json<Value>, StatusCode>;

async fn record(origin: &FakeOrigin) -> Result<(), StatusCode> {
    origin.requests.fetch_add(1, Ordering::SeqCst);
    let delay = origin.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    if origin.failing.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(())
}

fn post_body(id: u64) -> Value {
    // Post 99 is an orphan without an author
    if id == 99 {
        return json!({"id": id, "title": format!("post {}", id)});
    }
    json!({"id": id, "userId": (id % 3) + 1, "title": format!("post {}", id)})
}

fn user_body(id: u64) -> Value {
    json!({"id": id, "name": format!("user {}", id)})
}

async fn posts(State(o): State<Arc<FakeOrigin>>) -> OriginReply {
    record(&o).await?;
    Ok(Json(json!([post_body(1), post_body(2), post_body(3)])))
}

async fn post_by_id(State(o): State<Arc<FakeOrigin>>, Path(id): Path<u64>) -> OriginReply {
    record(&o).await?;
    Ok(Json(post_body(id)))
}

async fn users(State(o): State<Arc<FakeOrigin>>) -> OriginReply {
    record(&o).await?;
    Ok(Json(json!([user_body(1), user_body(2)])))
}

async fn user_by_id(State(o): State<Arc<FakeOrigin>>, Path(id): Path<u64>) -> OriginReply {
    record(&o).await?;
    Ok(Json(user_body(id)))
}

/// Starts the origin double and returns its base URL.
pub async fn spawn_origin() -> (String, Arc<FakeOrigin>) {
    let origin = Arc::new(FakeOrigin::default());
    let app = Router::new()
        .route("/posts", get(posts))
        .route("/posts/:id", get(post_by_id))
        .route("/users", get(users))
        .route("/users/:id", get(user_by_id))
        .with_state(origin.clone());
    (serve(app).await, origin)
}

// == Fake Key-Value Service ==

/// Minimal Redis-over-REST double: GET, SET [EX], DEL, DBSIZE.
pub struct FakeKv {
    pub token: String,
    pub entries: Mutex<HashMap<String, (String, Option<Instant>)>>,
    pub commands: Mutex<Vec<Vec<Value>>>,
    pub broken: AtomicBool,
}

impl FakeKv {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            entries: Mutex::new(HashMap::new()),
            commands: Mutex::new(Vec::new()),
            broken: AtomicBool::new(false),
        }
    }

    /// Commands received so far, by name.
    pub fn command_names(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| c.first().and_then(|v| v.as_str()).map(str::to_string))
            .collect()
    }

    pub fn commands(&self) -> Vec<Vec<Value>> {
        self.commands.lock().unwrap().clone()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), None));
    }

    pub fn break_down(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }
}

fn live(deadline: &Option<Instant>) -> bool {
    deadline.map_or(true, |d| Instant::now() < d)
}

async fn kv_command(
    State(kv): State<Arc<FakeKv>>,
    headers: HeaderMap,
    Json(cmd): Json<Vec<Value>>,
) -> (StatusCode, Json<Value>) {
    if kv.broken.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
    }

    let expected = format!("Bearer {}", kv.token);
    let authorised = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map_or(false, |h| h == expected);
    if !authorised {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Unauthorized"})),
        );
    }

    kv.commands.lock().unwrap().push(cmd.clone());
    let arg = |i: usize| cmd.get(i).and_then(|v| v.as_str()).unwrap_or_default().to_string();
    let mut entries = kv.entries.lock().unwrap();

    let result = match arg(0).as_str() {
        "GET" => match entries.get(&arg(1)) {
            Some((value, deadline)) if live(deadline) => json!(value),
            _ => Value::Null,
        },
        "SET" => {
            let deadline = match (cmd.get(3).and_then(|v| v.as_str()), cmd.get(4)) {
                (Some("EX"), Some(secs)) => secs
                    .as_u64()
                    .map(|s| Instant::now() + Duration::from_secs(s)),
                _ => None,
            };
            entries.insert(arg(1), (arg(2), deadline));
            json!("OK")
        }
        "DEL" => json!(entries.remove(&arg(1)).map_or(0, |_| 1)),
        "DBSIZE" => json!(entries.values().filter(|(_, d)| live(d)).count()),
        other => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": format!("ERR unknown command '{}'", other)})),
            )
        }
    };

    (StatusCode::OK, Json(json!({"result": result})))
}

/// Starts the key-value double and returns its URL.
pub async fn spawn_kv(token: &str) -> (String, Arc<FakeKv>) {
    let kv = Arc::new(FakeKv::new(token));
    let app = Router::new()
        .route("/", post(kv_command))
        .with_state(kv.clone());
    (serve(app).await, kv)
}
