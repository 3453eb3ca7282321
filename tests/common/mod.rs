#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use mealplan_client::{App, ClientConfig, MemoryView};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub cookie: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    body: String,
    set_cookie: Option<String>,
}

#[derive(Default)]
struct BackendState {
    requests: Vec<Recorded>,
    routes: HashMap<(String, String), Canned>,
}

/// In-process stand-in for the meal-planning server. Every route answers
/// with whatever the test configured and records what it received.
#[derive(Clone, Default)]
pub struct Backend {
    inner: Arc<Mutex<BackendState>>,
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.respond_raw(method, path, status, &body.to_string())
    }

    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        self.inner.lock().unwrap().routes.insert(
            (method.to_string(), path.to_string()),
            Canned {
                status,
                body: body.to_string(),
                set_cookie: None,
            },
        );
        self
    }

    pub fn respond_with_cookie(
        &self,
        method: &str,
        path: &str,
        body: Value,
        cookie: &str,
    ) -> &Self {
        self.inner.lock().unwrap().routes.insert(
            (method.to_string(), path.to_string()),
            Canned {
                status: 200,
                body: body.to_string(),
                set_cookie: Some(cookie.to_string()),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");

        let app = Router::new().fallback(handle).with_state(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        format!("http://{}", addr)
    }
}

async fn handle(
    State(backend): State<Backend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        cookie: headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };

    let canned = {
        let mut state = backend.inner.lock().unwrap();
        state.requests.push(recorded);
        state
            .routes
            .get(&(method.to_string(), uri.path().to_string()))
            .cloned()
    };

    let Some(canned) = canned else {
        return (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"error": "not found"}"#,
        )
            .into_response();
    };

    let status = StatusCode::from_u16(canned.status).expect("valid status");
    let mut response = (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        canned.body,
    )
        .into_response();

    if let Some(cookie) = canned.set_cookie {
        response
            .headers_mut()
            .insert(header::SET_COOKIE, cookie.parse().expect("cookie header"));
    }

    response
}

pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        login_redirect_delay: Duration::from_millis(20),
        register_redirect_delay: Duration::from_millis(20),
        ..ClientConfig::default().with_base_url(base_url)
    }
}

/// A running fake backend plus an app wired to an in-memory page.
pub struct TestEnv {
    pub backend: Backend,
    pub view: Arc<MemoryView>,
    pub app: App<MemoryView>,
}

impl TestEnv {
    pub async fn new(backend: Backend) -> Self {
        let base_url = backend.spawn().await;
        let view = Arc::new(MemoryView::new());
        let app = App::new(test_config(&base_url), Arc::clone(&view)).expect("build app");

        Self { backend, view, app }
    }

    /// App pointed at a port nothing listens on; every request fails in
    /// transport.
    pub async fn offline() -> Self {
        let base_url = closed_port_url().await;
        let view = Arc::new(MemoryView::new());
        let app = App::new(test_config(&base_url), Arc::clone(&view)).expect("build app");

        Self {
            backend: Backend::new(),
            view,
            app,
        }
    }

    pub fn alert_message(&self) -> Option<String> {
        self.view.alert().map(|a| a.message)
    }
}

/// Base URL where nothing is listening.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}", addr)
}
