//! Stub upstream server for handler tests

use axum::Router;
use axum::http::{HeaderMap, StatusCode, Uri, header::AUTHORIZATION};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Request seen by the stub: path with query, and the Authorization header
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub uri: String,
    pub authorization: Option<String>,
}

pub struct StubUpstream {
    pub base: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl StubUpstream {
    /// Serve `body` with `status` for every path
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();

        let router = Router::new().fallback(move |uri: Uri, headers: HeaderMap| {
            let recorder = recorder.clone();
            async move {
                let authorization = headers
                    .get(AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                recorder.lock().unwrap().push(SeenRequest {
                    uri: uri.to_string(),
                    authorization,
                });
                (status, body)
            }
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            seen,
        }
    }

    /// Serve `body` with 200 OK
    pub async fn ok(body: &'static str) -> Self {
        Self::start(StatusCode::OK, body).await
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// Base URL of a port nothing listens on
pub async fn refused_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
