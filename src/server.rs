//! Static host for the built site.
//!
//! Serves the Trunk output directory, answers unknown paths with
//! `index.html`, and tags every response with a request id.

use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::{self, Next},
    response::Response,
    Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8080;
const PORT_BOUNDS: (u16, u16) = (1, u16::MAX);
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_LOG_LEVEL: Level = Level::INFO;
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    pub dist_dir: PathBuf,
    pub log_level: Level,
}

impl HostConfig {
    /// Reads `PORT`, `SITE_DIST_DIR` and `LOG_LEVEL`. Missing or malformed
    /// values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: parse_u16_with_bounds(lookup("PORT"), DEFAULT_PORT, PORT_BOUNDS),
            dist_dir: non_empty(lookup("SITE_DIST_DIR"))
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR)),
            log_level: parse_log_level(lookup("LOG_LEVEL"), DEFAULT_LOG_LEVEL),
        }
    }

    fn index_path(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u16_with_bounds(value: Option<String>, default: u16, bounds: (u16, u16)) -> u16 {
    value
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(value: Option<String>, default: Level) -> Level {
    match non_empty(value)
        .map(|value| value.to_ascii_lowercase())
        .as_deref()
    {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => default,
    }
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

async fn tag_request(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = resolve_request_id(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = started.elapsed().as_millis() as u64,
        "request served"
    );
    response
}

/// Static files from `dist_dir`; any path without a file gets the page
/// shell so the client can render it.
pub fn router(config: &HostConfig) -> Router {
    let static_service =
        ServeDir::new(&config.dist_dir).fallback(ServeFile::new(config.index_path()));

    Router::new()
        .fallback_service(static_service)
        .layer(middleware::from_fn(tag_request))
}

fn init_logging(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_ascii_lowercase()));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init();
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = HostConfig::from_env();
    init_logging(config.log_level);

    let bind_address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(
        port = config.port,
        dist_dir = %config.dist_dir.display(),
        "server listening"
    );

    axum::serve(listener, router(&config)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn config_from(pairs: &[(&str, &str)]) -> HostConfig {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        HostConfig::from_lookup(|name| values.get(name).cloned())
    }

    fn site_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("index.html"), "<main id=\"app\"></main>")
            .expect("write index");
        std::fs::write(dir.path().join("styles.css"), "body{}").expect("write stylesheet");
        dir
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = config_from(&[]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "0"), ("SITE_DIST_DIR", "  "), ("LOG_LEVEL", "loud")]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn explicit_values_are_trimmed_and_used() {
        let config = config_from(&[
            ("PORT", " 3000 "),
            ("SITE_DIST_DIR", "public"),
            ("LOG_LEVEL", "DEBUG"),
        ]);

        assert_eq!(config.port, 3000);
        assert_eq!(config.index_path(), PathBuf::from("public/index.html"));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn request_id_prefers_incoming_header() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  edge-42 "));
        assert_eq!(resolve_request_id(&headers), "edge-42");

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static(" "));
        let generated = resolve_request_id(&headers);
        assert!(generated.starts_with("req-"));
        assert_ne!(generated, resolve_request_id(&headers));
    }

    #[tokio::test]
    async fn existing_files_are_served_directly() {
        let dir = site_dir();
        let config = HostConfig {
            port: DEFAULT_PORT,
            dist_dir: dir.path().to_path_buf(),
            log_level: DEFAULT_LOG_LEVEL,
        };

        let response = router(&config)
            .oneshot(Request::builder().uri("/styles.css").body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert_eq!(&body[..], b"body{}");
    }

    #[tokio::test]
    async fn unknown_paths_get_the_page_shell_and_echo_request_id() {
        let dir = site_dir();
        let config = HostConfig {
            port: DEFAULT_PORT,
            dist_dir: dir.path().to_path_buf(),
            log_level: DEFAULT_LOG_LEVEL,
        };

        let response = router(&config)
            .oneshot(
                Request::builder()
                    .uri("/projects")
                    .header(REQUEST_ID_HEADER, "req-test")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("req-test")
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert!(body.starts_with(b"<main"));
    }
}
