//! Prometheus metrics for the AI Ops Monitor CLI.
//!
//! Exposes:
//! - `aiops_monitor_command_duration_seconds` (histogram)
//! - `aiops_monitor_command_total` (counter with status)
//! - `aiops_monitor_sessions_processed_total` (counter)
//! - process metrics via `process` collector
//!
//! The analytics engine itself records nothing; only the CLI layer is
//! instrumented.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use once_cell::sync::Lazy;
use prometheus::process_collector::ProcessCollector;
use prometheus::{
    default_registry, register_histogram_vec, register_int_counter, register_int_counter_vec,
    Encoder, HistogramVec, IntCounter, IntCounterVec, TextEncoder,
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

static PROCESS_COLLECTOR: Lazy<()> = Lazy::new(|| {
    if let Err(err) = default_registry().register(Box::new(ProcessCollector::for_self())) {
        warn!("Failed to register process collector: {}", err);
    }
});

static COMMAND_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    // Exponential buckets from 10ms up to ~40 seconds.
    let buckets =
        prometheus::exponential_buckets(0.01, 2.0, 12).expect("failed to create histogram buckets");
    register_histogram_vec!(
        "aiops_monitor_command_duration_seconds",
        "CLI command duration in seconds",
        &["command"],
        buckets
    )
    .expect("failed to register command duration histogram")
});

static COMMAND_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "aiops_monitor_command_total",
        "Total command executions by status",
        &["command", "status"]
    )
    .expect("failed to register command counter")
});

static SESSIONS_PROCESSED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "aiops_monitor_sessions_processed_total",
        "Session records processed across all commands"
    )
    .expect("failed to register sessions counter")
});

/// Ensure collectors are registered.
fn init_collectors() {
    Lazy::force(&PROCESS_COLLECTOR);
    Lazy::force(&COMMAND_DURATION);
    Lazy::force(&COMMAND_TOTAL);
    Lazy::force(&SESSIONS_PROCESSED);
}

/// Record command completion with duration and status.
pub fn record_command(command: &'static str, duration: Duration, success: bool) {
    init_collectors();
    COMMAND_DURATION
        .with_label_values(&[command])
        .observe(duration.as_secs_f64());
    COMMAND_TOTAL
        .with_label_values(&[command, if success { "ok" } else { "error" }])
        .inc();
}

/// Record how many session records a command processed.
pub fn record_sessions_processed(count: u64) {
    init_collectors();
    SESSIONS_PROCESSED.inc_by(count);
}

async fn metrics_response() -> Result<Response<Full<Bytes>>, Infallible> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", err);
        return Ok(Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Full::from("encode error"))
            .unwrap());
    }

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(hyper::header::CONTENT_TYPE, encoder.format_type())
        .body(Full::from(buffer))
        .unwrap())
}

async fn handle_request(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    match req.uri().path() {
        "/metrics" => metrics_response().await,
        _ => Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(Bytes::new()))
            .unwrap()),
    }
}

async fn serve(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Prometheus metrics endpoint started");

    loop {
        let (stream, peer) = listener.accept().await?;
        let service = service_fn(handle_request);
        let io = TokioIo::new(stream);

        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                warn!(?peer, "Metrics connection error: {}", err);
            }
        });
    }
}

/// Spawn the metrics HTTP endpoint on the given address.
pub fn spawn_metrics_server(addr: SocketAddr) {
    init_collectors();
    tokio::spawn(async move {
        if let Err(err) = serve(addr).await {
            error!(%addr, "Metrics server failed: {}", err);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn records_command_metrics_by_status() {
        let cmd = "test_command_status";

        record_command(cmd, Duration::from_millis(120), true);
        record_command(cmd, Duration::from_millis(80), true);
        record_command(cmd, Duration::from_secs(2), false);

        assert_eq!(COMMAND_TOTAL.with_label_values(&[cmd, "ok"]).get(), 2);
        assert_eq!(COMMAND_TOTAL.with_label_values(&[cmd, "error"]).get(), 1);
        assert_eq!(
            COMMAND_DURATION.with_label_values(&[cmd]).get_sample_count(),
            3
        );
    }

    #[test]
    fn records_sessions_processed() {
        let before = SESSIONS_PROCESSED.get();
        record_sessions_processed(250);
        assert_eq!(SESSIONS_PROCESSED.get(), before + 250);
    }

    #[test]
    fn init_collectors_can_be_called_multiple_times() {
        init_collectors();
        init_collectors();
        init_collectors();
        // Should not panic
    }

    #[tokio::test]
    async fn metrics_response_contains_registered_metrics() {
        let cmd = "test_metrics_response";
        record_command(cmd, Duration::from_millis(10), true);

        let response = metrics_response().await.expect("metrics response");
        assert_eq!(response.status(), StatusCode::OK);

        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect metrics body")
            .to_bytes();
        let text = String::from_utf8(body_bytes.to_vec()).expect("utf-8 metrics body");
        assert!(text.contains("aiops_monitor_command_total"));
        assert!(text.contains(cmd));
    }

    #[tokio::test]
    async fn metrics_response_has_correct_content_type() {
        let response = metrics_response().await.expect("metrics response");

        let content_type = response.headers().get(hyper::header::CONTENT_TYPE);
        assert!(content_type.is_some());

        let ct_str = content_type.unwrap().to_str().unwrap();
        assert!(ct_str.contains("text/"));
    }
}
