//! Per-request spans and latency logging for the API.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

/// Trace layer type returned by [`layer`].
pub type HttpTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>>;

/// Creates the tracing layer wrapped around every route.
///
/// Each request gets an `INFO` span carrying method, path and HTTP version.
/// Headers are left out of the span so bearer tokens never reach the logs.
/// Request start is logged at `DEBUG`; the response at `INFO` with status and
/// latency. 5xx responses are additionally logged at `ERROR`.
///
/// The layer sits inside path normalization, so `/todo/` is recorded as
/// `/todo`.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST uri=/todo version=HTTP/1.1}: finished processing request latency=4 ms status=201
/// INFO request{method=PUT uri=/general/users/7 version=HTTP/1.1}: finished processing request latency=31 ms status=400
/// ERROR request{method=GET uri=/todo/3 version=HTTP/1.1}: response failed classification=Status code: 500 Internal Server Error latency=2 ms
/// ```
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .merge(todo_routes())
///     .with_state(state)
///     .layer(tracing::layer());
/// ```
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(
            DefaultMakeSpan::new()
                .level(Level::INFO)
                .include_headers(false),
        )
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
