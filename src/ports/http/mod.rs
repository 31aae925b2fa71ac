// src/ports/http/mod.rs
pub mod authors;
pub mod context;
pub mod error;
pub mod notes;
pub mod server;

pub use context::AppContext;
pub use error::ApiError;
pub use server::serve;

use axum::extract::State;
use axum::handler::HandlerWithoutStateExt;
use axum::http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderName, Method, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, Level};

use crate::constants::API_PREFIX;
use crate::domain::AppInfo;
use crate::ports::shell::AppShell;

/// Full application: JSON API under `/api`, static files and the app shell everywhere else.
pub fn router(ctx: AppContext, shell: AppShell) -> Router {
    let api = Router::new()
        .merge(notes::router())
        .merge(authors::router())
        .route("/version", get(version))
        // Known path with an unsupported method is an unknown endpoint too
        .method_not_allowed_fallback(api_not_found)
        .fallback(api_not_found);

    let page = Html(shell.html().to_string());
    let serve_shell = (move || async move { page }).into_service();
    let static_files = ServeDir::new(shell.static_dir()).fallback(serve_shell);

    Router::new()
        .nest(API_PREFIX, api)
        .fallback_service(static_files)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors())
        .with_state(ctx)
}

async fn version(State(ctx): State<AppContext>) -> Json<AppInfo> {
    Json(ctx.info)
}

async fn api_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());
    error!(%detail, "Handler panicked");
    ApiError::Internal(detail).into_response()
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            ORIGIN,
            HeaderName::from_static("x-requested-with"),
            CONTENT_TYPE,
            ACCEPT,
        ])
}
