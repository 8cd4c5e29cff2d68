//! HTTP 인터페이스(axum 라우터와 서버 실행).

mod handlers;
pub mod middleware;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::interface::composition::AppComposition;

pub use middleware::RateLimiter;

/// 라우터를 구성한다. `/refine`에만 클라이언트별 요청 제한을 건다.
/// 분당 허용량이 0이면 제한을 두지 않는다.
pub fn create_router(app: Arc<AppComposition>) -> Router {
    let per_minute = app.config().rate_limit_per_minute();

    let mut refine = Router::new().route("/refine", post(handlers::refine));
    if per_minute > 0 {
        refine = refine.route_layer(axum::middleware::from_fn_with_state(
            RateLimiter::per_minute(per_minute)
                .trusting_proxy_headers(app.config().trust_proxy_headers()),
            middleware::rate_limit_middleware,
        ));
    }

    Router::new()
        .route("/download", get(handlers::download))
        .route("/healthz", get(handlers::healthz))
        .merge(refine)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app)
}

/// 주소에 바인딩하고 종료될 때까지 요청을 처리한다.
pub async fn serve(app: Arc<AppComposition>, bind: &str, port: u16) -> Result<()> {
    let addr = format!("{bind}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(
        listener,
        create_router(app).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server terminated")
}
